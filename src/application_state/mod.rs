//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Configuration loading
//! - Input handling
//! - The per-tick loop that feeds input to the engine
//! - A scripted headless session
//!
//! Window and surface creation belong to the graphics backend that implements
//! `RenderSink`; this module only consumes the window events it forwards.

pub mod config;
pub mod input_manager;
pub mod input_state;

use config::WorldConfig;
use input_manager::InputManager;
use winit::{
    event::{MouseButton, WindowEvent},
    keyboard::KeyCode,
};

use crate::engine_state::{frame_stats::FrameStats, rendering::RenderSink, EngineState};

/// Fixed tick length of the headless session (60 ticks per second).
pub const SESSION_TICK: web_time::Duration = web_time::Duration::from_micros(16_667);

/// The running application: the engine plus the input feeding it.
pub struct ApplicationState<S: RenderSink> {
    /// The core engine state and logic
    pub engine_state: EngineState<S>,

    /// Manages input state and event processing
    pub input_manager: InputManager,
}

impl<S: RenderSink> ApplicationState<S> {
    /// Creates the engine and loads the world around the configured start position.
    pub fn new(config: &WorldConfig, render_sink: S) -> Self {
        Self {
            engine_state: EngineState::new(config, render_sink),
            input_manager: InputManager::new(),
        }
    }

    /// Handles window-related events such as focus changes and input events.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn window_event(&mut self, event: &WindowEvent) {
        self.input_manager.intake_input(event);

        if let WindowEvent::Focused(false) = event {
            self.input_manager.release_all();
        }
    }

    /// Handles raw mouse motion.
    pub fn mouse_motion(&mut self, delta: (f64, f64)) {
        self.input_manager.intake_mouse_motion(delta);
    }

    /// Runs one tick: input, camera, streaming, edits, then drawing.
    ///
    /// # Arguments
    /// * `dt` - The time elapsed since the last tick
    pub fn tick(&mut self, dt: web_time::Duration) {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(processed_input);
        self.engine_state.process_input(dt);
        self.engine_state.render();
    }
}

/// Drives a scripted session without a window.
///
/// The camera looks down a little, walks forward for the whole session, removes
/// the voxel it looks at a third of the way in, and places one two thirds of the
/// way in.
///
/// # Returns
/// The statistics after the final tick.
pub fn run_session<S: RenderSink>(config: &WorldConfig, render_sink: S) -> FrameStats {
    let mut application = ApplicationState::new(config, render_sink);
    let frames = config.session_frames;
    let remove_frame = frames / 3;
    let place_frame = 2 * frames / 3;

    application.mouse_motion((0.0, 300.0));
    application.input_manager.set_key(KeyCode::KeyW, true);

    for frame in 0..frames {
        let clicked = if frame == remove_frame {
            Some(MouseButton::Left)
        } else if frame == place_frame {
            Some(MouseButton::Right)
        } else {
            None
        };
        if let Some(button) = clicked {
            application.input_manager.set_mouse_button(button, true);
        }

        application.tick(SESSION_TICK);

        if let Some(button) = clicked {
            application.input_manager.set_mouse_button(button, false);
        }
        if let Some(hit) = application.engine_state.last_edit() {
            log::info!(
                "Frame {}: {:?} at {:?} in chunk {:?}",
                frame,
                hit.outcome,
                hit.target.local,
                hit.target.chunk
            );
        }
        if application.engine_state.quit_requested() {
            break;
        }
    }

    application.engine_state.stats()
}
