//! # Engine State Module
//!
//! The core engine module that ties the voxel world to the camera and the renderer.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning and movement
//! * `rendering` - Meshes and the render sink boundary
//! * `voxels` - Handles voxel data, chunks, streaming and picking
//!
//! ## Tick Order
//!
//! Each tick runs, in order:
//! 1. Player actions are applied to the camera
//! 2. The chunk manager streams chunks around the camera
//! 3. Requested edits are dispatched along the camera ray
//! 4. Every loaded chunk is drawn
//!
//! Everything is synchronous; a tick never returns with work outstanding.

use winit::keyboard::KeyCode;

use camera_state::CameraState;
use frame_stats::{FpsCounter, FrameStats};
use rendering::RenderSink;
use voxels::{
    chunk_manager::ChunkManager,
    picking::{self, EditHit, EditRequest},
};

use crate::application_state::{config::WorldConfig, input_state::ProcessedInputState};

pub mod camera_state;
pub mod frame_stats;
pub mod rendering;
pub mod voxels;

/// The main state container for the voxel engine
///
/// Owns the camera, the chunk manager and the render sink, and drives them
/// once per tick.
pub struct EngineState<S: RenderSink> {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// The loaded world
    chunk_manager: ChunkManager,
    /// Receives meshes and draw calls
    render_sink: S,
    /// Frame timing
    fps_counter: FpsCounter,
    /// The edit applied by the most recent tick, if any
    last_edit: Option<EditHit>,
}

impl<S: RenderSink> EngineState<S> {
    /// Creates a new engine state and streams in the chunks around the start position.
    ///
    /// # Arguments
    ///
    /// * `config` - Seed, render distance and camera settings
    /// * `render_sink` - The renderer meshes are uploaded to
    pub fn new(config: &WorldConfig, mut render_sink: S) -> Self {
        let camera_state = CameraState::new(
            config.camera_start(),
            config.camera_speed,
            config.mouse_sensitivity,
        );

        let mut chunk_manager = ChunkManager::new(config.generator(), config.render_distance);
        let report = chunk_manager.update(camera_state.position(), &mut render_sink);
        log::info!(
            "Generated {} chunks around {:?}",
            report.loaded.len(),
            report.viewer_chunk
        );

        Self {
            camera_state,
            player_actions: PlayerAction::default(),
            chunk_manager,
            render_sink,
            fps_counter: FpsCounter::new(web_time::Instant::now()),
            last_edit: None,
        }
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = PlayerAction::from_input(&input);
    }

    /// Applies the current player actions and streams the world.
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last tick
    pub fn process_input(&mut self, wait_duration: web_time::Duration) {
        self.camera_state.intake_actions(&self.player_actions);
        if let Some(updates) = self.camera_state.update(wait_duration) {
            log::trace!("Camera in chunk {:?}", updates.new_chunk_position);
        }

        self.chunk_manager
            .update(self.camera_state.position(), &mut self.render_sink);

        self.last_edit = picking::dispatch_edit(
            &mut self.chunk_manager,
            self.camera_state.position(),
            self.camera_state.camera.get_view_vec(),
            self.player_actions.edit,
            &mut self.render_sink,
        );
        if self.last_edit.is_none() && !self.player_actions.edit.is_empty() {
            log::debug!("Edit {:?} hit nothing", self.player_actions.edit);
        }
    }

    /// Draws every loaded chunk and records the frame.
    pub fn render(&mut self) {
        self.chunk_manager.render(&mut self.render_sink);
        if let Some(fps) = self.fps_counter.record_frame(web_time::Instant::now()) {
            log::debug!("{} FPS", fps);
        }
    }

    /// Changes the render distance; applied on the next tick.
    pub fn set_render_distance(&mut self, render_distance: i32) {
        self.chunk_manager.set_render_distance(render_distance);
    }

    /// Whether the player asked to quit.
    pub fn quit_requested(&self) -> bool {
        self.player_actions.quit
    }

    /// The edit applied by the most recent tick.
    pub fn last_edit(&self) -> Option<EditHit> {
        self.last_edit
    }

    /// The chunk manager.
    pub fn chunk_manager(&self) -> &ChunkManager {
        &self.chunk_manager
    }

    /// The render sink.
    pub fn render_sink(&self) -> &S {
        &self.render_sink
    }

    /// A snapshot of the debug statistics.
    pub fn stats(&self) -> FrameStats {
        let fps = self.fps_counter.fps();
        FrameStats {
            world: self.chunk_manager.stats(),
            render_distance: self.chunk_manager.render_distance(),
            camera_position: self.camera_state.position(),
            fps,
            frame_time_ms: if fps > 0 { 1000.0 / fps as f32 } else { 0.0 },
        }
    }
}

/// Represents player actions derived from input
///
/// Movement and look are level-triggered; edits and quitting are edge-triggered.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    move_up: bool,
    move_down: bool,

    /// View rotation from mouse motion
    rotate_view: Option<(f64, f64)>,

    /// Voxel edits requested this tick
    edit: EditRequest,
    /// Escape was just pressed
    quit: bool,
}

impl PlayerAction {
    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    pub fn from_input(input: &ProcessedInputState) -> Self {
        PlayerAction {
            move_forward: input.get_key_state(KeyCode::KeyW).is_active(),
            move_backward: input.get_key_state(KeyCode::KeyS).is_active(),
            move_left: input.get_key_state(KeyCode::KeyA).is_active(),
            move_right: input.get_key_state(KeyCode::KeyD).is_active(),
            move_up: input.get_key_state(KeyCode::Space).is_active(),
            move_down: input.get_key_state(KeyCode::ControlLeft).is_active(),
            rotate_view: input.get_mouse_delta(),
            edit: EditRequest::from_input(input),
            quit: input.get_key_state(KeyCode::Escape).is_just_pressed(),
        }
    }

    /// The edits requested this tick.
    pub fn edit(&self) -> EditRequest {
        self.edit
    }
}
