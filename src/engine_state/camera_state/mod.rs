//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - Player input processing for camera control
//! - Chunk-based position tracking for world streaming
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Handles player input and updates camera state

use camera::{Camera, CameraController};
use cgmath::{Deg, Point3};

use super::{voxels::chunk::ChunkCoord, PlayerAction};

pub mod camera;

/// Manages the camera and its controller.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Handles player input and camera movement
    pub camera_controller: CameraController,
}

impl CameraState {
    /// Creates a new CameraState at `position`, level and looking down negative Z.
    ///
    /// # Arguments
    /// * `position` - The starting camera position
    /// * `speed` - Movement speed in units per second
    /// * `sensitivity` - Degrees of rotation per unit of mouse motion
    pub fn new(position: Point3<f32>, speed: f32, sensitivity: f32) -> Self {
        CameraState {
            camera: Camera::new(position, camera::DEFAULT_YAW, Deg(0.0)),
            camera_controller: CameraController::new(speed, sensitivity),
        }
    }

    /// Processes player input actions and updates the camera controller state.
    ///
    /// # Arguments
    /// * `actions` - The player's input actions to process
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending controller input to the camera.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the last update
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` if the camera moved or turned
    /// - `None` if no updates were needed
    pub fn update(&mut self, dt: web_time::Duration) -> Option<CameraUpdates> {
        if !self.camera_controller.has_updates() {
            return None;
        }

        self.camera
            .get_controller_updates_and_reset_controller(&mut self.camera_controller, dt);

        Some(CameraUpdates {
            new_chunk_position: ChunkCoord::containing(self.camera.position),
        })
    }

    /// The camera position in world space.
    pub fn position(&self) -> Point3<f32> {
        self.camera.position
    }
}

/// Represents updates to the camera's state that affect game world interaction.
///
/// This is returned by `CameraState::update()` when the camera has moved or turned.
pub struct CameraUpdates {
    /// The chunk the camera is now in
    pub new_chunk_position: ChunkCoord,
}
