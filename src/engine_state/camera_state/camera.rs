//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and view transform
//! - Camera controller for input processing
//!
//! ## Key Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Accumulates player actions and applies them to the camera

use cgmath::*;
use web_time::Duration;

use crate::engine_state::PlayerAction;

/// Initial yaw; looks down negative Z.
pub const DEFAULT_YAW: Deg<f32> = Deg(-90.0);
/// Movement speed in units per second.
pub const DEFAULT_SPEED: f32 = 13.0;
/// Degrees of rotation per unit of mouse motion.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Pitch limit in either direction.
const PITCH_LIMIT: Deg<f32> = Deg(89.0);

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation (around Y axis)
/// - `pitch`: Vertical rotation, kept within ±89°
/// - `front`, `right`, `up`: The orthonormal view basis derived from yaw and pitch
#[derive(Debug, Clone)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
    /// Normalized vector pointing to the camera's forward
    front: Vector3<f32>,
    /// Normalized vector pointing to the camera's right
    right: Vector3<f32>,
    /// Normalized vector pointing to the camera's up
    up: Vector3<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis). Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch (vertical rotation around X axis). Can be any type that converts to `Rad<f32>`.
    ///
    /// # Returns
    /// A new `Camera` instance with the specified position and orientation.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            front: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: Vector3::unit_y(),
        };
        camera.update_vectors();
        camera
    }

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized 3D vector representing the camera's forward direction
    pub fn get_view_vec(&self) -> Vector3<f32> {
        self.front
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.front, self.up)
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        self.front = Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(Vector3::unit_y()).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Updates the camera's position and orientation based on controller input.
    ///
    /// Rotation is applied first, then movement along the new basis.
    /// Forward and backward movement keep the current height, so looking down
    /// while walking does not sink the camera.
    ///
    /// # Arguments
    /// * `controller` - The camera controller containing input state
    /// * `dt` - Time elapsed since the last update
    pub fn get_controller_updates_and_reset_controller(
        &mut self,
        controller: &mut CameraController,
        dt: Duration,
    ) {
        let velocity = controller.speed * dt.as_secs_f32();

        // Rotate
        self.yaw += Rad::from(Deg(controller.rotate_horizontal * controller.sensitivity));
        self.pitch += Rad::from(Deg(controller.rotate_vertical * controller.sensitivity));
        let limit = Rad::from(PITCH_LIMIT);
        if self.pitch > limit {
            self.pitch = limit;
        } else if self.pitch < -limit {
            self.pitch = -limit;
        }
        self.update_vectors();

        // Move forward/backward, keeping y
        let height = self.position.y;
        self.position += self.front * (controller.amount_forward - controller.amount_backward) * velocity;
        self.position.y = height;

        // Strafe and move up/down along the view basis
        self.position += self.right * (controller.amount_right - controller.amount_left) * velocity;
        self.position += self.up * (controller.amount_up - controller.amount_down) * velocity;

        controller.reset();
    }
}

/// Handles camera movement and rotation based on user input.
///
/// This struct tracks the current state of movement keys and mouse input,
/// and applies them to the camera when updated.
#[derive(Debug)]
pub struct CameraController {
    // Movement amounts (0 or 1)
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    // Rotation amounts (in mouse units)
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller with the given speed and sensitivity.
    ///
    /// # Arguments
    /// * `speed` - Base movement speed in units per second
    /// * `sensitivity` - Degrees of rotation per unit of mouse motion
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Processes player actions and updates controller state accordingly.
    ///
    /// # Arguments
    /// * `actions` - The player's input actions to process
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        let amount = |active: bool| if active { 1.0 } else { 0.0 };
        self.amount_forward = amount(actions.move_forward);
        self.amount_backward = amount(actions.move_backward);
        self.amount_left = amount(actions.move_left);
        self.amount_right = amount(actions.move_right);
        self.amount_up = amount(actions.move_up);
        self.amount_down = amount(actions.move_down);

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal = delta_x as f32;
            // Screen y grows downward; pitch grows upward.
            self.rotate_vertical = -delta_y as f32;
        }
    }

    /// Checks if there are any pending updates that would affect the camera.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.amount_up > 0.0
            || self.amount_down > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    fn reset(&mut self) {
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.amount_up = 0.0;
        self.amount_down = 0.0;
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn default_orientation_faces_negative_z() {
        let camera = Camera::new(Point3::new(0.0, 15.0, 0.0), DEFAULT_YAW, Deg(0.0));
        assert!(approx(camera.get_view_vec(), -Vector3::unit_z()));

        let eye = camera.calc_matrix() * Vector4::new(0.0, 15.0, -3.0, 1.0);
        assert!((eye.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn forward_movement_keeps_height() {
        let mut camera = Camera::new(Point3::new(0.0, 15.0, 0.0), DEFAULT_YAW, Deg(-45.0));
        let mut controller = CameraController::new(DEFAULT_SPEED, DEFAULT_SENSITIVITY);
        let actions = PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        };

        controller.intake_actions(&actions);
        assert!(controller.has_updates());
        camera.get_controller_updates_and_reset_controller(&mut controller, Duration::from_secs(1));

        assert_eq!(camera.position.y, 15.0);
        assert!(camera.position.z < 0.0);
        assert!(!controller.has_updates());
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), DEFAULT_YAW, Deg(0.0));
        let mut controller = CameraController::new(DEFAULT_SPEED, DEFAULT_SENSITIVITY);
        let actions = PlayerAction {
            rotate_view: Some((0.0, -5000.0)),
            ..PlayerAction::default()
        };

        controller.intake_actions(&actions);
        camera.get_controller_updates_and_reset_controller(&mut controller, Duration::from_millis(16));

        assert!((Deg::from(camera.pitch).0 - 89.0).abs() < 1e-3);
        assert!(camera.get_view_vec().y > 0.99);
    }
}
