//! # Voxel Picking
//!
//! Turns a view ray into at most one voxel edit.
//!
//! The ray is marched at fixed increments rather than traversed voxel by voxel,
//! so a thin feature can be stepped over at grazing angles. Each sample is split
//! into a chunk coordinate and a chunk-local voxel coordinate.

use cgmath::{Point3, Vector3};
use winit::event::MouseButton;

use super::{
    block::{block_kind::BlockKind, PLACEABLE_KIND},
    chunk::{Chunk, ChunkCoord, EditOutcome},
    chunk_manager::ChunkManager,
};
use crate::{
    application_state::input_state::ProcessedInputState,
    engine_state::rendering::RenderSink,
};

/// Distance of the first sample along the ray.
pub const RAY_START: f32 = 1.0;
/// Distance between consecutive samples.
pub const RAY_STEP: f32 = 0.5;
/// Samples at or beyond this distance are not taken.
pub const RAY_END: f32 = 20.0;
/// Placement only happens strictly beyond this distance.
pub const MIN_PLACE_DISTANCE: f32 = 2.0;

/// The edits requested this tick.
///
/// Both flags are edge-triggered: holding a button down requests nothing after
/// the first tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditRequest {
    /// Clear the first solid voxel along the ray
    pub remove: bool,
    /// Place the placeable kind at the first sample past the minimum distance
    pub place: bool,
}

impl EditRequest {
    /// Reads fresh left (remove) and right (place) presses from processed input.
    pub fn from_input(input: &ProcessedInputState) -> Self {
        EditRequest {
            remove: input
                .get_mouse_button_state(MouseButton::Left)
                .is_just_pressed(),
            place: input
                .get_mouse_button_state(MouseButton::Right)
                .is_just_pressed(),
        }
    }

    /// Whether any edit was requested.
    pub fn is_empty(&self) -> bool {
        !self.remove && !self.place
    }
}

/// One sample along a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTarget {
    /// Distance from the ray origin
    pub distance: f32,
    /// The chunk the sample falls in
    pub chunk: ChunkCoord,
    /// The voxel inside that chunk
    pub local: Point3<i32>,
}

impl RayTarget {
    /// Splits a world-space point into chunk and local voxel coordinates.
    ///
    /// # Returns
    /// `None` if the local coordinate falls outside the chunk, which happens
    /// whenever the point is below the floor or above the ceiling, or lies
    /// beyond the world limit.
    pub fn locate(point: Point3<f32>, distance: f32) -> Option<Self> {
        let chunk = ChunkCoord::containing(point);
        let (origin_x, origin_z) = chunk.voxel_origin();
        let local = Point3::new(
            (point.x.floor() as i32).saturating_sub(origin_x),
            point.y.floor() as i32,
            (point.z.floor() as i32).saturating_sub(origin_z),
        );

        Chunk::in_bounds(local.x, local.y, local.z).then_some(RayTarget {
            distance,
            chunk,
            local,
        })
    }
}

/// The samples of a pick ray in increasing distance, skipping any outside a chunk.
pub fn ray_targets(
    origin: Point3<f32>,
    direction: Vector3<f32>,
) -> impl Iterator<Item = RayTarget> {
    let steps = ((RAY_END - RAY_START) / RAY_STEP).ceil() as u32;
    (0..steps).filter_map(move |step| {
        let distance = RAY_START + step as f32 * RAY_STEP;
        RayTarget::locate(origin + direction * distance, distance)
    })
}

/// An edit that was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditHit {
    /// Where along the ray the edit landed
    pub target: RayTarget,
    /// The chunk's report of the edit
    pub outcome: EditOutcome,
}

/// Marches the ray and applies the first edit whose condition holds.
///
/// At each sample in a loaded chunk, removal is checked before placement. The
/// first sample that satisfies either ends the march.
///
/// # Arguments
/// * `manager` - The chunk manager owning the target chunks
/// * `origin` - The ray origin, normally the camera position
/// * `direction` - The normalized view direction
/// * `request` - The edits requested this tick
/// * `sink` - Receives the re-uploaded mesh
///
/// # Returns
/// The applied edit, or `None` if nothing was requested or nothing was hit.
pub fn dispatch_edit(
    manager: &mut ChunkManager,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    request: EditRequest,
    sink: &mut dyn RenderSink,
) -> Option<EditHit> {
    if request.is_empty() {
        return None;
    }

    for target in ray_targets(origin, direction) {
        let Some(chunk) = manager.get_chunk(target.chunk) else {
            continue;
        };

        let kind = if request.remove
            && chunk
                .kind_at(target.local.x, target.local.y, target.local.z)
                .is_solid()
        {
            BlockKind::AIR
        } else if request.place && target.distance > MIN_PLACE_DISTANCE {
            PLACEABLE_KIND
        } else {
            continue;
        };

        let outcome = manager.modify_voxel(target.chunk, target.local, kind, sink)?;
        return Some(EditHit { target, outcome });
    }

    None
}
