//! Frame timing and the debug statistics snapshot.

use cgmath::Point3;
use web_time::{Duration, Instant};

use super::voxels::chunk_manager::WorldStats;

/// Counts frames and publishes a frames-per-second figure once per elapsed second.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames_in_window: u32,
    fps: u32,
    total_frames: u64,
}

impl FpsCounter {
    /// Creates a counter whose first window starts at `now`.
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            window_start: now,
            frames_in_window: 0,
            fps: 0,
            total_frames: 0,
        }
    }

    /// Records one frame finishing at `now`.
    ///
    /// # Returns
    /// `Some(fps)` when a window of at least one second has just closed.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        self.frames_in_window += 1;
        self.total_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }

        self.fps = (self.frames_in_window as f64 / elapsed.as_secs_f64()) as u32;
        self.frames_in_window = 0;
        self.window_start = now;
        Some(self.fps)
    }

    /// Frames per second over the last closed window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames recorded since creation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

/// The numbers shown in the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Aggregates over the loaded chunks
    pub world: WorldStats,
    /// Render distance in chunks
    pub render_distance: i32,
    /// Camera position in world space
    pub camera_position: Point3<f32>,
    /// Frames per second over the last closed window
    pub fps: u32,
    /// Milliseconds per frame at that rate
    pub frame_time_ms: f32,
}

impl FrameStats {
    /// Logs the snapshot at info level.
    pub fn log(&self) {
        log::info!(
            "Loaded chunks: {} | Trees: {} | Vertices: {} | Triangles: {} | Render distance: {}",
            self.world.loaded_chunks,
            self.world.total_trees,
            self.world.total_vertices,
            self.world.total_triangles,
            self.render_distance
        );
        log::info!(
            "Camera X:{:.2} Y:{:.2} Z:{:.2} | FPS: {} ({:.2} ms)",
            self.camera_position.x,
            self.camera_position.y,
            self.camera_position.z,
            self.fps,
            self.frame_time_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_once_per_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        for frame in 1..60 {
            let now = start + Duration::from_millis(frame * 16);
            assert_eq!(counter.record_frame(now), None);
        }
        assert_eq!(counter.record_frame(start + Duration::from_secs(1)), Some(60));
        assert_eq!(counter.fps(), 60);
        assert_eq!(counter.total_frames(), 60);
    }
}
