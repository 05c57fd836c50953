//! Drag-to-look camera orientation for the panorama.
//!
//! The controller is a two-state machine:
//! - `Idle`: every frame adds a small longitude step (auto-rotation).
//! - `Dragging`: orientation follows the pointer relative to the drag origin;
//!   auto-rotation is suppressed.
//!
//! Latitude is kept inside `[-limit, limit]` so the view never flips over a
//! pole.

use foundation::math::{LonLat, Vec2};

use crate::config::ViewerConfig;

/// Snapshot taken on pointer-down; moves are measured against it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragOrigin {
    pub pointer: Vec2,
    pub lon_deg: f64,
    pub lat_deg: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragOrigin),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrientationController {
    lon_deg: f64,
    lat_deg: f64,
    drag: DragState,
    sensitivity: f64,
    auto_rotate_deg: f64,
    lat_limit_deg: f64,
}

impl OrientationController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            lon_deg: 0.0,
            lat_deg: 0.0,
            drag: DragState::Idle,
            sensitivity: config.drag_sensitivity,
            auto_rotate_deg: config.auto_rotate_deg,
            lat_limit_deg: config.latitude_limit_deg.abs(),
        }
    }

    /// Start a drag gesture at `pos_px`.
    pub fn on_pointer_down(&mut self, pos_px: Vec2) {
        self.drag = DragState::Dragging(DragOrigin {
            pointer: pos_px,
            lon_deg: self.lon_deg,
            lat_deg: self.lat_deg,
        });
    }

    /// Follow the pointer. Ignored unless a drag is in progress.
    pub fn on_pointer_move(&mut self, pos_px: Vec2) {
        let DragState::Dragging(origin) = self.drag else {
            return;
        };
        self.lon_deg = (origin.pointer.x - pos_px.x) * self.sensitivity + origin.lon_deg;
        let lat_deg = (pos_px.y - origin.pointer.y) * self.sensitivity + origin.lat_deg;
        self.lat_deg = self.clamp_lat(lat_deg);
    }

    /// End the gesture (pointer up, or pointer left the surface).
    pub fn on_pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Advance one display frame.
    pub fn step(&mut self) {
        if !self.is_dragging() {
            self.lon_deg += self.auto_rotate_deg;
        }
        self.lat_deg = self.clamp_lat(self.lat_deg);
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn direction(&self) -> LonLat {
        LonLat::new(self.lon_deg, self.lat_deg)
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    /// Set the view direction directly, ending any drag.
    pub fn set_direction(&mut self, dir: LonLat) {
        self.drag = DragState::Idle;
        self.lon_deg = dir.lon_deg;
        self.lat_deg = self.clamp_lat(dir.lat_deg);
    }

    fn clamp_lat(&self, lat_deg: f64) -> f64 {
        lat_deg.clamp(-self.lat_limit_deg, self.lat_limit_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::{DragState, OrientationController};
    use crate::config::ViewerConfig;
    use foundation::math::Vec2;

    fn controller() -> OrientationController {
        OrientationController::new(&ViewerConfig::default())
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    #[test]
    fn idle_frames_auto_rotate() {
        let mut ctrl = controller();
        for _ in 0..20 {
            ctrl.step();
        }
        assert_close(ctrl.lon_deg(), 1.0);
        assert_close(ctrl.lat_deg(), 0.0);
    }

    #[test]
    fn drag_follows_pointer_from_origin() {
        let mut ctrl = controller();
        ctrl.on_pointer_down(Vec2::new(100.0, 100.0));
        ctrl.on_pointer_move(Vec2::new(50.0, 150.0));
        assert_close(ctrl.lon_deg(), 5.0);
        assert_close(ctrl.lat_deg(), 5.0);

        // Deltas are measured from the origin, not accumulated per move.
        ctrl.on_pointer_move(Vec2::new(100.0, 80.0));
        assert_close(ctrl.lon_deg(), 0.0);
        assert_close(ctrl.lat_deg(), -2.0);
    }

    #[test]
    fn dragging_suppresses_auto_rotation() {
        let mut ctrl = controller();
        ctrl.on_pointer_down(Vec2::new(0.0, 0.0));
        for _ in 0..10 {
            ctrl.step();
        }
        assert_close(ctrl.lon_deg(), 0.0);
        ctrl.on_pointer_up();
        ctrl.step();
        assert_close(ctrl.lon_deg(), 0.05);
    }

    #[test]
    fn latitude_is_clamped_on_move() {
        let mut ctrl = controller();
        ctrl.on_pointer_down(Vec2::new(0.0, 0.0));
        ctrl.on_pointer_move(Vec2::new(0.0, 5000.0));
        assert_close(ctrl.lat_deg(), 85.0);
        ctrl.on_pointer_move(Vec2::new(0.0, -5000.0));
        assert_close(ctrl.lat_deg(), -85.0);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut ctrl = controller();
        ctrl.on_pointer_move(Vec2::new(300.0, 300.0));
        assert_close(ctrl.lon_deg(), 0.0);
        assert_close(ctrl.lat_deg(), 0.0);
    }

    #[test]
    fn second_gesture_starts_from_current_orientation() {
        let mut ctrl = controller();
        ctrl.on_pointer_down(Vec2::new(0.0, 0.0));
        ctrl.on_pointer_move(Vec2::new(-100.0, 0.0));
        ctrl.on_pointer_up();
        assert_eq!(ctrl.drag_state(), DragState::Idle);

        ctrl.on_pointer_down(Vec2::new(500.0, 500.0));
        match ctrl.drag_state() {
            DragState::Dragging(origin) => assert_close(origin.lon_deg, 10.0),
            DragState::Idle => panic!("expected drag"),
        }
        ctrl.on_pointer_move(Vec2::new(400.0, 500.0));
        assert_close(ctrl.lon_deg(), 20.0);
    }
}
