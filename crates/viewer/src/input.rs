use foundation::math::Vec2;

use crate::host::InputKind;

/// Pointer gesture events after mouse and touch have been unified.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    Leave,
}

impl PointerEvent {
    /// Translate a raw platform event. Touch events use the first active
    /// touch point; touch start/move without one, and resize, yield `None`.
    pub fn from_raw(kind: InputKind, points: &[Vec2]) -> Option<Self> {
        let first = points.first().copied();
        match kind {
            InputKind::MouseDown | InputKind::TouchStart => first.map(PointerEvent::Down),
            InputKind::MouseMove | InputKind::TouchMove => first.map(PointerEvent::Move),
            InputKind::MouseUp | InputKind::TouchEnd => Some(PointerEvent::Up),
            InputKind::MouseLeave => Some(PointerEvent::Leave),
            InputKind::Resize => None,
        }
    }
}

/// Every listener the viewer registers on mount.
pub const CANVAS_INPUTS: [InputKind; 7] = [
    InputKind::MouseDown,
    InputKind::MouseMove,
    InputKind::MouseUp,
    InputKind::MouseLeave,
    InputKind::TouchStart,
    InputKind::TouchMove,
    InputKind::TouchEnd,
];

#[cfg(test)]
mod tests {
    use super::PointerEvent;
    use crate::host::InputKind;
    use foundation::math::Vec2;

    #[test]
    fn touch_maps_to_pointer_with_first_point() {
        let points = [Vec2::new(10.0, 20.0), Vec2::new(99.0, 99.0)];
        assert_eq!(
            PointerEvent::from_raw(InputKind::TouchStart, &points),
            Some(PointerEvent::Down(Vec2::new(10.0, 20.0)))
        );
        assert_eq!(
            PointerEvent::from_raw(InputKind::TouchMove, &points[1..]),
            Some(PointerEvent::Move(Vec2::new(99.0, 99.0)))
        );
        assert_eq!(
            PointerEvent::from_raw(InputKind::TouchEnd, &[]),
            Some(PointerEvent::Up)
        );
    }

    #[test]
    fn touch_without_points_is_dropped() {
        assert_eq!(PointerEvent::from_raw(InputKind::TouchStart, &[]), None);
        assert_eq!(PointerEvent::from_raw(InputKind::Resize, &[]), None);
    }

    #[test]
    fn mouse_leave_ends_gesture() {
        assert_eq!(
            PointerEvent::from_raw(InputKind::MouseLeave, &[]),
            Some(PointerEvent::Leave)
        );
    }
}
