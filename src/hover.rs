use crate::engines::{Animator, Ease, Pose, Tween};

const MAGNETIC_PULL: f64 = 0.1;
const MAGNETIC_HOVER_SCALE: f64 = 1.05;
const TILT_MAX_DEGREES: f64 = 5.0;
const TILT_HOVER_DEGREES: f64 = 2.0;
const TILT_HOVER_DEPTH: f64 = 10.0;
const TOOLTIP_MARGIN: f64 = 10.0;
const DEFAULT_PARALLAX_SPEED: f64 = 0.1;
const HOVER_DURATION: f64 = 0.3;
const SHAPE_RISE: f64 = -30.0;
const SHAPE_TURN_DEGREES: f64 = 360.0;
const SHAPE_DURATION: f64 = 6.0;
const SHAPE_STAGGER: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn offset_from_center(&self, pointer: (f64, f64)) -> (f64, f64) {
        (
            pointer.0 - self.left - self.width / 2.0,
            pointer.1 - self.top - self.height / 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverPhase {
    Enter,
    Move(f64, f64),
    Leave,
}

pub fn magnetic_offset(pointer: (f64, f64), rect: &Rect) -> (f64, f64) {
    let (dx, dy) = rect.offset_from_center(pointer);
    (dx * MAGNETIC_PULL, dy * MAGNETIC_PULL)
}

/// `(rotation_x, rotation_y)` in degrees; the top edge tilts towards the viewer.
pub fn tilt_angles(pointer: (f64, f64), rect: &Rect) -> (f64, f64) {
    let half_width = rect.width / 2.0;
    let half_height = rect.height / 2.0;
    if half_width <= 0.0 || half_height <= 0.0 {
        return (0.0, 0.0);
    }

    let (dx, dy) = rect.offset_from_center(pointer);
    (
        -(dy / half_height) * TILT_MAX_DEGREES,
        (dx / half_width) * TILT_MAX_DEGREES,
    )
}

pub fn magnetic_tween(phase: HoverPhase, rect: &Rect) -> Tween {
    let to = match phase {
        HoverPhase::Enter => Pose {
            scale: Some(MAGNETIC_HOVER_SCALE),
            ..Pose::default()
        },
        HoverPhase::Move(x, y) => {
            let (dx, dy) = magnetic_offset((x, y), rect);
            Pose::translate(dx, dy)
        }
        HoverPhase::Leave => Pose {
            scale: Some(1.0),
            ..Pose::translate(0.0, 0.0)
        },
    };
    Tween::new(to, HOVER_DURATION, Ease::Power2Out)
}

pub fn tilt_tween(phase: HoverPhase, rect: &Rect) -> Tween {
    let to = match phase {
        HoverPhase::Enter => Pose {
            z: Some(TILT_HOVER_DEPTH),
            ..Pose::rotate(TILT_HOVER_DEGREES, TILT_HOVER_DEGREES)
        },
        HoverPhase::Move(x, y) => {
            let (rotation_x, rotation_y) = tilt_angles((x, y), rect);
            Pose::rotate(rotation_x, rotation_y)
        }
        HoverPhase::Leave => Pose {
            z: Some(0.0),
            ..Pose::rotate(0.0, 0.0)
        },
    };
    Tween::new(to, HOVER_DURATION, Ease::Power2Out)
}

/// Tooltip visibility: shown only for non-empty text and only moved while shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tooltip {
    shown: bool,
}

impl Tooltip {
    /// Returns the text to display, or `None` when the source has nothing to say.
    pub fn enter<'a>(&mut self, text: Option<&'a str>) -> Option<&'a str> {
        let text = text.filter(|text| !text.trim().is_empty());
        self.shown = text.is_some();
        text
    }

    pub fn follows_pointer(&self) -> bool {
        self.shown
    }

    pub fn leave(&mut self) {
        self.shown = false;
    }
}

/// Endless drift of the decorative hero shapes.
pub fn floating_shape_tween() -> Tween {
    Tween::new(
        Pose {
            y: Some(SHAPE_RISE),
            rotation: Some(SHAPE_TURN_DEGREES),
            ..Pose::default()
        },
        SHAPE_DURATION,
        Ease::Power1InOut,
    )
    .with_stagger(SHAPE_STAGGER)
}

pub fn float_shapes<E, A>(shapes: &[E], reduced_motion: bool, animator: &A) -> bool
where
    A: Animator<E> + ?Sized,
{
    if reduced_motion || shapes.is_empty() || !animator.is_active() {
        return false;
    }
    animator.yoyo_forever(shapes, &floating_shape_tween());
    true
}

/// Centers the tooltip above the cursor while keeping it inside the viewport.
pub fn tooltip_position(pointer: (f64, f64), size: (f64, f64), viewport_width: f64) -> (f64, f64) {
    let (width, height) = size;
    let max_left = (viewport_width - width - TOOLTIP_MARGIN).max(TOOLTIP_MARGIN);
    let left = (pointer.0 - width / 2.0).clamp(TOOLTIP_MARGIN, max_left);
    let top = (pointer.1 - height - TOOLTIP_MARGIN).max(TOOLTIP_MARGIN);

    (left, top)
}

pub fn pointer_percent(pointer: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let ratio = |value: f64, extent: f64| {
        if extent > 0.0 {
            value / extent * 100.0
        } else {
            0.0
        }
    };
    (ratio(pointer.0, viewport.0), ratio(pointer.1, viewport.1))
}

/// Scroll-scrubbed `yPercent` shift for a `data-parallax` speed.
pub fn parallax_shift(speed: Option<&str>) -> f64 {
    let speed = speed
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(DEFAULT_PARALLAX_SPEED);
    -50.0 * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::testing::{Call, RecordingAnimator};
    use crate::engines::NoAnimation;

    const CARD: Rect = Rect {
        left: 100.0,
        top: 200.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn magnetic_pulls_ten_percent_towards_pointer() {
        assert_eq!(magnetic_offset((200.0, 250.0), &CARD), (0.0, 0.0));
        assert_eq!(magnetic_offset((300.0, 300.0), &CARD), (10.0, 5.0));
        assert_eq!(magnetic_offset((100.0, 200.0), &CARD), (-10.0, -5.0));
    }

    #[test]
    fn magnetic_leave_returns_to_neutral() {
        let tween = magnetic_tween(HoverPhase::Leave, &CARD);
        assert_eq!(tween.to.x, Some(0.0));
        assert_eq!(tween.to.y, Some(0.0));
        assert_eq!(tween.to.scale, Some(1.0));
        assert_eq!(magnetic_tween(HoverPhase::Enter, &CARD).to.scale, Some(1.05));
    }

    #[test]
    fn tilt_is_proportional_and_bounded_at_edges() {
        assert_eq!(tilt_angles((200.0, 250.0), &CARD), (0.0, 0.0));
        assert_eq!(tilt_angles((300.0, 300.0), &CARD), (-5.0, 5.0));
        assert_eq!(tilt_angles((100.0, 200.0), &CARD), (5.0, -5.0));
        assert_eq!(tilt_angles((250.0, 275.0), &CARD), (-2.5, 2.5));
    }

    #[test]
    fn tilt_of_degenerate_rect_is_flat() {
        let empty = Rect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(tilt_angles((10.0, 10.0), &empty), (0.0, 0.0));
    }

    #[test]
    fn tilt_enter_and_leave_poses() {
        let enter = tilt_tween(HoverPhase::Enter, &CARD);
        assert_eq!(enter.to.rotation_x, Some(2.0));
        assert_eq!(enter.to.z, Some(10.0));

        let leave = tilt_tween(HoverPhase::Leave, &CARD);
        assert_eq!(leave.to.rotation_y, Some(0.0));
        assert_eq!(leave.to.z, Some(0.0));
    }

    #[test]
    fn tooltip_centers_above_cursor() {
        assert_eq!(tooltip_position((500.0, 300.0), (100.0, 30.0), 1280.0), (450.0, 260.0));
    }

    #[test]
    fn tooltip_is_clamped_to_viewport_margins() {
        assert_eq!(tooltip_position((5.0, 5.0), (100.0, 30.0), 1280.0), (10.0, 10.0));
        assert_eq!(
            tooltip_position((1275.0, 300.0), (100.0, 30.0), 1280.0),
            (1170.0, 260.0)
        );
        assert_eq!(tooltip_position((50.0, 300.0), (400.0, 30.0), 300.0), (10.0, 260.0));
    }

    #[test]
    fn pointer_percent_handles_empty_viewport() {
        assert_eq!(pointer_percent((640.0, 180.0), (1280.0, 720.0)), (50.0, 25.0));
        assert_eq!(pointer_percent((10.0, 10.0), (0.0, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn parallax_speed_defaults_when_missing_or_zero() {
        assert_eq!(parallax_shift(Some("0.4")), -20.0);
        assert_eq!(parallax_shift(None), -5.0);
        assert_eq!(parallax_shift(Some("0")), -5.0);
        assert_eq!(parallax_shift(Some("fast")), -5.0);
    }

    #[test]
    fn blank_tooltip_text_keeps_it_hidden() {
        let mut tooltip = Tooltip::default();
        assert_eq!(tooltip.enter(Some("")), None);
        assert!(!tooltip.follows_pointer());
        assert_eq!(tooltip.enter(None), None);
        assert_eq!(tooltip.enter(Some("   ")), None);
        assert!(!tooltip.follows_pointer());
    }

    #[test]
    fn tooltip_follows_pointer_only_while_shown() {
        let mut tooltip = Tooltip::default();
        assert!(!tooltip.follows_pointer());

        assert_eq!(tooltip.enter(Some("Toggle theme")), Some("Toggle theme"));
        assert!(tooltip.follows_pointer());

        tooltip.leave();
        assert!(!tooltip.follows_pointer());
    }

    #[test]
    fn shapes_float_forever_when_motion_is_allowed() {
        let animator = RecordingAnimator::default();

        assert!(float_shapes(&[7, 8, 9], false, &animator));

        let calls = animator.calls.borrow();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::YoyoForever { targets, tween } => {
                assert_eq!(targets, &vec![7, 8, 9]);
                assert_eq!(tween.to.y, Some(-30.0));
                assert_eq!(tween.to.rotation, Some(360.0));
                assert_eq!(tween.duration, 6.0);
                assert_eq!(tween.stagger, 2.0);
                assert_eq!(tween.ease.as_str(), "power1.inOut");
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn shapes_stay_still_under_reduced_motion_or_without_engine() {
        let animator = RecordingAnimator::default();
        assert!(!float_shapes(&[1, 2], true, &animator));
        assert!(!float_shapes::<u32, _>(&[], false, &animator));
        assert_eq!(animator.call_count(), 0);

        assert!(!float_shapes(&[1, 2], false, &NoAnimation));
    }
}
