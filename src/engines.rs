//! Optional animation collaborators.
//!
//! Each capability is a trait generic over the element handle so the page
//! logic can run against fakes in tests. The default variants do nothing;
//! browser-backed variants live in `bridge`.

use crate::scroll::ScrollRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    None,
    Power1InOut,
    Power2Out,
    Power3Out,
}

impl Ease {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Power1InOut => "power1.inOut",
            Self::Power2Out => "power2.out",
            Self::Power3Out => "power3.out",
        }
    }
}

/// Animatable properties; `None` leaves a property untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub rotation_x: Option<f64>,
    pub rotation_y: Option<f64>,
    pub height_percent: Option<f64>,
}

impl Pose {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn rotate(rotation_x: f64, rotation_y: f64) -> Self {
        Self {
            rotation_x: Some(rotation_x),
            rotation_y: Some(rotation_y),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub to: Pose,
    pub duration: f64,
    pub delay: f64,
    pub stagger: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(to: Pose, duration: f64, ease: Ease) -> Self {
        Self {
            to,
            duration,
            delay: 0.0,
            stagger: 0.0,
            ease,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }
}

pub trait ScrollEngine<T: ?Sized> {
    fn scroll_to(&self, target: &T, request: ScrollRequest);
}

pub trait Animator<T> {
    /// False for the fallback variant; callers switch to class-based reveals.
    fn is_active(&self) -> bool;
    fn from_to(&self, targets: &[T], from: &Pose, tween: &Tween);
    fn to(&self, targets: &[T], tween: &Tween);
    fn parallax(&self, target: &T, y_percent: f64);
    /// Plays `tween` forward and back forever. `tween.stagger` spaces the
    /// targets' start times, handed out in random order.
    fn yoyo_forever(&self, targets: &[T], tween: &Tween);
}

pub trait TypingEngine<T: ?Sized> {
    fn start(&self, target: &T, phrases: &[String]);
    fn stop(&self);
}

pub trait Celebration {
    fn burst(&self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnimation;

impl<T> Animator<T> for NoAnimation {
    fn is_active(&self) -> bool {
        false
    }

    fn from_to(&self, _targets: &[T], _from: &Pose, _tween: &Tween) {}

    fn to(&self, _targets: &[T], _tween: &Tween) {}

    fn parallax(&self, _target: &T, _y_percent: f64) {}

    fn yoyo_forever(&self, _targets: &[T], _tween: &Tween) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn burst(&self) {}
}
