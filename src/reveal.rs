use crate::engines::{Animator, Ease, Pose, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCategory {
    Hero,
    Section,
    Stagger,
    Timeline,
    Fade,
}

impl RevealCategory {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "hero" => Some(Self::Hero),
            "section" => Some(Self::Section),
            "stagger" => Some(Self::Stagger),
            "timeline" => Some(Self::Timeline),
            "fade" => Some(Self::Fade),
            _ => None,
        }
    }

    /// Fraction of the element that must be visible before it plays.
    pub fn threshold(self) -> f64 {
        match self {
            Self::Hero => 0.0,
            Self::Section | Self::Stagger | Self::Timeline => 0.2,
            Self::Fade => 0.1,
        }
    }

    fn animates_items(self) -> bool {
        matches!(self, Self::Stagger | Self::Timeline)
    }

    pub fn motion(self, delay: f64) -> (Pose, Tween) {
        let visible = Pose {
            opacity: Some(1.0),
            ..Pose::default()
        };
        match self {
            Self::Hero => (
                Pose {
                    opacity: Some(0.0),
                    y: Some(50.0),
                    scale: Some(0.95),
                    ..Pose::default()
                },
                Tween::new(
                    Pose {
                        y: Some(0.0),
                        scale: Some(1.0),
                        ..visible
                    },
                    1.2,
                    Ease::Power3Out,
                )
                .with_delay(delay),
            ),
            Self::Section => (
                Pose {
                    opacity: Some(0.0),
                    y: Some(40.0),
                    ..Pose::default()
                },
                Tween::new(Pose { y: Some(0.0), ..visible }, 0.8, Ease::Power2Out),
            ),
            Self::Stagger => (
                Pose {
                    opacity: Some(0.0),
                    y: Some(30.0),
                    ..Pose::default()
                },
                Tween::new(Pose { y: Some(0.0), ..visible }, 0.6, Ease::Power2Out)
                    .with_stagger(0.1),
            ),
            Self::Timeline => (
                Pose {
                    opacity: Some(0.0),
                    x: Some(-50.0),
                    ..Pose::default()
                },
                Tween::new(Pose { x: Some(0.0), ..visible }, 0.8, Ease::Power2Out)
                    .with_stagger(0.2),
            ),
            Self::Fade => (
                Pose {
                    opacity: Some(0.0),
                    ..Pose::default()
                },
                Tween::new(visible, 1.0, Ease::Power2Out),
            ),
        }
    }
}

fn timeline_progress() -> (Pose, Tween) {
    (
        Pose {
            height_percent: Some(0.0),
            ..Pose::default()
        },
        Tween::new(
            Pose {
                height_percent: Some(100.0),
                ..Pose::default()
            },
            2.0,
            Ease::Power2Out,
        ),
    )
}

/// DOM queries the trigger needs, kept behind a trait so tests can fake the page.
pub trait RevealHost<E> {
    fn category(&self, element: &E) -> Option<RevealCategory>;
    fn delay(&self, element: &E) -> f64;
    fn items(&self, element: &E) -> Vec<E>;
    fn progress_bar(&self, element: &E) -> Option<E>;
    fn mark_revealed(&self, element: &E);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealMode {
    Immediate,
    Observe,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealTrigger {
    categories: Vec<Option<RevealCategory>>,
    fired: Vec<bool>,
    mode: RevealMode,
}

impl RevealTrigger {
    pub fn start<E, H>(elements: &[E], host: &H, reduced_motion: bool) -> Self
    where
        H: RevealHost<E>,
    {
        let categories: Vec<_> = elements.iter().map(|element| host.category(element)).collect();

        if reduced_motion {
            for element in elements {
                host.mark_revealed(element);
            }
            return Self {
                fired: vec![true; elements.len()],
                categories,
                mode: RevealMode::Immediate,
            };
        }

        Self {
            fired: vec![false; elements.len()],
            categories,
            mode: RevealMode::Observe,
        }
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    pub fn pending(&self) -> usize {
        self.fired.iter().filter(|fired| !**fired).count()
    }

    /// Distinct thresholds to register with the visibility observer.
    pub fn observer_thresholds(&self) -> Vec<f64> {
        let mut thresholds: Vec<f64> = self
            .categories
            .iter()
            .map(|category| category.map_or(0.1, RevealCategory::threshold))
            .collect();
        thresholds.sort_by(|a, b| a.total_cmp(b));
        thresholds.dedup();
        thresholds
    }

    /// Plays the element's entrance once. Returns true exactly when it fired,
    /// which is the caller's cue to stop observing it.
    pub fn on_visible<E, H, A>(
        &mut self,
        index: usize,
        is_intersecting: bool,
        ratio: f64,
        elements: &[E],
        host: &H,
        animator: &A,
    ) -> bool
    where
        E: Clone,
        H: RevealHost<E>,
        A: Animator<E> + ?Sized,
    {
        let (Some(fired), Some(element)) = (self.fired.get(index), elements.get(index)) else {
            return false;
        };
        if *fired || !is_intersecting {
            return false;
        }

        let category = self.categories[index];
        let threshold = category.map_or(0.1, RevealCategory::threshold);
        if ratio < threshold {
            return false;
        }

        self.fired[index] = true;
        play(element, category, host, animator);
        true
    }
}

fn play<E, H, A>(element: &E, category: Option<RevealCategory>, host: &H, animator: &A)
where
    E: Clone,
    H: RevealHost<E>,
    A: Animator<E> + ?Sized,
{
    let Some(category) = category.filter(|_| animator.is_active()) else {
        host.mark_revealed(element);
        return;
    };

    let (from, tween) = category.motion(host.delay(element));
    let targets = if category.animates_items() {
        let items = host.items(element);
        if items.is_empty() {
            vec![element.clone()]
        } else {
            items
        }
    } else {
        vec![element.clone()]
    };
    animator.from_to(&targets, &from, &tween);

    if category == RevealCategory::Timeline {
        if let Some(bar) = host.progress_bar(element) {
            let (from, tween) = timeline_progress();
            animator.from_to(&[bar], &from, &tween);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::engines::testing::{Call, RecordingAnimator};
    use crate::engines::NoAnimation;

    #[derive(Default)]
    struct FakePage {
        categories: HashMap<u32, RevealCategory>,
        items: HashMap<u32, Vec<u32>>,
        bars: HashMap<u32, u32>,
        delays: HashMap<u32, f64>,
        revealed: RefCell<Vec<u32>>,
    }

    impl RevealHost<u32> for FakePage {
        fn category(&self, element: &u32) -> Option<RevealCategory> {
            self.categories.get(element).copied()
        }

        fn delay(&self, element: &u32) -> f64 {
            self.delays.get(element).copied().unwrap_or(0.0)
        }

        fn items(&self, element: &u32) -> Vec<u32> {
            self.items.get(element).cloned().unwrap_or_default()
        }

        fn progress_bar(&self, element: &u32) -> Option<u32> {
            self.bars.get(element).copied()
        }

        fn mark_revealed(&self, element: &u32) {
            self.revealed.borrow_mut().push(*element);
        }
    }

    fn page() -> (FakePage, Vec<u32>) {
        let mut page = FakePage::default();
        page.categories.insert(1, RevealCategory::Hero);
        page.categories.insert(2, RevealCategory::Section);
        page.categories.insert(3, RevealCategory::Stagger);
        page.categories.insert(4, RevealCategory::Timeline);
        page.categories.insert(5, RevealCategory::Fade);
        page.items.insert(3, vec![30, 31, 32]);
        page.items.insert(4, vec![40, 41]);
        page.bars.insert(4, 49);
        page.delays.insert(1, 0.3);
        (page, vec![1, 2, 3, 4, 5])
    }

    #[test]
    fn reduced_motion_reveals_everything_without_animating() {
        let (page, elements) = page();
        let animator = RecordingAnimator::default();

        let mut trigger = RevealTrigger::start(&elements, &page, true);

        assert_eq!(trigger.mode(), RevealMode::Immediate);
        assert_eq!(*page.revealed.borrow(), elements);
        assert_eq!(trigger.pending(), 0);
        for index in 0..elements.len() {
            assert!(!trigger.on_visible(index, true, 1.0, &elements, &page, &animator));
        }
        assert_eq!(animator.call_count(), 0);
    }

    #[test]
    fn each_element_fires_at_most_once() {
        let (page, elements) = page();
        let animator = RecordingAnimator::default();
        let mut trigger = RevealTrigger::start(&elements, &page, false);

        let mut fired = 0;
        for _ in 0..5 {
            for index in 0..elements.len() {
                if trigger.on_visible(index, true, 1.0, &elements, &page, &animator) {
                    fired += 1;
                }
                trigger.on_visible(index, false, 0.0, &elements, &page, &animator);
            }
        }

        assert_eq!(fired, elements.len());
        assert_eq!(trigger.pending(), 0);
        // timeline adds one extra call for its progress bar
        assert_eq!(animator.call_count(), elements.len() + 1);
    }

    #[test]
    fn below_threshold_does_not_fire() {
        let (page, elements) = page();
        let animator = RecordingAnimator::default();
        let mut trigger = RevealTrigger::start(&elements, &page, false);

        assert!(!trigger.on_visible(1, true, 0.05, &elements, &page, &animator));
        assert!(trigger.on_visible(1, true, 0.25, &elements, &page, &animator));
        assert!(trigger.on_visible(0, true, 0.0, &elements, &page, &animator));
    }

    #[test]
    fn stagger_animates_items_with_interval() {
        let (page, elements) = page();
        let animator = RecordingAnimator::default();
        let mut trigger = RevealTrigger::start(&elements, &page, false);

        trigger.on_visible(2, true, 0.5, &elements, &page, &animator);

        let calls = animator.calls.borrow();
        match &calls[0] {
            Call::FromTo { targets, from, tween } => {
                assert_eq!(targets, &vec![30, 31, 32]);
                assert_eq!(from.y, Some(30.0));
                assert_eq!(tween.stagger, 0.1);
                assert_eq!(tween.duration, 0.6);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn timeline_also_fills_progress_bar() {
        let (page, elements) = page();
        let animator = RecordingAnimator::default();
        let mut trigger = RevealTrigger::start(&elements, &page, false);

        trigger.on_visible(3, true, 0.5, &elements, &page, &animator);

        let calls = animator.calls.borrow();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            Call::FromTo { targets, from, tween } => {
                assert_eq!(targets, &vec![49]);
                assert_eq!(from.height_percent, Some(0.0));
                assert_eq!(tween.to.height_percent, Some(100.0));
                assert_eq!(tween.duration, 2.0);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn hero_carries_its_delay() {
        let (page, elements) = page();
        let animator = RecordingAnimator::default();
        let mut trigger = RevealTrigger::start(&elements, &page, false);

        trigger.on_visible(0, true, 0.0, &elements, &page, &animator);

        let calls = animator.calls.borrow();
        match &calls[0] {
            Call::FromTo { tween, from, .. } => {
                assert_eq!(tween.delay, 0.3);
                assert_eq!(from.scale, Some(0.95));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn without_an_engine_elements_are_marked_once() {
        let (page, elements) = page();
        let mut trigger = RevealTrigger::start(&elements, &page, false);

        assert!(trigger.on_visible(4, true, 0.5, &elements, &page, &NoAnimation));
        assert!(!trigger.on_visible(4, true, 0.9, &elements, &page, &NoAnimation));
        assert_eq!(*page.revealed.borrow(), vec![5]);
    }

    #[test]
    fn observer_thresholds_are_distinct_and_sorted() {
        let (page, elements) = page();
        let trigger = RevealTrigger::start(&elements, &page, false);
        assert_eq!(trigger.observer_thresholds(), vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn unknown_category_names_are_rejected() {
        assert_eq!(RevealCategory::from_attr("timeline"), Some(RevealCategory::Timeline));
        assert_eq!(RevealCategory::from_attr("spin"), None);
    }
}
