use crate::config::SiteConfig;

/// Last section (document order) whose top minus `lead` the viewport has passed.
pub fn active_section<'a, I>(scroll_y: f64, lead: f64, sections: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - lead {
            current = Some(id);
        }
    }
    current
}

pub fn link_targets(href: &str, active: Option<&str>) -> bool {
    match (href.strip_prefix('#'), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollSpy {
    active: Option<String>,
    lead: f64,
}

impl ScrollSpy {
    pub fn new(lead: f64) -> Self {
        Self { active: None, lead }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns true when the active section changed.
    pub fn update<'a, I>(&mut self, scroll_y: f64, sections: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let next = active_section(scroll_y, self.lead, sections);
        if next == self.active.as_deref() {
            return false;
        }
        self.active = next.map(ToString::to_string);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub offset: f64,
    pub duration_secs: f64,
}

impl ScrollRequest {
    /// Offset and duration handed to a smooth-scroll engine.
    pub fn for_engine(config: &SiteConfig) -> Self {
        Self {
            offset: -config.scroll_offset_px,
            duration_secs: config.scroll_duration_secs(),
        }
    }
}

pub fn ease_in_out_quad(elapsed: f64, start: f64, change: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return start + change;
    }
    let mut t = elapsed / (duration / 2.0);
    if t < 1.0 {
        return change / 2.0 * t * t + start;
    }
    t -= 1.0;
    -change / 2.0 * (t * (t - 2.0) - 1.0) + start
}

/// Frame-driven scroll used when the platform has no native smooth scrolling.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollAnimation {
    start_y: f64,
    distance: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub y: f64,
    pub done: bool,
}

impl ScrollAnimation {
    pub fn new(start_y: f64, target_top: f64, offset: f64, duration_ms: f64) -> Self {
        Self {
            start_y,
            distance: (target_top - offset) - start_y,
            duration_ms,
            started_at: None,
        }
    }

    pub fn frame(&mut self, now: f64) -> ScrollFrame {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = (now - started_at).max(0.0);

        if elapsed >= self.duration_ms {
            return ScrollFrame {
                y: self.start_y + self.distance,
                done: true,
            };
        }

        ScrollFrame {
            y: ease_in_out_quad(elapsed, self.start_y, self.distance, self.duration_ms),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: [(&str, f64); 4] = [
        ("about", 600.0),
        ("experience", 1400.0),
        ("projects", 2300.0),
        ("contact", 3200.0),
    ];

    #[test]
    fn nothing_is_active_above_the_first_section() {
        assert_eq!(active_section(0.0, 200.0, SECTIONS), None);
        assert_eq!(active_section(399.0, 200.0, SECTIONS), None);
    }

    #[test]
    fn section_activates_two_hundred_pixels_early() {
        assert_eq!(active_section(400.0, 200.0, SECTIONS), Some("about"));
        assert_eq!(active_section(1199.0, 200.0, SECTIONS), Some("about"));
        assert_eq!(active_section(1200.0, 200.0, SECTIONS), Some("experience"));
    }

    #[test]
    fn last_qualifying_section_wins() {
        assert_eq!(active_section(10_000.0, 200.0, SECTIONS), Some("contact"));
    }

    #[test]
    fn spy_reports_changes_only_at_boundaries() {
        let mut spy = ScrollSpy::new(200.0);
        let known: Vec<&str> = SECTIONS.iter().map(|(id, _)| *id).collect();
        let mut changes = 0;

        for step in 0..=80 {
            let scroll_y = f64::from(step) * 50.0;
            let before = spy.active().map(ToString::to_string);
            if spy.update(scroll_y, SECTIONS) {
                changes += 1;
                assert_ne!(before.as_deref(), spy.active());
            }
            if let Some(active) = spy.active() {
                assert!(known.contains(&active));
            }
        }

        assert_eq!(changes, 4);
        assert!(!spy.update(4_000.0, SECTIONS));
    }

    #[test]
    fn scrolling_back_up_clears_the_active_section() {
        let mut spy = ScrollSpy::new(200.0);
        assert!(spy.update(1500.0, SECTIONS));
        assert!(spy.update(10.0, SECTIONS));
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn links_match_active_section_by_fragment() {
        assert!(link_targets("#projects", Some("projects")));
        assert!(!link_targets("#projects", Some("contact")));
        assert!(!link_targets("/resume.pdf", Some("projects")));
        assert!(!link_targets("#about", None));
    }

    #[test]
    fn engine_request_uses_header_offset_and_duration() {
        let request = ScrollRequest::for_engine(&SiteConfig::default());
        assert_eq!(request.offset, -80.0);
        assert!((request.duration_secs - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0, 100.0, 500.0, 1000.0), 100.0);
        assert!((ease_in_out_quad(500.0, 100.0, 500.0, 1000.0) - 350.0).abs() < 1e-9);
        assert!((ease_in_out_quad(1000.0, 100.0, 500.0, 1000.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn scroll_animation_terminates_at_target_minus_offset() {
        let mut animation = ScrollAnimation::new(0.0, 1000.0, 80.0, 1000.0);

        let first = animation.frame(5_000.0);
        assert_eq!(first, ScrollFrame { y: 0.0, done: false });

        let middle = animation.frame(5_500.0);
        assert!(!middle.done);
        assert!(middle.y > 0.0 && middle.y < 920.0);

        let last = animation.frame(6_000.0);
        assert_eq!(last, ScrollFrame { y: 920.0, done: true });
    }
}
