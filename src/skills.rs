pub const FILTER_ALL: &str = "all";
pub const SKILL_BAR_STEP_MS: u32 = 200;
pub const LANGUAGE_BAR_STEP_MS: u32 = 300;

pub fn category_visible(filter: &str, category: &str) -> bool {
    filter == FILTER_ALL || filter == category
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarGroup {
    Skills,
    Languages,
}

impl BarGroup {
    pub fn container_selector(self) -> &'static str {
        match self {
            Self::Skills => "[data-animate-bars]",
            Self::Languages => "[data-animate-languages]",
        }
    }

    pub fn fill_selector(self) -> &'static str {
        match self {
            Self::Skills => ".skill-fill",
            Self::Languages => ".language-fill",
        }
    }

    fn step_ms(self) -> u32 {
        match self {
            Self::Skills => SKILL_BAR_STEP_MS,
            Self::Languages => LANGUAGE_BAR_STEP_MS,
        }
    }

    pub fn fill_delay_ms(self, index: usize) -> u32 {
        self.step_ms().saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

/// Width for a `data-percent` value, clamped to `0..=100`.
pub fn fill_width(percent: &str) -> Option<String> {
    let percent = percent.trim().parse::<f64>().ok()?;
    if !percent.is_finite() {
        return None;
    }
    Some(format!("{}%", percent.clamp(0.0, 100.0)))
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    duration_ms: f64,
    suffix: &'static str,
    started_at: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

impl CounterAnimation {
    /// `None` when the `data-count` value is not a number.
    pub fn new(target: &str, current_text: &str, duration_ms: f64) -> Option<Self> {
        let target = target.trim().parse::<u64>().ok()?;
        let suffix = if current_text.contains('+') { "+" } else { "" };
        Some(Self {
            target,
            duration_ms,
            suffix,
            started_at: None,
        })
    }

    pub fn frame(&mut self, now: f64) -> CounterFrame {
        let started_at = *self.started_at.get_or_insert(now);
        let progress = if self.duration_ms > 0.0 {
            ((now - started_at) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let current = (progress * self.target as f64).floor() as u64;

        CounterFrame {
            text: format!("{current}{}", self.suffix),
            done: progress >= 1.0,
        }
    }
}
