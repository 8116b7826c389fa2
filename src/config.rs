use crate::logging::LogLevel;

const DEFAULT_I18N_PATH: &str = "/assets/i18n";
const DEFAULT_SCROLL_OFFSET_PX: u64 = 80;
const DEFAULT_SCROLL_DURATION_MS: u64 = 1_500;
const DEFAULT_NATIVE_SCROLL_DURATION_MS: u64 = 1_000;
const DEFAULT_SPY_LEAD_PX: u64 = 200;
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1_000;
const DEFAULT_SUCCESS_DISMISS_MS: u64 = 5_000;
const DEFAULT_COUNTER_DURATION_MS: u64 = 2_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SCROLL_OFFSET_PX_BOUNDS: (u64, u64) = (0, 400);
const SCROLL_DURATION_MS_BOUNDS: (u64, u64) = (100, 10_000);
const SPY_LEAD_PX_BOUNDS: (u64, u64) = (0, 2_000);
const SUBMIT_DELAY_MS_BOUNDS: (u64, u64) = (0, 30_000);
const SUCCESS_DISMISS_MS_BOUNDS: (u64, u64) = (500, 60_000);
const COUNTER_DURATION_MS_BOUNDS: (u64, u64) = (100, 20_000);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub i18n_path: String,
    pub scroll_offset_px: f64,
    pub scroll_duration_ms: u64,
    pub native_scroll_duration_ms: u64,
    pub spy_lead_px: f64,
    pub submit_delay_ms: u64,
    pub success_dismiss_ms: u64,
    pub counter_duration_ms: u64,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            i18n_path: DEFAULT_I18N_PATH.to_string(),
            scroll_offset_px: DEFAULT_SCROLL_OFFSET_PX as f64,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            native_scroll_duration_ms: DEFAULT_NATIVE_SCROLL_DURATION_MS,
            spy_lead_px: DEFAULT_SPY_LEAD_PX as f64,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            success_dismiss_ms: DEFAULT_SUCCESS_DISMISS_MS,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    /// Builds the config from `data-*` attributes, looked up by attribute name.
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let i18n_path = parse_non_empty_string(&lookup, "data-i18n-path")
            .map(|value| value.trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_I18N_PATH.to_string());
        let scroll_offset_px = parse_u64_with_bounds(
            &lookup,
            "data-scroll-offset",
            DEFAULT_SCROLL_OFFSET_PX,
            SCROLL_OFFSET_PX_BOUNDS,
        );
        let scroll_duration_ms = parse_u64_with_bounds(
            &lookup,
            "data-scroll-duration-ms",
            DEFAULT_SCROLL_DURATION_MS,
            SCROLL_DURATION_MS_BOUNDS,
        );
        let native_scroll_duration_ms = parse_u64_with_bounds(
            &lookup,
            "data-native-scroll-duration-ms",
            DEFAULT_NATIVE_SCROLL_DURATION_MS,
            SCROLL_DURATION_MS_BOUNDS,
        );
        let spy_lead_px = parse_u64_with_bounds(
            &lookup,
            "data-spy-lead",
            DEFAULT_SPY_LEAD_PX,
            SPY_LEAD_PX_BOUNDS,
        );
        let submit_delay_ms = parse_u64_with_bounds(
            &lookup,
            "data-submit-delay-ms",
            DEFAULT_SUBMIT_DELAY_MS,
            SUBMIT_DELAY_MS_BOUNDS,
        );
        let success_dismiss_ms = parse_u64_with_bounds(
            &lookup,
            "data-success-dismiss-ms",
            DEFAULT_SUCCESS_DISMISS_MS,
            SUCCESS_DISMISS_MS_BOUNDS,
        );
        let counter_duration_ms = parse_u64_with_bounds(
            &lookup,
            "data-counter-duration-ms",
            DEFAULT_COUNTER_DURATION_MS,
            COUNTER_DURATION_MS_BOUNDS,
        );
        let log_level = parse_non_empty_string(&lookup, "data-log-level")
            .and_then(|value| LogLevel::from_str(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            i18n_path,
            scroll_offset_px: scroll_offset_px as f64,
            scroll_duration_ms,
            native_scroll_duration_ms,
            spy_lead_px: spy_lead_px as f64,
            submit_delay_ms,
            success_dismiss_ms,
            counter_duration_ms,
            log_level,
        }
    }

    pub fn translation_url(&self, code: &str) -> String {
        format!("{}/{code}.json", self.i18n_path)
    }

    pub fn scroll_duration_secs(&self) -> f64 {
        self.scroll_duration_ms as f64 / 1_000.0
    }
}

fn parse_u64_with_bounds<F>(lookup: &F, name: &str, default: u64, bounds: (u64, u64)) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_attributes_use_defaults() {
        let config = SiteConfig::from_attributes(|_| None);
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.scroll_offset_px, 80.0);
        assert_eq!(config.spy_lead_px, 200.0);
        assert_eq!(config.translation_url("es"), "/assets/i18n/es.json");
    }

    #[test]
    fn in_bounds_values_override_defaults() {
        let config = SiteConfig::from_attributes(lookup_from(&[
            ("data-scroll-offset", " 64 "),
            ("data-success-dismiss-ms", "3000"),
            ("data-log-level", "DEBUG"),
            ("data-i18n-path", "/static/lang/"),
        ]));

        assert_eq!(config.scroll_offset_px, 64.0);
        assert_eq!(config.success_dismiss_ms, 3_000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.translation_url("en"), "/static/lang/en.json");
    }

    #[test]
    fn out_of_bounds_or_garbage_values_fall_back() {
        let config = SiteConfig::from_attributes(lookup_from(&[
            ("data-scroll-offset", "9000"),
            ("data-submit-delay-ms", "soon"),
            ("data-success-dismiss-ms", "10"),
            ("data-log-level", "verbose"),
            ("data-i18n-path", "   "),
        ]));

        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn scroll_duration_is_reported_in_seconds() {
        let config = SiteConfig::default();
        assert!((config.scroll_duration_secs() - 1.5).abs() < f64::EPSILON);
    }
}
