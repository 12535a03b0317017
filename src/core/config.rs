use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MAX_VISIBLE: usize = 5;
pub const DEFAULT_DISPLAY_MS: u64 = 2000;
pub const DEFAULT_STAGGER_MS: u64 = 500;
pub const DEFAULT_REMOVAL_MS: u64 = 400;
pub const DEFAULT_MIN_VIEWPORT_WIDTH: u32 = 768;

// ── Settings keys ──
pub const KEY_MAX_VISIBLE: &str = "toast_max_visible";
pub const KEY_DISPLAY_MS: &str = "toast_display_ms";
pub const KEY_STAGGER_MS: &str = "toast_stagger_ms";
pub const KEY_REMOVAL_MS: &str = "toast_removal_ms";
pub const KEY_MIN_VIEWPORT_WIDTH: &str = "toast_min_viewport_width";
pub const KEY_NOTIFICATIONS_DISABLED: &str = "notifications_disabled";

/// Tunables for a [`Scheduler`](super::scheduler::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Capacity of the visible set. Always at least 1.
    pub max_visible: usize,
    /// Base display duration of the oldest visible notification.
    pub display_duration: Duration,
    /// Extra delay per position, counted from the oldest.
    pub stagger: Duration,
    /// Length of the removal animation window.
    pub removal_delay: Duration,
    /// Viewports narrower than this suppress new notifications.
    pub min_viewport_width: u32,
    pub notifications_disabled: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            display_duration: Duration::from_millis(DEFAULT_DISPLAY_MS),
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
            removal_delay: Duration::from_millis(DEFAULT_REMOVAL_MS),
            min_viewport_width: DEFAULT_MIN_VIEWPORT_WIDTH,
            notifications_disabled: false,
        }
    }
}

impl SchedulerConfig {
    /// Build a config from stored settings. Missing or malformed values fall
    /// back to their defaults.
    pub fn from_settings(settings: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            max_visible: lenient(settings, KEY_MAX_VISIBLE, defaults.max_visible).max(1),
            display_duration: Duration::from_millis(lenient(
                settings,
                KEY_DISPLAY_MS,
                DEFAULT_DISPLAY_MS,
            )),
            stagger: Duration::from_millis(lenient(settings, KEY_STAGGER_MS, DEFAULT_STAGGER_MS)),
            removal_delay: Duration::from_millis(lenient(
                settings,
                KEY_REMOVAL_MS,
                DEFAULT_REMOVAL_MS,
            )),
            min_viewport_width: lenient(
                settings,
                KEY_MIN_VIEWPORT_WIDTH,
                defaults.min_viewport_width,
            ),
            notifications_disabled: settings
                .get(KEY_NOTIFICATIONS_DISABLED)
                .map(|v| parse_flag(v))
                .unwrap_or(defaults.notifications_disabled),
        }
    }

    /// Validate a settings draft typed by the user.
    ///
    /// Unlike [`from_settings`](Self::from_settings) this rejects bad input,
    /// naming the first field that failed.
    pub fn parse_draft(draft: &HashMap<String, String>) -> Result<Self, String> {
        let max_visible: usize = strict(draft, KEY_MAX_VISIBLE, "Max visible")?;
        if max_visible == 0 {
            return Err("Max visible must be at least 1".to_string());
        }

        Ok(Self {
            max_visible,
            display_duration: Duration::from_millis(strict(draft, KEY_DISPLAY_MS, "Display duration")?),
            stagger: Duration::from_millis(strict(draft, KEY_STAGGER_MS, "Stagger")?),
            removal_delay: Duration::from_millis(strict(draft, KEY_REMOVAL_MS, "Removal delay")?),
            min_viewport_width: strict(draft, KEY_MIN_VIEWPORT_WIDTH, "Min viewport width")?,
            notifications_disabled: draft
                .get(KEY_NOTIFICATIONS_DISABLED)
                .map(|v| parse_flag(v))
                .unwrap_or(false),
        })
    }

    /// Key/value pairs as stored in the settings table.
    pub fn to_settings(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_MAX_VISIBLE, self.max_visible.to_string()),
            (KEY_DISPLAY_MS, self.display_duration.as_millis().to_string()),
            (KEY_STAGGER_MS, self.stagger.as_millis().to_string()),
            (KEY_REMOVAL_MS, self.removal_delay.as_millis().to_string()),
            (KEY_MIN_VIEWPORT_WIDTH, self.min_viewport_width.to_string()),
            (KEY_NOTIFICATIONS_DISABLED, self.notifications_disabled.to_string()),
        ]
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "yes" | "on")
}

fn lenient<T: std::str::FromStr>(settings: &HashMap<String, String>, key: &str, default: T) -> T {
    match settings.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid setting {key}={raw:?}, using default");
            default
        }),
        None => default,
    }
}

fn strict<T: std::str::FromStr>(
    draft: &HashMap<String, String>,
    key: &str,
    label: &str,
) -> Result<T, String> {
    let raw = draft.get(key).map(|s| s.trim()).unwrap_or("");
    raw.parse()
        .map_err(|_| format!("Invalid value for {label}: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_visible, 5);
        assert_eq!(config.display_duration, Duration::from_millis(2000));
        assert_eq!(config.stagger, Duration::from_millis(500));
        assert_eq!(config.removal_delay, Duration::from_millis(400));
        assert!(!config.notifications_disabled);
    }

    #[test]
    fn test_from_settings_reads_values() {
        let config = SchedulerConfig::from_settings(&map(&[
            (KEY_MAX_VISIBLE, "2"),
            (KEY_DISPLAY_MS, "1500"),
            (KEY_STAGGER_MS, "250"),
            (KEY_REMOVAL_MS, "0"),
            (KEY_MIN_VIEWPORT_WIDTH, "600"),
            (KEY_NOTIFICATIONS_DISABLED, "true"),
        ]));
        assert_eq!(config.max_visible, 2);
        assert_eq!(config.display_duration, Duration::from_millis(1500));
        assert_eq!(config.stagger, Duration::from_millis(250));
        assert_eq!(config.removal_delay, Duration::ZERO);
        assert_eq!(config.min_viewport_width, 600);
        assert!(config.notifications_disabled);
    }

    #[test]
    fn test_from_settings_falls_back_on_garbage() {
        let config = SchedulerConfig::from_settings(&map(&[
            (KEY_MAX_VISIBLE, "lots"),
            (KEY_DISPLAY_MS, "-5"),
        ]));
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn test_from_settings_clamps_zero_capacity() {
        let config = SchedulerConfig::from_settings(&map(&[(KEY_MAX_VISIBLE, "0")]));
        assert_eq!(config.max_visible, 1);
    }

    #[test]
    fn test_to_settings_round_trips() {
        let config = SchedulerConfig {
            max_visible: 3,
            notifications_disabled: true,
            ..SchedulerConfig::default()
        };
        let stored: HashMap<String, String> = config
            .to_settings()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(SchedulerConfig::from_settings(&stored), config);
        assert_eq!(SchedulerConfig::parse_draft(&stored), Ok(config));
    }

    #[test]
    fn test_parse_draft_names_bad_field() {
        let mut draft: HashMap<String, String> = SchedulerConfig::default()
            .to_settings()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        draft.insert(KEY_STAGGER_MS.to_string(), "half a second".to_string());

        let err = SchedulerConfig::parse_draft(&draft).unwrap_err();
        assert!(err.contains("Stagger"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_draft_rejects_zero_capacity() {
        let mut draft: HashMap<String, String> = SchedulerConfig::default()
            .to_settings()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        draft.insert(KEY_MAX_VISIBLE.to_string(), "0".to_string());
        assert!(SchedulerConfig::parse_draft(&draft).is_err());
    }
}
