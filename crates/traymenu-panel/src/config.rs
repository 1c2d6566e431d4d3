#![forbid(unsafe_code)]

//! Read-only menu configuration.
//!
//! A single [`MenuConfig`] is shared by every panel of a menu chain. Hosts
//! usually build it once at startup (optionally from a JSON/TOML document
//! with the `serde` feature) and hand out `Arc<MenuConfig>` clones.

use std::fmt;
use std::time::Duration;

use traymenu_core::animation::Easing;
use traymenu_core::color::Rgb;

// ---------------------------------------------------------------------------
// Fade timing
// ---------------------------------------------------------------------------

/// Opacity ramp timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FadeConfig {
    /// Time for one ramp to reach its target opacity.
    /// Default: 120ms
    #[cfg_attr(feature = "serde", serde(with = "duration_ms", rename = "duration_ms"))]
    pub duration: Duration,

    /// Timer ticks per ramp. The timer interval is `duration / steps`.
    /// Default: 12
    pub steps: u32,

    /// Opacity curve applied across the ramp.
    /// Default: linear
    pub easing: Easing,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(120),
            steps: 12,
            easing: Easing::Linear,
        }
    }
}

impl FadeConfig {
    /// Interval of the repeating fade timer, never shorter than 1ns.
    #[must_use]
    pub fn interval(&self) -> Duration {
        (self.duration / self.steps.max(1)).max(Duration::from_nanos(1))
    }

    /// Length of one ramp: exactly `steps` timer intervals.
    #[must_use]
    pub fn ramp_duration(&self) -> Duration {
        self.interval() * self.steps.max(1)
    }
}

// ---------------------------------------------------------------------------
// Title texts
// ---------------------------------------------------------------------------

/// Localized title texts, supplied by the host's string table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TitleTexts {
    pub folder_empty: String,
    pub folder_inaccessible: String,
}

impl Default for TitleTexts {
    fn default() -> Self {
        Self {
            folder_empty: "Folder empty".to_owned(),
            folder_inaccessible: "Folder inaccessible".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// MenuConfig
// ---------------------------------------------------------------------------

/// Configuration shared by all panels of a menu.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Background of the selected row in the tabular view.
    pub selected_item_color: Rgb,
    /// Title background for Empty/NoAccess/MaxReached panels.
    pub title_warning_color: Rgb,
    /// Title background when the pointer is not over it.
    pub title_background_color: Rgb,
    /// Title background while the pointer hovers it.
    pub title_selected_color: Rgb,
    /// Title foreground of the panel holding input focus.
    pub title_active_color: Rgb,
    /// Title foreground of every other panel.
    pub title_inactive_color: Rgb,

    /// Panels below this opacity ignore the pointer. Also the `fade_half` target.
    /// Default: 0.5
    pub opacity_half_threshold: f32,

    /// Longest title kept before truncation with an ellipsis.
    /// Default: 37
    pub length_max: usize,

    /// Ceiling on simultaneously open menus, root included.
    /// Default: 50
    pub menus_max: usize,

    /// Rows moved per wheel notch.
    /// Default: 3
    pub scroll_speed: usize,

    /// Width added to a panel whose view needs a vertical scrollbar.
    /// Default: 120
    pub scrollbar_allowance: i32,

    /// Height of the title bar while it exists.
    /// Default: 20
    pub title_height: i32,

    pub fade: FadeConfig,
    pub texts: TitleTexts,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            selected_item_color: Rgb::new(204, 232, 255),
            title_warning_color: Rgb::new(253, 164, 0),
            title_background_color: Rgb::new(240, 248, 255),
            title_selected_color: Rgb::new(204, 232, 255),
            title_active_color: Rgb::BLACK,
            title_inactive_color: Rgb::LIGHT_GRAY,
            opacity_half_threshold: 0.5,
            length_max: 37,
            menus_max: 50,
            scroll_speed: 3,
            scrollbar_allowance: 120,
            title_height: 20,
            fade: FadeConfig::default(),
            texts: TitleTexts::default(),
        }
    }
}

impl MenuConfig {
    /// Reject values that would make panel behavior degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length_max == 0 {
            return Err(ConfigError::ZeroLengthMax);
        }
        if self.scroll_speed == 0 {
            return Err(ConfigError::ZeroScrollSpeed);
        }
        if self.menus_max == 0 {
            return Err(ConfigError::ZeroMenusMax);
        }
        if self.fade.steps == 0 {
            return Err(ConfigError::ZeroFadeSteps);
        }
        if self.fade.duration.as_nanos() < u128::from(self.fade.steps) {
            return Err(ConfigError::FadeTooShort {
                duration: self.fade.duration,
                steps: self.fade.steps,
            });
        }
        if !(0.0..=1.0).contains(&self.opacity_half_threshold) {
            return Err(ConfigError::HalfThresholdOutOfRange(
                self.opacity_half_threshold,
            ));
        }
        if self.scrollbar_allowance < 0 || self.title_height < 0 {
            return Err(ConfigError::NegativeExtent);
        }
        Ok(())
    }

    /// Title shown on a `MaxReached` panel. The root panel does not count.
    #[must_use]
    pub fn max_reached_title(&self) -> String {
        format!("Max {} Menus", self.menus_max.saturating_sub(1))
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroLengthMax,
    ZeroScrollSpeed,
    ZeroMenusMax,
    ZeroFadeSteps,
    /// The ramp is shorter than one nanosecond per step.
    FadeTooShort { duration: Duration, steps: u32 },
    HalfThresholdOutOfRange(f32),
    NegativeExtent,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLengthMax => write!(f, "length_max must be at least 1"),
            Self::ZeroScrollSpeed => write!(f, "scroll_speed must be at least 1"),
            Self::ZeroMenusMax => write!(f, "menus_max must be at least 1"),
            Self::ZeroFadeSteps => write!(f, "fade.steps must be at least 1"),
            Self::FadeTooShort { duration, steps } => {
                write!(f, "fade.duration {duration:?} is too short for {steps} steps")
            }
            Self::HalfThresholdOutOfRange(v) => {
                write!(f, "opacity_half_threshold {v} is outside [0, 1]")
            }
            Self::NegativeExtent => {
                write!(f, "scrollbar_allowance and title_height must not be negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(MenuConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_values() {
        let config = MenuConfig::default();
        assert_eq!(config.scroll_speed, 3);
        assert_eq!(config.scrollbar_allowance, 120);
        assert_eq!(config.opacity_half_threshold, 0.5);
        assert_eq!(config.fade.interval(), Duration::from_millis(10));
    }

    #[test]
    fn rejects_zero_limits() {
        let config = MenuConfig {
            length_max: 0,
            ..MenuConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLengthMax));

        let config = MenuConfig {
            scroll_speed: 0,
            ..MenuConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroScrollSpeed));

        let mut config = MenuConfig::default();
        config.fade.steps = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFadeSteps));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let config = MenuConfig {
            opacity_half_threshold: 1.5,
            ..MenuConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HalfThresholdOutOfRange(_))
        ));
        assert!(config.validate().unwrap_err().to_string().contains("1.5"));
    }

    #[test]
    fn max_reached_title_excludes_root() {
        let config = MenuConfig {
            menus_max: 50,
            ..MenuConfig::default()
        };
        assert_eq!(config.max_reached_title(), "Max 49 Menus");
    }

    #[test]
    fn zero_steps_interval_does_not_divide_by_zero() {
        let fade = FadeConfig {
            steps: 0,
            ..FadeConfig::default()
        };
        assert_eq!(fade.interval(), fade.duration);
    }

    #[test]
    fn rejects_fade_shorter_than_its_steps() {
        let mut config = MenuConfig::default();
        config.fade.duration = Duration::ZERO;
        assert_eq!(
            config.validate(),
            Err(ConfigError::FadeTooShort {
                duration: Duration::ZERO,
                steps: 12
            })
        );
        config.fade.duration = Duration::from_nanos(5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FadeTooShort { .. })
        ));
        config.fade.duration = Duration::from_nanos(12);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn ramp_is_whole_intervals() {
        let fade = FadeConfig {
            duration: Duration::from_millis(100),
            ..FadeConfig::default()
        };
        assert_eq!(fade.interval(), Duration::from_nanos(8_333_333));
        assert_eq!(fade.ramp_duration(), Duration::from_nanos(8_333_333 * 12));

        let zero = FadeConfig {
            duration: Duration::ZERO,
            ..FadeConfig::default()
        };
        assert_eq!(zero.interval(), Duration::from_nanos(1));
        assert_eq!(zero.ramp_duration(), Duration::from_nanos(12));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_loads_over_defaults() {
        let json = r#"{ "scroll_speed": 5, "fade": { "duration_ms": 200 } }"#;
        let config: MenuConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.scroll_speed, 5);
        assert_eq!(config.fade.duration, Duration::from_millis(200));
        assert_eq!(config.fade.steps, 12);
        assert_eq!(config.length_max, 37);
    }
}
