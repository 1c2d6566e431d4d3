#![forbid(unsafe_code)]

//! Panel construction and layout errors.
//!
//! None of these are fatal to the menu. Construction errors are programming
//! mistakes in the coordinator; layout errors leave the panel's geometry as
//! it was and tell the coordinator what went stale.

use std::fmt;

use crate::config::ConfigError;

/// Invalid arguments when constructing a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelError {
    /// A panel at `level > 0` needs the parent row that opened it.
    MissingTriggerRow { level: usize },
    /// The root panel is anchored to the screen, not to a row.
    UnexpectedTriggerRow { trigger_row: usize },
    /// The shared configuration failed [`crate::config::MenuConfig::validate`].
    Config(ConfigError),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTriggerRow { level } => {
                write!(f, "panel at level {level} has no trigger row")
            }
            Self::UnexpectedTriggerRow { trigger_row } => {
                write!(f, "root panel cannot anchor to row {trigger_row}")
            }
            Self::Config(err) => write!(f, "invalid menu config: {err}"),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for PanelError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Why a layout request left the panel where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The parent no longer has the row this panel was opened from.
    StaleAnchor { trigger_row: usize, row_count: usize },
    /// Root placement requested for a child panel, or the reverse.
    LevelMismatch { level: usize },
    /// The panel was already destroyed.
    Destroyed,
}

impl LayoutError {
    /// Whether the coordinator should treat this panel as orphaned.
    #[must_use]
    pub const fn is_stale_anchor(&self) -> bool {
        matches!(self, Self::StaleAnchor { .. })
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleAnchor {
                trigger_row,
                row_count,
            } => write!(
                f,
                "stale anchor: trigger row {trigger_row} but parent has {row_count} rows"
            ),
            Self::LevelMismatch { level } => {
                write!(f, "placement mode does not match panel level {level}")
            }
            Self::Destroyed => write!(f, "panel already destroyed"),
        }
    }
}

impl std::error::Error for LayoutError {}
