#![forbid(unsafe_code)]

//! Per-panel data model: type, level, anchor row, title bar, content memo.
//!
//! # Invariants
//!
//! 1. `level` and `trigger_row` never change after construction.
//! 2. A panel at `level > 0` always has a `trigger_row`; the root never does.
//! 3. The title bar goes from [`TitleBar::WithTitle`] to
//!    [`TitleBar::WithoutTitle`] at most once and never back.
//! 4. Title mutations on a panel without a title are no-ops, not errors.
//! 5. Content rows are measured at most once per panel ([`ContentState`]).

use traymenu_core::color::Rgb;

use crate::config::MenuConfig;
use crate::error::PanelError;

/// What a panel shows, which decides its title text and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelType {
    /// Root panel with a normal title.
    Main,
    /// Nested folder panel; has no title bar.
    Sub,
    /// Folder without entries.
    Empty,
    /// Folder that could not be read.
    NoAccess,
    /// Opening another level would exceed `menus_max`.
    MaxReached,
}

/// Result of [`PanelState::set_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retype {
    /// The panel's title (and type) changed.
    Applied,
    /// Nothing to do: `Main`, a repeated `Sub`, or a title that no longer exists.
    Ignored,
}

// ---------------------------------------------------------------------------
// Title bar
// ---------------------------------------------------------------------------

/// The live title element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleElement {
    pub text: String,
    pub background: Rgb,
    pub foreground: Rgb,
    pub height: i32,
}

/// A panel's title bar, which can be removed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleBar {
    WithTitle(TitleElement),
    WithoutTitle,
}

impl TitleBar {
    /// The title element, if it still exists.
    #[must_use]
    pub fn element(&self) -> Option<&TitleElement> {
        match self {
            Self::WithTitle(element) => Some(element),
            Self::WithoutTitle => None,
        }
    }

    fn element_mut(&mut self) -> Option<&mut TitleElement> {
        match self {
            Self::WithTitle(element) => Some(element),
            Self::WithoutTitle => None,
        }
    }

    /// Height the title occupies above the view; zero once removed.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.element().map_or(0, |e| e.height)
    }

    /// Remove the title. Returns `true` only on the call that removed it.
    pub fn dispose(&mut self) -> bool {
        match self {
            Self::WithTitle(_) => {
                *self = Self::WithoutTitle;
                true
            }
            Self::WithoutTitle => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Content memo
// ---------------------------------------------------------------------------

/// Whether the view's rows have been measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentState {
    #[default]
    Pending,
    Ready {
        /// Summed row height from the one measurement pass.
        rows_height: i32,
    },
}

// ---------------------------------------------------------------------------
// PanelState
// ---------------------------------------------------------------------------

/// Everything about a panel except its visual fade state and geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    panel_type: PanelType,
    level: usize,
    trigger_row: Option<usize>,
    title: TitleBar,
    content: ContentState,
}

impl PanelState {
    /// Build the state for a new panel and apply its initial type.
    pub fn new(
        panel_type: PanelType,
        level: usize,
        trigger_row: Option<usize>,
        config: &MenuConfig,
    ) -> Result<Self, PanelError> {
        match (level, trigger_row) {
            (0, Some(trigger_row)) => return Err(PanelError::UnexpectedTriggerRow { trigger_row }),
            (level, None) if level > 0 => return Err(PanelError::MissingTriggerRow { level }),
            _ => {}
        }
        let mut state = Self::untyped(level, trigger_row, config);
        state.set_type(panel_type, config);
        Ok(state)
    }

    /// State of a `Main` root panel, which needs no validation.
    #[must_use]
    pub fn root(config: &MenuConfig) -> Self {
        Self::untyped(0, None, config)
    }

    fn untyped(level: usize, trigger_row: Option<usize>, config: &MenuConfig) -> Self {
        Self {
            panel_type: PanelType::Main,
            level,
            trigger_row,
            title: TitleBar::WithTitle(TitleElement {
                text: String::new(),
                background: config.title_background_color,
                foreground: config.title_active_color,
                height: config.title_height,
            }),
            content: ContentState::Pending,
        }
    }

    #[must_use]
    pub fn panel_type(&self) -> PanelType {
        self.panel_type
    }

    /// Depth in the cascade; 0 is the root.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Row of the parent panel this panel was opened from.
    #[must_use]
    pub fn trigger_row(&self) -> Option<usize> {
        self.trigger_row
    }

    #[must_use]
    pub fn title(&self) -> &TitleBar {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> ContentState {
        self.content
    }

    /// Whether the one-time row measurement has happened.
    #[must_use]
    pub fn is_content_ready(&self) -> bool {
        matches!(self.content, ContentState::Ready { .. })
    }

    /// Summed row height, running `measure` only if it never ran before.
    pub fn rows_height(&mut self, measure: impl FnOnce() -> i32) -> i32 {
        match self.content {
            ContentState::Ready { rows_height } => rows_height,
            ContentState::Pending => {
                let rows_height = measure().max(0);
                self.content = ContentState::Ready { rows_height };
                tracing::debug!(level = self.level, rows_height, "content measured");
                rows_height
            }
        }
    }

    /// Change what the panel represents.
    pub fn set_type(&mut self, panel_type: PanelType, config: &MenuConfig) -> Retype {
        let outcome = match panel_type {
            PanelType::Main => Retype::Ignored,
            PanelType::Sub => {
                self.panel_type = PanelType::Sub;
                if self.title.dispose() {
                    Retype::Applied
                } else {
                    Retype::Ignored
                }
            }
            PanelType::Empty | PanelType::NoAccess | PanelType::MaxReached => {
                if self.title.element().is_none() {
                    Retype::Ignored
                } else {
                    let text = match panel_type {
                        PanelType::Empty => config.texts.folder_empty.clone(),
                        PanelType::NoAccess => config.texts.folder_inaccessible.clone(),
                        _ => config.max_reached_title(),
                    };
                    self.set_title(Some(&text), config);
                    if let Some(element) = self.title.element_mut() {
                        element.background = config.title_warning_color;
                    }
                    self.panel_type = panel_type;
                    Retype::Applied
                }
            }
        };
        tracing::debug!(level = self.level, ?panel_type, ?outcome, "set panel type");
        outcome
    }

    /// Set the title text, truncating past `length_max` characters.
    ///
    /// Empty or absent input leaves the title unchanged. Returns whether the
    /// text changed.
    pub fn set_title(&mut self, title: Option<&str>, config: &MenuConfig) -> bool {
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            return false;
        };
        let Some(element) = self.title.element_mut() else {
            return false;
        };
        element.text = truncate_title(title, config.length_max);
        true
    }

    /// Mark this panel's title as the one holding input focus.
    pub fn set_title_color_active(&mut self, config: &MenuConfig) {
        if let Some(element) = self.title.element_mut() {
            element.foreground = config.title_active_color;
        }
    }

    /// Mark this panel's title as not holding input focus.
    pub fn set_title_color_inactive(&mut self, config: &MenuConfig) {
        if let Some(element) = self.title.element_mut() {
            element.foreground = config.title_inactive_color;
        }
    }

    /// Pointer entered (`true`) or left (`false`) the title.
    pub fn set_title_hovered(&mut self, hovered: bool, config: &MenuConfig) {
        if let Some(element) = self.title.element_mut() {
            element.background = if hovered {
                config.title_selected_color
            } else {
                config.title_background_color
            };
        }
    }
}

/// Keep the first `length_max` characters and append `...` if anything was cut.
#[must_use]
pub fn truncate_title(title: &str, length_max: usize) -> String {
    match title.char_indices().nth(length_max) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MenuConfig {
        MenuConfig {
            length_max: 10,
            ..MenuConfig::default()
        }
    }

    fn title_text(state: &PanelState) -> Option<&str> {
        state.title().element().map(|e| e.text.as_str())
    }

    #[test]
    fn root_rejects_trigger_row() {
        let err = PanelState::new(PanelType::Main, 0, Some(1), &config()).unwrap_err();
        assert_eq!(err, PanelError::UnexpectedTriggerRow { trigger_row: 1 });
    }

    #[test]
    fn child_requires_trigger_row() {
        let err = PanelState::new(PanelType::Sub, 2, None, &config()).unwrap_err();
        assert_eq!(err, PanelError::MissingTriggerRow { level: 2 });
    }

    #[test]
    fn main_keeps_title() {
        let state = PanelState::new(PanelType::Main, 0, None, &config()).unwrap();
        assert_eq!(state.panel_type(), PanelType::Main);
        assert_eq!(state.title().height(), 20);
    }

    #[test]
    fn sub_disposes_title_once() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Main, 1, Some(0), &cfg).unwrap();
        assert_eq!(state.set_type(PanelType::Sub, &cfg), Retype::Applied);
        assert_eq!(state.set_type(PanelType::Sub, &cfg), Retype::Ignored);
        assert_eq!(*state.title(), TitleBar::WithoutTitle);
        assert_eq!(state.title().height(), 0);
    }

    #[test]
    fn retype_after_dispose_is_ignored() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Sub, 1, Some(0), &cfg).unwrap();
        for t in [PanelType::Empty, PanelType::NoAccess, PanelType::MaxReached] {
            assert_eq!(state.set_type(t, &cfg), Retype::Ignored);
        }
        assert_eq!(state.panel_type(), PanelType::Sub);
        assert!(!state.set_title(Some("anything"), &cfg));
    }

    #[test]
    fn warning_types_set_text_and_color() {
        let cfg = MenuConfig::default();
        let mut state = PanelState::new(PanelType::Main, 1, Some(3), &cfg).unwrap();
        assert_eq!(state.set_type(PanelType::NoAccess, &cfg), Retype::Applied);
        let element = state.title().element().unwrap();
        assert_eq!(element.text, "Folder inaccessible");
        assert_eq!(element.background, cfg.title_warning_color);
        assert_eq!(state.panel_type(), PanelType::NoAccess);
    }

    #[test]
    fn max_reached_formats_ceiling() {
        let cfg = MenuConfig {
            menus_max: 5,
            ..MenuConfig::default()
        };
        let state = PanelState::new(PanelType::MaxReached, 1, Some(0), &cfg).unwrap();
        assert_eq!(title_text(&state), Some("Max 4 Menus"));
    }

    #[test]
    fn main_retype_is_noop() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Empty, 1, Some(0), &cfg).unwrap();
        assert_eq!(state.set_type(PanelType::Main, &cfg), Retype::Ignored);
        assert_eq!(state.panel_type(), PanelType::Empty);
    }

    #[test]
    fn empty_title_input_is_ignored() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Main, 0, None, &cfg).unwrap();
        assert!(state.set_title(Some("Docs"), &cfg));
        assert!(!state.set_title(Some(""), &cfg));
        assert!(!state.set_title(None, &cfg));
        assert_eq!(title_text(&state), Some("Docs"));
    }

    #[test]
    fn long_title_is_truncated() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Main, 0, None, &cfg).unwrap();
        state.set_title(Some("abcdefghijKLMNOP"), &cfg);
        assert_eq!(title_text(&state), Some("abcdefghij..."));
        state.set_title(Some("abcdefghij"), &cfg);
        assert_eq!(title_text(&state), Some("abcdefghij"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_title("äöüäöü", 3), "äöü...");
        assert_eq!(truncate_title("äöü", 3), "äöü");
    }

    #[test]
    fn title_colors_toggle() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Main, 0, None, &cfg).unwrap();
        state.set_title_color_inactive(&cfg);
        assert_eq!(
            state.title().element().unwrap().foreground,
            cfg.title_inactive_color
        );
        state.set_title_color_active(&cfg);
        assert_eq!(
            state.title().element().unwrap().foreground,
            cfg.title_active_color
        );
    }

    #[test]
    fn hover_swaps_background() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Main, 0, None, &cfg).unwrap();
        state.set_title_hovered(true, &cfg);
        assert_eq!(
            state.title().element().unwrap().background,
            cfg.title_selected_color
        );
        state.set_title_hovered(false, &cfg);
        assert_eq!(
            state.title().element().unwrap().background,
            cfg.title_background_color
        );
    }

    #[test]
    fn cosmetic_ops_on_untitled_panel_are_noops() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Sub, 1, Some(0), &cfg).unwrap();
        state.set_title_color_active(&cfg);
        state.set_title_color_inactive(&cfg);
        state.set_title_hovered(true, &cfg);
        assert_eq!(*state.title(), TitleBar::WithoutTitle);
    }

    #[test]
    fn rows_measured_once() {
        let cfg = config();
        let mut state = PanelState::new(PanelType::Main, 0, None, &cfg).unwrap();
        let mut calls = 0;
        assert_eq!(
            state.rows_height(|| {
                calls += 1;
                300
            }),
            300
        );
        assert_eq!(
            state.rows_height(|| {
                calls += 1;
                999
            }),
            300
        );
        assert_eq!(calls, 1);
        assert!(state.is_content_ready());
    }
}
