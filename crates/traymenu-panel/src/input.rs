#![forbid(unsafe_code)]

//! Turning raw input at a panel into local effects or coordinator intents.
//!
//! [`InputRouter::route`] only classifies; the panel applies the resulting
//! [`Route`]. Keeping classification pure lets the coordinator's keyboard
//! model be tested without a view.
//!
//! | Input                                 | Route                              |
//! |---------------------------------------|------------------------------------|
//! | Enter/arrows/Escape, no modifiers     | `Intent(Navigation(..))`           |
//! | any other key                         | `FallThrough` (search-as-you-type) |
//! | wheel over view or its scrollbar      | `Scroll(..)`                       |
//! | focus lost                            | `Intent(Deactivated)`              |
//! | left double-click on title            | `Intent(OpenFolderRequested)`      |
//! | pointer enter/leave on title          | `TitleHover(..)`                   |
//! | tick                                  | `AdvanceFade`                      |

use traymenu_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEventKind};

/// Part of a panel that received a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelRegion {
    Title,
    View,
    Scrollbar,
}

/// Keys the coordinator uses to move through the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    Enter,
    Up,
    Down,
    Left,
    Right,
    Escape,
}

impl NavigationKey {
    /// Navigation meaning of a key code, if it has one.
    #[must_use]
    pub const fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Escape => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Notification from a panel to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelIntent {
    /// The view scrolled; children anchored to its rows may need re-layout.
    MouseWheelScrolled,
    /// The panel lost input focus. Closing the chain is the coordinator's call.
    Deactivated,
    /// The user asked to open the folder this panel shows.
    OpenFolderRequested,
    /// A navigation key was pressed while this panel had focus.
    Navigation(NavigationKey),
}

/// Wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Toward the first row.
    Up,
    /// Toward the last row.
    Down,
}

/// What the panel should do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Scroll the view, then notify `MouseWheelScrolled`.
    Scroll(ScrollDirection),
    /// Forward to the coordinator unchanged.
    Intent(PanelIntent),
    /// Cosmetic title highlight on (`true`) or off (`false`).
    TitleHover(bool),
    /// Advance the fade by one timer interval.
    AdvanceFade,
    /// Consumed with no effect.
    Ignore,
    /// Not ours; let the host's default handling see it.
    FallThrough,
}

impl Route {
    /// Whether the host should mark the native event as handled.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::FallThrough)
    }
}

/// Classifies panel input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputRouter;

impl InputRouter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decide what `event`, delivered to `region`, means for the panel.
    ///
    /// `region` is ignored for keyboard, focus, and tick events.
    #[must_use]
    pub fn route(&self, region: PanelRegion, event: &Event) -> Route {
        match event {
            Event::Key(key) => Self::route_key(key),
            Event::Mouse(mouse) => match (mouse.kind, region) {
                (MouseEventKind::ScrollUp, PanelRegion::View | PanelRegion::Scrollbar) => {
                    Route::Scroll(ScrollDirection::Up)
                }
                (MouseEventKind::ScrollDown, PanelRegion::View | PanelRegion::Scrollbar) => {
                    Route::Scroll(ScrollDirection::Down)
                }
                (MouseEventKind::DoubleClick(MouseButton::Left), PanelRegion::Title) => {
                    Route::Intent(PanelIntent::OpenFolderRequested)
                }
                (MouseEventKind::DoubleClick(_), PanelRegion::Title) => Route::Ignore,
                (MouseEventKind::Enter, PanelRegion::Title) => Route::TitleHover(true),
                (MouseEventKind::Leave, PanelRegion::Title) => Route::TitleHover(false),
                _ => Route::FallThrough,
            },
            Event::Focus(false) => Route::Intent(PanelIntent::Deactivated),
            Event::Focus(true) => Route::FallThrough,
            Event::Tick => Route::AdvanceFade,
        }
    }

    fn route_key(key: &KeyEvent) -> Route {
        if !key.is_press() || !key.modifiers.is_empty() {
            return Route::FallThrough;
        }
        match NavigationKey::from_key_code(key.code) {
            Some(nav) => Route::Intent(PanelIntent::Navigation(nav)),
            None => Route::FallThrough,
        }
    }
}

/// New first-displayed row after one wheel notch.
///
/// Moves by `speed` rows and snaps to the first or last row instead of
/// overshooting. Never wraps.
#[must_use]
pub fn scrolled_first_row(
    first: usize,
    row_count: usize,
    speed: usize,
    direction: ScrollDirection,
) -> usize {
    if row_count == 0 {
        return 0;
    }
    match direction {
        ScrollDirection::Down => {
            let next = first.saturating_add(speed);
            if next < row_count { next } else { row_count - 1 }
        }
        ScrollDirection::Up => first.saturating_sub(speed),
    }
}
