#![forbid(unsafe_code)]

//! Traymenu public facade crate.
//!
//! Re-exports the panel engine together with the geometry, event, and timer
//! types a host needs to drive it, plus a small prelude.

// --- Core re-exports -------------------------------------------------------

pub use traymenu_core::animation::{Easing, Fade};
pub use traymenu_core::color::Rgb;
pub use traymenu_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use traymenu_core::geometry::{ChildBounds, Monitor, Point, Rect, Size};

// --- Runtime re-exports ----------------------------------------------------

pub use traymenu_runtime::{ObserverId, Observers, TimerSlot};

// --- Panel re-exports ------------------------------------------------------

pub use traymenu_panel::{
    ConfigError, FadeConfig, GridRow, LayoutError, MemoryGrid, MenuConfig, NavigationKey, Panel,
    PanelError, PanelId, PanelIntent, PanelRegion, PanelType, ParentSnapshot, Placement, Retype,
    Route, TabularView, TitleBar, TitleTexts, VisualState,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChildBounds, Event, MenuConfig, Monitor, Panel, PanelIntent, PanelRegion, PanelType,
        ParentSnapshot, Point, Rect, Route, TabularView,
    };

    pub use crate::{core, panel, runtime};
}

pub use traymenu_core as core;
pub use traymenu_panel as panel;
pub use traymenu_runtime as runtime;
