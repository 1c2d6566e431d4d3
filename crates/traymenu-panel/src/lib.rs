#![forbid(unsafe_code)]

//! Cascading tray menu panels.
//!
//! Each [`Panel`] is one level of a cascading menu: a title bar over a
//! scrollable [`TabularView`]. Panels fade in and out on a cooperative
//! timer, place themselves against the taskbar or beside a parent panel, and
//! report user input to a coordinator as [`PanelIntent`]s.
//!
//! The coordinator that decides which panels exist is not part of this crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use traymenu_core::geometry::{Monitor, Rect};
//! use traymenu_panel::{GridRow, MemoryGrid, MenuConfig, Panel, PanelType};
//!
//! let config = Arc::new(MenuConfig::default());
//! let rows = MemoryGrid::uniform(8, GridRow::new(16, 180, 22));
//! let mut root = Panel::new(PanelType::Main, 0, None, rows, config).unwrap();
//! root.set_title(Some("Documents"));
//!
//! let monitor = Monitor::new(Rect::new(0, 0, 1920, 1080), 40);
//! let placement = root.adjust_to_monitor(&monitor).unwrap();
//! assert_eq!(placement.bounds.bottom(), 1040);
//!
//! root.fade_in();
//! assert!(root.is_visible());
//! ```

pub mod config;
pub mod error;
pub mod fade;
pub mod grid;
pub mod input;
pub mod layout;
pub mod panel;
pub mod state;
pub mod view;

pub use config::{ConfigError, FadeConfig, MenuConfig, TitleTexts};
pub use error::{LayoutError, PanelError};
pub use fade::{FadeController, VisualState};
pub use grid::{GridRow, MemoryGrid};
pub use input::{
    InputRouter, NavigationKey, PanelIntent, PanelRegion, Route, ScrollDirection,
    scrolled_first_row,
};
pub use layout::{ContentMetrics, LayoutEngine, ParentSnapshot, Placement};
pub use panel::{Panel, PanelId};
pub use state::{ContentState, PanelState, PanelType, Retype, TitleBar, TitleElement, truncate_title};
pub use view::TabularView;
