#![forbid(unsafe_code)]

//! One panel of the cascade.
//!
//! A [`Panel`] ties together the pieces defined in the sibling modules: its
//! [`PanelState`] (type, title, content memo), a [`FadeController`], the
//! [`LayoutEngine`] placement rules, and the [`InputRouter`]. The panel owns
//! its [`TabularView`] and applies every computed change to it.
//!
//! Panels never open, close, or find each other. They report what happened
//! through [`PanelIntent`] observers and the coordinator decides.
//!
//! # Lifecycle
//!
//! ```text
//!   new ──▶ (hidden) ──fade_in──▶ visible ──fade_out──▶ hidden
//!                                     │
//!   any state ──destroy──▶ destroyed (terminal, every operation is a no-op)
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use traymenu_core::color::Rgb;
use traymenu_core::event::Event;
use traymenu_core::geometry::{ChildBounds, Monitor, Point, Rect};
use traymenu_runtime::{ObserverId, Observers};

use crate::config::MenuConfig;
use crate::error::{LayoutError, PanelError};
use crate::fade::{FadeController, VisualState};
use crate::input::{InputRouter, PanelIntent, PanelRegion, Route, scrolled_first_row};
use crate::layout::{ContentMetrics, LayoutEngine, ParentSnapshot, Placement};
use crate::state::{PanelState, PanelType, Retype, TitleBar};
use crate::view::TabularView;

static NEXT_PANEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique panel identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    fn next() -> Self {
        Self(NEXT_PANEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// A single menu panel wrapping a tabular view `V`.
pub struct Panel<V> {
    id: PanelId,
    config: Arc<MenuConfig>,
    state: PanelState,
    fade: FadeController,
    engine: LayoutEngine,
    router: InputRouter,
    view: V,
    placement: Option<Placement>,
    intents: Observers<PanelIntent>,
    destroyed: bool,
}

impl<V: TabularView> Panel<V> {
    /// Create a panel showing `panel_type` at `level` in the cascade.
    ///
    /// The root (`level == 0`) has no trigger row; every deeper panel must
    /// name the parent row it was opened from. `config` must pass
    /// [`MenuConfig::validate`].
    pub fn new(
        panel_type: PanelType,
        level: usize,
        trigger_row: Option<usize>,
        view: V,
        config: Arc<MenuConfig>,
    ) -> Result<Self, PanelError> {
        config.validate()?;
        let state = PanelState::new(panel_type, level, trigger_row, &config)?;
        Ok(Self::with_state(state, view, config))
    }

    /// A root panel that exists only to be replaced.
    ///
    /// Hosts create one of these before the first real menu is built so a
    /// coordinator always has a root to hold. It starts destroyed.
    #[must_use]
    pub fn placeholder(view: V, config: Arc<MenuConfig>) -> Self {
        let mut panel = Self::with_state(PanelState::root(&config), view, config);
        panel.destroy();
        panel
    }

    fn with_state(state: PanelState, mut view: V, config: Arc<MenuConfig>) -> Self {
        view.set_double_buffered(true);
        view.set_selection_colors(config.selected_item_color, Rgb::BLACK);
        let fade = FadeController::new(config.fade, config.opacity_half_threshold);
        let engine = LayoutEngine::new(config.scrollbar_allowance);
        let id = PanelId::next();
        tracing::debug!(
            panel = %id,
            level = state.level(),
            panel_type = ?state.panel_type(),
            "panel created"
        );
        Self {
            id,
            config,
            state,
            fade,
            engine,
            router: InputRouter::new(),
            view,
            placement: None,
            intents: Observers::new(),
            destroyed: false,
        }
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.state.level()
    }

    #[must_use]
    pub fn trigger_row(&self) -> Option<usize> {
        self.state.trigger_row()
    }

    #[must_use]
    pub fn panel_type(&self) -> PanelType {
        self.state.panel_type()
    }

    #[must_use]
    pub fn title(&self) -> &TitleBar {
        self.state.title()
    }

    #[must_use]
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    #[must_use]
    pub fn fade(&self) -> &FadeController {
        &self.fade
    }

    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        self.fade.state()
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.fade.opacity()
    }

    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, for the host's own row handling.
    ///
    /// Changing the rows does not invalidate the memoized row height.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Bounds from the last successful layout, or `None` before the first one.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.placement.map(|p| p.bounds)
    }

    /// Last successful layout.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // -- type and title ----------------------------------------------------

    /// Change what the panel shows. Ignored once destroyed.
    pub fn set_type(&mut self, panel_type: PanelType) -> Retype {
        if self.destroyed {
            return Retype::Ignored;
        }
        self.state.set_type(panel_type, &self.config)
    }

    /// Set the title text. Empty or absent input keeps the current title.
    pub fn set_title(&mut self, title: Option<&str>) -> bool {
        if self.destroyed {
            return false;
        }
        self.state.set_title(title, &self.config)
    }

    pub fn set_title_color_active(&mut self) {
        if !self.destroyed {
            self.state.set_title_color_active(&self.config);
        }
    }

    pub fn set_title_color_inactive(&mut self) {
        if !self.destroyed {
            self.state.set_title_color_inactive(&self.config);
        }
    }

    // -- visibility --------------------------------------------------------

    pub fn fade_in(&mut self) {
        if !self.destroyed {
            self.fade.fade_in();
        }
    }

    pub fn fade_half(&mut self) {
        if !self.destroyed {
            self.fade.fade_half();
        }
    }

    pub fn fade_out(&mut self) {
        if !self.destroyed {
            self.fade.fade_out();
        }
    }

    #[must_use]
    pub fn is_fading_in(&self) -> bool {
        self.fade.is_fading_in()
    }

    #[must_use]
    pub fn is_fading_out(&self) -> bool {
        self.fade.is_fading_out()
    }

    /// Advance the fade by host wall time. Returns whether opacity changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        !self.destroyed && self.fade.advance(elapsed)
    }

    /// Whether the panel is mapped on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.destroyed && self.fade.is_mapped()
    }

    /// Whether this panel is the one holding input focus.
    #[must_use]
    pub fn is_active(&self, focused: Option<PanelId>) -> bool {
        !self.destroyed && focused == Some(self.id)
    }

    /// Whether `point` is over this panel and the panel should take pointer input.
    ///
    /// A panel fading out below the half-opacity threshold no longer counts.
    #[must_use]
    pub fn is_mouse_on(&self, point: Point) -> bool {
        if self.destroyed || !self.fade.is_interactive(self.config.opacity_half_threshold) {
            return false;
        }
        self.bounds().is_some_and(|b| b.contains(point))
    }

    /// Which part of the panel lies under `point`, if any.
    #[must_use]
    pub fn region_at(&self, point: Point) -> Option<PanelRegion> {
        let placement = self.placement?;
        let bounds = placement.bounds;
        if !bounds.contains(point) {
            return None;
        }
        if point.y < bounds.top() + self.state.title().height() {
            return Some(PanelRegion::Title);
        }
        if placement.scrollbar && point.x >= bounds.right() - self.config.scrollbar_allowance {
            return Some(PanelRegion::Scrollbar);
        }
        Some(PanelRegion::View)
    }

    // -- layout ------------------------------------------------------------

    fn measure(&mut self) -> ContentMetrics {
        let rows_height = self.state.rows_height(|| self.view.auto_fit_rows());
        ContentMetrics {
            rows_height,
            columns_width: self.view.fast_auto_fit_columns(),
            title_height: self.state.title().height(),
        }
    }

    fn apply(&mut self, placement: Placement) -> Placement {
        self.view.set_viewport_size(placement.view_size);
        self.placement = Some(placement);
        tracing::debug!(
            panel = %self.id,
            bounds = ?placement.bounds,
            scrollbar = placement.scrollbar,
            "panel placed"
        );
        placement
    }

    /// Lay out the root panel against `monitor`.
    pub fn adjust_to_monitor(&mut self, monitor: &Monitor) -> Result<Placement, LayoutError> {
        if self.destroyed {
            return Err(LayoutError::Destroyed);
        }
        if self.level() != 0 {
            return Err(LayoutError::LevelMismatch {
                level: self.level(),
            });
        }
        let metrics = self.measure();
        let placement = self.engine.place_root(&metrics, monitor);
        Ok(self.apply(placement))
    }

    /// Lay out a child panel next to its parent.
    ///
    /// If the parent no longer has the trigger row this returns
    /// [`LayoutError::StaleAnchor`] and leaves the panel where it was.
    pub fn adjust_to_parent(
        &mut self,
        bounds: ChildBounds,
        parent: &ParentSnapshot,
    ) -> Result<Placement, LayoutError> {
        if self.destroyed {
            return Err(LayoutError::Destroyed);
        }
        let level = self.level();
        let Some(trigger_row) = self.trigger_row().filter(|_| level > 0) else {
            return Err(LayoutError::LevelMismatch { level });
        };
        if let Err(err) = LayoutEngine::anchor_row(parent, trigger_row) {
            tracing::warn!(panel = %self.id, %err, "child layout skipped");
            return Err(err);
        }
        let metrics = self.measure();
        let placement = self
            .engine
            .place_child(&metrics, parent, trigger_row, bounds)?;
        Ok(self.apply(placement))
    }

    /// What a child opened from `row` needs to know about this panel.
    #[must_use]
    pub fn snapshot_for_row(&self, row: usize) -> ParentSnapshot {
        let location = self.bounds().map_or(Point::default(), |b| b.location());
        ParentSnapshot {
            location,
            view_offset_y: self.state.title().height(),
            row_count: self.view.row_count(),
            trigger_row_rect: self.view.row_rect(row),
        }
    }

    // -- input -------------------------------------------------------------

    /// Register an observer for this panel's intents. Observers run in
    /// registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&PanelIntent) + 'static) -> ObserverId {
        self.intents.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.intents.unsubscribe(id)
    }

    /// Handle `event` delivered to `region` and report what was done.
    ///
    /// After [`Panel::destroy`] every event is consumed with no effect.
    pub fn handle_event(&mut self, region: PanelRegion, event: &Event) -> Route {
        if self.destroyed {
            return Route::Ignore;
        }
        let route = self.router.route(region, event);
        match route {
            Route::Scroll(direction) => {
                let first = scrolled_first_row(
                    self.view.first_displayed_row(),
                    self.view.row_count(),
                    self.config.scroll_speed,
                    direction,
                );
                self.view.set_first_displayed_row(first);
                tracing::trace!(panel = %self.id, first, "scrolled");
                self.emit(PanelIntent::MouseWheelScrolled);
            }
            Route::Intent(intent) => self.emit(intent),
            Route::TitleHover(hovered) => self.state.set_title_hovered(hovered, &self.config),
            Route::AdvanceFade => {
                self.fade.tick();
            }
            Route::Ignore | Route::FallThrough => {}
        }
        route
    }

    fn emit(&mut self, intent: PanelIntent) {
        tracing::debug!(panel = %self.id, ?intent, "intent");
        self.intents.emit(&intent);
    }

    // -- teardown ----------------------------------------------------------

    /// Stop the fade, drop all observers, and mark the panel dead.
    ///
    /// Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.fade.teardown();
        self.intents.clear();
        tracing::debug!(panel = %self.id, "panel destroyed");
    }
}

impl<V: fmt::Debug> fmt::Debug for Panel<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("fade", &self.fade)
            .field("view", &self.view)
            .field("placement", &self.placement)
            .field("observers", &self.intents.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
