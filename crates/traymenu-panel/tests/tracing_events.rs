#![forbid(unsafe_code)]

//! Log events emitted by panels.
//!
//! Captures events with a small `tracing_subscriber` layer and checks the
//! levels and messages a host would see in its logs.

use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use traymenu_core::geometry::{Monitor, Rect};
use traymenu_panel::{GridRow, LayoutError, MemoryGrid, MenuConfig, Panel, PanelType};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn panel(
    panel_type: PanelType,
    level: usize,
    trigger_row: Option<usize>,
    rows: usize,
) -> Panel<MemoryGrid> {
    Panel::new(
        panel_type,
        level,
        trigger_row,
        MemoryGrid::uniform(rows, GridRow::new(16, 180, 22)),
        Arc::new(MenuConfig::default()),
    )
    .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn stale_anchor_logs_a_warning() {
    let events = with_captured_events(|| {
        let mut parent = panel(PanelType::Main, 0, None, 3);
        parent
            .adjust_to_monitor(&Monitor::new(Rect::new(0, 0, 1920, 1080), 40))
            .unwrap();
        let mut child = panel(PanelType::Sub, 1, Some(5), 2);
        let err = child
            .adjust_to_parent(
                Monitor::new(Rect::new(0, 0, 1920, 1080), 40).child_bounds(),
                &parent.snapshot_for_row(5),
            )
            .unwrap_err();
        assert!(err.is_stale_anchor());
    });
    let warnings: Vec<_> = events.iter().filter(|e| e.level == Level::WARN).collect();
    assert_eq!(warnings.len(), 1, "{events:?}");
    assert_eq!(warnings[0].message, "child layout skipped");
}

#[test]
fn lifecycle_logs_only_below_warn() {
    let events = with_captured_events(|| {
        let mut p = panel(PanelType::Main, 0, None, 4);
        p.set_title(Some("Music"));
        p.fade_in();
        p.fade_out();
        p.destroy();
    });
    assert!(events.iter().any(|e| e.message == "panel created"));
    assert!(events.iter().any(|e| e.message == "fade started"));
    assert!(events.iter().any(|e| e.message == "panel destroyed"));
    assert!(events.iter().all(|e| e.level > Level::WARN), "{events:?}");
}

#[test]
fn layout_on_destroyed_panel_is_silent_error() {
    let events = with_captured_events(|| {
        let mut p = panel(PanelType::Main, 0, None, 4);
        p.destroy();
        assert_eq!(
            p.adjust_to_monitor(&Monitor::new(Rect::new(0, 0, 800, 600), 0)),
            Err(LayoutError::Destroyed)
        );
    });
    assert!(!events.iter().any(|e| e.message == "panel placed"));
}
