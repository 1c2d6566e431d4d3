#![forbid(unsafe_code)]

//! Opacity state machine for one panel.
//!
//! ```text
//!   Hidden ──fade_in──▶ FadingIn ──settle──▶ Visible
//!   Visible ──fade_half──▶ FadingHalf (rests at half opacity)
//!   Visible | FadingHalf ──fade_out──▶ FadingOut ──settle──▶ Hidden
//! ```
//!
//! Every `fade_*` call cancels the ramp in flight and starts a new one from
//! the current opacity. The controller owns a single [`TimerSlot`], so two
//! ramps can never advance at once. The panel is mapped on screen when it
//! leaves `Hidden` and unmapped when a fade-out settles; ticks in between
//! change opacity only.
//!
//! # Invariants
//!
//! 1. `is_fading_in` and `is_fading_out` are never both true.
//! 2. The timer is armed if and only if a ramp is in flight.
//! 3. A settled ramp lands exactly on its target opacity.
//! 4. `teardown` is safe in every state, including mid-ramp.

use std::time::Duration;

use traymenu_core::animation::{Fade, lerp};
use traymenu_runtime::TimerSlot;

use crate::config::FadeConfig;

/// Visual state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// Unmapped, opacity 0.
    #[default]
    Hidden,
    /// Ramping toward full opacity.
    FadingIn,
    /// Fully opaque, no ramp.
    Visible,
    /// Ramping toward, or resting at, half opacity.
    FadingHalf,
    /// Ramping toward transparent; unmaps when it settles.
    FadingOut,
}

#[derive(Debug, Clone, Copy)]
struct Ramp {
    from: f32,
    to: f32,
    fade: Fade,
}

/// Drives a panel's opacity from the host's timer ticks.
#[derive(Debug)]
pub struct FadeController {
    config: FadeConfig,
    half_opacity: f32,
    state: VisualState,
    opacity: f32,
    mapped: bool,
    ramp: Option<Ramp>,
    timer: TimerSlot,
}

impl FadeController {
    /// Create a hidden controller. `half_opacity` is the `fade_half` target.
    #[must_use]
    pub fn new(config: FadeConfig, half_opacity: f32) -> Self {
        Self {
            config,
            half_opacity: half_opacity.clamp(0.0, 1.0),
            state: VisualState::Hidden,
            opacity: 0.0,
            mapped: false,
            ramp: None,
            timer: TimerSlot::new(),
        }
    }

    /// Ramp to full opacity, mapping the panel if hidden.
    pub fn fade_in(&mut self) {
        if self.state == VisualState::Visible && self.ramp.is_none() {
            return;
        }
        self.start(VisualState::FadingIn, 1.0);
    }

    /// Ramp to half opacity.
    pub fn fade_half(&mut self) {
        if self.state == VisualState::FadingHalf
            && self.ramp.is_none()
            && self.opacity == self.half_opacity
        {
            return;
        }
        self.start(VisualState::FadingHalf, self.half_opacity);
    }

    /// Ramp to transparent and unmap. No-op when already hidden.
    pub fn fade_out(&mut self) {
        if self.state == VisualState::Hidden {
            return;
        }
        self.start(VisualState::FadingOut, 0.0);
    }

    fn start(&mut self, target_state: VisualState, target: f32) {
        if !self.mapped {
            self.mapped = true;
            tracing::debug!("panel mapped");
        }
        let replaced = self.ramp.is_some();
        self.ramp = Some(Ramp {
            from: self.opacity,
            to: target,
            fade: Fade::new(self.config.ramp_duration()).easing(self.config.easing.function()),
        });
        self.state = target_state;
        self.timer.arm(self.config.interval());
        tracing::debug!(
            state = ?target_state,
            from = self.opacity,
            to = target,
            replaced,
            "fade started"
        );
    }

    /// Advance by host wall time. Returns whether opacity changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let ticks = self.timer.poll(elapsed);
        let before = self.opacity;
        for _ in 0..ticks {
            if !self.step() {
                break;
            }
        }
        self.opacity != before
    }

    /// Advance exactly one timer interval. Returns whether opacity changed.
    pub fn tick(&mut self) -> bool {
        let before = self.opacity;
        if self.timer.is_armed() {
            self.step();
        }
        self.opacity != before
    }

    /// Apply one interval of the ramp. Returns whether the ramp is still running.
    fn step(&mut self) -> bool {
        let Some(ramp) = self.ramp.as_mut() else {
            self.timer.cancel();
            return false;
        };
        ramp.fade.tick(self.timer.interval().unwrap_or(self.config.interval()));
        if ramp.fade.is_complete() {
            self.opacity = ramp.to;
            self.settle();
            false
        } else {
            self.opacity = lerp(ramp.from, ramp.to, ramp.fade.value());
            tracing::trace!(opacity = self.opacity, "fade tick");
            true
        }
    }

    fn settle(&mut self) {
        self.ramp = None;
        self.timer.cancel();
        match self.state {
            VisualState::FadingIn => self.state = VisualState::Visible,
            VisualState::FadingOut => {
                self.state = VisualState::Hidden;
                self.mapped = false;
                tracing::debug!("panel unmapped");
            }
            VisualState::FadingHalf | VisualState::Visible | VisualState::Hidden => {}
        }
        tracing::debug!(state = ?self.state, opacity = self.opacity, "fade settled");
    }

    /// Stop any ramp and hide immediately. Safe at any point of any ramp.
    pub fn teardown(&mut self) {
        let was_running = self.timer.cancel();
        self.ramp = None;
        self.state = VisualState::Hidden;
        self.opacity = 0.0;
        self.mapped = false;
        tracing::debug!(was_running, "fade torn down");
    }

    #[must_use]
    pub fn state(&self) -> VisualState {
        self.state
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the panel is on screen (any state but `Hidden`).
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// A fade-in ramp is currently animating.
    #[must_use]
    pub fn is_fading_in(&self) -> bool {
        self.state == VisualState::FadingIn && self.ramp.is_some()
    }

    /// A fade-out ramp is currently animating.
    #[must_use]
    pub fn is_fading_out(&self) -> bool {
        self.state == VisualState::FadingOut && self.ramp.is_some()
    }

    /// Any ramp is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.ramp.is_some()
    }

    /// Mapped and at least half opaque, so pointer input should reach it.
    #[must_use]
    pub fn is_interactive(&self, threshold: f32) -> bool {
        self.mapped && self.opacity >= threshold
    }

    /// The controller's timer, for hosts that schedule wakeups from it.
    #[must_use]
    pub fn timer(&self) -> &TimerSlot {
        &self.timer
    }
}
