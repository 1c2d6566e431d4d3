#![forbid(unsafe_code)]

//! Runtime primitives for the UI thread.
//!
//! Everything in this crate assumes a single cooperative event loop: no
//! threads, no locks, no preemption. The host loop measures elapsed time and
//! feeds it in; nothing here sleeps.

pub mod observers;
pub mod timer;

pub use observers::{ObserverId, Observers};
pub use timer::TimerSlot;
