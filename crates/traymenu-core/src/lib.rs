#![forbid(unsafe_code)]

//! Core: screen geometry, colors, input events, and animation primitives
//! shared by every crate of the tray menu engine.

pub mod animation;
pub mod color;
pub mod event;
pub mod geometry;
