//! Pitch usage and characteristics by times through the order.
//!
//! The [`data`] module holds the whole pipeline and has no UI dependency;
//! [`state`], [`app`] and [`ui`] wrap it in an eframe viewer.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
