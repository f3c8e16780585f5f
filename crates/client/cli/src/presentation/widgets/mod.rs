//! Widget modules for UI rendering.
//!
//! Each widget is a pure function that reads a [`Snapshot`](charter_core::Snapshot)
//! and renders to a terminal frame.

pub mod cargo;
pub mod footer;
pub mod header;
pub mod map;
pub mod messages;
pub mod panel;
