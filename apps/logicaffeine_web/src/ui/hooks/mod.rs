//! Custom Dioxus hooks for the Logicaffeine UI.
//!
//! This module provides reusable hooks for common UI patterns.

pub mod use_inactivity_timer;

pub use use_inactivity_timer::{use_inactivity_timer, InactivityState};
