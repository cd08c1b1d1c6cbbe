//! UI module - contains UI rendering components
//!
//! Widgets shared by the upload and results views.

pub mod components;
