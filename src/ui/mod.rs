//! UI module - widgets shared across the app views

pub mod components;
