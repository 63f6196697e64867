//! UI module - reusable widgets shared by the carousel and overlays

pub mod components;
