//! Mini Flight
//!
//! A small arcade game built with Rust, winit, and wgpu: keep the craft
//! airborne, dodge clouds, birds and storm columns, and cover the full
//! distance to win.

/// Game application - windowing, rendering, and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Layered configuration (window, renderer, gameplay tuning)
pub mod config;

/// Startup and CI health checks
pub mod health;

/// Game simulation - world state, obstacles, and physics
pub mod sim;
