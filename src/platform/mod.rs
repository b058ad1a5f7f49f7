//! Platform abstraction layer
//!
//! Hosts that feed timer ticks and key presses into `App`:
//! - `web`: browser canvas, `setInterval`, DOM keyboard events
//! - `headless`: plain loop with the autopilot at the keys

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;
