//! # Config Crate
//!
//! Centralized configuration constants for the Smart Delete command.
//! Command identity, key bindings, and the tunable thresholds of the
//! delete decision tree are defined here so the engine and its
//! registration code agree on a single set of values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{SmartDeleteConfig, OPERATOR_ID, SMALL_LOOP_MIN_EDGES};
//!
//! assert_eq!(OPERATOR_ID, "mesh.dissolve_contextual_bfa");
//!
//! let cfg = SmartDeleteConfig::default();
//! assert!(!cfg.use_verts);
//! assert!(cfg.is_small_loop(SMALL_LOOP_MIN_EDGES));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Host-Neutral**: No editor-specific types, only plain values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
