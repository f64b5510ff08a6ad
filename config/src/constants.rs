//! # Configuration Constants
//!
//! Centralized constants for the Smart Delete command. The decision tree
//! thresholds, the command identity and its key binding are defined here.
//!
//! ## Categories
//!
//! - **Command**: Identifier, label and icon of the exposed command
//! - **Keymap**: Keymap name and keys the command is bound to
//! - **Decision**: Thresholds used when choosing a delete strategy
//! - **Messages**: User-facing report text

use std::fmt;

// =============================================================================
// COMMAND CONSTANTS
// =============================================================================

/// Identifier of the smart delete command.
///
/// Keymap items and menu entries refer to the command by this id.
///
/// # Example
///
/// ```rust
/// use config::constants::OPERATOR_ID;
///
/// assert!(OPERATOR_ID.starts_with("mesh."));
/// ```
pub const OPERATOR_ID: &str = "mesh.dissolve_contextual_bfa";

/// Human readable label shown in menus.
pub const OPERATOR_LABEL: &str = "Smart Delete";

/// Tooltip describing the command.
pub const OPERATOR_DESCRIPTION: &str = "Dissolves mesh elements based on context instead \
of forcing the user to select from a menu what it should dissolve";

/// Icon drawn next to the menu entry.
pub const OPERATOR_ICON: &str = "DELETE";

/// Identifier of the stock delete command whose binding gets replaced.
///
/// # Example
///
/// ```rust
/// use config::constants::{OPERATOR_ID, REPLACED_OPERATOR_ID};
///
/// assert_ne!(OPERATOR_ID, REPLACED_OPERATOR_ID);
/// ```
pub const REPLACED_OPERATOR_ID: &str = "mesh.delete";

/// Default for the "also dissolve bare vertices" option of edge dissolve.
pub const DEFAULT_USE_VERTS: bool = false;

// =============================================================================
// KEYMAP CONSTANTS
// =============================================================================

/// Name of the keymap active while editing meshes.
pub const MESH_KEYMAP: &str = "Mesh";

/// Keys bound to the command. The `X` key keeps its stock menu.
///
/// # Example
///
/// ```rust
/// use config::constants::BOUND_KEYS;
///
/// assert_eq!(BOUND_KEYS, ["DEL"]);
/// ```
pub const BOUND_KEYS: [&str; 1] = ["DEL"];

/// Name of the edit-mode context menu the command is appended to.
pub const EDIT_MESH_MENU: &str = "VIEW3D_MT_edit_mesh";

// =============================================================================
// DECISION CONSTANTS
// =============================================================================

/// Smallest edge count treated as a small closed loop.
///
/// Dissolving the edges of triangles, quads and pentagons leaves degenerate
/// geometry, so selections on such loops delete edges together with the
/// faces they bound.
///
/// # Example
///
/// ```rust
/// use config::constants::SMALL_LOOP_MIN_EDGES;
///
/// // A triangle is the smallest closed loop.
/// assert_eq!(SMALL_LOOP_MIN_EDGES, 3);
/// ```
pub const SMALL_LOOP_MIN_EDGES: usize = 3;

/// Largest edge count treated as a small closed loop.
pub const SMALL_LOOP_MAX_EDGES: usize = 5;

/// Degree of a vertex that only passes an edge through.
///
/// Vertices with this degree left behind by an edge dissolve are dissolved
/// again to straighten the remaining edge.
pub const PASS_THROUGH_DEGREE: usize = 2;

/// Degree of a vertex at the free end of an isolated edge.
pub const SPUR_DEGREE: usize = 1;

// =============================================================================
// MESSAGE CONSTANTS
// =============================================================================

/// Substring a host uses to flag a boundary region failure.
pub const BOUNDARY_REGION_MARKER: &str = "Invalid boundary region";

/// Report shown when a vertex dissolve cannot be applied.
pub const BOUNDARY_REGION_REPORT: &str = "Invalid boundary region to join faces. You cannot \
delete this geometry that way. Try another delete method or selection";

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Per-invocation settings of the smart delete command.
///
/// # Examples
/// ```
/// use config::constants::SmartDeleteConfig;
/// let config = SmartDeleteConfig::default();
/// assert!(config.is_small_loop(4));
/// assert!(!config.is_small_loop(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartDeleteConfig {
    /// Also dissolve bare vertices left behind by an edge dissolve.
    pub use_verts: bool,
    /// Smallest edge count handled as a small loop.
    pub small_loop_min: usize,
    /// Largest edge count handled as a small loop.
    pub small_loop_max: usize,
}

impl SmartDeleteConfig {
    /// Builds a configuration, rejecting loop ranges that cannot describe a
    /// closed polygon.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SmartDeleteConfig;
    /// let cfg = SmartDeleteConfig::new(true, 3, 4).expect("valid config");
    /// assert!(cfg.use_verts);
    /// assert!(SmartDeleteConfig::new(false, 2, 4).is_err());
    /// ```
    pub fn new(use_verts: bool, small_loop_min: usize, small_loop_max: usize) -> Result<Self, ConfigError> {
        if small_loop_min < SMALL_LOOP_MIN_EDGES {
            return Err(ConfigError::LoopTooSmall(small_loop_min));
        }
        if small_loop_max < small_loop_min {
            return Err(ConfigError::EmptyLoopRange {
                min: small_loop_min,
                max: small_loop_max,
            });
        }
        Ok(Self {
            use_verts,
            small_loop_min,
            small_loop_max,
        })
    }

    /// Returns a copy with the `use_verts` option replaced.
    pub fn with_use_verts(self, use_verts: bool) -> Self {
        Self { use_verts, ..self }
    }

    /// True when `edge_count` edges form a loop small enough that dissolving
    /// it would leave degenerate faces.
    #[inline]
    pub fn is_small_loop(&self, edge_count: usize) -> bool {
        (self.small_loop_min..=self.small_loop_max).contains(&edge_count)
    }
}

impl Default for SmartDeleteConfig {
    fn default() -> Self {
        Self {
            use_verts: DEFAULT_USE_VERTS,
            small_loop_min: SMALL_LOOP_MIN_EDGES,
            small_loop_max: SMALL_LOOP_MAX_EDGES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the small loop range starts below a triangle.
    LoopTooSmall(usize),
    /// Raised when the small loop range is empty.
    EmptyLoopRange { min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoopTooSmall(value) => {
                write!(f, "small_loop_min must be >= {SMALL_LOOP_MIN_EDGES}: {value}")
            }
            ConfigError::EmptyLoopRange { min, max } => {
                write!(f, "small loop range is empty: {min}..={max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
