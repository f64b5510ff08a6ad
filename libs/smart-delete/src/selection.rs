//! # Selection Types
//!
//! Selection mode flags and the element kinds a host delete can target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three selection mode toggles of a mesh editing session.
///
/// More than one flag can be set at once; the engine dispatches on the
/// combination.
///
/// # Example
///
/// ```rust
/// use smart_delete::SelectMode;
///
/// let mode = SelectMode::EDGE;
/// assert!(mode.is_pure_edge());
/// assert!(!mode.is_pure_face());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectMode {
    /// Vertex selection enabled
    pub vertex: bool,
    /// Edge selection enabled
    pub edge: bool,
    /// Face selection enabled
    pub face: bool,
}

impl SelectMode {
    /// Vertex selection only.
    pub const VERTEX: Self = Self::new(true, false, false);
    /// Edge selection only.
    pub const EDGE: Self = Self::new(false, true, false);
    /// Face selection only.
    pub const FACE: Self = Self::new(false, false, true);

    /// Creates a mode from its three flags.
    pub const fn new(vertex: bool, edge: bool, face: bool) -> Self {
        Self { vertex, edge, face }
    }

    /// Edge selection on and face selection off.
    #[inline]
    pub fn is_pure_edge(&self) -> bool {
        self.edge && !self.face
    }

    /// Face selection on and edge selection off.
    #[inline]
    pub fn is_pure_face(&self) -> bool {
        self.face && !self.edge
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [(self.vertex, "VERT"), (self.edge, "EDGE"), (self.face, "FACE")];
        let names: Vec<&str> = flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join("+"))
        }
    }
}

/// What a hard delete removes.
///
/// Mirrors the element choices of a stock mesh delete command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeleteType {
    /// Selected vertices and everything using them
    Vertex,
    /// Selected edges, faces using them, and vertices left without edges
    Edge,
    /// Selected faces and geometry only they used
    Face,
    /// Selected edges and faces using them, vertices are kept
    EdgeFace,
}

impl fmt::Display for DeleteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeleteType::Vertex => "VERT",
            DeleteType::Edge => "EDGE",
            DeleteType::Face => "FACE",
            DeleteType::EdgeFace => "EDGE_FACE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_modes() {
        assert!(SelectMode::EDGE.is_pure_edge());
        assert!(SelectMode::FACE.is_pure_face());
        assert!(!SelectMode::new(false, true, true).is_pure_edge());
        assert!(!SelectMode::new(false, true, true).is_pure_face());
    }

    #[test]
    fn test_select_mode_display() {
        assert_eq!(SelectMode::VERTEX.to_string(), "VERT");
        assert_eq!(SelectMode::new(true, true, false).to_string(), "VERT+EDGE");
        assert_eq!(SelectMode::default().to_string(), "NONE");
    }

    #[test]
    fn test_delete_type_display() {
        assert_eq!(DeleteType::EdgeFace.to_string(), "EDGE_FACE");
    }
}
