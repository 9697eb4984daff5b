use std::fmt;

use smol_str::SmolStr;

/// A numbered placeholder that captures (left side) or re-inserts (right side)
/// a node or a data value.
///
/// Holes are plain values: two holes with the same number are the same hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hole(pub u32);

impl Hole {
    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a hole carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoleRole {
    /// One or more nodes
    Node,
    /// A data string
    Data,
}

impl HoleRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Data => "data",
        }
    }
}

/// `Type#N`: binds a node whose type is (a subtype of) `type_name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedHole {
    pub hole: Hole,
    pub type_name: SmolStr,
}

impl fmt::Display for TypedHole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.type_name, self.hole)
    }
}
