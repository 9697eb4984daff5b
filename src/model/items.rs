//! Left-side (pattern) items of a transformation.

use std::fmt;

use smol_str::SmolStr;

use super::hole::{Hole, TypedHole};
use crate::base::{Quoted, Span};

/// How many consecutive nodes an item consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Exactly one
    #[default]
    Normal,
    /// `[item]`: zero or one
    Optional,
    /// `{item}`: one or more
    Repeated,
}

/// The `<...>` slot of a pattern or template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataDescriptor {
    /// `<"text">`: data must equal (pattern) or is set to (template) the text
    Static(SmolStr),
    /// `<#N>`: data is captured (pattern) or substituted (template)
    Hole(Hole),
}

impl fmt::Display for DataDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => write!(f, "<{}>", Quoted::double(text)),
            Self::Hole(hole) => write!(f, "<{hole}>"),
        }
    }
}

/// `Type<data>(children...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDescriptor {
    pub type_name: SmolStr,
    pub data: Option<DataDescriptor>,
    pub children: Vec<LeftItem>,
}

impl fmt::Display for PatternDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)?;
        if let Some(data) = &self.data {
            write!(f, "{data}")?;
        }
        if !self.children.is_empty() {
            f.write_str("(")?;
            write_list(f, &self.children)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A literal token to match against a leaf node's data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolDescriptor {
    /// `"+"`
    Text(SmolStr),
    /// `'0'..'9'`: a single character inside the range
    Range(char, char),
}

impl SymbolDescriptor {
    pub fn accepts(&self, data: &str) -> bool {
        match self {
            Self::Text(text) => text == data,
            Self::Range(low, high) => {
                let mut chars = data.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if (*low..=*high).contains(&c))
            }
        }
    }
}

impl fmt::Display for SymbolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", Quoted::double(text)),
            Self::Range(low, high) => {
                let (mut low_buf, mut high_buf) = ([0; 4], [0; 4]);
                let low = Quoted::single(low.encode_utf8(&mut low_buf));
                let high = Quoted::single(high.encode_utf8(&mut high_buf));
                write!(f, "{low}..{high}")
            }
        }
    }
}

/// The variants a left-side item can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeftItemKind {
    Pattern(PatternDescriptor),
    Symbol(SymbolDescriptor),
    TypedHole(TypedHole),
    /// `#N` inside pattern children: binds the child whatever its type
    ChildHole(Hole),
    /// `&(a, b, ...)`
    And(Vec<LeftItem>),
    /// `|(a, b, ...)`
    Or(Vec<LeftItem>),
}

/// One item of a transformation's left side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftItem {
    pub kind: LeftItemKind,
    pub mode: MatchMode,
    pub negated: bool,
    pub span: Span,
}

impl LeftItem {
    pub fn new(kind: LeftItemKind, span: Span) -> Self {
        Self {
            kind,
            mode: MatchMode::Normal,
            negated: false,
            span,
        }
    }

    /// Nested items: pattern children or logical operands
    pub fn nested(&self) -> &[LeftItem] {
        match &self.kind {
            LeftItemKind::Pattern(pattern) => &pattern.children,
            LeftItemKind::And(items) | LeftItemKind::Or(items) => items,
            LeftItemKind::Symbol(_) | LeftItemKind::TypedHole(_) | LeftItemKind::ChildHole(_) => &[],
        }
    }

    /// Every hole in this item, with whether it captures data
    pub fn holes(&self) -> Vec<(Hole, bool)> {
        let mut holes = Vec::new();
        self.collect_holes(&mut holes);
        holes
    }

    fn collect_holes(&self, out: &mut Vec<(Hole, bool)>) {
        match &self.kind {
            LeftItemKind::Pattern(pattern) => {
                if let Some(DataDescriptor::Hole(hole)) = &pattern.data {
                    out.push((*hole, true));
                }
            }
            LeftItemKind::TypedHole(typed) => out.push((typed.hole, false)),
            LeftItemKind::ChildHole(hole) => out.push((*hole, false)),
            LeftItemKind::Symbol(_) | LeftItemKind::And(_) | LeftItemKind::Or(_) => {}
        }
        for item in self.nested() {
            item.collect_holes(out);
        }
    }
}

impl fmt::Display for LeftItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            MatchMode::Normal => {}
            MatchMode::Optional => f.write_str("[")?,
            MatchMode::Repeated => f.write_str("{")?,
        }
        if self.negated {
            f.write_str("~")?;
        }
        match &self.kind {
            LeftItemKind::Pattern(pattern) => write!(f, "{pattern}")?,
            LeftItemKind::Symbol(symbol) => write!(f, "{symbol}")?,
            LeftItemKind::TypedHole(typed) => write!(f, "{typed}")?,
            LeftItemKind::ChildHole(hole) => write!(f, "{hole}")?,
            LeftItemKind::And(items) => {
                f.write_str("&(")?;
                write_list(f, items)?;
                f.write_str(")")?;
            }
            LeftItemKind::Or(items) => {
                f.write_str("|(")?;
                write_list(f, items)?;
                f.write_str(")")?;
            }
        }
        match self.mode {
            MatchMode::Normal => Ok(()),
            MatchMode::Optional => f.write_str("]"),
            MatchMode::Repeated => f.write_str("}"),
        }
    }
}

pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
