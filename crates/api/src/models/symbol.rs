use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminates real symbols from the synthetic status nodes of an outline.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Function,
    GlobalVariable,
    MetaInfo,
    MetaError,
    MetaDebug,
}

impl ItemKind {
    /// Synthetic nodes carry a message rather than a source identifier.
    pub fn is_meta(self) -> bool {
        matches!(
            self,
            ItemKind::MetaInfo | ItemKind::MetaError | ItemKind::MetaDebug
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Function => "function",
            ItemKind::GlobalVariable => "global_variable",
            ItemKind::MetaInfo => "meta_info",
            ItemKind::MetaError => "meta_error",
            ItemKind::MetaDebug => "meta_debug",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character range of a symbol. Containment is inclusive on both ends.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub length: usize,
    pub end: usize,
}

impl Span {
    /// Zero span used by synthetic items.
    pub const EMPTY: Span = Span {
        start: 0,
        length: 0,
        end: 0,
    };

    /// Builds a span from explicit parts, clamping `end` so that `start <= end` holds.
    pub fn new(start: usize, length: usize, end: usize) -> Self {
        Self {
            start,
            length,
            end: end.max(start),
        }
    }

    pub fn between(start: usize, end: usize) -> Self {
        let end = end.max(start);
        Self {
            start,
            length: end - start,
            end,
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

/// A node of the outline tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SymbolItem {
    pub name: String,
    pub kind: ItemKind,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SymbolItem>,
}

impl SymbolItem {
    pub fn new(name: impl Into<String>, kind: ItemKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// A synthetic node with a zero span.
    pub fn meta(kind: ItemKind, message: impl Into<String>) -> Self {
        Self::new(message, kind, Span::EMPTY)
    }

    pub fn with_children(mut self, children: Vec<SymbolItem>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
