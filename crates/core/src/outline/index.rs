use super::builder::{TreeBuilder, placeholder};
use shellscope_api::{ItemKind, OutlineConfig, OutlineInput, Result, ScriptModel, SymbolItem};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Uninitialized,
    Empty,
    Populated,
}

#[derive(Debug, Clone)]
enum Slot {
    Uninitialized,
    Empty,
    Populated(Arc<[SymbolItem]>),
}

/// Holds the current outline tree and answers host queries against it.
///
/// The tree is only ever replaced as a whole. Readers take an `Arc` snapshot under the lock,
/// so a query running while a rebuild completes keeps working on the tree it started with.
#[derive(Debug)]
pub struct OutlineIndex {
    builder: TreeBuilder,
    current: Mutex<Slot>,
    placeholder: Arc<[SymbolItem]>,
}

impl Default for OutlineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineIndex {
    pub fn new() -> Self {
        Self::with_builder(TreeBuilder::new())
    }

    pub fn from_config(config: &OutlineConfig) -> Result<Self> {
        Ok(Self::with_builder(TreeBuilder::from_config(config)?))
    }

    pub fn with_builder(builder: TreeBuilder) -> Self {
        Self {
            builder,
            current: Mutex::new(Slot::Uninitialized),
            placeholder: Arc::from(vec![placeholder()]),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.current.lock().unwrap_or_else(|poisoned| {
            warn!("outline lock poisoned, recovering last installed tree");
            poisoned.into_inner()
        })
    }

    fn snapshot(&self) -> Option<Arc<[SymbolItem]>> {
        match &*self.lock() {
            Slot::Populated(items) => Some(items.clone()),
            Slot::Uninitialized | Slot::Empty => None,
        }
    }

    pub fn state(&self) -> IndexState {
        match &*self.lock() {
            Slot::Uninitialized => IndexState::Uninitialized,
            Slot::Empty => IndexState::Empty,
            Slot::Populated(_) => IndexState::Populated,
        }
    }

    /// Replaces the current tree. `None` (the parse failed entirely) empties the index.
    pub fn rebuild(&self, model: Option<&ScriptModel>) {
        let Some(model) = model else {
            *self.lock() = Slot::Empty;
            debug!("outline reset to empty");
            return;
        };

        let started = Instant::now();
        let items = self.builder.build(model);
        let count = items.len();
        let slot = if items.is_empty() {
            Slot::Empty
        } else {
            Slot::Populated(Arc::from(items))
        };
        *self.lock() = slot;

        debug!(
            items = count,
            functions = model.functions.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "outline rebuilt"
        );
    }

    /// Root items for display. Unsupported inputs yield a single descriptive item, an unset or
    /// empty tree yields the placeholder.
    pub fn root_elements(&self, input: Option<&dyn OutlineInput>) -> Arc<[SymbolItem]> {
        if let Some(input) = input {
            if input.as_script_model().is_none() {
                warn!(%input, "unsupported outline input");
                let message = format!("Unsupported input element: {input}");
                return Arc::from(vec![SymbolItem::meta(ItemKind::MetaInfo, message)]);
            }
        }

        match self.snapshot() {
            Some(items) if !items.is_empty() => items,
            _ => self.placeholder.clone(),
        }
    }

    pub fn children_of<'a>(&self, node: &'a SymbolItem) -> Option<&'a [SymbolItem]> {
        if node.has_children() {
            Some(&node.children)
        } else {
            None
        }
    }

    pub fn is_leaf(&self, node: &SymbolItem) -> bool {
        !node.has_children()
    }

    /// Root-level items whose kind is one of `kinds`, in root order. Children are not searched.
    pub fn find_items_of_type(&self, kinds: &[ItemKind]) -> Vec<SymbolItem> {
        let Some(items) = self.snapshot() else {
            return Vec::new();
        };
        items
            .iter()
            .filter(|item| kinds.contains(&item.kind))
            .cloned()
            .collect()
    }

    /// Most specific item whose span contains `offset`.
    pub fn find_by_offset(&self, offset: usize) -> Option<SymbolItem> {
        let items = self.snapshot()?;
        let found = find_in(&items, offset).cloned();
        trace!(offset, found = found.as_ref().map(|i| i.name.as_str()), "offset lookup");
        found
    }
}

// Children are tested before their parent, otherwise an enclosing function would hide the
// variables declared inside it.
fn find_in(items: &[SymbolItem], offset: usize) -> Option<&SymbolItem> {
    for item in items {
        if item.has_children() {
            if let Some(found) = find_in(&item.children, offset) {
                return Some(found);
            }
        }
        if item.span.contains(offset) {
            return Some(item);
        }
    }
    None
}
