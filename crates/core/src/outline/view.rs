//! Host preferences applied on top of the index.
//!
//! The index keeps model order so offset lookups stay faithful to the source. Sorting and
//! hiding variables only happen here, on copies handed to the host.

use super::builder::placeholder;
use super::index::OutlineIndex;
use shellscope_api::{ItemKind, OutlineConfig, OutlineInput, SymbolItem};
use std::sync::Arc;

pub struct OutlineView {
    index: Arc<OutlineIndex>,
    config: OutlineConfig,
}

impl OutlineView {
    pub fn new(index: Arc<OutlineIndex>, config: OutlineConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &Arc<OutlineIndex> {
        &self.index
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn elements(&self, input: Option<&dyn OutlineInput>) -> Vec<SymbolItem> {
        let roots = self.index.root_elements(input);
        let mut items = present(&roots, &self.config);
        if items.is_empty() {
            items.push(placeholder());
        }
        items
    }

    /// Item to select for the editor cursor, if the outline is linked with the editor.
    pub fn item_at_cursor(&self, offset: usize) -> Option<SymbolItem> {
        if !self.config.link_with_editor {
            return None;
        }
        self.index.find_by_offset(offset)
    }
}

fn present(items: &[SymbolItem], config: &OutlineConfig) -> Vec<SymbolItem> {
    let mut presented: Vec<SymbolItem> = items
        .iter()
        .filter(|item| config.show_variables || item.kind != ItemKind::GlobalVariable)
        .map(|item| {
            let mut item = item.clone();
            if item.has_children() {
                item.children = present(&item.children, config);
            }
            item
        })
        .collect();

    if config.sort_alphabetical {
        sort_symbols(&mut presented);
    }
    presented
}

// Meta items stay at their index; real symbols are sorted among the remaining slots.
fn sort_symbols(items: &mut [SymbolItem]) {
    let slots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.kind.is_meta())
        .map(|(i, _)| i)
        .collect();

    let mut symbols: Vec<SymbolItem> = slots.iter().map(|&i| items[i].clone()).collect();
    symbols.sort_by_cached_key(|item| item.name.to_lowercase());

    for (slot, symbol) in slots.into_iter().zip(symbols) {
        items[slot] = symbol;
    }
}
