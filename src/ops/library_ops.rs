use indexmap::IndexMap;
use serde_json::Map;

use crate::io::clipboard::{self, Clipboard};
use crate::model::macro_item::{
    Category, CategoryFilter, DRAFT_ID, Library, MacroDraft, MacroItem, MacroPatch,
};
use crate::util::html::html_to_text;
use crate::util::ids::unique_id;
use crate::util::time::{next_timestamp, now_millis};

/// Error type for library operations
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("macro not found: {0}")]
    NotFound(String),
    #[error("a macro needs both a title and content")]
    IncompleteDraft,
}

/// Macros whose title or content contains `query` (ignoring case) and whose
/// category passes `filter`, most recently touched first.
pub fn list<'a>(library: &'a Library, query: &str, filter: CategoryFilter) -> Vec<&'a MacroItem> {
    let needle = query.to_lowercase();
    let mut hits: Vec<&MacroItem> = library
        .items()
        .filter(|m| filter.matches(m.category))
        .filter(|m| {
            needle.is_empty()
                || m.title.to_lowercase().contains(&needle)
                || m.content.to_lowercase().contains(&needle)
        })
        .collect();
    hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    hits
}

/// Save a draft as a new macro at the front of the library.
pub fn create(library: &mut Library, draft: MacroDraft) -> MacroItem {
    let id = unique_id(|candidate| candidate == DRAFT_ID || library.get(candidate).is_some());
    let item = MacroItem {
        id,
        title: draft.title,
        content: draft.content,
        category: draft.category,
        updated_at: now_millis(),
        shortcut: draft.shortcut,
        extra: Map::new(),
    };
    library.insert_front(item.clone());
    item
}

/// Merge `patch` into the macro with this id and refresh its timestamp.
/// Unknown ids are a no-op.
pub fn update(library: &mut Library, id: &str, patch: MacroPatch) -> Option<MacroItem> {
    let item = library.get_mut(id)?;
    if let Some(title) = patch.title {
        item.title = title;
    }
    if let Some(content) = patch.content {
        item.content = content;
    }
    if let Some(category) = patch.category {
        item.category = category;
    }
    if let Some(shortcut) = patch.shortcut {
        item.shortcut = shortcut;
    }
    item.updated_at = next_timestamp(item.updated_at);
    Some(item.clone())
}

/// Commit an editor draft: new drafts are created, others update in place.
pub fn save_draft(library: &mut Library, draft: MacroDraft) -> Result<MacroItem, LibraryError> {
    if !draft.can_save() {
        return Err(LibraryError::IncompleteDraft);
    }
    if draft.is_new() {
        return Ok(create(library, draft));
    }
    let id = draft.id.clone();
    let patch = MacroPatch {
        title: Some(draft.title),
        content: Some(draft.content),
        category: Some(draft.category),
        shortcut: Some(draft.shortcut),
    };
    update(library, &id, patch).ok_or(LibraryError::NotFound(id))
}

/// Remove a macro. Returns the removed item, or `None` if it was already gone.
pub fn delete(library: &mut Library, id: &str) -> Option<MacroItem> {
    library.remove(id)
}

/// The plain-text form of a macro, as pasted by quick copy
pub fn plain_text(item: &MacroItem) -> String {
    html_to_text(&item.content)
}

/// Copy a macro's plain text to the clipboard and mark it recently used.
///
/// Returns the copied text, or `None` when the id is unknown. A clipboard
/// failure is logged and otherwise treated as success.
pub fn copy(library: &mut Library, id: &str, clipboard: &mut dyn Clipboard) -> Option<String> {
    let item = library.get_mut(id)?;
    let text = plain_text(item);
    item.updated_at = next_timestamp(item.updated_at);
    clipboard::write_or_warn(clipboard, &text);
    Some(text)
}

/// Number of macros in each category, in display order
pub fn category_counts(library: &Library) -> IndexMap<Category, usize> {
    let mut counts: IndexMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for item in library.items() {
        *counts.entry(item.category).or_insert(0) += 1;
    }
    counts
}
