use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Id carried by an editor draft that has never been saved.
pub const DRAFT_ID: &str = "new";

/// Closed set of macro categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Emails,
    #[default]
    Notes,
    Macros,
    Snippets,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Emails,
        Category::Notes,
        Category::Macros,
        Category::Snippets,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Emails => "Emails",
            Category::Notes => "Notes",
            Category::Macros => "Macros",
            Category::Snippets => "Snippets",
        }
    }

    /// Parse a category name, ignoring case
    pub fn parse_category(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Category filter used when listing the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    /// Parse `All` or a category name, ignoring case
    pub fn parse_filter(s: &str) -> Option<CategoryFilter> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        Category::parse_category(s).map(CategoryFilter::Only)
    }
}

/// A saved snippet.
///
/// Fields the library does not know about are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroItem {
    pub id: String,
    pub title: String,
    /// HTML fragment
    pub content: String,
    pub category: Category,
    /// Epoch milliseconds of the last create, edit or copy
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of the stored macro array.
///
/// Imports are not schema-checked, so anything that does not read as a
/// complete macro is carried as the raw JSON it arrived as and written back
/// untouched. Raw records are invisible to listing, copy and the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MacroRecord {
    Item(MacroItem),
    Raw(Value),
}

impl MacroRecord {
    pub fn as_item(&self) -> Option<&MacroItem> {
        match self {
            MacroRecord::Item(item) => Some(item),
            MacroRecord::Raw(_) => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut MacroItem> {
        match self {
            MacroRecord::Item(item) => Some(item),
            MacroRecord::Raw(_) => None,
        }
    }

    /// The record's id, if it has a string one
    pub fn id(&self) -> Option<&str> {
        match self {
            MacroRecord::Item(item) => Some(&item.id),
            MacroRecord::Raw(value) => value.get("id").and_then(Value::as_str),
        }
    }
}

impl From<MacroItem> for MacroRecord {
    fn from(item: MacroItem) -> Self {
        MacroRecord::Item(item)
    }
}

/// The editable copy of a macro held by the editor before save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDraft {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub shortcut: Option<String>,
}

impl MacroDraft {
    /// A blank draft carrying the `new` sentinel id
    pub fn new(category: Category) -> Self {
        MacroDraft {
            id: DRAFT_ID.to_string(),
            title: String::new(),
            content: String::new(),
            category,
            shortcut: None,
        }
    }

    pub fn from_item(item: &MacroItem) -> Self {
        MacroDraft {
            id: item.id.clone(),
            title: item.title.clone(),
            content: item.content.clone(),
            category: item.category,
            shortcut: item.shortcut.clone(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == DRAFT_ID
    }

    /// A draft needs both a title and content before it may be saved
    pub fn can_save(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }
}

/// Field changes applied by an edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    /// `Some(None)` clears the shortcut
    pub shortcut: Option<Option<String>>,
}

impl MacroPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.shortcut.is_none()
    }
}

/// The in-memory macro collection, most recently created first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    pub records: Vec<MacroRecord>,
}

impl Library {
    pub fn new(macros: Vec<MacroItem>) -> Self {
        Library::from_records(macros.into_iter().map(MacroRecord::from).collect())
    }

    pub fn from_records(records: Vec<MacroRecord>) -> Self {
        Library { records }
    }

    /// Usable macros in storage order, skipping raw records
    pub fn items(&self) -> impl Iterator<Item = &MacroItem> {
        self.records.iter().filter_map(MacroRecord::as_item)
    }

    pub fn get(&self, id: &str) -> Option<&MacroItem> {
        self.items().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut MacroItem> {
        self.records
            .iter_mut()
            .filter_map(MacroRecord::as_item_mut)
            .find(|m| m.id == id)
    }

    pub fn insert_front(&mut self, item: MacroItem) {
        self.records.insert(0, MacroRecord::Item(item));
    }

    /// Remove the first usable macro with this id
    pub fn remove(&mut self, id: &str) -> Option<MacroItem> {
        let idx = self
            .records
            .iter()
            .position(|r| r.as_item().is_some_and(|m| m.id == id))?;
        match self.records.remove(idx) {
            MacroRecord::Item(item) => Some(item),
            MacroRecord::Raw(_) => None,
        }
    }

    /// Number of stored records, raw ones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
