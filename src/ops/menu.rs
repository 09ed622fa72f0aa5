use serde::Serialize;

use crate::model::macro_item::{Category, Library};
use crate::util::html::html_to_text;

/// Title of the top-level context-menu entry
pub const MENU_ROOT_TITLE: &str = "MacroCopy Pro";

/// One leaf of the context menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
}

/// A category submenu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub category: Category,
    pub entries: Vec<MenuEntry>,
}

/// Group macros by category for the context menu.
///
/// Categories appear in the order they are first seen in the library, and
/// entries keep library order.
pub fn build_menu(library: &Library) -> Vec<MenuGroup> {
    let mut groups: Vec<MenuGroup> = Vec::new();
    for item in library.items() {
        let entry = MenuEntry {
            id: item.id.clone(),
            title: item.title.clone(),
        };
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.entries.push(entry),
            None => groups.push(MenuGroup {
                category: item.category,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Text to insert when a menu entry is invoked
pub fn insert_text(library: &Library, id: &str) -> Option<String> {
    library.get(id).map(|item| html_to_text(&item.content))
}
