use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::macro_item::{Category, CategoryFilter, Library, MacroItem};
use crate::model::template::{BuilderTemplate, ConditionLink, ConditionType};
use crate::ops::library_ops;
use crate::ops::link_eval::Shortcut;
use crate::ops::menu::{MENU_ROOT_TITLE, MenuGroup};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct MacroJson {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub updated_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    pub content: String,
    /// Plain text as copied
    pub text: String,
}

#[derive(Serialize)]
pub struct CategoryCountJson {
    pub category: Category,
    pub count: usize,
}

#[derive(Serialize)]
pub struct TemplateSummaryJson {
    pub id: String,
    pub name: String,
    pub items: usize,
    pub outcomes: usize,
    pub links: usize,
}

#[derive(Serialize)]
pub struct ShortcutJson {
    pub link_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub trigger_label: String,
    pub macro_id: String,
    pub title: String,
}

#[derive(Serialize)]
pub struct NoteJson {
    pub template: String,
    pub note: String,
    pub shortcuts: Vec<ShortcutJson>,
}

#[derive(Serialize)]
pub struct ImportJson {
    pub imported: usize,
    pub ids: Vec<String>,
}

#[derive(Serialize)]
pub struct MenuJson {
    pub title: &'static str,
    pub groups: Vec<MenuGroup>,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    pub fields: IndexMap<String, String>,
    pub body: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn macro_to_json(item: &MacroItem) -> MacroJson {
    MacroJson {
        id: item.id.clone(),
        title: item.title.clone(),
        category: item.category,
        updated_at: item.updated_at,
        shortcut: item.shortcut.clone(),
        content: item.content.clone(),
        text: library_ops::plain_text(item),
    }
}

pub fn template_to_summary(template: &BuilderTemplate) -> TemplateSummaryJson {
    TemplateSummaryJson {
        id: template.id.clone(),
        name: template.name.clone(),
        items: template.items.len(),
        outcomes: template.outcomes.len(),
        links: template.links.len(),
    }
}

pub fn shortcut_to_json(shortcut: &Shortcut<'_>) -> ShortcutJson {
    ShortcutJson {
        link_id: shortcut.link.id.clone(),
        kind: shortcut.link.kind.to_string(),
        trigger_label: shortcut.link.trigger_label.clone(),
        macro_id: shortcut.item.id.clone(),
        title: shortcut.item.title.clone(),
    }
}

pub fn recovery_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// Format a single macro as a one-line summary
pub fn format_macro_line(item: &MacroItem) -> String {
    let shortcut = item
        .shortcut
        .as_ref()
        .map(|s| format!(" [{}]", s))
        .unwrap_or_default();
    format!("{}  {:<8} {}{}", item.id, item.category, item.title, shortcut)
}

/// Format detailed macro view
pub fn format_macro_detail(item: &MacroItem) -> Vec<String> {
    let mut lines = vec![format!("{} {}", item.id, item.title)];
    lines.push(format!("category: {}", item.category));
    if let Some(shortcut) = &item.shortcut {
        lines.push(format!("shortcut: {}", shortcut));
    }
    lines.push(format!("updated: {}", format_millis(item.updated_at)));
    lines.push(String::new());
    for line in library_ops::plain_text(item).lines() {
        lines.push(format!("  {}", line));
    }
    lines
}

pub fn format_template_line(template: &BuilderTemplate) -> String {
    format!(
        "{}  {} ({} items, {} outcomes, {} links)",
        template.id,
        template.name,
        template.items.len(),
        template.outcomes.len(),
        template.links.len()
    )
}

fn format_link(link: &ConditionLink, library: &Library) -> String {
    let target = library
        .get(&link.macro_id)
        .map(|m| m.title.clone())
        .unwrap_or_else(|| "(missing macro)".to_string());
    let trigger = match link.kind {
        ConditionType::AllOutcomesSelected => "*".to_string(),
        _ => link.trigger_label.clone(),
    };
    format!("  {}  {} {} -> {}", link.id, link.kind, trigger, target)
}

/// Format a template with its labels and links
pub fn format_template_detail(template: &BuilderTemplate, library: &Library) -> Vec<String> {
    let mut lines = vec![format!("{} {}", template.id, template.name)];
    lines.push(String::new());
    lines.push(format!("{}:", template.primary_label));
    for item in &template.items {
        lines.push(format!("  - {}", item));
    }
    lines.push(format!("{}:", template.secondary_label));
    for outcome in &template.outcomes {
        lines.push(format!("  - {}", outcome));
    }
    if !template.links.is_empty() {
        lines.push("links:".to_string());
        for link in &template.links {
            lines.push(format_link(link, library));
        }
    }
    lines
}

pub fn format_shortcut_line(shortcut: &Shortcut<'_>) -> String {
    format!("  {}  {}", shortcut.link.id, shortcut.item.title)
}

/// Format the context menu as an indented tree
pub fn format_menu(groups: &[MenuGroup]) -> Vec<String> {
    let mut lines = vec![MENU_ROOT_TITLE.to_string()];
    for group in groups {
        lines.push(format!("  {}", group.category));
        for entry in &group.entries {
            lines.push(format!("    {}  {}", entry.id, entry.title));
        }
    }
    lines
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}: {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for line in entry.body.lines() {
        lines.push(format!("    {}", line));
    }
    lines
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

pub fn parse_category_arg(s: &str) -> Result<Category, String> {
    Category::parse_category(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected: Emails, Notes, Macros, Snippets)",
            s
        )
    })
}

pub fn parse_filter_arg(s: &str) -> Result<CategoryFilter, String> {
    CategoryFilter::parse_filter(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected: All, Emails, Notes, Macros, Snippets)",
            s
        )
    })
}

pub fn parse_condition_type(s: &str) -> Result<ConditionType, String> {
    ConditionType::parse_known(s).ok_or_else(|| {
        let known: Vec<&str> = ConditionType::KNOWN.iter().map(|k| k.as_str()).collect();
        format!("unknown link type '{}' (expected: {})", s, known.join(", "))
    })
}

/// Split `LEFT=RIGHT` at the first `=`
pub fn split_pair<'a>(s: &'a str, what: &str) -> Result<(&'a str, &'a str), String> {
    s.split_once('=')
        .ok_or_else(|| format!("expected {} as LEFT=RIGHT, got '{}'", what, s))
}
