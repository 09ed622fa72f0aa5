use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mc", about = concat!("macrocopy v", env!("CARGO_PKG_VERSION"), " - snippets and checklist notes, one copy away"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List macros, most recently used first
    List(ListArgs),
    /// Show one macro
    Show(IdArg),
    /// Create a macro
    Add(AddArgs),
    /// Change fields of a macro
    Edit(EditArgs),
    /// Delete a macro
    Rm(IdArg),
    /// Copy a macro's plain text to the clipboard
    Copy(CopyArgs),
    /// Show macro counts per category
    Categories,
    /// Write the whole library as JSON
    Export(ExportArgs),
    /// Prepend macros from a JSON array
    Import(ImportArgs),
    /// Show the context menu tree
    Menu,
    /// Print the text a context-menu entry would insert
    Insert(IdArg),
    /// Manage builder templates and build notes
    Builder(BuilderCmd),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Library args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text to find in title or content
    pub query: Option<String>,
    /// Only this category (Emails, Notes, Macros, Snippets, All)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Macro ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Macro title
    #[arg(long)]
    pub title: String,
    /// HTML content
    #[arg(long)]
    pub content: String,
    /// Category (default from config, else Notes)
    #[arg(long)]
    pub category: Option<String>,
    /// Single-digit shortcut
    #[arg(long)]
    pub shortcut: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Macro ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New HTML content
    #[arg(long)]
    pub content: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
    /// New single-digit shortcut
    #[arg(long, conflicts_with = "clear_shortcut")]
    pub shortcut: Option<String>,
    /// Remove the shortcut
    #[arg(long)]
    pub clear_shortcut: bool,
}

#[derive(Args)]
pub struct CopyArgs {
    /// Macro ID
    pub id: String,
    /// Also print the copied text
    #[arg(long)]
    pub print: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file to import (default: stdin)
    pub file: Option<String>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BuilderCmd {
    #[command(subcommand)]
    pub action: BuilderAction,
}

#[derive(Subcommand)]
pub enum BuilderAction {
    /// List builder templates
    List,
    /// Show a template's items, outcomes and links
    Show(TemplateArg),
    /// Create a template
    New(BuilderNewArgs),
    /// Change a template
    Edit(BuilderEditArgs),
    /// Delete a template
    Rm(TemplateKeyArg),
    /// Build a note from item and outcome selections
    Note(NoteArgs),
    /// Manage a template's conditional links
    Link(LinkCmd),
}

#[derive(Args)]
pub struct TemplateArg {
    /// Template ID or name (default: config, else the first template)
    pub template: Option<String>,
}

#[derive(Args)]
pub struct TemplateKeyArg {
    /// Template ID or name
    pub template: String,
}

#[derive(Args)]
pub struct BuilderNewArgs {
    /// Template name
    #[arg(long)]
    pub name: Option<String>,
    /// Heading for the checklist items
    #[arg(long)]
    pub primary_label: Option<String>,
    /// Heading for the outcomes
    #[arg(long)]
    pub secondary_label: Option<String>,
    /// Checklist item (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,
    /// Outcome (repeatable)
    #[arg(long = "outcome")]
    pub outcomes: Vec<String>,
}

#[derive(Args)]
pub struct BuilderEditArgs {
    /// Template ID or name
    pub template: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New heading for the checklist items
    #[arg(long)]
    pub primary_label: Option<String>,
    /// New heading for the outcomes
    #[arg(long)]
    pub secondary_label: Option<String>,
    /// Append a checklist item (repeatable)
    #[arg(long)]
    pub add_item: Vec<String>,
    /// Remove a checklist item (repeatable)
    #[arg(long)]
    pub remove_item: Vec<String>,
    /// Rename a checklist item: OLD=NEW (repeatable)
    #[arg(long, value_name = "OLD=NEW")]
    pub rename_item: Vec<String>,
    /// Append an outcome (repeatable)
    #[arg(long)]
    pub add_outcome: Vec<String>,
    /// Remove an outcome (repeatable)
    #[arg(long)]
    pub remove_outcome: Vec<String>,
    /// Rename an outcome: OLD=NEW (repeatable)
    #[arg(long, value_name = "OLD=NEW")]
    pub rename_outcome: Vec<String>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Template ID or name (default: config, else the first template)
    pub template: Option<String>,
    /// Press "received" for an item (repeatable)
    #[arg(long)]
    pub received: Vec<String>,
    /// Press "requested" for an item (repeatable)
    #[arg(long)]
    pub requested: Vec<String>,
    /// Detail for a received item: LABEL=TEXT (repeatable)
    #[arg(long, value_name = "LABEL=TEXT")]
    pub detail: Vec<String>,
    /// Toggle an outcome (repeatable)
    #[arg(long)]
    pub outcome: Vec<String>,
    /// Press the select-all outcomes button
    #[arg(long)]
    pub all_outcomes: bool,
    /// Copy the note to the clipboard
    #[arg(long)]
    pub copy: bool,
    /// Copy the macro behind an active link
    #[arg(long, value_name = "LINK_ID")]
    pub copy_link: Option<String>,
}

#[derive(Args)]
pub struct LinkCmd {
    #[command(subcommand)]
    pub action: LinkAction,
}

#[derive(Subcommand)]
pub enum LinkAction {
    /// Add a link (defaults: item_requested, first item, first macro)
    Add(LinkAddArgs),
    /// Remove a link
    Rm(LinkIdArgs),
    /// Change a link's type, trigger or macro
    Set(LinkSetArgs),
}

#[derive(Args)]
pub struct LinkAddArgs {
    /// Template ID or name
    pub template: String,
    /// Condition type (item_requested, item_received, outcome_selected, all_outcomes_selected)
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Item or outcome label
    #[arg(long)]
    pub trigger: Option<String>,
    /// Macro to suggest
    #[arg(long = "macro", value_name = "MACRO_ID")]
    pub macro_id: Option<String>,
}

#[derive(Args)]
pub struct LinkIdArgs {
    /// Template ID or name
    pub template: String,
    /// Link ID
    pub link: String,
}

#[derive(Args)]
pub struct LinkSetArgs {
    /// Template ID or name
    pub template: String,
    /// Link ID
    pub link: String,
    /// Condition type
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Item or outcome label
    #[arg(long)]
    pub trigger: Option<String>,
    /// Macro to suggest
    #[arg(long = "macro", value_name = "MACRO_ID")]
    pub macro_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove all entries, not only those older than 30 days
    #[arg(long)]
    pub all: bool,
}
