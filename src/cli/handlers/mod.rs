use std::io::Read;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::clipboard::{self, Clipboard};
use crate::io::config_io;
use crate::io::recovery;
use crate::io::workspace::Workspace;
use crate::model::config::AppConfig;
use crate::model::macro_item::{CategoryFilter, MacroDraft};
use crate::model::session::{ItemStatus, Session};
use crate::model::template::{BuilderTemplate, TemplateDraft};
use crate::ops::library_ops::{self, LibraryError};
use crate::ops::template_ops::{self, BuilderError, LinkPatch, Section};
use crate::ops::{link_eval, menu, session_ops, transfer};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs besides its own arguments
struct Env {
    data_dir: PathBuf,
    config: AppConfig,
    json: bool,
}

impl Env {
    fn workspace(&self) -> Result<Workspace, Box<dyn std::error::Error>> {
        Ok(Workspace::open(&self.data_dir)?)
    }

    fn clipboard(&self) -> Box<dyn Clipboard> {
        clipboard::open_clipboard(self.config.clipboard.backend)
    }

    /// The template a builder command targets when none is named
    fn template_key<'a>(&'a self, arg: Option<&'a str>) -> Option<&'a str> {
        arg.or(self.config.builder.default_template.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let data_dir = config_io::resolve_data_dir(cli.dir.as_deref())?;
    log::debug!("data directory: {}", data_dir.display());

    // The recovery log must stay readable even when config or data is broken
    if let Commands::Recovery(args) = cli.command {
        return cmd_recovery(&data_dir, args, cli.json);
    }

    let env = Env {
        config: config_io::read_config(&data_dir)?,
        data_dir,
        json: cli.json,
    };

    match cli.command {
        // Library
        Commands::List(args) => cmd_list(&env, args),
        Commands::Show(args) => cmd_show(&env, args),
        Commands::Add(args) => cmd_add(&env, args),
        Commands::Edit(args) => cmd_edit(&env, args),
        Commands::Rm(args) => cmd_rm(&env, args),
        Commands::Copy(args) => cmd_copy(&env, args),
        Commands::Categories => cmd_categories(&env),
        Commands::Export(args) => cmd_export(&env, args),
        Commands::Import(args) => cmd_import(&env, args),
        Commands::Menu => cmd_menu(&env),
        Commands::Insert(args) => cmd_insert(&env, args),

        // Builder
        Commands::Builder(cmd) => match cmd.action {
            BuilderAction::List => cmd_builder_list(&env),
            BuilderAction::Show(args) => cmd_builder_show(&env, args),
            BuilderAction::New(args) => cmd_builder_new(&env, args),
            BuilderAction::Edit(args) => cmd_builder_edit(&env, args),
            BuilderAction::Rm(args) => cmd_builder_rm(&env, args),
            BuilderAction::Note(args) => cmd_builder_note(&env, args),
            BuilderAction::Link(link) => match link.action {
                LinkAction::Add(args) => cmd_link_add(&env, args),
                LinkAction::Rm(args) => cmd_link_rm(&env, args),
                LinkAction::Set(args) => cmd_link_set(&env, args),
            },
        },

        Commands::Recovery(_) => unreachable!("handled above"),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// A shortcut is a one-character hint
fn parse_shortcut_arg(s: &str) -> Result<String, String> {
    if s.chars().count() == 1 {
        Ok(s.to_string())
    } else {
        Err(format!("shortcut must be a single character, got '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Library commands
// ---------------------------------------------------------------------------

fn cmd_list(env: &Env, args: ListArgs) -> CmdResult {
    let filter = args
        .category
        .as_deref()
        .map(parse_filter_arg)
        .transpose()?
        .unwrap_or(CategoryFilter::All);
    let ws = env.workspace()?;
    let hits = library_ops::list(&ws.library, args.query.as_deref().unwrap_or(""), filter);

    if env.json {
        let items: Vec<MacroJson> = hits.iter().map(|m| macro_to_json(m)).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if hits.is_empty() {
        println!("No matching macros.");
    } else {
        for item in hits {
            println!("{}", format_macro_line(item));
        }
    }
    Ok(())
}

fn cmd_show(env: &Env, args: IdArg) -> CmdResult {
    let ws = env.workspace()?;
    let item = ws
        .library
        .get(&args.id)
        .ok_or_else(|| LibraryError::NotFound(args.id.clone()))?;
    if env.json {
        println!("{}", serde_json::to_string_pretty(&macro_to_json(item))?);
    } else {
        print_lines(&format_macro_detail(item));
    }
    Ok(())
}

fn cmd_add(env: &Env, args: AddArgs) -> CmdResult {
    let category = match args.category.as_deref() {
        Some(c) => parse_category_arg(c)?,
        None => env.config.library.default_category,
    };
    let mut draft = MacroDraft::new(category);
    draft.title = args.title;
    draft.content = args.content;
    draft.shortcut = args.shortcut.as_deref().map(parse_shortcut_arg).transpose()?;

    let mut ws = env.workspace()?;
    let item = library_ops::save_draft(&mut ws.library, draft)?;
    ws.save_macros();

    if env.json {
        println!("{}", serde_json::to_string_pretty(&macro_to_json(&item))?);
    } else {
        println!("{}", item.id);
    }
    Ok(())
}

fn cmd_edit(env: &Env, args: EditArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let current = ws
        .library
        .get(&args.id)
        .ok_or_else(|| LibraryError::NotFound(args.id.clone()))?;

    let mut draft = MacroDraft::from_item(current);
    let mut changed = false;
    if let Some(title) = args.title {
        draft.title = title;
        changed = true;
    }
    if let Some(content) = args.content {
        draft.content = content;
        changed = true;
    }
    if let Some(category) = args.category.as_deref() {
        draft.category = parse_category_arg(category)?;
        changed = true;
    }
    if let Some(shortcut) = args.shortcut.as_deref() {
        draft.shortcut = Some(parse_shortcut_arg(shortcut)?);
        changed = true;
    }
    if args.clear_shortcut {
        draft.shortcut = None;
        changed = true;
    }
    if !changed {
        return Err("nothing to change (see `mc edit --help`)".into());
    }

    let item = library_ops::save_draft(&mut ws.library, draft)?;
    ws.save_macros();

    if env.json {
        println!("{}", serde_json::to_string_pretty(&macro_to_json(&item))?);
    } else {
        println!("{}", format_macro_line(&item));
    }
    Ok(())
}

fn cmd_rm(env: &Env, args: IdArg) -> CmdResult {
    let mut ws = env.workspace()?;
    let item = library_ops::delete(&mut ws.library, &args.id)
        .ok_or_else(|| LibraryError::NotFound(args.id.clone()))?;
    ws.record_deletion(&item);
    ws.save_macros();
    println!("Deleted {} {}", item.id, item.title);
    Ok(())
}

fn cmd_copy(env: &Env, args: CopyArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let mut cb = env.clipboard();
    let text = library_ops::copy(&mut ws.library, &args.id, cb.as_mut())
        .ok_or_else(|| LibraryError::NotFound(args.id.clone()))?;
    ws.save_macros();

    if env.json {
        println!("{}", serde_json::json!({ "id": args.id, "text": text }));
    } else if args.print {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_categories(env: &Env) -> CmdResult {
    let ws = env.workspace()?;
    let counts = library_ops::category_counts(&ws.library);

    if env.json {
        let items: Vec<CategoryCountJson> = counts
            .iter()
            .map(|(category, count)| CategoryCountJson {
                category: *category,
                count: *count,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!("{:<9} {}", "All", ws.library.items().count());
        for (category, count) in &counts {
            println!("{:<9} {}", category, count);
        }
    }
    Ok(())
}

fn cmd_export(env: &Env, args: ExportArgs) -> CmdResult {
    let ws = env.workspace()?;
    let json = transfer::export(&ws.library)?;
    match args.output {
        Some(path) => {
            recovery::atomic_write(std::path::Path::new(&path), json.as_bytes())
                .map_err(|e| format!("could not write {}: {}", path, e))?;
            println!("Exported {} macros to {}", ws.library.len(), path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_import(env: &Env, args: ImportArgs) -> CmdResult {
    let payload = match args.file.as_deref() {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path, e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut ws = env.workspace()?;
    let result = transfer::import(&payload, &mut ws.library)?;
    ws.save_macros();

    if env.json {
        let out = ImportJson {
            imported: result.imported,
            ids: result.ids,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Imported {} macros", result.imported);
    }
    Ok(())
}

fn cmd_menu(env: &Env) -> CmdResult {
    let ws = env.workspace()?;
    let groups = menu::build_menu(&ws.library);
    if env.json {
        let out = MenuJson {
            title: menu::MENU_ROOT_TITLE,
            groups,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_lines(&format_menu(&groups));
    }
    Ok(())
}

fn cmd_insert(env: &Env, args: IdArg) -> CmdResult {
    let ws = env.workspace()?;
    let text = menu::insert_text(&ws.library, &args.id)
        .ok_or_else(|| LibraryError::NotFound(args.id.clone()))?;
    println!("{}", text);
    Ok(())
}

// ---------------------------------------------------------------------------
// Builder commands
// ---------------------------------------------------------------------------

fn cmd_builder_list(env: &Env) -> CmdResult {
    let ws = env.workspace()?;
    if env.json {
        let items: Vec<TemplateSummaryJson> = ws.templates.iter().map(template_to_summary).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if ws.templates.is_empty() {
        println!("No builder templates.");
        println!();
        println!("Create one with `mc builder new --name <NAME>`.");
    } else {
        for template in &ws.templates {
            println!("{}", format_template_line(template));
        }
    }
    Ok(())
}

fn cmd_builder_show(env: &Env, args: TemplateArg) -> CmdResult {
    let ws = env.workspace()?;
    let template = template_ops::resolve_active(&ws.templates, env.template_key(args.template.as_deref()))?;
    if env.json {
        println!("{}", serde_json::to_string_pretty(template)?);
    } else {
        print_lines(&format_template_detail(template, &ws.library));
    }
    Ok(())
}

fn cmd_builder_new(env: &Env, args: BuilderNewArgs) -> CmdResult {
    let mut draft = TemplateDraft::blank();
    if let Some(name) = args.name {
        draft.template.name = name;
    }
    if let Some(label) = args.primary_label {
        draft.template.primary_label = label;
    }
    if let Some(label) = args.secondary_label {
        draft.template.secondary_label = label;
    }
    for item in &args.items {
        template_ops::add_label(&mut draft, Section::Items, item)?;
    }
    for outcome in &args.outcomes {
        template_ops::add_label(&mut draft, Section::Outcomes, outcome)?;
    }

    let mut ws = env.workspace()?;
    let template = template_ops::create_template(&ws.templates, draft);
    let id = template.id.clone();
    template_ops::save_template(&mut ws.templates, template);
    ws.save_templates();
    println!("{}", id);
    Ok(())
}

fn cmd_builder_edit(env: &Env, args: BuilderEditArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let mut draft = TemplateDraft::edit(template_ops::resolve_active(
        &ws.templates,
        Some(args.template.as_str()),
    )?);

    if let Some(name) = args.name {
        draft.template.name = name;
    }
    if let Some(label) = args.primary_label {
        draft.template.primary_label = label;
    }
    if let Some(label) = args.secondary_label {
        draft.template.secondary_label = label;
    }

    let mut retargeted = 0;
    for (section, add, remove, rename) in [
        (Section::Items, &args.add_item, &args.remove_item, &args.rename_item),
        (
            Section::Outcomes,
            &args.add_outcome,
            &args.remove_outcome,
            &args.rename_outcome,
        ),
    ] {
        for pair in rename {
            let (old, new) = split_pair(pair, "a rename")?;
            retargeted += template_ops::rename_label(&mut draft, section, old, new)?;
        }
        for label in remove {
            template_ops::remove_label(&mut draft, section, label)?;
        }
        for label in add {
            template_ops::add_label(&mut draft, section, label)?;
        }
    }

    let summary = format_template_line(&draft.template);
    template_ops::save_template(&mut ws.templates, draft.template);
    ws.save_templates();

    println!("{}", summary);
    if retargeted > 0 {
        println!("Updated {} links to follow renamed labels", retargeted);
    }
    Ok(())
}

fn cmd_builder_rm(env: &Env, args: TemplateKeyArg) -> CmdResult {
    let mut ws = env.workspace()?;
    let id = template_ops::resolve_active(&ws.templates, Some(args.template.as_str()))?
        .id
        .clone();
    let removed = template_ops::delete_template(&mut ws.templates, &id)
        .ok_or_else(|| BuilderError::TemplateNotFound(id.clone()))?;
    ws.save_templates();

    println!("Deleted template {}", removed.name);
    match ws.templates.first() {
        Some(next) => println!("Active template: {}", next.name),
        None => println!("No builder templates left."),
    }
    Ok(())
}

/// Press the requested buttons on a fresh session
fn build_session(template: &BuilderTemplate, args: &NoteArgs) -> Result<Session, Box<dyn std::error::Error>> {
    let check = |section: Section, labels: &[String], label: &str| {
        if labels.iter().any(|l| l == label) {
            Ok(())
        } else {
            Err(BuilderError::LabelNotFound {
                section,
                label: label.to_string(),
            })
        }
    };

    let mut session = Session::new();
    for label in &args.requested {
        check(Section::Items, &template.items, label)?;
        session_ops::toggle_status(&mut session, label, ItemStatus::Requested);
    }
    for label in &args.received {
        check(Section::Items, &template.items, label)?;
        session_ops::toggle_status(&mut session, label, ItemStatus::Received);
    }
    for pair in &args.detail {
        let (label, text) = split_pair(pair, "a detail")?;
        check(Section::Items, &template.items, label)?;
        if !session_ops::set_detail(&mut session, label, text) {
            return Err(format!("'{}' must be received to carry a detail", label).into());
        }
    }
    for label in &args.outcome {
        check(Section::Outcomes, &template.outcomes, label)?;
        session_ops::toggle_outcome(&mut session, label);
    }
    if args.all_outcomes {
        session_ops::toggle_all_outcomes(&mut session, template);
    }
    Ok(session)
}

fn cmd_builder_note(env: &Env, args: NoteArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let template = template_ops::resolve_active(&ws.templates, env.template_key(args.template.as_deref()))?
        .clone();
    let session = build_session(&template, &args)?;
    let note = session_ops::generate_note(&template, &session);

    let shortcuts: Vec<ShortcutJson> = link_eval::shortcuts(&template, &session, &ws.library)
        .iter()
        .map(shortcut_to_json)
        .collect();
    if env.json {
        let out = NoteJson {
            template: template.name.clone(),
            note: note.clone(),
            shortcuts,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", note);
        if !shortcuts.is_empty() {
            println!();
            println!("Shortcuts:");
            for shortcut in link_eval::shortcuts(&template, &session, &ws.library) {
                println!("{}", format_shortcut_line(&shortcut));
            }
        }
    }

    let mut cb = env.clipboard();
    if args.copy {
        clipboard::write_or_warn(cb.as_mut(), &note);
    }
    if let Some(link_id) = args.copy_link.as_deref() {
        let link = template
            .links
            .iter()
            .find(|l| l.id == link_id)
            .ok_or_else(|| BuilderError::LinkNotFound(link_id.to_string()))?;
        if !link_eval::link_fires(&template, &session, link) {
            return Err(format!("link {} is not active for this selection", link_id).into());
        }
        if link_eval::resolve_and_copy(link, &mut ws.library, cb.as_mut()).is_some() {
            ws.save_macros();
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Link commands
// ---------------------------------------------------------------------------

fn link_patch(
    kind: Option<&str>,
    trigger: Option<String>,
    macro_id: Option<String>,
    ws: &Workspace,
) -> Result<LinkPatch, Box<dyn std::error::Error>> {
    if let Some(id) = macro_id.as_deref() {
        if ws.library.get(id).is_none() {
            return Err(LibraryError::NotFound(id.to_string()).into());
        }
    }
    Ok(LinkPatch {
        kind: kind.map(parse_condition_type).transpose()?,
        trigger_label: trigger,
        macro_id,
    })
}

fn cmd_link_add(env: &Env, args: LinkAddArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let mut draft = TemplateDraft::edit(template_ops::resolve_active(
        &ws.templates,
        Some(args.template.as_str()),
    )?);
    let patch = link_patch(args.kind.as_deref(), args.trigger, args.macro_id, &ws)?;

    let first_macro = ws.library.items().next().map(|m| m.id.clone());
    let link_id = template_ops::add_link(&mut draft, first_macro.as_deref());
    template_ops::update_link(&mut draft, &link_id, patch)?;
    template_ops::save_template(&mut ws.templates, draft.template);
    ws.save_templates();
    println!("{}", link_id);
    Ok(())
}

fn cmd_link_rm(env: &Env, args: LinkIdArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let mut draft = TemplateDraft::edit(template_ops::resolve_active(
        &ws.templates,
        Some(args.template.as_str()),
    )?);
    if !template_ops::remove_link(&mut draft, &args.link) {
        return Err(BuilderError::LinkNotFound(args.link).into());
    }
    template_ops::save_template(&mut ws.templates, draft.template);
    ws.save_templates();
    println!("Removed link {}", args.link);
    Ok(())
}

fn cmd_link_set(env: &Env, args: LinkSetArgs) -> CmdResult {
    let mut ws = env.workspace()?;
    let mut draft = TemplateDraft::edit(template_ops::resolve_active(
        &ws.templates,
        Some(args.template.as_str()),
    )?);
    let patch = link_patch(args.kind.as_deref(), args.trigger, args.macro_id, &ws)?;
    if patch == LinkPatch::default() {
        return Err("nothing to change (see `mc builder link set --help`)".into());
    }
    template_ops::update_link(&mut draft, &args.link, patch)?;
    template_ops::save_template(&mut ws.templates, draft.template);
    ws.save_templates();
    println!("Updated link {}", args.link);
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

fn cmd_recovery(data_dir: &std::path::Path, args: RecoveryCmd, json: bool) -> CmdResult {
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(data_dir).display());
        }
        Some(RecoveryAction::Prune(prune)) => {
            let removed = recovery::prune_recovery(data_dir, prune.all)?;
            println!("Pruned {} entries", removed);
        }
        None => {
            let entries = recovery::read_recovery_entries(data_dir, Some(args.limit.unwrap_or(10)));
            if json {
                let items: Vec<RecoveryEntryJson> = entries.iter().map(recovery_to_json).collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if entries.is_empty() {
                println!("Recovery log is empty.");
            } else {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print_lines(&format_recovery_entry(entry));
                }
            }
        }
    }
    Ok(())
}
