use crate::model::template::{BuilderTemplate, ConditionLink, ConditionType, TemplateDraft};
use crate::util::ids::unique_id;

/// Error type for builder template operations
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("no builder templates exist")]
    NoTemplates,
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("link not found: {0}")]
    LinkNotFound(String),
    #[error("{section} not found: {label}")]
    LabelNotFound { section: Section, label: String },
    #[error("{section} already exists: {label}")]
    DuplicateLabel { section: Section, label: String },
    #[error("{0} label cannot be empty")]
    EmptyLabel(Section),
}

/// The two labelled lists of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Items,
    Outcomes,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Items => write!(f, "item"),
            Section::Outcomes => write!(f, "outcome"),
        }
    }
}

/// Field changes for a link. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub kind: Option<ConditionType>,
    pub trigger_label: Option<String>,
    pub macro_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Template collection
// ---------------------------------------------------------------------------

/// Turn a draft into a template with a fresh id. Does not store it.
pub fn create_template(templates: &[BuilderTemplate], draft: TemplateDraft) -> BuilderTemplate {
    let mut template = draft.template;
    template.id = unique_id(|candidate| templates.iter().any(|t| t.id == candidate));
    template
}

/// Insert or replace by id. New templates go to the end.
pub fn save_template(templates: &mut Vec<BuilderTemplate>, template: BuilderTemplate) {
    match templates.iter_mut().find(|t| t.id == template.id) {
        Some(existing) => *existing = template,
        None => templates.push(template),
    }
}

/// Remove a template. The caller picks a new active template afterwards.
pub fn delete_template(templates: &mut Vec<BuilderTemplate>, id: &str) -> Option<BuilderTemplate> {
    let idx = templates.iter().position(|t| t.id == id)?;
    Some(templates.remove(idx))
}

/// Find a template by id, falling back to a case-insensitive name match.
pub fn find_template<'a>(templates: &'a [BuilderTemplate], key: &str) -> Option<&'a BuilderTemplate> {
    templates
        .iter()
        .find(|t| t.id == key)
        .or_else(|| templates.iter().find(|t| t.name.eq_ignore_ascii_case(key)))
}

/// The template a builder command works on: the requested one, or the first.
pub fn resolve_active<'a>(
    templates: &'a [BuilderTemplate],
    requested: Option<&str>,
) -> Result<&'a BuilderTemplate, BuilderError> {
    match requested {
        Some(key) => find_template(templates, key)
            .ok_or_else(|| BuilderError::TemplateNotFound(key.to_string())),
        None => templates.first().ok_or(BuilderError::NoTemplates),
    }
}

// ---------------------------------------------------------------------------
// Draft editing: links
// ---------------------------------------------------------------------------

/// Append a link with default settings and return its id.
///
/// Defaults to `item_requested` on the first item, pointing at `first_macro`.
pub fn add_link(draft: &mut TemplateDraft, first_macro: Option<&str>) -> String {
    let t = &mut draft.template;
    let id = unique_id(|candidate| t.links.iter().any(|l| l.id == candidate));
    t.links.push(ConditionLink {
        id: id.clone(),
        kind: ConditionType::ItemRequested,
        trigger_label: t.items.first().cloned().unwrap_or_default(),
        macro_id: first_macro.unwrap_or_default().to_string(),
    });
    id
}

pub fn remove_link(draft: &mut TemplateDraft, link_id: &str) -> bool {
    let before = draft.template.links.len();
    draft.template.links.retain(|l| l.id != link_id);
    draft.template.links.len() != before
}

pub fn update_link(
    draft: &mut TemplateDraft,
    link_id: &str,
    patch: LinkPatch,
) -> Result<(), BuilderError> {
    let link = draft
        .template
        .links
        .iter_mut()
        .find(|l| l.id == link_id)
        .ok_or_else(|| BuilderError::LinkNotFound(link_id.to_string()))?;
    if let Some(kind) = patch.kind {
        link.kind = kind;
    }
    if let Some(trigger) = patch.trigger_label {
        link.trigger_label = trigger;
    }
    if let Some(macro_id) = patch.macro_id {
        link.macro_id = macro_id;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Draft editing: items and outcomes
// ---------------------------------------------------------------------------

fn labels_mut(template: &mut BuilderTemplate, section: Section) -> &mut Vec<String> {
    match section {
        Section::Items => &mut template.items,
        Section::Outcomes => &mut template.outcomes,
    }
}

fn link_targets(kind: &ConditionType, section: Section) -> bool {
    match section {
        Section::Items => kind.targets_items(),
        Section::Outcomes => kind.targets_outcomes(),
    }
}

/// Append a label to the item or outcome list.
pub fn add_label(draft: &mut TemplateDraft, section: Section, label: &str) -> Result<(), BuilderError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(BuilderError::EmptyLabel(section));
    }
    let labels = labels_mut(&mut draft.template, section);
    if labels.iter().any(|l| l == label) {
        return Err(BuilderError::DuplicateLabel {
            section,
            label: label.to_string(),
        });
    }
    labels.push(label.to_string());
    Ok(())
}

/// Remove a label. Links that named it stay and simply never fire.
pub fn remove_label(draft: &mut TemplateDraft, section: Section, label: &str) -> Result<(), BuilderError> {
    let labels = labels_mut(&mut draft.template, section);
    let idx = labels
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| BuilderError::LabelNotFound {
            section,
            label: label.to_string(),
        })?;
    labels.remove(idx);
    Ok(())
}

/// Rename a label in place and retarget the links that pointed at it.
/// Returns how many links were retargeted.
pub fn rename_label(
    draft: &mut TemplateDraft,
    section: Section,
    old: &str,
    new: &str,
) -> Result<usize, BuilderError> {
    let new = new.trim();
    if new.is_empty() {
        return Err(BuilderError::EmptyLabel(section));
    }
    let labels = labels_mut(&mut draft.template, section);
    let idx = labels
        .iter()
        .position(|l| l == old)
        .ok_or_else(|| BuilderError::LabelNotFound {
            section,
            label: old.to_string(),
        })?;
    if old != new && labels.iter().any(|l| l == new) {
        return Err(BuilderError::DuplicateLabel {
            section,
            label: new.to_string(),
        });
    }
    labels[idx] = new.to_string();

    let mut retargeted = 0;
    for link in &mut draft.template.links {
        if link_targets(&link.kind, section) && link.trigger_label == old {
            link.trigger_label = new.to_string();
            retargeted += 1;
        }
    }
    Ok(retargeted)
}
