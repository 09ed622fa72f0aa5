use crate::io::clipboard::Clipboard;
use crate::model::macro_item::{Library, MacroItem};
use crate::model::session::{ItemStatus, Session};
use crate::model::template::{BuilderTemplate, ConditionLink, ConditionType};
use crate::ops::library_ops;

/// Whether a single link's condition holds for this session
pub fn link_fires(template: &BuilderTemplate, session: &Session, link: &ConditionLink) -> bool {
    match &link.kind {
        ConditionType::ItemRequested => session.status_of(&link.trigger_label) == ItemStatus::Requested,
        ConditionType::ItemReceived => session.status_of(&link.trigger_label) == ItemStatus::Received,
        ConditionType::OutcomeSelected => session.is_selected(&link.trigger_label),
        ConditionType::AllOutcomesSelected => {
            !template.outcomes.is_empty()
                && session.selected.len() == template.distinct_outcomes()
        }
        ConditionType::Unknown(_) => false,
    }
}

/// The template's links whose conditions currently hold, in template order.
/// Two links suggesting the same macro both appear.
pub fn active_links<'a>(template: &'a BuilderTemplate, session: &Session) -> Vec<&'a ConditionLink> {
    template
        .links
        .iter()
        .filter(|link| link_fires(template, session, link))
        .collect()
}

/// A firing link together with the macro it suggests
#[derive(Debug, Clone, Copy)]
pub struct Shortcut<'a> {
    pub link: &'a ConditionLink,
    pub item: &'a MacroItem,
}

/// Active links that still point at an existing macro. Links to deleted
/// macros are dropped without complaint.
pub fn shortcuts<'a>(
    template: &'a BuilderTemplate,
    session: &Session,
    library: &'a Library,
) -> Vec<Shortcut<'a>> {
    active_links(template, session)
        .into_iter()
        .filter_map(|link| {
            library
                .get(&link.macro_id)
                .map(|item| Shortcut { link, item })
        })
        .collect()
}

/// Copy the macro a link points at. Missing macros are a silent no-op.
pub fn resolve_and_copy(
    link: &ConditionLink,
    library: &mut Library,
    clipboard: &mut dyn Clipboard,
) -> Option<String> {
    let copied = library_ops::copy(library, &link.macro_id, clipboard);
    if copied.is_none() {
        log::debug!("link {} points at missing macro {}", link.id, link.macro_id);
    }
    copied
}
