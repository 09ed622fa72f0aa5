use crate::model::session::{ItemStatus, Session};
use crate::model::template::BuilderTemplate;

pub const RECEIVED_HEADER: &str = "**Received:**";
pub const REQUESTED_HEADER: &str = "**Requested:**";
pub const OUTCOME_HEADER: &str = "**Outcome:**";

/// Returned by `generate_note` while nothing is selected
pub const NOTE_PLACEHOLDER: &str = "Start selecting items to build your note...";

/// Press the status button `status` for an item.
///
/// Pressing the button for the item's current status returns it to `none`;
/// any other press sets that status. Leaving `received` drops the detail.
pub fn toggle_status(session: &mut Session, label: &str, status: ItemStatus) -> ItemStatus {
    let next = if session.status_of(label) == status {
        ItemStatus::None
    } else {
        status
    };
    if next != ItemStatus::Received {
        session.details.shift_remove(label);
    }
    session.status.insert(label.to_string(), next);
    next
}

/// Attach free text to a received item. Ignored for any other status.
pub fn set_detail(session: &mut Session, label: &str, detail: &str) -> bool {
    if session.status_of(label) != ItemStatus::Received {
        return false;
    }
    if detail.is_empty() {
        session.details.shift_remove(label);
    } else {
        session.details.insert(label.to_string(), detail.to_string());
    }
    true
}

/// Flip one outcome in or out of the selection. Returns the new membership.
pub fn toggle_outcome(session: &mut Session, label: &str) -> bool {
    if session.selected.shift_remove(label) {
        false
    } else {
        session.selected.insert(label.to_string());
        true
    }
}

/// Select every outcome, or clear the selection when it is already full.
pub fn toggle_all_outcomes(session: &mut Session, template: &BuilderTemplate) {
    if template.outcomes.iter().all(|o| session.is_selected(o)) {
        session.selected.clear();
    } else {
        session.selected = template.outcomes.iter().cloned().collect();
    }
}

pub fn reset(session: &mut Session) {
    session.status.clear();
    session.details.clear();
    session.selected.clear();
}

/// Render the account note for the current session.
///
/// Up to three sections (received, requested, outcome), each listed in
/// template order and skipped when empty, separated by a blank line.
pub fn generate_note(template: &BuilderTemplate, session: &Session) -> String {
    let received: Vec<String> = template
        .items
        .iter()
        .filter(|item| session.status_of(item) == ItemStatus::Received)
        .map(|item| match session.detail_of(item) {
            Some(detail) if !detail.is_empty() => format!("- {} {}", item, detail),
            _ => format!("- {}", item),
        })
        .collect();
    let requested: Vec<String> = template
        .items
        .iter()
        .filter(|item| session.status_of(item) == ItemStatus::Requested)
        .map(|item| format!("- {}", item))
        .collect();
    let outcomes: Vec<String> = template
        .outcomes
        .iter()
        .filter(|o| session.is_selected(o))
        .map(|o| format!("- {}", o))
        .collect();

    let mut parts = Vec::new();
    for (header, lines) in [
        (RECEIVED_HEADER, received),
        (REQUESTED_HEADER, requested),
        (OUTCOME_HEADER, outcomes),
    ] {
        if !lines.is_empty() {
            parts.push(format!("{}\n{}", header, lines.join("\n")));
        }
    }

    if parts.is_empty() {
        NOTE_PLACEHOLDER.to_string()
    } else {
        parts.join("\n\n")
    }
}
