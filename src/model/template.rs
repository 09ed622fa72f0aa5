use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which piece of builder state a link watches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionType {
    ItemRequested,
    ItemReceived,
    OutcomeSelected,
    AllOutcomesSelected,
    /// A type string this version does not recognize. Never fires.
    Unknown(String),
}

impl ConditionType {
    pub const KNOWN: [ConditionType; 4] = [
        ConditionType::ItemRequested,
        ConditionType::ItemReceived,
        ConditionType::OutcomeSelected,
        ConditionType::AllOutcomesSelected,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ConditionType::ItemRequested => "item_requested",
            ConditionType::ItemReceived => "item_received",
            ConditionType::OutcomeSelected => "outcome_selected",
            ConditionType::AllOutcomesSelected => "all_outcomes_selected",
            ConditionType::Unknown(raw) => raw,
        }
    }

    /// Parse a known type name. Returns `None` for anything else.
    pub fn parse_known(s: &str) -> Option<ConditionType> {
        match ConditionType::from(s.trim().to_string()) {
            ConditionType::Unknown(_) => None,
            known => Some(known),
        }
    }

    /// Trigger labels for this type come from the checklist items
    pub fn targets_items(&self) -> bool {
        matches!(
            self,
            ConditionType::ItemRequested | ConditionType::ItemReceived
        )
    }

    /// Trigger labels for this type come from the outcomes
    pub fn targets_outcomes(&self) -> bool {
        matches!(self, ConditionType::OutcomeSelected)
    }
}

impl From<String> for ConditionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "item_requested" => ConditionType::ItemRequested,
            "item_received" => ConditionType::ItemReceived,
            "outcome_selected" => ConditionType::OutcomeSelected,
            "all_outcomes_selected" => ConditionType::AllOutcomesSelected,
            _ => ConditionType::Unknown(s),
        }
    }
}

impl From<ConditionType> for String {
    fn from(t: ConditionType) -> Self {
        match t {
            ConditionType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule that suggests a macro when builder state matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLink {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ConditionType,
    /// Item or outcome label; ignored for `all_outcomes_selected`
    #[serde(default)]
    pub trigger_label: String,
    #[serde(default)]
    pub macro_id: String,
}

/// A named checklist configuration for the note builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderTemplate {
    pub id: String,
    pub name: String,
    /// Heading for the checklist section, e.g. "Documents"
    #[serde(default)]
    pub primary_label: String,
    /// Heading for the outcome section, e.g. "Outcomes"
    #[serde(default)]
    pub secondary_label: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Older records were saved before links existed
    #[serde(default)]
    pub links: Vec<ConditionLink>,
}

impl BuilderTemplate {
    /// Number of different outcome labels. Stored templates may repeat one.
    pub fn distinct_outcomes(&self) -> usize {
        self.outcomes.iter().collect::<HashSet<_>>().len()
    }
}

/// An in-progress edit of a template. Changes land only on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub template: BuilderTemplate,
}

impl TemplateDraft {
    /// Defaults used when the user starts a new builder
    pub fn blank() -> Self {
        TemplateDraft {
            template: BuilderTemplate {
                id: String::new(),
                name: "New Builder".to_string(),
                primary_label: "Items".to_string(),
                secondary_label: "Outcomes".to_string(),
                items: Vec::new(),
                outcomes: Vec::new(),
                links: Vec::new(),
            },
        }
    }

    pub fn edit(template: &BuilderTemplate) -> Self {
        TemplateDraft {
            template: template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_template_without_links() {
        let src = r#"{"id":"t1","name":"Verify","primaryLabel":"Docs","secondaryLabel":"Outcomes","items":["ID"],"outcomes":["Done"]}"#;
        let t: BuilderTemplate = serde_json::from_str(src).unwrap();
        assert!(t.links.is_empty());
        assert_eq!(t.items, vec!["ID"]);
    }

    #[test]
    fn condition_type_round_trips_unknown_strings() {
        let src = r#"{"id":"l1","type":"item_flagged","triggerLabel":"ID","macroId":"m1"}"#;
        let link: ConditionLink = serde_json::from_str(src).unwrap();
        assert_eq!(link.kind, ConditionType::Unknown("item_flagged".into()));
        let back = serde_json::to_value(&link).unwrap();
        assert_eq!(back["type"], "item_flagged");
        assert_eq!(back["triggerLabel"], "ID");
    }

    #[test]
    fn parse_known_rejects_unknown() {
        assert_eq!(
            ConditionType::parse_known("outcome_selected"),
            Some(ConditionType::OutcomeSelected)
        );
        assert_eq!(ConditionType::parse_known("nope"), None);
    }

    #[test]
    fn blank_draft_defaults() {
        let d = TemplateDraft::blank();
        assert_eq!(d.template.name, "New Builder");
        assert_eq!(d.template.primary_label, "Items");
        assert_eq!(d.template.secondary_label, "Outcomes");
    }
}
