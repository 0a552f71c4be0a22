//! Typed configuration-document model.
//!
//! These are the structs the render collaborator and the seed constructor
//! work with. The live snapshot edited by the path mutator is the dynamic
//! tree in [`crate::tree`]; the two representations are bridged through
//! serde, so key order and optional-field absence survive the round trip.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tree::DocNode;

/// Key given to newly added field definitions.
pub const DEFAULT_FIELD_KEY: &str = "apiKey";
/// Label given to newly added field definitions.
pub const DEFAULT_FIELD_LABEL: &str = "API Key";

/// Root of the configuration definition being built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub general: GeneralSettings,
    pub default_http_settings: HttpSettings,
    pub properties: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub use_collapse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    pub enabled: bool,
    pub default_url: String,
}

/// One form control in the generated config editor.
///
/// `options` and `show_if` are wholly absent (`None`) or a possibly-empty
/// list; absence is the "feature off" state, so both are skipped during
/// serialization when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_if: Option<Vec<DisplayRule>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub const ALL: [FieldType; 3] = [FieldType::String, FieldType::Number, FieldType::Boolean];

    /// Selector label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
        }
    }

    /// Serialized identifier (`"string"`, `"number"`, `"boolean"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable choice for a field rendered as a choice control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    /// The row seeded when the options list is toggled on.
    pub fn blank() -> Self {
        Self {
            label: String::new(),
            value: String::new(),
        }
    }
}

/// Conditional-visibility predicate: show the field only when the field named
/// `key` relates to `value` via `operand`. Evaluation belongs to the
/// consumers (generated editor code, form preview), not to the edit model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRule {
    pub key: String,
    pub operand: RuleOperand,
    pub value: String,
}

impl DisplayRule {
    /// The row seeded when the rules list is toggled on.
    pub fn blank() -> Self {
        Self {
            key: String::new(),
            operand: RuleOperand::Equals,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOperand {
    #[serde(rename = "===")]
    Equals,
    #[serde(rename = "!==")]
    NotEquals,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notin")]
    NotIn,
}

impl RuleOperand {
    pub const ALL: [RuleOperand; 4] = [
        RuleOperand::Equals,
        RuleOperand::NotEquals,
        RuleOperand::In,
        RuleOperand::NotIn,
    ];

    /// Selector label.
    pub fn label(&self) -> &'static str {
        match self {
            RuleOperand::Equals => "=",
            RuleOperand::NotEquals => "!=",
            RuleOperand::In => "in",
            RuleOperand::NotIn => "!in",
        }
    }

    /// Serialized identifier (`"==="`, `"!=="`, `"in"`, `"notin"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleOperand::Equals => "===",
            RuleOperand::NotEquals => "!==",
            RuleOperand::In => "in",
            RuleOperand::NotIn => "notin",
        }
    }
}

impl ConfigDocument {
    /// The document every session starts from.
    pub fn seed() -> Self {
        Self {
            general: GeneralSettings { use_collapse: true },
            default_http_settings: HttpSettings {
                enabled: false,
                default_url: String::new(),
            },
            properties: vec![
                FieldDefinition::named(DEFAULT_FIELD_KEY, DEFAULT_FIELD_LABEL),
                FieldDefinition::named("region", "Region"),
            ],
        }
    }

    /// Encode into a snapshot tree for the path mutator.
    pub fn to_snapshot(&self) -> Result<Arc<DocNode>, serde_json::Error> {
        Ok(Arc::new(DocNode::from_json(serde_json::to_value(self)?)))
    }

    /// Decode a snapshot tree back into the typed model.
    pub fn from_snapshot(node: &DocNode) -> Result<Self, serde_json::Error> {
        serde_json::from_value(node.to_json())
    }
}

impl FieldDefinition {
    /// The entry appended by "Add Form Control".
    pub fn new_default() -> Self {
        Self::named(DEFAULT_FIELD_KEY, DEFAULT_FIELD_LABEL)
    }

    fn named(key: &str, label: &str) -> Self {
        Self {
            key: key.to_owned(),
            field_type: FieldType::String,
            label: Some(label.to_owned()),
            placeholder: None,
            tooltip: None,
            group: None,
            secure: None,
            options: None,
            show_if: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn seed_shape() {
        let doc = ConfigDocument::seed();
        assert!(doc.general.use_collapse);
        assert!(!doc.default_http_settings.enabled);
        assert_eq!(doc.properties.len(), 2);
        assert_eq!(doc.properties[0].key, "apiKey");
        assert_eq!(doc.properties[1].key, "region");
    }

    #[test]
    fn absent_sublists_are_skipped_but_empty_ones_are_kept() {
        let mut field = FieldDefinition::new_default();
        let value = serde_json::to_value(&field).unwrap();
        assert!(value.get("options").is_none());
        assert!(value.get("showIf").is_none());

        field.options = Some(Vec::new());
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value.get("options"), Some(&json!([])));
    }

    #[test]
    fn field_type_and_operand_wire_names() {
        assert_eq!(serde_json::to_value(FieldType::Boolean).unwrap(), json!("boolean"));
        assert_eq!(
            serde_json::to_value(RuleOperand::NotEquals).unwrap(),
            json!("!==")
        );
        assert_eq!(
            serde_json::from_value::<RuleOperand>(json!("notin")).unwrap(),
            RuleOperand::NotIn
        );
    }

    #[test]
    fn snapshot_round_trip() {
        let mut doc = ConfigDocument::seed();
        doc.properties[0].show_if = Some(vec![DisplayRule::blank()]);
        doc.properties[1].options = Some(vec![ChoiceOption::blank()]);
        let snapshot = doc.to_snapshot().unwrap();
        let decoded = ConfigDocument::from_snapshot(&snapshot).unwrap();
        assert_eq!(decoded, doc);
    }
}
