//! Interactive preview of the configured form.
//!
//! This is the render collaborator: it consumes the typed document, a fixed
//! host-environment stub and the preview's own form values, and renders one
//! control per field definition honoring `type`, `secure`, `options`,
//! grouping and the conditional-display rules.

use eframe::egui;
use indexmap::IndexMap;

use crate::document::{ConfigDocument, DisplayRule, FieldDefinition, FieldType, RuleOperand};

use super::super::constants::ITEM_SPACING;

/// Form-value slot for the preview's HTTP URL control; `$` keeps it out of
/// the namespace of user-defined field keys.
const HTTP_URL_KEY: &str = "$httpUrl";

/// Placeholder host-environment values handed to the renderer. A real plugin
/// host would supply its instance settings here; the builder only needs the
/// shape, so everything is fixed identifiers and empty credentials.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub uid: String,
    pub id: u32,
    pub org_id: u32,
    pub name: String,
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub basic_auth: bool,
    pub with_credentials: bool,
    pub read_only: bool,
}

impl HostContext {
    pub fn stub() -> Self {
        Self {
            uid: "1".to_owned(),
            id: 1,
            org_id: 1,
            name: String::new(),
            url: String::new(),
            user: String::new(),
            password: String::new(),
            database: String::new(),
            basic_auth: false,
            with_credentials: false,
            read_only: false,
        }
    }
}

/// One captured control value.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    Number(f64),
    Toggle(bool),
}

impl FormValue {
    /// Text form used by rule comparisons.
    fn as_display(&self) -> String {
        match self {
            FormValue::Text(s) => s.clone(),
            FormValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                format!("{}", *n as i64)
            }
            FormValue::Number(n) => format!("{n}"),
            FormValue::Toggle(b) => b.to_string(),
        }
    }
}

/// Values the preview form has captured so far, keyed by field key.
#[derive(Debug, Default)]
pub struct FormValues(IndexMap<String, FormValue>);

impl FormValues {
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: FormValue) {
        self.0.insert(key.into(), value);
    }

    /// Slot for `field`, created or re-typed on demand so a field whose type
    /// changed in the builder does not keep a stale value shape.
    fn slot(&mut self, field: &FieldDefinition) -> &mut FormValue {
        let wanted = if field.options.is_some() {
            FormValue::Text(String::new())
        } else {
            match field.field_type {
                FieldType::String => FormValue::Text(String::new()),
                FieldType::Number => FormValue::Number(0.0),
                FieldType::Boolean => FormValue::Toggle(false),
            }
        };
        let entry = self
            .0
            .entry(field.key.clone())
            .or_insert_with(|| wanted.clone());
        if std::mem::discriminant(entry) != std::mem::discriminant(&wanted) {
            *entry = wanted;
        }
        entry
    }
}

/// Render the form; returns true when any control value changed.
pub fn ui(
    ui: &mut egui::Ui,
    doc: &ConfigDocument,
    host: &HostContext,
    values: &mut FormValues,
) -> bool {
    let mut changed = false;

    if doc.default_http_settings.enabled {
        let initial = if host.url.is_empty() {
            doc.default_http_settings.default_url.clone()
        } else {
            host.url.clone()
        };
        let slot = values
            .0
            .entry(HTTP_URL_KEY.to_owned())
            .or_insert_with(|| FormValue::Text(initial));
        if let FormValue::Text(url) = slot {
            ui.horizontal(|ui| {
                ui.label("URL");
                if ui
                    .add(
                        egui::TextEdit::singleline(url)
                            .hint_text("https://")
                            .desired_width(f32::INFINITY),
                    )
                    .changed()
                {
                    changed = true;
                }
            });
            ui.add_space(ITEM_SPACING);
        }
    }

    // fields with no group come first, then one section per group in
    // first-appearance order
    let mut groups: IndexMap<&str, Vec<&FieldDefinition>> = IndexMap::new();
    let mut ungrouped: Vec<&FieldDefinition> = Vec::new();
    for field in &doc.properties {
        match field.group.as_deref().filter(|g| !g.is_empty()) {
            Some(group) => groups.entry(group).or_default().push(field),
            None => ungrouped.push(field),
        }
    }

    for field in ungrouped {
        changed |= field_control(ui, field, values);
    }
    for (group, fields) in groups {
        if doc.general.use_collapse {
            egui::CollapsingHeader::new(group)
                .default_open(true)
                .show(ui, |ui| {
                    for field in fields {
                        changed |= field_control(ui, field, values);
                    }
                });
        } else {
            ui.add_space(ITEM_SPACING);
            ui.label(egui::RichText::new(group).strong());
            for field in fields {
                changed |= field_control(ui, field, values);
            }
        }
    }

    changed
}

fn field_control(ui: &mut egui::Ui, field: &FieldDefinition, values: &mut FormValues) -> bool {
    if !is_visible(field, values) {
        return false;
    }

    let label = field.label.clone().unwrap_or_else(|| field.key.clone());
    let mut changed = false;

    ui.horizontal(|ui| {
        let response = ui.label(label);
        if let Some(tooltip) = &field.tooltip {
            response.on_hover_text(tooltip.as_str());
        }

        if let Some(options) = &field.options {
            let slot = values.slot(field);
            if let FormValue::Text(current) = slot {
                let selected_label = options
                    .iter()
                    .find(|o| o.value == *current)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| current.clone());
                egui::ComboBox::from_id_salt(("preview-choice", &field.key))
                    .selected_text(selected_label)
                    .show_ui(ui, |ui| {
                        for option in options {
                            if ui
                                .selectable_value(current, option.value.clone(), option.label.as_str())
                                .changed()
                            {
                                changed = true;
                            }
                        }
                    });
            }
            return;
        }

        match values.slot(field) {
            FormValue::Text(text) => {
                let mut edit = egui::TextEdit::singleline(text).desired_width(f32::INFINITY);
                if let Some(placeholder) = &field.placeholder {
                    edit = edit.hint_text(placeholder.as_str());
                }
                if field.secure.unwrap_or(false) {
                    edit = edit.password(true);
                }
                if ui.add(edit).changed() {
                    changed = true;
                }
            }
            FormValue::Number(number) => {
                if ui.add(egui::DragValue::new(number).speed(0.1)).changed() {
                    changed = true;
                }
            }
            FormValue::Toggle(flag) => {
                if ui.checkbox(flag, "").changed() {
                    changed = true;
                }
            }
        }
    });

    changed
}

/// A field with rules is shown only while every rule holds; a field without
/// rules is always shown.
fn is_visible(field: &FieldDefinition, values: &FormValues) -> bool {
    field
        .show_if
        .as_ref()
        .is_none_or(|rules| rules.iter().all(|rule| rule_matches(rule, values)))
}

/// Evaluate one conditional-display rule against the captured form values.
/// A field that has no captured value yet compares as the empty string.
pub fn rule_matches(rule: &DisplayRule, values: &FormValues) -> bool {
    let actual = values
        .get(&rule.key)
        .map(FormValue::as_display)
        .unwrap_or_default();
    match rule.operand {
        RuleOperand::Equals => actual == rule.value,
        RuleOperand::NotEquals => actual != rule.value,
        RuleOperand::In => in_list(&rule.value, &actual),
        RuleOperand::NotIn => !in_list(&rule.value, &actual),
    }
}

/// `in`/`notin` treat the rule value as a comma-separated list.
fn in_list(list: &str, needle: &str) -> bool {
    list.split(',').map(str::trim).any(|item| item == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(key: &str, operand: RuleOperand, value: &str) -> DisplayRule {
        DisplayRule {
            key: key.to_owned(),
            operand,
            value: value.to_owned(),
        }
    }

    #[test]
    fn equals_and_not_equals() {
        let mut values = FormValues::default();
        values.set("region", FormValue::Text("eu".to_owned()));

        assert!(rule_matches(&rule("region", RuleOperand::Equals, "eu"), &values));
        assert!(!rule_matches(&rule("region", RuleOperand::Equals, "us"), &values));
        assert!(rule_matches(&rule("region", RuleOperand::NotEquals, "us"), &values));
    }

    #[test]
    fn in_and_notin_use_comma_separated_lists() {
        let mut values = FormValues::default();
        values.set("region", FormValue::Text("eu".to_owned()));

        assert!(rule_matches(&rule("region", RuleOperand::In, "us, eu, ap"), &values));
        assert!(!rule_matches(&rule("region", RuleOperand::In, "us,ap"), &values));
        assert!(rule_matches(&rule("region", RuleOperand::NotIn, "us,ap"), &values));
    }

    #[test]
    fn missing_values_compare_as_empty() {
        let values = FormValues::default();
        assert!(rule_matches(&rule("absent", RuleOperand::Equals, ""), &values));
        assert!(!rule_matches(&rule("absent", RuleOperand::Equals, "x"), &values));
    }

    #[test]
    fn toggle_and_number_values_stringify() {
        let mut values = FormValues::default();
        values.set("secure", FormValue::Toggle(true));
        values.set("port", FormValue::Number(8080.0));

        assert!(rule_matches(&rule("secure", RuleOperand::Equals, "true"), &values));
        assert!(rule_matches(&rule("port", RuleOperand::Equals, "8080"), &values));
    }

    #[test]
    fn fields_without_rules_are_visible() {
        let field = FieldDefinition::new_default();
        assert!(is_visible(&field, &FormValues::default()));
    }

    #[test]
    fn all_rules_must_hold() {
        let mut field = FieldDefinition::new_default();
        field.show_if = Some(vec![
            rule("a", RuleOperand::Equals, "1"),
            rule("b", RuleOperand::Equals, "2"),
        ]);
        let mut values = FormValues::default();
        values.set("a", FormValue::Text("1".to_owned()));
        assert!(!is_visible(&field, &values));
        values.set("b", FormValue::Text("2".to_owned()));
        assert!(is_visible(&field, &values));
    }
}
