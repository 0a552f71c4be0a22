//! Detail editor for the focused field definition.

use eframe::egui;

use crate::document::{FieldDefinition, RuleOperand};
use crate::gui::builder::Action;
use crate::mutate::EditOp;
use crate::node_path;

use super::super::constants::{ITEM_SPACING, SECTION_SPACING};

pub fn ui(ui: &mut egui::Ui, index: usize, field: &FieldDefinition, actions: &mut Vec<Action>) {
    ui.label(
        egui::RichText::new(format!("{} Properties", field.key))
            .heading()
            .strong(),
    );
    ui.add_space(ITEM_SPACING);

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Key");
            let mut key = field.key.clone();
            ui.add_enabled(
                false,
                egui::TextEdit::singleline(&mut key).desired_width(f32::INFINITY),
            );
        });

        for (label, attribute, current) in [
            ("Label", "label", field.label.as_deref()),
            ("Placeholder", "placeholder", field.placeholder.as_deref()),
            ("Tooltip", "tooltip", field.tooltip.as_deref()),
        ] {
            if let Some(value) = text_row(ui, label, current.unwrap_or_default()) {
                actions.push(Action::Edit(EditOp::set(
                    node_path!["properties", index, attribute],
                    value,
                )));
            }
        }

        let mut secure = field.secure.unwrap_or(false);
        if ui.checkbox(&mut secure, "Is secure").changed() {
            actions.push(Action::Edit(EditOp::set(
                node_path!["properties", index, "secure"],
                secure,
            )));
        }
    });

    ui.add_space(SECTION_SPACING);
    options_section(ui, index, field, actions);
    ui.add_space(SECTION_SPACING);
    rules_section(ui, index, field, actions);
}

fn options_section(
    ui: &mut egui::Ui,
    index: usize,
    field: &FieldDefinition,
    actions: &mut Vec<Action>,
) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Options").strong());
            let mut enabled = field.options.is_some();
            if ui.checkbox(&mut enabled, "").changed() {
                actions.push(Action::ToggleOptions(index, enabled));
            }
            if field.options.is_some() && ui.button("Add").clicked() {
                actions.push(Action::AddOption(index));
            }
        });

        if let Some(options) = &field.options {
            for (opt_index, option) in options.iter().enumerate() {
                ui.horizontal(|ui| {
                    for (hint, attribute, current) in [
                        ("Label", "label", option.label.as_str()),
                        ("Value", "value", option.value.as_str()),
                    ] {
                        let mut buf = current.to_owned();
                        if ui
                            .add(egui::TextEdit::singleline(&mut buf).hint_text(hint))
                            .changed()
                        {
                            actions.push(Action::Edit(EditOp::set(
                                node_path!["properties", index, "options", opt_index, attribute],
                                buf.clone(),
                            )));
                        }
                    }
                    if ui.button("\u{2715}").clicked() {
                        actions.push(Action::RemoveOption(index, opt_index));
                    }
                });
            }
        }
    });
}

fn rules_section(
    ui: &mut egui::Ui,
    index: usize,
    field: &FieldDefinition,
    actions: &mut Vec<Action>,
) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Rules").strong());
            let mut enabled = field.show_if.is_some();
            if ui.checkbox(&mut enabled, "").changed() {
                actions.push(Action::ToggleRules(index, enabled));
            }
            if field.show_if.is_some() && ui.button("Add").clicked() {
                actions.push(Action::AddRule(index));
            }
        });

        if let Some(rules) = &field.show_if {
            for (rule_index, rule) in rules.iter().enumerate() {
                ui.horizontal(|ui| {
                    let mut key = rule.key.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut key).hint_text("Key"))
                        .changed()
                    {
                        actions.push(Action::Edit(EditOp::set(
                            node_path!["properties", index, "showIf", rule_index, "key"],
                            key,
                        )));
                    }

                    let mut operand = rule.operand;
                    egui::ComboBox::from_id_salt(("rule-operand", index, rule_index))
                        .selected_text(operand.label())
                        .width(56.0)
                        .show_ui(ui, |ui| {
                            for op in RuleOperand::ALL {
                                ui.selectable_value(&mut operand, op, op.label());
                            }
                        });
                    if operand != rule.operand {
                        actions.push(Action::Edit(EditOp::set(
                            node_path!["properties", index, "showIf", rule_index, "operand"],
                            operand.as_str(),
                        )));
                    }

                    let mut value = rule.value.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut value).hint_text("Value"))
                        .changed()
                    {
                        actions.push(Action::Edit(EditOp::set(
                            node_path!["properties", index, "showIf", rule_index, "value"],
                            value,
                        )));
                    }

                    if ui.button("\u{2715}").clicked() {
                        actions.push(Action::RemoveRule(index, rule_index));
                    }
                });
            }
        }
    });
}

fn text_row(ui: &mut egui::Ui, label: &str, current: &str) -> Option<String> {
    let mut buf = current.to_owned();
    let mut edited = None;
    ui.horizontal(|ui| {
        ui.label(label);
        if ui
            .add(egui::TextEdit::singleline(&mut buf).desired_width(f32::INFINITY))
            .changed()
        {
            edited = Some(buf.clone());
        }
    });
    edited
}
