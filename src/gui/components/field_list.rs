//! Field-list column: one row per form control plus the add button.

use eframe::egui;

use crate::document::{ConfigDocument, FieldType};
use crate::gui::builder::Action;
use crate::mutate::EditOp;
use crate::node_path;

use super::super::constants::{GROUP_INPUT_WIDTH, ITEM_SPACING, KEY_INPUT_WIDTH, TYPE_SELECT_WIDTH};

pub fn ui(
    ui: &mut egui::Ui,
    doc: &ConfigDocument,
    selected: Option<usize>,
    actions: &mut Vec<Action>,
) {
    ui.label(egui::RichText::new("Form Controls").heading().strong());
    ui.add_space(ITEM_SPACING);

    for (index, field) in doc.properties.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label("Key");
            let mut key = field.key.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut key).desired_width(KEY_INPUT_WIDTH))
                .changed()
            {
                actions.push(Action::Select(index));
                actions.push(Action::Edit(EditOp::set(
                    node_path!["properties", index, "key"],
                    key,
                )));
            }

            let mut field_type = field.field_type;
            egui::ComboBox::from_id_salt(("field-type", index))
                .selected_text(field_type.label())
                .width(TYPE_SELECT_WIDTH)
                .show_ui(ui, |ui| {
                    for ty in FieldType::ALL {
                        ui.selectable_value(&mut field_type, ty, ty.label());
                    }
                });
            if field_type != field.field_type {
                actions.push(Action::Select(index));
                actions.push(Action::Edit(EditOp::set(
                    node_path!["properties", index, "type"],
                    field_type.as_str(),
                )));
            }

            let mut group = field.group.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut group)
                        .hint_text("Group (optional)")
                        .desired_width(GROUP_INPUT_WIDTH),
                )
                .changed()
            {
                actions.push(Action::Select(index));
                actions.push(Action::Edit(EditOp::set(
                    node_path!["properties", index, "group"],
                    group,
                )));
            }

            if ui.selectable_label(selected == Some(index), "Edit").clicked() {
                actions.push(Action::Select(index));
            }
            if ui.button("\u{2715}").clicked() {
                actions.push(Action::RemoveField(index));
            }
        });
        ui.add_space(ITEM_SPACING / 2.0);
    }

    ui.add_space(ITEM_SPACING);
    ui.vertical_centered(|ui| {
        if ui.button("Add Form Control").clicked() {
            actions.push(Action::AddField);
        }
    });
}
