//! General options section: HTTP settings and group-collapse behavior.

use eframe::egui;

use crate::document::{GeneralSettings, HttpSettings};
use crate::gui::builder::Action;
use crate::mutate::EditOp;
use crate::node_path;

use super::super::constants::ITEM_SPACING;

pub fn ui(
    ui: &mut egui::Ui,
    general: &GeneralSettings,
    http: &HttpSettings,
    actions: &mut Vec<Action>,
) {
    ui.label(egui::RichText::new("General options").heading().strong());
    ui.add_space(ITEM_SPACING);

    let mut enabled = http.enabled;
    if ui
        .checkbox(&mut enabled, "Include default HTTP settings")
        .changed()
    {
        actions.push(Action::Edit(EditOp::set(
            node_path!["defaultHttpSettings", "enabled"],
            enabled,
        )));
    }

    if http.enabled {
        ui.horizontal(|ui| {
            ui.label("Default URL");
            let mut url = http.default_url.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut url)
                        .hint_text("https://")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                actions.push(Action::Edit(EditOp::set(
                    node_path!["defaultHttpSettings", "defaultUrl"],
                    url,
                )));
            }
        });
    }

    ui.add_space(ITEM_SPACING / 2.0);

    let mut use_collapse = general.use_collapse;
    if ui
        .checkbox(&mut use_collapse, "Use collapse for groups")
        .changed()
    {
        actions.push(Action::Edit(EditOp::set(
            node_path!["general", "useCollapse"],
            use_collapse,
        )));
    }
}
