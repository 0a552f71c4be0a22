//! Preview column: JSON, generated editor code, or the rendered form.

use eframe::egui;

use crate::document::ConfigDocument;
use crate::projection;
use crate::tree::DocNode;

use super::super::constants::ITEM_SPACING;
use super::form_preview::{self, FormValues, HostContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewTab {
    #[default]
    Json,
    Code,
    Form,
}

pub fn ui(
    ui: &mut egui::Ui,
    tab: &mut PreviewTab,
    snapshot: &DocNode,
    doc: &ConfigDocument,
    host: &HostContext,
    values: &mut FormValues,
) {
    ui.label(egui::RichText::new("Preview").heading().strong());
    ui.add_space(ITEM_SPACING);

    ui.horizontal(|ui| {
        ui.selectable_value(tab, PreviewTab::Json, "JSON Preview");
        ui.selectable_value(tab, PreviewTab::Code, "Config Editor Code");
        ui.selectable_value(tab, PreviewTab::Form, "Component Preview");
    });
    ui.add_space(ITEM_SPACING);

    egui::ScrollArea::vertical()
        .auto_shrink(false)
        .show(ui, |ui| match tab {
            PreviewTab::Json => projected_text(ui, projection::serialized(snapshot)),
            PreviewTab::Code => projected_text(ui, projection::editor_code(snapshot)),
            PreviewTab::Form => {
                if form_preview::ui(ui, doc, host, values) {
                    tracing::debug!("Preview form value changed");
                }
            }
        });
}

fn projected_text(ui: &mut egui::Ui, text: Result<String, serde_json::Error>) {
    match text {
        Ok(text) => {
            // read-only but selectable text
            ui.add(
                egui::TextEdit::multiline(&mut text.as_str())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
        }
        Err(err) => {
            ui.colored_label(
                egui::Color32::from_rgb(200, 0, 0),
                format!("Failed to render projection: {err}"),
            );
        }
    }
}
