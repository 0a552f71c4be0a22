//! Builder window implemented with egui/eframe.
//!
//! The app owns the only mutable state: the current document snapshot, the
//! focus tracker and the preview form's captured values. Panels never mutate
//! anything directly; they emit [`Action`]s which are dispatched through the
//! edit model after the frame is laid out, replacing the snapshot wholesale.

use std::sync::Arc;

use anyhow::anyhow;
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{debug, error, info};

use crate::document::ConfigDocument;
use crate::mutate::{self, EditOp};
use crate::ops;
use crate::selection::ActiveSelection;
use crate::tree::DocNode;

use super::components::form_preview::{FormValues, HostContext};
use super::components::preview_panel::{self, PreviewTab};
use super::components::{field_detail, field_list, general_settings};
use super::constants::*;

/// One user intent collected from a panel during a frame.
#[derive(Debug)]
pub enum Action {
    /// Direct path-addressed edit from a widget.
    Edit(EditOp),
    AddField,
    RemoveField(usize),
    ToggleOptions(usize, bool),
    AddOption(usize),
    RemoveOption(usize, usize),
    ToggleRules(usize, bool),
    AddRule(usize),
    RemoveRule(usize, usize),
    Select(usize),
}

pub struct BuilderApp {
    snapshot: Arc<DocNode>,
    selection: ActiveSelection,
    preview_tab: PreviewTab,
    host: HostContext,
    form_values: FormValues,
}

impl BuilderApp {
    fn new(_cc: &CreationContext<'_>) -> anyhow::Result<Self> {
        info!("Initializing builder window");
        Self::from_seed()
    }

    fn from_seed() -> anyhow::Result<Self> {
        Ok(Self {
            snapshot: ConfigDocument::seed().to_snapshot()?,
            selection: ActiveSelection::at(0),
            preview_tab: PreviewTab::default(),
            host: HostContext::stub(),
            form_values: FormValues::default(),
        })
    }

    fn dispatch(&mut self, action: Action) {
        debug!(action = ?action, "Dispatching edit");
        let result = match &action {
            Action::Select(index) => {
                self.selection.select(*index);
                return;
            }
            Action::Edit(op) => mutate::apply(&self.snapshot, op),
            Action::AddField => ops::add_field(&self.snapshot),
            Action::RemoveField(index) => ops::remove_field(&self.snapshot, *index),
            Action::ToggleOptions(index, enabled) => {
                ops::toggle_options(&self.snapshot, *index, *enabled)
            }
            Action::AddOption(index) => ops::add_option(&self.snapshot, *index),
            Action::RemoveOption(index, opt_index) => {
                ops::remove_option(&self.snapshot, *index, *opt_index)
            }
            Action::ToggleRules(index, enabled) => {
                ops::toggle_rules(&self.snapshot, *index, *enabled)
            }
            Action::AddRule(index) => ops::add_rule(&self.snapshot, *index),
            Action::RemoveRule(index, rule_index) => {
                ops::remove_rule(&self.snapshot, *index, *rule_index)
            }
        };

        match result {
            Ok(next) => {
                if let Action::RemoveField(removed) = action {
                    if !Arc::ptr_eq(&next, &self.snapshot) {
                        self.selection.after_remove(removed, ops::field_count(&next));
                    }
                }
                self.snapshot = next;
            }
            Err(err) => error!(error = ?err, "Rejected edit operation"),
        }
    }
}

impl eframe::App for BuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let doc = match ConfigDocument::from_snapshot(&self.snapshot) {
            Ok(doc) => doc,
            Err(err) => {
                error!(error = ?err, "Snapshot no longer decodes as a config document");
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.colored_label(
                        egui::Color32::from_rgb(200, 0, 0),
                        format!("Internal document error: {err}"),
                    );
                });
                return;
            }
        };

        let selected = self.selection.current(doc.properties.len());
        let mut actions = Vec::new();

        egui::SidePanel::left("field-list")
            .default_width(FIELD_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    field_list::ui(ui, &doc, selected, &mut actions);
                    ui.add_space(SECTION_SPACING);
                    ui.separator();
                    ui.add_space(SECTION_SPACING);
                    general_settings::ui(ui, &doc.general, &doc.default_http_settings, &mut actions);
                });
            });

        egui::SidePanel::right("preview")
            .default_width(PREVIEW_PANEL_WIDTH)
            .show(ctx, |ui| {
                preview_panel::ui(
                    ui,
                    &mut self.preview_tab,
                    &self.snapshot,
                    &doc,
                    &self.host,
                    &mut self.form_values,
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| match selected {
            Some(index) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    field_detail::ui(ui, index, &doc.properties[index], &mut actions);
                });
            }
            None => {
                ui.label(
                    egui::RichText::new("No form control selected")
                        .italics()
                        .weak(),
                );
            }
        });

        for action in actions {
            self.dispatch(action);
        }
    }
}

pub fn run_gui() -> anyhow::Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("No-Code Config Builder"),
        ..Default::default()
    };

    eframe::run_native(
        "No-Code Config Builder",
        options,
        Box::new(|cc| {
            BuilderApp::new(cc)
                .map(|app| Box::new(app) as Box<dyn eframe::App>)
                .map_err(Into::into)
        }),
    )
    .map_err(|err| anyhow!("Failed to launch builder window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_path;

    #[test]
    fn edit_actions_replace_the_snapshot() {
        let mut app = BuilderApp::from_seed().unwrap();
        app.dispatch(Action::Edit(EditOp::set(
            node_path!["properties", 0usize, "label"],
            "Token",
        )));
        let doc = ConfigDocument::from_snapshot(&app.snapshot).unwrap();
        assert_eq!(doc.properties[0].label.as_deref(), Some("Token"));
    }

    #[test]
    fn rejected_edits_leave_the_snapshot_alone() {
        let mut app = BuilderApp::from_seed().unwrap();
        let before = Arc::clone(&app.snapshot);
        // indexing into a scalar is a structural error
        app.dispatch(Action::Edit(EditOp::set(
            node_path!["general", "useCollapse", 0usize],
            true,
        )));
        assert!(Arc::ptr_eq(&before, &app.snapshot));
    }

    #[test]
    fn removing_the_focused_field_moves_focus_with_the_list() {
        let mut app = BuilderApp::from_seed().unwrap();
        app.dispatch(Action::AddField);
        app.dispatch(Action::Select(2));
        app.dispatch(Action::RemoveField(2));
        // clamped to the new last entry
        assert_eq!(app.selection.current(2), Some(1));

        app.dispatch(Action::RemoveField(0));
        assert_eq!(app.selection.current(1), Some(0));
    }

    #[test]
    fn out_of_range_removal_keeps_focus_and_snapshot() {
        let mut app = BuilderApp::from_seed().unwrap();
        app.dispatch(Action::Select(1));
        let before = Arc::clone(&app.snapshot);
        app.dispatch(Action::RemoveField(9));
        assert!(Arc::ptr_eq(&before, &app.snapshot));
        assert_eq!(app.selection.current(2), Some(1));
    }
}
