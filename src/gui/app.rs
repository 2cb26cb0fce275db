//! Main application state and logic for the WMI Explorer GUI
//!
//! Three panes, left to right: namespaces, classes of the selected
//! namespace, properties of the selected class. Selection handlers run the
//! provider query synchronously on the UI thread.

use eframe::egui;
use egui::{RichText, ScrollArea};
use egui_extras::{Column, TableBuilder};

use crate::browser::{BrowseError, Browser};
use crate::provider::Provider;

const PANE_WIDTH: f32 = 250.0;
const NAME_COLUMN_WIDTH: f32 = 150.0;
const ROW_HEIGHT: f32 = 18.0;

/// Main application state
pub struct ExplorerApp<P: Provider> {
    browser: Browser<P>,
    // Message of the open error dialog, if any
    error: Option<String>,
}

impl<P: Provider> ExplorerApp<P> {
    pub fn new(provider: P) -> Self {
        let mut app = Self {
            browser: Browser::new(provider),
            error: None,
        };
        app.reload();
        app
    }

    fn reload(&mut self) {
        let result = self.browser.load_namespaces();
        self.report(result);
    }

    fn report(&mut self, result: Result<(), BrowseError>) {
        if let Err(e) = result {
            self.error = Some(e.message);
        }
    }

    fn draw_namespaces(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Namespaces");
            if ui.small_button("🔄").on_hover_text("Reload").clicked() {
                self.reload();
            }
        });
        ui.separator();

        let mut clicked = None;
        ScrollArea::vertical()
            .id_salt("namespaces")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for name in self.browser.namespaces() {
                    let selected = self.browser.selected_namespace() == Some(name.as_str());
                    if ui.selectable_label(selected, name).clicked() {
                        clicked = Some(name.clone());
                    }
                }
            });

        if let Some(name) = clicked {
            let result = self.browser.select_namespace(&name);
            self.report(result);
        }
    }

    fn draw_classes(&mut self, ui: &mut egui::Ui) {
        ui.heading("Classes");
        ui.separator();

        let mut clicked = None;
        ScrollArea::vertical()
            .id_salt("classes")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for name in self.browser.classes() {
                    let selected = self.browser.selected_class() == Some(name.as_str());
                    if ui.selectable_label(selected, name).clicked() {
                        clicked = Some(name.clone());
                    }
                }
            });

        if let Some(name) = clicked {
            let result = self.browser.select_class(&name);
            self.report(result);
        }
    }

    fn draw_properties(&self, ui: &mut egui::Ui) {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::initial(NAME_COLUMN_WIDTH).at_least(60.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Property");
                });
                header.col(|ui| {
                    ui.strong("Value");
                });
            })
            .body(|mut body| {
                for property in self.browser.properties() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&property.name);
                        });
                        row.col(|ui| {
                            ui.label(property.display_value());
                        });
                    });
                }
            });
    }

    fn draw_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error.clone() else {
            return;
        };
        egui::Window::new(BrowseError::TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(message).color(egui::Color32::LIGHT_RED));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.error = None;
                }
            });
    }
}

impl<P: Provider> eframe::App for ExplorerApp<P> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Panels stay disabled while the error dialog is open
        let enabled = self.error.is_none();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let location = match self.browser.selected_namespace() {
                    Some(ns) => self.browser.namespace_path(ns).to_string(),
                    None => self.browser.root().to_string(),
                };
                ui.label(RichText::new(location).small());
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "{} namespaces, {} classes, {} properties",
                        self.browser.namespaces().len(),
                        self.browser.classes().len(),
                        self.browser.properties().len()
                    ))
                    .small(),
                );
            });
        });

        egui::SidePanel::left("namespace_panel")
            .resizable(true)
            .default_width(PANE_WIDTH)
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| self.draw_namespaces(ui));
            });

        egui::SidePanel::left("class_panel")
            .resizable(true)
            .default_width(PANE_WIDTH)
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| self.draw_classes(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| self.draw_properties(ui));
        });

        self.draw_error_dialog(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    #[test]
    fn test_initial_load_error_opens_dialog() {
        let mut provider = MockProvider::new();
        provider.namespace("root").fail_children("Access denied");
        let app = ExplorerApp::new(provider);
        assert_eq!(
            app.error.as_deref(),
            Some("Error retrieving namespaces: Access denied")
        );
    }

    #[test]
    fn test_initial_load_lists_namespaces() {
        let app = ExplorerApp::new(MockProvider::demo());
        assert!(app.error.is_none());
        assert_eq!(app.browser.namespaces().len(), 3);
    }
}
