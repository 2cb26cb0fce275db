//! Graphical User Interface (GUI) for WMI Explorer
//!
//! Desktop browser over namespaces, classes and class properties using
//! eframe/egui.

mod app;

pub use app::ExplorerApp;

use crate::provider::Provider;

/// Window title
pub const TITLE: &str = "WMI GUI Explorer";

/// Run the GUI application until the window is closed
pub fn run<P: Provider + 'static>(provider: P) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ExplorerApp::new(provider)))),
    )
}
