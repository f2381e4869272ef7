// src/menu/actions_help.rs

use gtk4::prelude::*;
use gtk4::{AboutDialog, Application, ApplicationWindow, License};

pub fn setup(app: &Application, window: &ApplicationWindow) {
    // --- ABOUT ACTION ---
    let about_action = gtk4::gio::SimpleAction::new("about", None);
    let win_weak = window.downgrade();

    about_action.connect_activate(move |_, _| {
        if let Some(win) = win_weak.upgrade() {
            let dialog = AboutDialog::builder()
                .transient_for(&win)
                .modal(true)
                .program_name("thetaview")
                .version(env!("CARGO_PKG_VERSION"))
                .comments(
                    "Interactive view of the theta field: elements and harmonics \
                     on a log-expanding torus.",
                )
                .license_type(License::MitX11)
                .logo_icon_name("applications-science")
                .build();

            dialog.present();
        }
    });
    app.add_action(&about_action);

    // --- QUIT ACTION ---
    let quit_action = gtk4::gio::SimpleAction::new("quit", None);
    let app_weak = app.downgrade();
    quit_action.connect_activate(move |_, _| {
        if let Some(app) = app_weak.upgrade() {
            app.quit();
        }
    });
    app.add_action(&quit_action);
}
