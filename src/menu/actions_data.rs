// src/menu/actions_data.rs

use crate::io::manifest;
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::Application;
use std::cell::RefCell;
use std::rc::Rc;

pub fn setup(app: &Application, state: Rc<RefCell<AppState>>) {
    let act_manifest = gtk4::gio::SimpleAction::new("data_manifest", None);

    act_manifest.connect_activate(move |_, _| {
        let dir = state.borrow().data_dir.clone();
        match manifest::scan(&dir).and_then(|m| m.to_json().map(|json| (m, json))) {
            Ok((m, json)) => {
                log::info!(
                    "Data manifest for {}: {} file(s), {} bytes",
                    dir.display(),
                    m.files.len(),
                    m.total_size()
                );
                log::info!("{}", json);
            }
            Err(e) => log::error!("Data manifest failed: {}", e),
        }
    });
    app.add_action(&act_manifest);
}
