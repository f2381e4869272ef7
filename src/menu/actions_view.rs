// src/menu/actions_view.rs

use crate::panels::sidebar::{apply_view, CameraControls};
use crate::rendering::camera::ViewPreset;
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::{Application, DrawingArea};
use std::cell::RefCell;
use std::rc::Rc;

/// Action name for a preset, e.g. `view_front`.
pub fn preset_action_name(preset: ViewPreset) -> String {
    format!("view_{}", preset.label().to_lowercase())
}

pub fn setup(
    app: &Application,
    state: Rc<RefCell<AppState>>,
    drawing_area: &DrawingArea,
    controls: &CameraControls,
) {
    // 1. Presets
    for preset in ViewPreset::ALL {
        let act = gtk4::gio::SimpleAction::new(&preset_action_name(preset), None);
        let s = state.clone();
        let ctl = controls.clone();
        let da = drawing_area.downgrade();

        act.connect_activate(move |_, _| {
            if let Some(da) = da.upgrade() {
                apply_view(&s, &ctl, &da, Some(preset));
            }
        });
        app.add_action(&act);
    }

    // 2. Home (snapshot taken at startup)
    let act_home = gtk4::gio::SimpleAction::new("view_home", None);
    let s = state.clone();
    let ctl = controls.clone();
    let da = drawing_area.downgrade();

    act_home.connect_activate(move |_, _| {
        if let Some(da) = da.upgrade() {
            apply_view(&s, &ctl, &da, None);
        }
    });
    app.add_action(&act_home);
}
