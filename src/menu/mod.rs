// src/menu/mod.rs

use crate::panels::sidebar::CameraControls;
use crate::rendering::camera::ViewPreset;
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, DrawingArea};
use std::cell::RefCell;
use std::rc::Rc;

pub mod actions_data;
pub mod actions_help;
pub mod actions_view;

pub fn build_menu_and_actions(
  app: &Application,
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  drawing_area: &DrawingArea,
  controls: &CameraControls,
) -> gtk4::Box {
  // Register Actions
  actions_view::setup(app, state.clone(), drawing_area, controls);
  actions_data::setup(app, state);
  actions_help::setup(app, window);

  // Keyboard Shortcuts
  for (i, preset) in ViewPreset::ALL.iter().enumerate() {
    let action = format!("app.{}", actions_view::preset_action_name(*preset));
    let accel = format!("<Primary>{}", i + 1);
    app.set_accels_for_action(&action, &[accel.as_str()]);
  }
  app.set_accels_for_action("app.view_home", &["<Primary>r"]);
  app.set_accels_for_action("app.quit", &["<Primary>q"]);

  // --- BUILD MENU BAR ---
  let menu_bar = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
  let root_model = gtk4::gio::Menu::new();

  // --- FILE MENU ---
  let file_menu = gtk4::gio::Menu::new();
  file_menu.append(Some("Quit"), Some("app.quit"));
  root_model.append_submenu(Some("File"), &file_menu);

  // --- VIEW MENU ---
  let view_menu = gtk4::gio::Menu::new();
  let presets = gtk4::gio::Menu::new();
  for preset in ViewPreset::ALL {
    let label = match preset {
      ViewPreset::Isometric => "Isometric",
      other => other.label(),
    };
    let action = format!("app.{}", actions_view::preset_action_name(preset));
    presets.append(Some(label), Some(action.as_str()));
  }
  view_menu.append_section(None, &presets);
  view_menu.append(Some("Home"), Some("app.view_home"));
  root_model.append_submenu(Some("View"), &view_menu);

  // --- DATA MENU ---
  let data_menu = gtk4::gio::Menu::new();
  data_menu.append(Some("Show Data Manifest"), Some("app.data_manifest"));
  root_model.append_submenu(Some("Data"), &data_menu);

  // --- HELP MENU ---
  let help_menu = gtk4::gio::Menu::new();
  help_menu.append(Some("About"), Some("app.about"));
  root_model.append_submenu(Some("Help"), &help_menu);

  let popover_bar = gtk4::PopoverMenuBar::from_model(Some(&root_model));
  menu_bar.append(&popover_bar);

  menu_bar
}
