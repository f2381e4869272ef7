// src/panels/sidebar.rs

use gtk4::gdk;
use gtk4::prelude::*;
use gtk4::{
  Adjustment, Align, Box as GtkBox, Button, CheckButton, CssProvider, DrawingArea, DropDown,
  Expander, Frame, Label, Orientation, PolicyType, Scale, ScrolledWindow, SpinButton,
  STYLE_PROVIDER_PRIORITY_APPLICATION,
};

use crate::animation::{ClockMode, LOG_SPEED_RANGE, PERIOD};
use crate::config::ColorMode;
use crate::physics::field::OMEGA_RANGE;
use crate::physics::FieldModel;
use crate::rendering::camera::{Camera, ViewPreset, ANGLE_LIMIT_DEG, PITCH_LIMIT_DEG, ZOOM_RANGE};
use crate::state::{AppState, OPACITY_RANGE, ORBIT_SPEED_RANGE, POINT_SIZE_RANGE};
use std::cell::RefCell;
use std::rc::Rc;

/// Adjustments behind the camera sliders. Anything that moves the camera
/// outside the sidebar calls [`CameraControls::sync`] afterwards, with the
/// state borrow already released: setting a value re-enters the handlers.
#[derive(Clone)]
pub struct CameraControls {
  pub pitch: Adjustment,
  pub yaw: Adjustment,
  pub roll: Adjustment,
  pub zoom: Adjustment,
}

impl CameraControls {
  fn new(cam: &Camera) -> Self {
    Self {
      pitch: Adjustment::new(cam.pitch().to_degrees(), -PITCH_LIMIT_DEG, PITCH_LIMIT_DEG, 1.0, 10.0, 0.0),
      yaw: Adjustment::new(cam.yaw().to_degrees(), -ANGLE_LIMIT_DEG, ANGLE_LIMIT_DEG, 1.0, 10.0, 0.0),
      roll: Adjustment::new(cam.roll().to_degrees(), -ANGLE_LIMIT_DEG, ANGLE_LIMIT_DEG, 1.0, 10.0, 0.0),
      zoom: Adjustment::new(cam.zoom(), ZOOM_RANGE.0, ZOOM_RANGE.1, 0.01, 0.1, 0.0),
    }
  }

  pub fn sync(&self, cam: &Camera) {
    self.pitch.set_value(cam.pitch().to_degrees());
    self.yaw.set_value(cam.yaw().to_degrees());
    self.roll.set_value(cam.roll().to_degrees());
    self.zoom.set_value(cam.zoom());
  }
}

/// Widgets the frame loop and the menu need to reach after build.
#[derive(Clone)]
pub struct SidebarHandles {
  pub camera: CameraControls,
  /// Follows the clock while it plays.
  pub time_scrub: Adjustment,
}

/// Read-only summary of the field parameters.
pub fn parameter_lines(model: &FieldModel) -> Vec<String> {
  let cfg = model.config();
  vec![
    format!("\u{03A6}\u{221E} = {:.3}", cfg.r0),
    format!("b = {:.3}", cfg.b),
    format!("z_max = {}", cfg.z_max),
    format!("k = {:.4}", model.k_phase()),
    format!("r_growth = {:.4}", model.r_growth()),
    format!("R = {:.3}", cfg.major_radius),
    format!("\u{03BA} = {:.4}", model.kappa()),
    omega_line(model.omega()),
  ]
}

fn omega_line(omega: f64) -> String {
  format!("\u{03C9} = {:.3}", omega)
}

/// Applies a preset (or home when `None`) and pushes the result to the sliders.
pub fn apply_view(
  state: &Rc<RefCell<AppState>>,
  controls: &CameraControls,
  drawing_area: &DrawingArea,
  preset: Option<ViewPreset>,
) {
  let camera = {
    let mut st = state.borrow_mut();
    match preset {
      Some(p) => st.apply_preset(p),
      None => st.go_home(),
    }
    st.camera.clone()
  };
  controls.sync(&camera);
  drawing_area.queue_draw();
  match preset {
    Some(p) => log::info!("View: {}", p.label()),
    None => log::info!("View: Home"),
  }
}

fn section(title: &str, expanded: bool) -> (Expander, GtkBox) {
  let expander = Expander::new(Some(title));
  expander.set_expanded(expanded);
  let content = GtkBox::new(Orientation::Vertical, 12);
  content.set_margin_top(10);
  content.set_margin_bottom(10);
  content.set_margin_start(5);
  expander.set_child(Some(&content));
  (expander, content)
}

// --- Helper for Sliders (Snapping & Styling) ---
fn create_slider(
  label: &str,
  range: (f64, f64),
  step: f64,
  val: f64,
  digits: i32,
  callback: Box<dyn Fn(f64)>,
) -> (GtkBox, Adjustment) {
  let b = GtkBox::new(Orientation::Vertical, 2);
  b.append(&Label::builder().label(label).halign(Align::Start).build());

  let adj = Adjustment::new(val, range.0, range.1, step, step, 0.0);
  let scale = Scale::new(Orientation::Horizontal, Some(&adj));
  scale.add_css_class("thin-slider");
  scale.set_digits(digits);
  scale.set_draw_value(true);
  scale.set_value_pos(gtk4::PositionType::Right);

  scale.connect_value_changed(move |sc| {
    let raw = sc.value();
    let snapped = (raw / step).round() * step;

    if (raw - snapped).abs() > 1e-4 {
      sc.set_value(snapped);
      return;
    }
    callback(snapped);
  });
  b.append(&scale);
  (b, adj)
}

/// Slider plus spin button on one adjustment, for the camera angles.
fn spin_slider(label: &str, adj: &Adjustment, digits: u32) -> GtkBox {
  let b = GtkBox::new(Orientation::Vertical, 2);
  b.append(&Label::builder().label(label).halign(Align::Start).build());

  let row = GtkBox::new(Orientation::Horizontal, 6);
  let scale = Scale::new(Orientation::Horizontal, Some(adj));
  scale.add_css_class("thin-slider");
  scale.set_hexpand(true);
  scale.set_draw_value(false);
  let spin = SpinButton::new(Some(adj), adj.step_increment(), digits);
  spin.set_width_chars(6);
  row.append(&scale);
  row.append(&spin);
  b.append(&row);
  b
}

fn check(label: &str, active: bool, callback: impl Fn(bool) + 'static) -> CheckButton {
  let btn = CheckButton::with_label(label);
  btn.set_active(active);
  btn.connect_toggled(move |b| callback(b.is_active()));
  btn
}

fn inject_css() {
  let provider = CssProvider::new();
  provider.load_from_data(
    "
        scale.thin-slider slider {
            min-width: 6px;
            min-height: 18px;
            margin-top: -7px;
            margin-bottom: -7px;
            border-radius: 2px;
            background-color: #555555;
            box-shadow: none;
            outline: none;
        }
        scale.thin-slider slider:hover {
            background-color: #3584e4;
        }
        label.param-line {
            font-family: monospace;
        }
    ",
  );

  if let Some(display) = gdk::Display::default() {
    gtk4::style_context_add_provider_for_display(
      &display,
      &provider,
      STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
  }
}

/// Builds the control surface.
pub fn build(state: Rc<RefCell<AppState>>, drawing_area: &DrawingArea) -> (ScrolledWindow, SidebarHandles) {
  inject_css();

  // 1. Root Container (Scrollable)
  let scroll = ScrolledWindow::builder()
    .hscrollbar_policy(PolicyType::Never)
    .vscrollbar_policy(PolicyType::Automatic)
    .min_content_width(260)
    .build();

  let root_vbox = GtkBox::new(Orientation::Vertical, 10);
  root_vbox.set_margin_start(10);
  root_vbox.set_margin_end(10);
  root_vbox.set_margin_top(10);
  root_vbox.set_margin_bottom(10);
  scroll.set_child(Some(&root_vbox));

  // Initial values, read once with a short borrow
  let (display, visibility, orbit, clock, camera, omega, params) = {
    let st = state.borrow();
    (
      st.display,
      st.visibility,
      st.auto_orbit,
      st.clock.clone(),
      st.camera.clone(),
      st.model.omega(),
      parameter_lines(&st.model),
    )
  };

  // ============================================================
  // SECTION 1: DISPLAY
  // ============================================================
  let (display_exp, display_box) = section("Display", true);

  display_box.append(&Label::builder().label("Color Mode").halign(Align::Start).build());
  let labels: Vec<&str> = ColorMode::ALL.iter().map(|m| m.label()).collect();
  let mode_dd = DropDown::from_strings(&labels);
  mode_dd.set_selected(display.color_mode.index());
  let s = state.clone();
  let da = drawing_area.clone();
  mode_dd.connect_selected_notify(move |dd| {
    let mode = ColorMode::from_index(dd.selected());
    s.borrow_mut().display.color_mode = mode;
    log::debug!("Color mode: {}", mode.label());
    da.queue_draw();
  });
  display_box.append(&mode_dd);

  let s = state.clone();
  let da = drawing_area.clone();
  display_box.append(
    &create_slider(
      "Point Size",
      POINT_SIZE_RANGE,
      1.0,
      display.point_size(),
      0,
      Box::new(move |v| {
        s.borrow_mut().display.set_point_size(v);
        da.queue_draw();
      }),
    )
    .0,
  );

  let s = state.clone();
  let da = drawing_area.clone();
  display_box.append(
    &create_slider(
      "Opacity",
      OPACITY_RANGE,
      0.05,
      display.opacity(),
      2,
      Box::new(move |v| {
        s.borrow_mut().display.set_opacity(v);
        da.queue_draw();
      }),
    )
    .0,
  );

  // Visibility toggles
  let vis_frame = Frame::new(Some("Show"));
  let vis_box = GtkBox::new(Orientation::Vertical, 4);
  vis_box.set_margin_top(6);
  vis_box.set_margin_bottom(6);
  vis_box.set_margin_start(8);

  let s = state.clone();
  vis_box.append(&check("Positive branch", visibility.positive, move |on| {
    s.borrow_mut().visibility.positive = on;
  }));
  let s = state.clone();
  vis_box.append(&check("Negative branch", visibility.negative, move |on| {
    s.borrow_mut().visibility.negative = on;
  }));
  let s = state.clone();
  vis_box.append(&check("Harmonics", visibility.harmonics, move |on| {
    s.borrow_mut().visibility.harmonics = on;
  }));
  vis_frame.set_child(Some(&vis_box));
  display_box.append(&vis_frame);

  // Trails
  let s = state.clone();
  display_box.append(
    &create_slider(
      "Trail Length",
      (0.0, 0.99),
      0.01,
      display.trail_length(),
      2,
      Box::new(move |v| s.borrow_mut().display.set_trail_length(v)),
    )
    .0,
  );
  let s = state.clone();
  display_box.append(
    &create_slider(
      "Trail Opacity",
      (0.0, 1.0),
      0.01,
      display.trail_opacity(),
      2,
      Box::new(move |v| s.borrow_mut().display.set_trail_opacity(v)),
    )
    .0,
  );

  root_vbox.append(&display_exp);

  // ============================================================
  // SECTION 2: CAMERA
  // ============================================================
  let (camera_exp, camera_box) = section("Camera", true);
  let controls = CameraControls::new(&camera);

  let s = state.clone();
  let da = drawing_area.clone();
  controls.pitch.connect_value_changed(move |adj| {
    s.borrow_mut().camera.set_pitch_deg(adj.value());
    da.queue_draw();
  });
  let s = state.clone();
  let da = drawing_area.clone();
  controls.yaw.connect_value_changed(move |adj| {
    s.borrow_mut().camera.set_yaw_deg(adj.value());
    da.queue_draw();
  });
  let s = state.clone();
  let da = drawing_area.clone();
  controls.roll.connect_value_changed(move |adj| {
    s.borrow_mut().camera.set_roll_deg(adj.value());
    da.queue_draw();
  });
  let s = state.clone();
  let da = drawing_area.clone();
  controls.zoom.connect_value_changed(move |adj| {
    s.borrow_mut().set_zoom(adj.value());
    da.queue_draw();
  });

  camera_box.append(&spin_slider("Pitch (\u{00B0})", &controls.pitch, 1));
  camera_box.append(&spin_slider("Yaw (\u{00B0})", &controls.yaw, 1));
  camera_box.append(&spin_slider("Roll (\u{00B0})", &controls.roll, 1));
  camera_box.append(&spin_slider("Zoom", &controls.zoom, 2));

  // Presets
  let preset_row = GtkBox::new(Orientation::Horizontal, 4);
  preset_row.set_homogeneous(true);
  for preset in ViewPreset::ALL {
    let btn = Button::with_label(preset.label());
    let s = state.clone();
    let ctl = controls.clone();
    let da = drawing_area.clone();
    btn.connect_clicked(move |_| apply_view(&s, &ctl, &da, Some(preset)));
    preset_row.append(&btn);
  }
  camera_box.append(&preset_row);

  let home_btn = Button::with_label("Home");
  let s = state.clone();
  let ctl = controls.clone();
  let da = drawing_area.clone();
  home_btn.connect_clicked(move |_| apply_view(&s, &ctl, &da, None));
  camera_box.append(&home_btn);

  // Auto-orbit
  let s = state.clone();
  camera_box.append(&check("Auto-orbit", orbit.enabled, move |on| {
    s.borrow_mut().auto_orbit.enabled = on;
  }));
  let s = state.clone();
  camera_box.append(
    &create_slider(
      "Orbit Speed",
      ORBIT_SPEED_RANGE,
      0.05,
      orbit.speed(),
      2,
      Box::new(move |v| s.borrow_mut().auto_orbit.set_speed(v)),
    )
    .0,
  );

  root_vbox.append(&camera_exp);

  // ============================================================
  // SECTION 3: TIME
  // ============================================================
  let (time_exp, time_box) = section("Time", true);

  let s = state.clone();
  time_box.append(
    &create_slider(
      "Time Scale (log\u{2082})",
      LOG_SPEED_RANGE,
      0.1,
      clock.log_speed(),
      1,
      Box::new(move |v| s.borrow_mut().clock.set_log_speed(v)),
    )
    .0,
  );

  let toggles = GtkBox::new(Orientation::Horizontal, 12);
  let s = state.clone();
  toggles.append(&check("Play", clock.is_playing(), move |on| {
    s.borrow_mut().clock.set_playing(on);
  }));
  let s = state.clone();
  toggles.append(&check("Manual", clock.mode() == ClockMode::Manual, move |on| {
    s.borrow_mut().clock.set_manual(on);
    log::debug!("Manual time: {}", on);
  }));
  time_box.append(&toggles);

  let s = state.clone();
  let da = drawing_area.clone();
  let (scrub_row, time_scrub) = create_slider(
    "Scrub (s)",
    (0.0, PERIOD),
    0.1,
    clock.t(),
    1,
    Box::new(move |v| {
      // Ignored by the clock unless in manual mode
      s.borrow_mut().clock.scrub(v);
      da.queue_draw();
    }),
  );
  time_box.append(&scrub_row);

  let reset_btn = Button::with_label("Reset Time");
  let s = state.clone();
  let scrub_adj = time_scrub.clone();
  let da = drawing_area.clone();
  reset_btn.connect_clicked(move |_| {
    s.borrow_mut().clock.reset();
    scrub_adj.set_value(0.0);
    da.queue_draw();
  });
  time_box.append(&reset_btn);

  // Omega, with the parameter block refreshed on change
  let omega_label = param_label(&params[7]);
  let s = state.clone();
  let ol = omega_label.clone();
  time_box.append(
    &create_slider(
      "\u{03C9} (rad/s)",
      OMEGA_RANGE,
      0.01,
      omega,
      2,
      Box::new(move |v| {
        let omega = {
          let mut st = s.borrow_mut();
          st.set_omega(v);
          st.model.omega()
        };
        ol.set_label(&omega_line(omega));
      }),
    )
    .0,
  );

  root_vbox.append(&time_exp);

  // ============================================================
  // SECTION 4: PARAMETERS
  // ============================================================
  let (param_exp, param_box) = section("Parameters", false);
  for line in &params[..7] {
    param_box.append(&param_label(line));
  }
  param_box.append(&omega_label);
  root_vbox.append(&param_exp);

  (
    scroll,
    SidebarHandles {
      camera: controls,
      time_scrub,
    },
  )
}

fn param_label(text: &str) -> Label {
  let label = Label::builder().label(text).halign(Align::Start).build();
  label.add_css_class("param-line");
  label
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::FieldConfig;

  #[test]
  fn test_parameter_lines_default_model() {
    let model = FieldModel::new(FieldConfig::default());
    let lines = parameter_lines(&model);
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "\u{03A6}\u{221E} = 0.700");
    assert_eq!(lines[2], "z_max = 118");
    // k = 2pi / ln 118
    assert_eq!(lines[3], format!("k = {:.4}", std::f64::consts::TAU / 118f64.ln()));
    assert_eq!(lines[5], "R = 3.000");
    // Amplitude coupling: kappa = b * k
    assert_eq!(lines[6], format!("\u{03BA} = {:.4}", 0.22 * (std::f64::consts::TAU / 118f64.ln())));
    assert_eq!(lines[7], "\u{03C9} = 6.283");
  }
}
