// src/ui/interactions.rs

use crate::panels::sidebar::CameraControls;
use crate::state::AppState;
use gdk4 as gdk;
use gtk4::glib;
use gtk4::{self as gtk, prelude::*};
use gtk4::{
  ApplicationWindow, EventControllerKey, EventControllerMotion, EventControllerScroll,
  EventControllerScrollFlags, GestureDrag,
};
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

const KEY_ROTATE_DEG: f64 = 2.0;
const KEY_PAN_PX: f64 = 18.0;
const KEY_ZOOM: f64 = 1.05;
const WHEEL_ZOOM_GAIN: f64 = 0.1;

/// What a key press does to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
  Orbit { d_yaw: f64, d_pitch: f64 },
  Roll(f64),
  Pan { dx_px: f64, dy_px: f64 },
  Zoom(f64),
}

pub fn key_command(keyval: gdk::Key) -> Option<KeyCommand> {
  let step = KEY_ROTATE_DEG.to_radians();
  let cmd = match keyval.to_lower() {
    gdk::Key::Left => KeyCommand::Orbit { d_yaw: -step, d_pitch: 0.0 },
    gdk::Key::Right => KeyCommand::Orbit { d_yaw: step, d_pitch: 0.0 },
    gdk::Key::Up => KeyCommand::Orbit { d_yaw: 0.0, d_pitch: -step },
    gdk::Key::Down => KeyCommand::Orbit { d_yaw: 0.0, d_pitch: step },
    gdk::Key::q => KeyCommand::Roll(-step),
    gdk::Key::e => KeyCommand::Roll(step),
    gdk::Key::a => KeyCommand::Pan { dx_px: -KEY_PAN_PX, dy_px: 0.0 },
    gdk::Key::d => KeyCommand::Pan { dx_px: KEY_PAN_PX, dy_px: 0.0 },
    gdk::Key::w => KeyCommand::Pan { dx_px: 0.0, dy_px: KEY_PAN_PX },
    gdk::Key::s => KeyCommand::Pan { dx_px: 0.0, dy_px: -KEY_PAN_PX },
    gdk::Key::plus | gdk::Key::equal | gdk::Key::KP_Add => KeyCommand::Zoom(KEY_ZOOM),
    gdk::Key::minus | gdk::Key::underscore | gdk::Key::KP_Subtract => KeyCommand::Zoom(1.0 / KEY_ZOOM),
    _ => return None,
  };
  Some(cmd)
}

/// Drag delta in pixels to (yaw, pitch) radians: a full viewport is a full turn.
pub fn drag_to_orbit(dx: f64, dy: f64, width: f64, height: f64) -> (f64, f64) {
  (dx / width.max(1.0) * TAU, dy / height.max(1.0) * TAU)
}

/// GTK reports wheel deltas in steps, so the gain is per step.
pub fn wheel_zoom_factor(dy: f64) -> f64 {
  (-dy * WHEEL_ZOOM_GAIN).exp()
}

pub fn setup_interactions(
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  drawing_area: &gtk::DrawingArea,
  controls: &CameraControls,
) {
  // 1. KEYBOARD CONTROLLER
  let key_controller = EventControllerKey::new();
  let s = state.clone();
  let da = drawing_area.clone();
  let ctl = controls.clone();

  key_controller.connect_key_pressed(move |_, keyval, _keycode, flags| {
    // Leave Ctrl shortcuts to the application accelerators
    if flags.contains(gdk::ModifierType::CONTROL_MASK) {
      return glib::Propagation::Proceed;
    }
    let Some(cmd) = key_command(keyval) else {
      return glib::Propagation::Proceed;
    };

    let camera = {
      let mut st = s.borrow_mut();
      match cmd {
        KeyCommand::Orbit { d_yaw, d_pitch } => st.camera.orbit(d_yaw, d_pitch),
        KeyCommand::Roll(d) => st.camera.roll_by(d),
        KeyCommand::Pan { dx_px, dy_px } => st.camera.pan(dx_px, dy_px),
        KeyCommand::Zoom(f) => st.zoom_by(f),
      }
      st.camera.clone()
    };
    ctl.sync(&camera);
    da.queue_draw();
    glib::Propagation::Stop
  });
  window.add_controller(key_controller);

  // 2. MOUSE DRAG (orbit, shift = pan)
  let drag = GestureDrag::new();
  let last = Rc::new(Cell::new((0.0, 0.0)));
  let panning = Rc::new(Cell::new(false));

  let l = last.clone();
  let p = panning.clone();
  drag.connect_drag_begin(move |gesture, _, _| {
    l.set((0.0, 0.0));
    p.set(gesture.current_event_state().contains(gdk::ModifierType::SHIFT_MASK));
  });

  let s = state.clone();
  let da = drawing_area.clone();
  let ctl = controls.clone();
  drag.connect_drag_update(move |_, ox, oy| {
    // Offsets are cumulative from the drag start
    let (lx, ly) = last.get();
    let (dx, dy) = (ox - lx, oy - ly);
    last.set((ox, oy));

    let camera = {
      let mut st = s.borrow_mut();
      if panning.get() {
        st.camera.pan(dx, dy);
      } else {
        let (w, h) = st.viewport();
        let (d_yaw, d_pitch) = drag_to_orbit(dx, dy, w, h);
        st.camera.orbit(d_yaw, d_pitch);
      }
      st.camera.clone()
    };
    ctl.sync(&camera);
    da.queue_draw();
  });
  drawing_area.add_controller(drag);

  // 3. SCROLL (ZOOM)
  let scroll = EventControllerScroll::new(EventControllerScrollFlags::VERTICAL);
  let s = state.clone();
  let da = drawing_area.clone();
  let ctl = controls.clone();
  scroll.connect_scroll(move |_, _, dy| {
    let camera = {
      let mut st = s.borrow_mut();
      st.zoom_by(wheel_zoom_factor(dy));
      st.camera.clone()
    };
    ctl.sync(&camera);
    da.queue_draw();
    glib::Propagation::Stop
  });
  drawing_area.add_controller(scroll);

  // 4. MOTION (HOVER PICK)
  let motion = EventControllerMotion::new();
  let s = state.clone();
  let da = drawing_area.clone();
  motion.connect_motion(move |_, x, y| {
    let mut st = s.borrow_mut();
    st.pointer = Some((x, y));
    st.refresh_hover();
    da.queue_draw();
  });

  let s = state.clone();
  let da = drawing_area.clone();
  motion.connect_leave(move |_| {
    let mut st = s.borrow_mut();
    st.pointer = None;
    st.hover = None;
    da.queue_draw();
  });
  drawing_area.add_controller(motion);
}
