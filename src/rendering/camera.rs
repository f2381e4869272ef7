// src/rendering/camera.rs

use crate::physics::Point3;
use nalgebra::{Rotation3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub const ZOOM_RANGE: (f64, f64) = (0.25, 6.0);
pub const PITCH_LIMIT_DEG: f64 = 90.0;
pub const ANGLE_LIMIT_DEG: f64 = 180.0;

/// The torus extent is scaled by this to place it in front of the camera.
const FRAME_OFFSET_FACTOR: f64 = 1.35;
/// Screen pixels per world unit of pan at zoom 1.
const PAN_PIXELS_PER_UNIT: f64 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
  Front,
  Top,
  Side,
  Isometric,
}

impl ViewPreset {
  pub const ALL: [ViewPreset; 4] = [
    ViewPreset::Front,
    ViewPreset::Top,
    ViewPreset::Side,
    ViewPreset::Isometric,
  ];

  pub fn label(self) -> &'static str {
    match self {
      ViewPreset::Front => "Front",
      ViewPreset::Top => "Top",
      ViewPreset::Side => "Side",
      ViewPreset::Isometric => "Iso",
    }
  }

  /// (pitch°, yaw°, roll°, zoom)
  pub fn pose(self) -> (f64, f64, f64, f64) {
    match self {
      ViewPreset::Front => (0.0, 0.0, 0.0, 1.7),
      ViewPreset::Top => (90.0, 0.0, 0.0, 1.7),
      ViewPreset::Side => (0.0, 90.0, 0.0, 1.7),
      ViewPreset::Isometric => (35.264, 45.0, 0.0, 1.9),
    }
  }
}

/// Orbit camera. Angles are radians; every mutator keeps zoom, pitch, yaw
/// and roll inside their documented ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
  translation: Vector3<f64>,
  pitch: f64,
  yaw: f64,
  roll: f64,
  zoom: f64,
  frame_offset: f64,
}

impl Camera {
  /// `frame_extent` is the torus major + minor radius.
  pub fn new(frame_extent: f64) -> Self {
    Self {
      translation: Vector3::zeros(),
      pitch: 0.6,
      yaw: 0.9,
      roll: 0.0,
      zoom: 1.7,
      frame_offset: frame_extent * FRAME_OFFSET_FACTOR,
    }
  }

  pub fn pitch(&self) -> f64 {
    self.pitch
  }

  pub fn yaw(&self) -> f64 {
    self.yaw
  }

  pub fn roll(&self) -> f64 {
    self.roll
  }

  pub fn zoom(&self) -> f64 {
    self.zoom
  }

  #[cfg(test)]
  pub fn translation(&self) -> Point3 {
    [self.translation.x, self.translation.y, self.translation.z]
  }

  // Rotation X -> Y -> Z. Order matters: pitch is applied in the mapping's
  // own frame, roll last in view space.
  fn rotation(&self) -> Rotation3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.roll);
    rz * ry * rx
  }

  fn offset(&self) -> Vector3<f64> {
    self.translation + Vector3::new(0.0, 0.0, self.frame_offset)
  }

  /// World space -> camera space.
  pub fn apply(&self, p: Point3) -> Point3 {
    let q = self.rotation() * (Vector3::from(p) - self.offset());
    [q.x, q.y, q.z]
  }

  /// Camera space -> world space.
  pub fn inverse(&self, q: Point3) -> Point3 {
    let p = self.rotation().inverse() * Vector3::from(q) + self.offset();
    [p.x, p.y, p.z]
  }

  /// Rotation only, for direction vectors.
  pub fn rotate_vector(&self, v: Point3) -> Point3 {
    let r = self.rotation() * Vector3::from(v);
    [r.x, r.y, r.z]
  }

  // --- Absolute setters (control surface) ---

  pub fn set_pitch_deg(&mut self, deg: f64) {
    if deg.is_finite() {
      self.pitch = deg.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG).to_radians();
    }
  }

  pub fn set_yaw_deg(&mut self, deg: f64) {
    if deg.is_finite() {
      self.yaw = deg.clamp(-ANGLE_LIMIT_DEG, ANGLE_LIMIT_DEG).to_radians();
    }
  }

  pub fn set_roll_deg(&mut self, deg: f64) {
    if deg.is_finite() {
      self.roll = deg.clamp(-ANGLE_LIMIT_DEG, ANGLE_LIMIT_DEG).to_radians();
    }
  }

  pub fn set_zoom(&mut self, zoom: f64) {
    if zoom.is_finite() {
      self.zoom = zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
    }
  }

  // --- Incremental mutators (pointer, keyboard, auto-orbit) ---

  /// Yaw wraps around; pitch stops at the poles.
  pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
    if d_yaw.is_finite() {
      self.yaw = wrap_signed(self.yaw + d_yaw);
    }
    if d_pitch.is_finite() {
      self.pitch = (self.pitch + d_pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
  }

  pub fn roll_by(&mut self, d_roll: f64) {
    if d_roll.is_finite() {
      self.roll = wrap_signed(self.roll + d_roll);
    }
  }

  /// Pan by a screen-space delta in pixels.
  pub fn pan(&mut self, dx_px: f64, dy_px: f64) {
    let s = 1.0 / (PAN_PIXELS_PER_UNIT * self.zoom);
    if dx_px.is_finite() {
      self.translation.x -= dx_px * s;
    }
    if dy_px.is_finite() {
      self.translation.y += dy_px * s;
    }
  }

  pub fn zoom_by(&mut self, factor: f64) {
    self.set_zoom(self.zoom * factor);
  }

  pub fn apply_preset(&mut self, preset: ViewPreset) {
    let (pitch, yaw, roll, zoom) = preset.pose();
    self.set_pitch_deg(pitch);
    self.set_yaw_deg(yaw);
    self.set_roll_deg(roll);
    self.set_zoom(zoom);
  }
}

/// Wraps into `[-pi, pi)`.
fn wrap_signed(a: f64) -> f64 {
  (a + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: Point3, b: Point3, tol: f64) -> bool {
    (a[0] - b[0]).abs() < tol && (a[1] - b[1]).abs() < tol && (a[2] - b[2]).abs() < tol
  }

  fn posed(pitch: f64, yaw: f64, roll: f64) -> Camera {
    let mut cam = Camera::new(0.0);
    cam.set_pitch_deg(pitch);
    cam.set_yaw_deg(yaw);
    cam.set_roll_deg(roll);
    cam
  }

  #[test]
  fn test_zoom_clamped() {
    let mut cam = Camera::new(3.7);
    cam.set_zoom(10.0);
    assert_eq!(cam.zoom(), 6.0);
    cam.set_zoom(0.01);
    assert_eq!(cam.zoom(), 0.25);
    cam.set_zoom(f64::NAN);
    assert_eq!(cam.zoom(), 0.25);
  }

  #[test]
  fn test_angle_setters_clamp() {
    let mut cam = Camera::new(3.7);
    cam.set_pitch_deg(120.0);
    assert!((cam.pitch() - FRAC_PI_2).abs() < 1e-12);
    cam.set_yaw_deg(-400.0);
    assert!((cam.yaw() + PI).abs() < 1e-12);
    cam.set_roll_deg(181.0);
    assert!((cam.roll() - PI).abs() < 1e-12);
  }

  #[test]
  fn test_round_trip() {
    let mut cam = Camera::new(3.7);
    cam.set_pitch_deg(-33.0);
    cam.set_yaw_deg(127.0);
    cam.set_roll_deg(-71.0);
    cam.set_zoom(2.4);
    cam.pan(37.0, -12.0);

    for p in [[0.0, 0.0, 0.0], [3.7, 0.0, 0.0], [-1.2, 4.4, 2.9], [1e3, -2e3, 5e2]] {
      let back = cam.inverse(cam.apply(p));
      assert!(close(back, p, 1e-9), "{:?} -> {:?}", p, back);
    }
  }

  #[test]
  fn test_frame_offset_pushes_scene_forward() {
    let cam = posed(0.0, 0.0, 0.0);
    assert!(close(cam.apply([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0], 1e-12));

    let framed = {
      let mut c = Camera::new(3.7);
      c.apply_preset(ViewPreset::Front);
      c
    };
    assert!(close(framed.apply([0.0, 0.0, 0.0]), [0.0, 0.0, -3.7 * 1.35], 1e-12));
  }

  #[test]
  fn test_rotation_order_pitch_then_yaw() {
    // Pitch 90 sends +Y to +Z, yaw 90 then sends +Z to +X.
    let cam = posed(90.0, 90.0, 0.0);
    assert!(close(cam.apply([0.0, 1.0, 0.0]), [1.0, 0.0, 0.0], 1e-12));

    // The opposite order would leave +Y on +Z.
    let yaw_only = posed(0.0, 90.0, 0.0);
    let pitch_only = posed(90.0, 0.0, 0.0);
    let swapped = pitch_only.apply(yaw_only.apply([0.0, 1.0, 0.0]));
    assert!(close(swapped, [0.0, 0.0, 1.0], 1e-12));
  }

  #[test]
  fn test_roll_applied_last() {
    let cam = posed(0.0, 90.0, 90.0);
    // Yaw: +X -> -Z, roll leaves Z untouched.
    assert!(close(cam.apply([1.0, 0.0, 0.0]), [0.0, 0.0, -1.0], 1e-12));
    // Yaw keeps +Y, roll 90 sends +Y to -X.
    assert!(close(cam.apply([0.0, 1.0, 0.0]), [-1.0, 0.0, 0.0], 1e-12));
  }

  #[test]
  fn test_orbit_wraps_yaw_and_stops_pitch() {
    let mut cam = Camera::new(3.7);
    cam.apply_preset(ViewPreset::Front);
    cam.orbit(PI + 0.5, 3.0);
    assert!((cam.yaw() - (-PI + 0.5)).abs() < 1e-12);
    assert!((cam.pitch() - FRAC_PI_2).abs() < 1e-12);

    cam.roll_by(-PI - 0.25);
    assert!((cam.roll() - (PI - 0.25)).abs() < 1e-12);
  }

  #[test]
  fn test_pan_scales_with_zoom() {
    let mut cam = Camera::new(3.7);
    cam.set_zoom(2.0);
    cam.pan(440.0, 440.0);
    let t = cam.translation();
    assert!((t[0] + 1.0).abs() < 1e-12);
    assert!((t[1] - 1.0).abs() < 1e-12);
  }

  #[test]
  fn test_presets() {
    let mut cam = Camera::new(3.7);
    cam.apply_preset(ViewPreset::Isometric);
    assert!((cam.pitch().to_degrees() - 35.264).abs() < 1e-9);
    assert!((cam.yaw().to_degrees() - 45.0).abs() < 1e-9);
    assert_eq!(cam.roll(), 0.0);
    assert_eq!(cam.zoom(), 1.9);

    cam.apply_preset(ViewPreset::Top);
    assert!((cam.pitch() - FRAC_PI_2).abs() < 1e-12);
    assert_eq!(cam.zoom(), 1.7);
  }

  #[test]
  fn test_rotate_vector_ignores_translation() {
    let mut cam = posed(90.0, 0.0, 0.0);
    cam.pan(100.0, 100.0);
    assert!(close(cam.rotate_vector([0.0, 1.0, 0.0]), [0.0, 0.0, 1.0], 1e-12));
  }
}
