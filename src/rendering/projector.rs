// src/rendering/projector.rs

use crate::physics::Point3;

pub const BASE_FOCAL: f64 = 380.0;
const DEPTH_GAIN: f64 = 0.6;
const NEAR_BIAS: f64 = 3.0;
/// Floor for the biased depth so points behind the camera cannot divide by ~0.
const NEAR_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
  pub x: f64,
  pub y: f64,
  /// Raw camera-space depth; larger is farther.
  pub depth: f64,
  /// Focal scale, larger for nearer points.
  pub scale: f64,
}

/// Perspective projection onto a viewport of the given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
  pub width: f64,
  pub height: f64,
  pub base_focal: f64,
}

impl Projector {
  pub fn new(width: f64, height: f64) -> Self {
    Self {
      width,
      height,
      base_focal: BASE_FOCAL,
    }
  }

  pub fn center(&self) -> (f64, f64) {
    (self.width * 0.5, self.height * 0.5)
  }

  pub fn project(&self, p: Point3, zoom: f64) -> Projection {
    let z = (p[2] * DEPTH_GAIN + NEAR_BIAS).max(NEAR_EPSILON);
    let f = self.base_focal * zoom / z;
    let (cx, cy) = self.center();
    Projection {
      x: cx + p[0] * f,
      // screen Y grows downward
      y: cy - p[1] * f,
      depth: p[2],
      scale: f,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_origin_projects_to_center() {
    let proj = Projector::new(800.0, 600.0);
    let p = proj.project([0.0, 0.0, 0.0], 1.0);
    assert_eq!((p.x, p.y), (400.0, 300.0));
    assert!((p.scale - 380.0 / 3.0).abs() < 1e-12);
    assert_eq!(p.depth, 0.0);
  }

  #[test]
  fn test_y_flips() {
    let proj = Projector::new(800.0, 600.0);
    let p = proj.project([1.0, 1.0, 0.0], 1.0);
    assert!(p.x > 400.0);
    assert!(p.y < 300.0);
  }

  #[test]
  fn test_nearer_points_scale_larger() {
    let proj = Projector::new(640.0, 480.0);
    let near = proj.project([0.5, 0.0, -2.0], 1.7);
    let far = proj.project([0.5, 0.0, 2.0], 1.7);
    assert!(near.scale > far.scale);
    assert!(near.depth < far.depth);
  }

  #[test]
  fn test_zoom_scales_linearly() {
    let proj = Projector::new(640.0, 480.0);
    let a = proj.project([0.3, -0.2, 1.0], 1.0);
    let b = proj.project([0.3, -0.2, 1.0], 2.0);
    assert!((b.scale - 2.0 * a.scale).abs() < 1e-9);
  }

  #[test]
  fn test_behind_near_plane_stays_finite() {
    let proj = Projector::new(640.0, 480.0);
    for z in [-5.0, -5.0 + 1e-15, -50.0] {
      let p = proj.project([1.0, 1.0, z], 6.0);
      assert!(p.x.is_finite() && p.y.is_finite());
      assert!(p.scale > 0.0 && p.scale.is_finite());
      assert!((p.scale - 380.0 * 6.0 / NEAR_EPSILON).abs() < 1e-6);
    }
    let near = proj.project([1.0, 1.0, -4.0], 6.0);
    assert!((near.scale - 380.0 * 6.0 / 0.6).abs() < 1e-9);
  }
}
