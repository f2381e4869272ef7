// src/rendering/picker.rs

use super::camera::Camera;
use super::projector::Projector;
use super::scene::{self, FrameParams, ProjectedPoint, Scene};
use crate::physics::FieldModel;
use std::cmp::Ordering;

/// Extra pixels around a disc that still count as a hit.
pub const PICK_PADDING: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
  pub point: ProjectedPoint,
  /// Squared screen distance from the pointer.
  pub distance_sq: f64,
}

/// Nearest visible point to `(mx, my)` within its radius plus padding.
///
/// Re-projects everything from the given state instead of reusing the last
/// drawn frame, so a drag or zoom in the same event is already accounted for.
pub fn pick(
  scene: &Scene,
  model: &FieldModel,
  camera: &Camera,
  projector: &Projector,
  params: &FrameParams,
  mx: f64,
  my: f64,
) -> Option<PickHit> {
  scene::project_visible(scene, model, camera, projector, params)
    .into_iter()
    .filter_map(|point| {
      let dx = point.screen_x - mx;
      let dy = point.screen_y - my;
      let d2 = dx * dx + dy * dy;
      let reach = point.radius + PICK_PADDING;
      if d2 <= reach * reach {
        Some(PickHit { point, distance_sq: d2 })
      } else {
        None
      }
    })
    .min_by(|a, b| a.distance_sq.partial_cmp(&b.distance_sq).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{ColorMode, FieldConfig};
  use crate::rendering::camera::ViewPreset;
  use crate::rendering::scene::Visibility;

  struct Fixture {
    model: FieldModel,
    scene: Scene,
    camera: Camera,
    projector: Projector,
    params: FrameParams,
  }

  fn fixture() -> Fixture {
    let model = FieldModel::new(FieldConfig::default());
    let scene = Scene::build(&model);
    let mut camera = Camera::new(-2.0 * model.frame_extent());
    camera.apply_preset(ViewPreset::Isometric);
    Fixture {
      model,
      scene,
      camera,
      projector: Projector::new(1024.0, 768.0),
      params: FrameParams {
        t: 3.25,
        visibility: Visibility::default(),
        point_size: 3.0,
        color_mode: ColorMode::Band,
      },
    }
  }

  fn run(f: &Fixture, mx: f64, my: f64) -> Option<PickHit> {
    pick(&f.scene, &f.model, &f.camera, &f.projector, &f.params, mx, my)
  }

  #[test]
  fn test_pick_exact_point() {
    let f = fixture();
    let pts = scene::project_visible(&f.scene, &f.model, &f.camera, &f.projector, &f.params);
    let target = &pts[40];
    let hit = run(&f, target.screen_x, target.screen_y).expect("hit");
    assert_eq!(hit.distance_sq, 0.0);
    // A coincident point could win the tie, but it must sit on the same pixel.
    assert_eq!(hit.point.screen_x, target.screen_x);
    assert_eq!(hit.point.screen_y, target.screen_y);
  }

  #[test]
  fn test_pick_nearest_wins() {
    let f = fixture();
    let pts = scene::project_visible(&f.scene, &f.model, &f.camera, &f.projector, &f.params);
    let (mx, my) = (pts[10].screen_x + 1.5, pts[10].screen_y - 0.5);
    let hit = run(&f, mx, my).expect("hit");

    let best = pts
      .iter()
      .map(|p| (p.screen_x - mx).powi(2) + (p.screen_y - my).powi(2))
      .fold(f64::INFINITY, f64::min);
    assert!((hit.distance_sq - best).abs() < 1e-9);
  }

  #[test]
  fn test_pick_miss_far_away() {
    let f = fixture();
    assert!(run(&f, -5000.0, -5000.0).is_none());
  }

  #[test]
  fn test_pick_tolerance_edge() {
    let f = fixture();
    let pts = scene::project_visible(&f.scene, &f.model, &f.camera, &f.projector, &f.params);
    // Aim straight left of the leftmost point so nothing else is closer.
    let left = pts
      .iter()
      .min_by(|a, b| a.screen_x.partial_cmp(&b.screen_x).unwrap())
      .unwrap();
    let reach = left.radius + PICK_PADDING;

    let inside = run(&f, left.screen_x - reach + 0.01, left.screen_y).expect("inside reach");
    assert_eq!(inside.point.record, left.record);
    let outside = run(&f, left.screen_x - reach - 0.01, left.screen_y);
    assert!(outside.map_or(true, |h| h.point.record != left.record));
  }

  #[test]
  fn test_pick_is_deterministic() {
    let f = fixture();
    let pts = scene::project_visible(&f.scene, &f.model, &f.camera, &f.projector, &f.params);
    let (mx, my) = (pts[77].screen_x + 3.0, pts[77].screen_y + 2.0);
    let first = run(&f, mx, my);
    let second = run(&f, mx, my);
    assert_eq!(first, second);
  }

  #[test]
  fn test_hidden_points_are_not_picked() {
    let mut f = fixture();
    f.params.visibility = Visibility {
      positive: true,
      negative: false,
      harmonics: false,
    };
    let pts = scene::project_visible(&f.scene, &f.model, &f.camera, &f.projector, &f.params);
    for p in pts.iter().take(20) {
      let hit = run(&f, p.screen_x, p.screen_y).expect("hit");
      let rec = &f.scene.records()[hit.point.record];
      assert!(!rec.is_harmonic());
      assert_eq!(rec.branch, crate::model::Branch::Positive);
    }
  }

  #[test]
  fn test_pick_follows_camera_changes() {
    let mut f = fixture();
    let before = scene::project_visible(&f.scene, &f.model, &f.camera, &f.projector, &f.params);
    let target = before[5].clone();
    f.camera.pan(400.0, 0.0);
    let hit = run(&f, target.screen_x, target.screen_y);
    assert!(hit.map_or(true, |h| h.point.screen_x != target.screen_x));
  }
}
