// src/rendering/scene.rs

use super::camera::Camera;
use super::palette::{self, Rgb};
use super::projector::Projector;
use crate::config::ColorMode;
use crate::model::{elements, Branch, IdentifierRecord, RecordKind};
use crate::physics::spectrum::{shell_index, Band};
use crate::physics::FieldModel;
use std::cmp::Ordering;

/// Smallest disc radius in pixels.
pub const MIN_RADIUS: f64 = 0.6;
/// Converts point size * focal scale into a pixel radius.
pub const SIZE_CONSTANT: f64 = 0.02;
/// Harmonics are drawn slightly larger than elements.
const HARMONIC_SIZE_BONUS: f64 = 0.5;

/// The fixed identifier set. Built once; order never changes.
pub struct Scene {
  records: Vec<IdentifierRecord>,
}

impl Scene {
  pub fn build(model: &FieldModel) -> Self {
    let cfg = model.config();
    let z_limit = cfg.z_max.floor().min(elements::SYMBOLS.len() as f64) as u32;
    let mut records = Vec::with_capacity(2 * (z_limit as usize + cfg.harmonic_max as usize));

    for z in 1..=z_limit {
      let id = z as f64;
      let f = model.frequency(id);
      for branch in Branch::BOTH {
        records.push(IdentifierRecord {
          id,
          label: elements::symbol(z).unwrap_or("?").to_string(),
          branch,
          kind: RecordKind::Element,
          shell_index: shell_index(z, cfg.z_max as u32, cfg.shells_use_quantum_capacities),
          band: Band::classify(f),
          frequency_hz: f,
          noble: elements::is_noble(z),
        });
      }
    }

    for n in 2..=cfg.harmonic_max {
      let id = 1.0 / n as f64;
      let f = model.frequency(id);
      for branch in Branch::BOTH {
        records.push(IdentifierRecord {
          id,
          label: format!("H/{}", n),
          branch,
          kind: RecordKind::Harmonic,
          shell_index: 0,
          band: Band::classify(f),
          frequency_hz: f,
          noble: false,
        });
      }
    }

    Self { records }
  }

  pub fn records(&self) -> &[IdentifierRecord] {
    &self.records
  }

  pub fn get(&self, index: usize) -> Option<&IdentifierRecord> {
    self.records.get(index)
  }

  pub fn element_count(&self) -> usize {
    self.records.iter().filter(|r| !r.is_harmonic()).count() / 2
  }

  pub fn harmonic_count(&self) -> usize {
    self.records.iter().filter(|r| r.is_harmonic()).count() / 2
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
  pub positive: bool,
  pub negative: bool,
  pub harmonics: bool,
}

impl Default for Visibility {
  fn default() -> Self {
    Self {
      positive: true,
      negative: true,
      harmonics: true,
    }
  }
}

impl Visibility {
  /// Harmonics follow their own toggle regardless of branch.
  pub fn shows(&self, record: &IdentifierRecord) -> bool {
    match (record.kind, record.branch) {
      (RecordKind::Harmonic, _) => self.harmonics,
      (RecordKind::Element, Branch::Positive) => self.positive,
      (RecordKind::Element, Branch::Negative) => self.negative,
    }
  }
}

/// Everything besides the camera that decides where and how big a point is.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
  pub t: f64,
  pub visibility: Visibility,
  pub point_size: f64,
  pub color_mode: ColorMode,
}

/// One point of one frame, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPoint {
  pub screen_x: f64,
  pub screen_y: f64,
  pub depth: f64,
  pub scale: f64,
  pub radius: f64,
  pub color: Rgb,
  /// Index into [`Scene::records`].
  pub record: usize,
}

pub fn base_size(record: &IdentifierRecord, point_size: f64) -> f64 {
  if record.is_harmonic() {
    point_size + HARMONIC_SIZE_BONUS
  } else {
    point_size
  }
}

pub fn point_radius(base: f64, scale: f64) -> f64 {
  (base * scale * SIZE_CONSTANT).max(MIN_RADIUS)
}

/// Maps, transforms and projects every visible record at time `params.t`.
/// Hidden records are skipped before any math runs. Every visible record
/// yields a point, including ones at or behind the near plane, whose depth
/// is clamped by the projector. Output is in record order.
pub fn project_visible(
  scene: &Scene,
  model: &FieldModel,
  camera: &Camera,
  projector: &Projector,
  params: &FrameParams,
) -> Vec<ProjectedPoint> {
  scene
    .records()
    .iter()
    .enumerate()
    .filter(|(_, rec)| params.visibility.shows(rec))
    .map(|(i, rec)| {
      let world = model.position(rec.id, rec.branch, params.t);
      let cam = camera.apply(world);
      let scr = projector.project(cam, camera.zoom());
      ProjectedPoint {
        screen_x: scr.x,
        screen_y: scr.y,
        depth: scr.depth,
        scale: scr.scale,
        radius: point_radius(base_size(rec, params.point_size), scr.scale),
        color: palette::color_for(rec, params.color_mode),
        record: i,
      }
    })
    .collect()
}

/// Far to near, for the painter's algorithm.
pub fn depth_sort(points: &mut [ProjectedPoint]) {
  points.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::FieldConfig;
  use crate::rendering::camera::ViewPreset;

  fn setup() -> (FieldModel, Scene, Camera, Projector) {
    let model = FieldModel::new(FieldConfig::default());
    let scene = Scene::build(&model);
    // Negative extent parks the whole torus in front of the near plane.
    let camera = Camera::new(-2.0 * model.frame_extent());
    (model, scene, camera, Projector::new(1280.0, 800.0))
  }

  fn params(visibility: Visibility) -> FrameParams {
    FrameParams {
      t: 1.5,
      visibility,
      point_size: 3.0,
      color_mode: ColorMode::Branch,
    }
  }

  #[test]
  fn test_scene_cardinality_and_order() {
    let (_, scene, _, _) = setup();
    assert_eq!(scene.records().len(), 2 * 118 + 2 * 23);
    assert_eq!(scene.element_count(), 118);
    assert_eq!(scene.harmonic_count(), 23);

    let first = &scene.records()[0];
    assert_eq!((first.label.as_str(), first.branch), ("H", Branch::Positive));
    assert_eq!(scene.records()[1].branch, Branch::Negative);

    let last_element = &scene.records()[235];
    assert_eq!(last_element.label, "Og");
    assert!(last_element.noble);
    assert_eq!(last_element.shell_index, 7);

    let first_harmonic = &scene.records()[236];
    assert_eq!(first_harmonic.label, "H/2");
    assert_eq!(first_harmonic.shell_index, 0);
    assert!((first_harmonic.id - 0.5).abs() < 1e-12);
  }

  #[test]
  fn test_scene_respects_smaller_z_max() {
    let model = FieldModel::new(FieldConfig {
      z_max: 36.0,
      harmonic_max: 4,
      ..FieldConfig::default()
    });
    let scene = Scene::build(&model);
    assert_eq!(scene.element_count(), 36);
    assert_eq!(scene.harmonic_count(), 3);
  }

  #[test]
  fn test_hydrogen_record() {
    let (_, scene, _, _) = setup();
    let h = &scene.records()[0];
    assert_eq!(h.band, Band::Ultraviolet);
    assert_eq!(h.shell_index, 1);
    assert!((h.frequency_hz - 2.466070e15).abs() < 1.0);
  }

  #[test]
  fn test_visibility_filters_before_projection() {
    let (model, scene, camera, projector) = setup();

    let all = project_visible(&scene, &model, &camera, &projector, &params(Visibility::default()));
    assert_eq!(all.len(), scene.records().len());

    let only_neg = Visibility {
      positive: false,
      negative: true,
      harmonics: false,
    };
    let pts = project_visible(&scene, &model, &camera, &projector, &params(only_neg));
    assert_eq!(pts.len(), 118);
    assert!(pts
      .iter()
      .all(|p| scene.records()[p.record].branch == Branch::Negative && !scene.records()[p.record].is_harmonic()));

    let harmonics_only = Visibility {
      positive: false,
      negative: false,
      harmonics: true,
    };
    let pts = project_visible(&scene, &model, &camera, &projector, &params(harmonics_only));
    assert_eq!(pts.len(), 46);
  }

  #[test]
  fn test_every_visible_record_is_projected_in_each_view() {
    let (model, scene, _, projector) = setup();
    let mut p = params(Visibility::default());
    p.t = 0.0;

    let home = Camera::new(model.frame_extent());
    let pts = project_visible(&scene, &model, &home, &projector, &p);
    assert_eq!(pts.len(), 282);

    for preset in ViewPreset::ALL {
      let mut camera = Camera::new(model.frame_extent());
      camera.apply_preset(preset);
      let pts = project_visible(&scene, &model, &camera, &projector, &p);
      assert_eq!(pts.len(), scene.records().len(), "{:?}", preset);
      assert!(pts
        .iter()
        .all(|q| q.screen_x.is_finite() && q.screen_y.is_finite() && q.radius.is_finite()));
    }
  }

  #[test]
  fn test_depth_sort_far_to_near() {
    let (model, scene, camera, projector) = setup();
    let mut pts = project_visible(&scene, &model, &camera, &projector, &params(Visibility::default()));
    depth_sort(&mut pts);
    for pair in pts.windows(2) {
      assert!(pair[0].depth >= pair[1].depth);
    }
    // Nearest is drawn last and appears largest among equal-size points.
    let nearest = pts.last().unwrap();
    assert!(pts.iter().all(|p| p.scale <= nearest.scale + 1e-12));
  }

  #[test]
  fn test_depth_sort_tolerates_nan() {
    let mk = |depth: f64, record: usize| ProjectedPoint {
      screen_x: 0.0,
      screen_y: 0.0,
      depth,
      scale: 1.0,
      radius: 1.0,
      color: (0.0, 0.0, 0.0),
      record,
    };
    let mut pts = vec![mk(1.0, 0), mk(f64::NAN, 1), mk(3.0, 2)];
    depth_sort(&mut pts);
    assert_eq!(pts.len(), 3);
  }

  #[test]
  fn test_radius_grows_with_scale_and_has_floor() {
    assert_eq!(point_radius(3.0, 0.0), MIN_RADIUS);
    assert!((point_radius(3.0, 200.0) - 12.0).abs() < 1e-12);
    assert!(point_radius(3.0, 300.0) > point_radius(3.0, 200.0));
  }

  #[test]
  fn test_positions_move_with_time_but_records_do_not() {
    let (model, scene, mut camera, projector) = setup();
    camera.apply_preset(ViewPreset::Front);
    let before: Vec<_> = scene.records().to_vec();
    let mut p = params(Visibility::default());
    let a = project_visible(&scene, &model, &camera, &projector, &p);
    p.t = 2.0;
    let b = project_visible(&scene, &model, &camera, &projector, &p);
    assert_eq!(scene.records(), &before[..]);
    assert!(a.iter().zip(&b).any(|(x, y)| (x.screen_x - y.screen_x).abs() > 1e-6));
  }
}
