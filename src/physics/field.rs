// src/physics/field.rs

use crate::config::{BranchPolicy, FieldConfig, FrequencyCoupling, RadialGrowth};
use crate::model::Branch;
use std::f64::consts::{PI, TAU};

pub type Point3 = [f64; 3];

/// Identifiers are clamped to this before any logarithm or power.
pub const Z_EPSILON: f64 = 1e-12;

pub const OMEGA_RANGE: (f64, f64) = (0.0, 20.0);

/// Field model with the derived constants resolved once from a [`FieldConfig`].
///
/// Maps an identifier `Z` onto a torus whose tube radius grows exponentially
/// with the longitudinal angle, so identifiers spread log-uniformly around the
/// major circle and trace a logarithmic spiral in cross-section.
#[derive(Debug, Clone)]
pub struct FieldModel {
  cfg: FieldConfig,
  k_phase: f64,
  r_growth: f64,
  kappa: f64,
}

impl FieldModel {
  pub fn new(cfg: FieldConfig) -> Self {
    let k_phase = TAU / cfg.z_max.ln();

    let r_growth = match cfg.radial_growth {
      RadialGrowth::Coupled => cfg.b * k_phase,
      RadialGrowth::Override(v) => v,
    };

    let kappa = match cfg.frequency_coupling {
      FrequencyCoupling::AmplitudeCoupled => cfg.b * k_phase,
      FrequencyCoupling::PhaseCoupled => k_phase,
      FrequencyCoupling::Override(v) => v,
    };

    Self { cfg, k_phase, r_growth, kappa }
  }

  pub fn config(&self) -> &FieldConfig {
    &self.cfg
  }

  pub fn k_phase(&self) -> f64 {
    self.k_phase
  }

  pub fn r_growth(&self) -> f64 {
    self.r_growth
  }

  pub fn kappa(&self) -> f64 {
    self.kappa
  }

  pub fn omega(&self) -> f64 {
    self.cfg.omega
  }

  pub fn set_omega(&mut self, omega: f64) {
    if omega.is_finite() {
      self.cfg.omega = omega.clamp(OMEGA_RANGE.0, OMEGA_RANGE.1);
    }
  }

  /// Distance the camera backs off so the whole torus sits in front of it.
  pub fn frame_extent(&self) -> f64 {
    self.cfg.major_radius + self.cfg.r0
  }

  /// Longitudinal angle. Strictly increasing in `z`.
  pub fn theta(&self, z: f64) -> f64 {
    self.k_phase * z.max(Z_EPSILON).ln()
  }

  pub fn r_minor(&self, theta: f64) -> f64 {
    self.cfg.r0 * (self.r_growth * theta).exp()
  }

  /// Poloidal angle in `[0, 2pi)`, advanced backward by `omega * t`.
  pub fn poloidal(&self, theta: f64, branch: Branch, t: f64) -> f64 {
    let base = self.cfg.alpha * theta;
    let time_off = self.cfg.omega * t;

    let v = match (self.cfg.branch_policy, branch) {
      (BranchPolicy::ReversePoloidal, Branch::Positive) => base - time_off,
      (BranchPolicy::ReversePoloidal, Branch::Negative) => -base + PI - time_off,
      (BranchPolicy::Offset, Branch::Positive) => base - time_off,
      (BranchPolicy::Offset, Branch::Negative) => base + PI - time_off,
    };
    wrap_angle(v)
  }

  pub fn position(&self, z: f64, branch: Branch, t: f64) -> Point3 {
    let theta = self.theta(z);
    let r = self.r_minor(theta);
    let v = self.poloidal(theta, branch, t);
    torus_xyz(self.cfg.major_radius, r, theta, v)
  }

  /// Power-law spectral frequency, `f_ref * Z^kappa`.
  pub fn frequency(&self, z: f64) -> f64 {
    self.cfg.f_ref * z.max(Z_EPSILON).powf(self.kappa)
  }
}

/// True modulo into `[0, 2pi)`; negative inputs wrap instead of truncating.
pub fn wrap_angle(a: f64) -> f64 {
  let r = a.rem_euclid(TAU);
  // rem_euclid can round up to exactly TAU for tiny negative inputs
  if r >= TAU {
    0.0
  } else {
    r
  }
}

pub fn torus_xyz(major: f64, minor: f64, u: f64, v: f64) -> Point3 {
  let (su, cu) = u.sin_cos();
  let (sv, cv) = v.sin_cos();
  let ring = major + minor * cv;
  [ring * cu, ring * su, minor * sv]
}
