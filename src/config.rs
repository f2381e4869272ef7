// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// --- Enums ---

/// How the poloidal phase of the negative branch relates to the positive one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPolicy {
  /// Negative branch mirrors the phase spiral and is shifted by pi.
  ReversePoloidal,
  /// Both branches share the spiral; negative is shifted by pi.
  Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialGrowth {
  /// r_growth = b * k_phase
  Coupled,
  Override(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyCoupling {
  /// kappa = b * k_phase
  AmplitudeCoupled,
  /// kappa = k_phase
  PhaseCoupled,
  Override(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
  Branch,
  Shell,
  Band,
}

impl ColorMode {
  pub const ALL: [ColorMode; 3] = [ColorMode::Branch, ColorMode::Shell, ColorMode::Band];

  pub fn label(self) -> &'static str {
    match self {
      ColorMode::Branch => "Branch",
      ColorMode::Shell => "Shell",
      ColorMode::Band => "Band",
    }
  }

  pub fn from_index(i: u32) -> Self {
    Self::ALL.get(i as usize).copied().unwrap_or(ColorMode::Branch)
  }

  pub fn index(self) -> u32 {
    Self::ALL.iter().position(|m| *m == self).unwrap_or(0) as u32
  }
}

// --- Field parameters ---

/// Upper bound on harmonic denominators; each adds two points per frame.
pub const HARMONIC_MAX_LIMIT: u32 = 10_000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
  pub z_max: f64,
  pub b: f64,
  pub alpha: f64,
  pub r0: f64,
  pub major_radius: f64,
  pub radial_growth: RadialGrowth,
  pub branch_policy: BranchPolicy,
  pub frequency_coupling: FrequencyCoupling,
  pub f_ref: f64,
  pub omega: f64,
  pub shells_use_quantum_capacities: bool,
  pub harmonic_max: u32,
}

impl Default for FieldConfig {
  fn default() -> Self {
    Self {
      z_max: 118.0,
      b: 0.22,
      alpha: 1.0,
      r0: 0.7,
      major_radius: 3.0,
      radial_growth: RadialGrowth::Coupled,
      branch_policy: BranchPolicy::ReversePoloidal,
      frequency_coupling: FrequencyCoupling::AmplitudeCoupled,
      f_ref: 2.466070e15,
      omega: TAU,
      shells_use_quantum_capacities: true,
      harmonic_max: 24,
    }
  }
}

impl FieldConfig {
  /// Pulls values that would break the mapping back into a usable range.
  /// Returns a note for every value that had to change.
  pub fn sanitize(&mut self) -> Vec<String> {
    let defaults = Self::default();
    let mut notes = Vec::new();

    if !(self.z_max.is_finite() && self.z_max > 1.0) {
      notes.push(format!("z_max {} invalid, using {}", self.z_max, defaults.z_max));
      self.z_max = defaults.z_max;
    }
    if !(self.r0.is_finite() && self.r0 > 0.0) {
      notes.push(format!("r0 {} invalid, using {}", self.r0, defaults.r0));
      self.r0 = defaults.r0;
    }
    if !(self.major_radius.is_finite() && self.major_radius > 0.0) {
      notes.push(format!(
        "major_radius {} invalid, using {}",
        self.major_radius, defaults.major_radius
      ));
      self.major_radius = defaults.major_radius;
    }
    if !(self.f_ref.is_finite() && self.f_ref > 0.0) {
      notes.push(format!("f_ref {} invalid, using {}", self.f_ref, defaults.f_ref));
      self.f_ref = defaults.f_ref;
    }
    if self.harmonic_max < 2 {
      notes.push(format!("harmonic_max {} raised to 2", self.harmonic_max));
      self.harmonic_max = 2;
    } else if self.harmonic_max > HARMONIC_MAX_LIMIT {
      notes.push(format!(
        "harmonic_max {} lowered to {}",
        self.harmonic_max, HARMONIC_MAX_LIMIT
      ));
      self.harmonic_max = HARMONIC_MAX_LIMIT;
    }
    let omega = if self.omega.is_finite() { self.omega.clamp(0.0, 20.0) } else { defaults.omega };
    if omega != self.omega {
      notes.push(format!("omega {} clamped to {}", self.omega, omega));
      self.omega = omega;
    }
    notes
  }
}

// --- Display defaults ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayDefaults {
  pub color_mode: ColorMode,
  pub point_size: f64,
  pub opacity: f64,
  pub trail_length: f64,
  pub trail_opacity: f64,
  pub time_scale_exp: f64,
}

impl Default for DisplayDefaults {
  fn default() -> Self {
    Self {
      color_mode: ColorMode::Branch,
      point_size: 3.0,
      opacity: 0.9,
      trail_length: 0.5,
      trail_opacity: 0.6,
      time_scale_exp: 0.0,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
  #[serde(default)]
  pub field: FieldConfig,

  #[serde(default)]
  pub display: DisplayDefaults,

  /// Auxiliary data folder listed by the manifest action.
  #[serde(default)]
  pub data_dir: Option<PathBuf>,
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/thetaview/settings.json)
  pub fn load() -> (Self, String) {
    Self::load_from(&Self::get_path())
  }

  pub fn load_from(path: &Path) -> (Self, String) {
    let (mut cfg, msg) = if path.exists() {
      match File::open(path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader::<_, Config>(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    };

    let notes = cfg.field.sanitize();
    if notes.is_empty() {
      (cfg, msg)
    } else {
      (cfg, format!("{} ({})", msg, notes.join("; ")))
    }
  }

  pub fn data_dir(&self) -> PathBuf {
    if let Some(dir) = &self.data_dir {
      return dir.clone();
    }
    if let Some(proj) = ProjectDirs::from("org", "thetafield", "thetaview") {
      proj.data_dir().join("data")
    } else {
      PathBuf::from("data")
    }
  }

  fn get_path() -> PathBuf {
    // Must match the application id in main.rs
    if let Some(proj) = ProjectDirs::from("org", "thetafield", "thetaview") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("thetaview-config-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn test_missing_file_gives_defaults() {
    let dir = scratch("missing");
    let (cfg, msg) = Config::load_from(&dir.join("settings.json"));
    assert_eq!(cfg.field, FieldConfig::default());
    assert!(msg.contains("defaults"));
  }

  #[test]
  fn test_partial_file_fills_defaults() {
    let dir = scratch("partial");
    let path = dir.join("settings.json");
    fs::write(
      &path,
      r#"{ "field": { "z_max": 86, "branch_policy": "offset", "frequency_coupling": { "override": 1.5 } } }"#,
    )
    .unwrap();

    let (cfg, _) = Config::load_from(&path);
    assert_eq!(cfg.field.z_max, 86.0);
    assert_eq!(cfg.field.branch_policy, BranchPolicy::Offset);
    assert_eq!(cfg.field.frequency_coupling, FrequencyCoupling::Override(1.5));
    assert_eq!(cfg.field.r0, 0.7);
    assert_eq!(cfg.display.color_mode, ColorMode::Branch);
  }

  #[test]
  fn test_malformed_file_falls_back() {
    let dir = scratch("malformed");
    let path = dir.join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let (cfg, msg) = Config::load_from(&path);
    assert_eq!(cfg.field, FieldConfig::default());
    assert!(msg.starts_with("Error parsing config"));
  }

  #[test]
  fn test_sanitize_clamps_bad_values() {
    let mut field = FieldConfig {
      z_max: 0.5,
      omega: 50.0,
      harmonic_max: 0,
      ..FieldConfig::default()
    };
    let notes = field.sanitize();
    assert_eq!(notes.len(), 3);
    assert_eq!(field.z_max, 118.0);
    assert_eq!(field.omega, 20.0);
    assert_eq!(field.harmonic_max, 2);
  }

  #[test]
  fn test_huge_harmonic_max_is_capped() {
    let dir = scratch("harmonics");
    let path = dir.join("settings.json");
    fs::write(&path, r#"{ "field": { "harmonic_max": 4000000000 } }"#).unwrap();

    let (cfg, _) = Config::load_from(&path);
    assert_eq!(cfg.field.harmonic_max, HARMONIC_MAX_LIMIT);
  }

  #[test]
  fn test_color_mode_index_roundtrip() {
    for mode in ColorMode::ALL {
      assert_eq!(ColorMode::from_index(mode.index()), mode);
    }
    assert_eq!(ColorMode::from_index(99), ColorMode::Branch);
  }
}
