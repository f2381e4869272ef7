// src/model/record.rs

use crate::physics::spectrum::Band;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
  Positive,
  Negative,
}

impl Branch {
  pub const BOTH: [Branch; 2] = [Branch::Positive, Branch::Negative];

  pub fn sign(self) -> &'static str {
    match self {
      Branch::Positive => "+",
      Branch::Negative => "\u{2212}",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
  Element,
  Harmonic,
}

/// One point of the field: an element or harmonic on one branch.
/// Built once with the scene and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierRecord {
  /// Atomic number, or `1/n` for harmonics.
  pub id: f64,
  pub label: String,
  pub branch: Branch,
  pub kind: RecordKind,
  /// 1-based shell for elements, 0 for harmonics.
  pub shell_index: u8,
  pub band: Band,
  pub frequency_hz: f64,
  pub noble: bool,
}

impl IdentifierRecord {
  pub fn is_harmonic(&self) -> bool {
    self.kind == RecordKind::Harmonic
  }
}
