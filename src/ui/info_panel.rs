// src/ui/info_panel.rs
//
// Text and placement of the hover info box.

use crate::model::IdentifierRecord;
use crate::physics::spectrum::{format_hz, shell_letter};

/// Gap between pointer and box.
pub const POINTER_GAP: f64 = 14.0;
/// Minimum distance between box and viewport edge before flipping.
pub const EDGE_MARGIN: f64 = 8.0;

const DASH: &str = "\u{2014}";

pub fn z_text(id: f64) -> String {
  if id >= 1.0 {
    format!("Z={}", id.trunc() as i64)
  } else {
    format!("Z={:.4}", id)
  }
}

/// Title line followed by `(caption, value)` rows.
pub fn info_lines(record: &IdentifierRecord) -> (String, Vec<(&'static str, String)>) {
  let shell = shell_letter(record.shell_index).unwrap_or(DASH).to_string();
  let freq = if record.frequency_hz.is_finite() && record.frequency_hz > 0.0 {
    format_hz(record.frequency_hz)
  } else {
    DASH.to_string()
  };
  let mut rows = vec![
    ("", z_text(record.id)),
    ("Shell", shell),
    ("Band", record.band.name().to_string()),
    ("Branch", record.branch.sign().to_string()),
    ("f", freq),
  ];
  if record.noble {
    rows.push(("Group", "noble gas".to_string()));
  }
  (record.label.clone(), rows)
}

/// Top-left corner for a box of `size` next to the pointer, flipped to the
/// other side on each axis where it would come too close to the edge, then
/// clamped into the viewport. A box larger than the viewport sits at 0.
pub fn place_box(pointer: (f64, f64), size: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
  let (mx, my) = pointer;
  let (w, h) = size;
  let (vw, vh) = viewport;

  let mut bx = mx + POINTER_GAP;
  let mut by = my + POINTER_GAP;
  if bx + w > vw - EDGE_MARGIN {
    bx = mx - w - POINTER_GAP;
  }
  if by + h > vh - EDGE_MARGIN {
    by = my - h - POINTER_GAP;
  }
  (bx.min(vw - w).max(0.0), by.min(vh - h).max(0.0))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{Branch, RecordKind};
  use crate::physics::Band;

  fn hydrogen() -> IdentifierRecord {
    IdentifierRecord {
      id: 1.0,
      label: "H".into(),
      branch: Branch::Positive,
      kind: RecordKind::Element,
      shell_index: 1,
      band: Band::Ultraviolet,
      frequency_hz: 2.466070e15,
      noble: false,
    }
  }

  #[test]
  fn test_z_text() {
    assert_eq!(z_text(1.0), "Z=1");
    assert_eq!(z_text(118.0), "Z=118");
    assert_eq!(z_text(0.5), "Z=0.5000");
    assert_eq!(z_text(1.0 / 24.0), "Z=0.0417");
  }

  #[test]
  fn test_info_lines_element() {
    let (title, rows) = info_lines(&hydrogen());
    assert_eq!(title, "H");
    assert_eq!(rows[0].1, "Z=1");
    assert_eq!(rows[1].1, "K");
    assert_eq!(rows[2].1, "Ultraviolet");
    assert_eq!(rows[3].1, "+");
    assert_eq!(rows[4].1, "2.466 PHz");
    assert_eq!(rows.len(), 5);
  }

  #[test]
  fn test_info_lines_noble_gas() {
    let helium = IdentifierRecord {
      id: 2.0,
      label: "He".into(),
      noble: true,
      ..hydrogen()
    };
    let (_, rows) = info_lines(&helium);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[5], ("Group", "noble gas".to_string()));
  }

  #[test]
  fn test_info_lines_harmonic() {
    let rec = IdentifierRecord {
      id: 0.25,
      label: "H/4".into(),
      branch: Branch::Negative,
      kind: RecordKind::Harmonic,
      shell_index: 0,
      ..hydrogen()
    };
    let (title, rows) = info_lines(&rec);
    assert_eq!(title, "H/4");
    assert_eq!(rows[0].1, "Z=0.2500");
    assert_eq!(rows[1].1, DASH);
    assert_eq!(rows[3].1, "\u{2212}");
  }

  #[test]
  fn test_place_box_default_and_flips() {
    let vp = (800.0, 600.0);
    assert_eq!(place_box((100.0, 100.0), (120.0, 90.0), vp), (114.0, 114.0));
    // Right edge: 700 + 14 + 120 > 792
    assert_eq!(place_box((700.0, 100.0), (120.0, 90.0), vp), (566.0, 114.0));
    // Bottom edge only
    assert_eq!(place_box((100.0, 550.0), (120.0, 90.0), vp), (114.0, 446.0));
    // Exactly touching the margin stays put
    assert_eq!(place_box((658.0, 100.0), (120.0, 90.0), vp), (672.0, 114.0));
  }

  #[test]
  fn test_place_box_stays_inside_small_viewport() {
    let vp = (300.0, 200.0);
    // Flipping left would start at -24; the box is pushed back to the edge.
    assert_eq!(place_box((150.0, 150.0), (160.0, 100.0), vp), (0.0, 36.0));
    for pointer in [(0.0, 0.0), (299.0, 199.0), (20.0, 190.0), (290.0, 5.0)] {
      let (bx, by) = place_box(pointer, (160.0, 100.0), vp);
      assert!(bx >= 0.0 && bx + 160.0 <= 300.0, "{:?} -> {}", pointer, bx);
      assert!(by >= 0.0 && by + 100.0 <= 200.0, "{:?} -> {}", pointer, by);
    }
    // Larger than the viewport: pinned to the top-left corner.
    assert_eq!(place_box((150.0, 100.0), (400.0, 300.0), vp), (0.0, 0.0));
  }
}
