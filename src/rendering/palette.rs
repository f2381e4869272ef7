// src/rendering/palette.rs

use crate::config::ColorMode;
use crate::model::{Branch, IdentifierRecord};
use crate::physics::Band;

pub type Rgb = (f64, f64, f64);

fn rgb8(r: u8, g: u8, b: u8) -> Rgb {
    (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

pub fn background() -> Rgb {
    rgb8(0x0b, 0x0f, 0x14)
}

pub fn branch_color(branch: Branch) -> Rgb {
    match branch {
        Branch::Positive => rgb8(0x9e, 0xcb, 0xff), // Sky
        Branch::Negative => rgb8(0xff, 0x9e, 0x86), // Salmon
    }
}

pub fn harmonic_color() -> Rgb {
    rgb8(0x86, 0xff, 0xb6) // Mint
}

/// Shells K..Q, 1-based. Out-of-range indices clamp to the nearest end.
pub fn shell_color(shell: u8) -> Rgb {
    const SHELLS: [(u8, u8, u8); 7] = [
        (0x8d, 0xd3, 0xc7),
        (0xff, 0xff, 0xb3),
        (0xbe, 0xba, 0xda),
        (0xfb, 0x80, 0x72),
        (0x80, 0xb1, 0xd3),
        (0xfd, 0xb4, 0x62),
        (0xb3, 0xde, 0x69),
    ];
    let idx = (shell.max(1) as usize - 1).min(SHELLS.len() - 1);
    let (r, g, b) = SHELLS[idx];
    rgb8(r, g, b)
}

pub fn band_color(band: Band) -> Rgb {
    match band {
        Band::SubElf => rgb8(0xbd, 0xbd, 0xbd),
        Band::ElfVlf => rgb8(0xa6, 0xce, 0xe3),
        Band::Radio => rgb8(0x1f, 0x78, 0xb4),
        Band::Microwave => rgb8(0x33, 0xa0, 0x2c),
        Band::Infrared => rgb8(0xfb, 0x9a, 0x99),
        Band::Visible => rgb8(0xfd, 0xbf, 0x6f),
        Band::Ultraviolet => rgb8(0xca, 0xb2, 0xd6),
        Band::XRay => rgb8(0x6a, 0x3d, 0x9a),
        Band::Gamma => rgb8(0xb1, 0x59, 0x28),
        Band::UltraGamma => rgb8(0xff, 0x7f, 0x00),
        Band::Hyper => rgb8(0xe3, 0x1a, 0x1c),
        Band::Unknown => rgb8(0x99, 0x99, 0x99),
    }
}

pub fn color_for(record: &IdentifierRecord, mode: ColorMode) -> Rgb {
    match mode {
        ColorMode::Branch if record.is_harmonic() => harmonic_color(),
        ColorMode::Branch => branch_color(record.branch),
        ColorMode::Shell if record.is_harmonic() => harmonic_color(),
        ColorMode::Shell => shell_color(record.shell_index),
        ColorMode::Band => band_color(record.band),
    }
}
