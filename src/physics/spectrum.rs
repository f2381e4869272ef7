// src/physics/spectrum.rs

/// Named frequency bands. Ranges are closed-low / open-high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    SubElf,
    ElfVlf,
    Radio,
    Microwave,
    Infrared,
    Visible,
    Ultraviolet,
    XRay,
    Gamma,
    UltraGamma,
    Hyper,
    Unknown,
}

const BAND_TABLE: [(Band, f64, f64); 11] = [
    (Band::SubElf, 0.0, 3e1),
    (Band::ElfVlf, 3e1, 3e5),
    (Band::Radio, 3e5, 3e8),
    (Band::Microwave, 3e8, 3e11),
    (Band::Infrared, 3e11, 4.3e14),
    (Band::Visible, 4.3e14, 7.9e14),
    (Band::Ultraviolet, 7.9e14, 3e16),
    (Band::XRay, 3e16, 3e19),
    (Band::Gamma, 3e19, 3e24),
    (Band::UltraGamma, 3e24, 3e30),
    (Band::Hyper, 3e30, f64::INFINITY),
];

impl Band {
    pub fn classify(f: f64) -> Band {
        BAND_TABLE
            .iter()
            .find(|(_, lo, hi)| f >= *lo && f < *hi)
            .map(|(band, _, _)| *band)
            .unwrap_or(Band::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            Band::SubElf => "Sub-ELF",
            Band::ElfVlf => "ELF/VLF",
            Band::Radio => "Radio",
            Band::Microwave => "Microwave",
            Band::Infrared => "Infrared",
            Band::Visible => "Visible",
            Band::Ultraviolet => "Ultraviolet",
            Band::XRay => "X-Ray",
            Band::Gamma => "Gamma",
            Band::UltraGamma => "Ultra-Gamma",
            Band::Hyper => "Hyper",
            Band::Unknown => "Unknown",
        }
    }

    /// `[low, high)` in Hz; `None` for [`Band::Unknown`].
    #[cfg(test)]
    pub fn range(self) -> Option<(f64, f64)> {
        BAND_TABLE
            .iter()
            .find(|(band, _, _)| *band == self)
            .map(|(_, lo, hi)| (*lo, *hi))
    }
}

/// Electron shell capacities, K through Q.
pub const SHELL_CAPACITIES: [u32; 7] = [2, 8, 8, 18, 18, 32, 32];
pub const SHELL_LETTERS: [&str; 7] = ["K", "L", "M", "N", "O", "P", "Q"];

/// 1-based shell for an integer identifier. The last shell absorbs
/// anything past the cumulative capacity.
pub fn shell_index(z: u32, z_max: u32, quantum_capacities: bool) -> u8 {
    if !quantum_capacities {
        return 1;
    }
    let mut start = 0;
    for (i, cap) in SHELL_CAPACITIES.iter().enumerate() {
        let lo = start + 1;
        let hi = (start + cap).min(z_max);
        if z >= lo && z <= hi {
            return (i + 1) as u8;
        }
        start += cap;
    }
    SHELL_CAPACITIES.len() as u8
}

pub fn shell_letter(shell: u8) -> Option<&'static str> {
    if shell == 0 {
        return None;
    }
    SHELL_LETTERS.get(shell as usize - 1).copied()
}

const HZ_UNITS: [(&str, f64); 7] = [
    ("Hz", 1.0),
    ("kHz", 1e3),
    ("MHz", 1e6),
    ("GHz", 1e9),
    ("THz", 1e12),
    ("PHz", 1e15),
    ("EHz", 1e18),
];

/// Formats with the largest unit the value reaches, 3 decimals below 10.
pub fn format_hz(f: f64) -> String {
    let (unit, value) = HZ_UNITS
        .iter()
        .rev()
        .find(|(_, threshold)| f >= *threshold)
        .map(|(u, threshold)| (*u, f / threshold))
        .unwrap_or(("Hz", f));

    if value < 10.0 {
        format!("{:.3} {}", value, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}
