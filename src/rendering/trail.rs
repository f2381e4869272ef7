// src/rendering/trail.rs

use super::palette::{self, Rgb};

pub const TRAIL_LENGTH_MAX: f64 = 0.99;

/// Alpha of the per-frame fade rectangle. Longer trails fade less.
pub fn fade_alpha(trail_length: f64, trail_opacity: f64) -> f64 {
    let tl = if trail_length.is_finite() { trail_length.clamp(0.0, TRAIL_LENGTH_MAX) } else { 0.0 };
    let to = if trail_opacity.is_finite() { trail_opacity.clamp(0.0, 1.0) } else { 0.0 };
    (1.0 - tl) * to
}

/// Offscreen image that survives between frames so old points can fade out
/// instead of vanishing.
#[derive(Default)]
pub struct TrailRaster {
    surface: Option<cairo::ImageSurface>,
}

impl TrailRaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<(i32, i32)> {
        self.surface.as_ref().map(|s| (s.width(), s.height()))
    }

    /// Makes sure the raster matches the viewport. Returns true when a new
    /// (blank) surface was allocated.
    pub fn ensure(&mut self, width: i32, height: i32) -> Result<bool, cairo::Error> {
        let (w, h) = (width.max(1), height.max(1));
        if self.size() == Some((w, h)) {
            return Ok(false);
        }
        let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, w, h)?;
        let cr = cairo::Context::new(&surface)?;
        fill(&cr, palette::background(), 1.0)?;
        self.surface = Some(surface);
        Ok(true)
    }

    /// Drawing context for this frame, or `None` before the first `ensure`.
    pub fn context(&self) -> Result<Option<cairo::Context>, cairo::Error> {
        match &self.surface {
            Some(s) => Ok(Some(cairo::Context::new(s)?)),
            None => Ok(None),
        }
    }

    /// Blits the raster onto the widget.
    pub fn present(&self, cr: &cairo::Context) -> Result<(), cairo::Error> {
        if let Some(s) = &self.surface {
            cr.set_source_surface(s, 0.0, 0.0)?;
            cr.paint()?;
        }
        Ok(())
    }
}

/// Either wipes the raster or dims it toward the background color.
pub fn begin_frame(cr: &cairo::Context, force_clear: bool, alpha: f64) -> Result<(), cairo::Error> {
    if force_clear {
        fill(cr, palette::background(), 1.0)
    } else if alpha > 0.0 {
        fill(cr, palette::background(), alpha)
    } else {
        Ok(())
    }
}

fn fill(cr: &cairo::Context, (r, g, b): Rgb, alpha: f64) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_source_rgb(r, g, b);
    cr.paint_with_alpha(alpha)?;
    cr.restore()
}
