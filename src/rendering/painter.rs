// src/rendering/painter.rs
// Cairo drawing for one frame of the field view.
// Every function propagates cairo errors; the draw callback decides what to do.

use super::camera::Camera;
use super::palette::Rgb;
use super::scene::ProjectedPoint;
use crate::ui::info_panel;
use std::cmp::Ordering;
use std::f64::consts::TAU;

// ============================================================================
// POINTS
// ============================================================================

/// Filled discs in the given (already depth-sorted) order.
pub fn draw_points(
    cr: &cairo::Context,
    points: &[ProjectedPoint],
    opacity: f64,
) -> Result<(), cairo::Error> {
    let alpha = opacity.clamp(0.0, 1.0);
    for pt in points {
        let (r, g, b) = pt.color;
        cr.set_source_rgba(r, g, b, alpha);
        cr.new_path();
        cr.arc(pt.screen_x, pt.screen_y, pt.radius, 0.0, TAU);
        cr.fill()?;
    }
    Ok(())
}

// ============================================================================
// BACKGROUND GRID
// ============================================================================

const GRID_BASE: f64 = 48.0;

/// Grid cell size in pixels; cells shrink as the camera zooms in.
pub fn grid_spacing(zoom: f64) -> f64 {
    (GRID_BASE / zoom).clamp(24.0, 96.0)
}

/// First line position so one line crosses the viewport center.
pub fn grid_origin(extent: f64, spacing: f64) -> f64 {
    (extent * 0.5).rem_euclid(spacing)
}

pub fn draw_grid(cr: &cairo::Context, width: f64, height: f64, zoom: f64) -> Result<(), cairo::Error> {
    let s = grid_spacing(zoom);

    cr.save()?;
    cr.set_source_rgba(0x12 as f64 / 255.0, 0x20 as f64 / 255.0, 0x30 as f64 / 255.0, 0.12);
    cr.set_line_width(1.0);

    let mut x = grid_origin(width, s);
    while x <= width {
        cr.move_to(x, 0.0);
        cr.line_to(x, height);
        x += s;
    }
    let mut y = grid_origin(height, s);
    while y <= height {
        cr.move_to(0.0, y);
        cr.line_to(width, y);
        y += s;
    }
    cr.stroke()?;

    // Center cross
    cr.set_source_rgba(0x1a as f64 / 255.0, 0x2d as f64 / 255.0, 0x42 as f64 / 255.0, 0.18);
    cr.set_line_width(1.5);
    cr.move_to(width * 0.5, 0.0);
    cr.line_to(width * 0.5, height);
    cr.move_to(0.0, height * 0.5);
    cr.line_to(width, height * 0.5);
    cr.stroke()?;

    cr.restore()
}

// ============================================================================
// HOVER MARKER
// ============================================================================

const HOVER_GAIN: f64 = 0.03;

/// Inner and outer ring radii around a hovered point.
pub fn hover_radii(base_size: f64, scale: f64) -> (f64, f64) {
    let r1 = (base_size * scale * HOVER_GAIN).max(6.0);
    (r1, r1 * 1.8)
}

pub fn draw_hover(cr: &cairo::Context, pt: &ProjectedPoint, base_size: f64) -> Result<(), cairo::Error> {
    let (r1, r2) = hover_radii(base_size, pt.scale);

    cr.save()?;
    cr.set_line_width(1.5);
    cr.new_path();
    cr.set_source_rgba(1.0, 1.0, 1.0, 0.95);
    cr.arc(pt.screen_x, pt.screen_y, r1, 0.0, TAU);
    cr.stroke()?;
    cr.set_source_rgba(1.0, 1.0, 1.0, 0.5);
    cr.arc(pt.screen_x, pt.screen_y, r2, 0.0, TAU);
    cr.stroke()?;
    cr.restore()
}

// ============================================================================
// INFO BOX
// ============================================================================

const INFO_FONT: f64 = 12.0;
const INFO_TITLE_FONT: f64 = 14.0;
const INFO_PAD: f64 = 8.0;
const INFO_LINE: f64 = 16.0;

pub fn draw_info_box(
    cr: &cairo::Context,
    title: &str,
    rows: &[(&str, String)],
    pointer: (f64, f64),
    viewport: (f64, f64),
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);

    // Measure
    let caption_w = rows
        .iter()
        .filter(|(c, _)| !c.is_empty())
        .map(|(c, _)| text_width(cr, c, INFO_FONT))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .fold(0.0, f64::max);
    let mut content_w = text_width(cr, title, INFO_TITLE_FONT)?;
    for (caption, value) in rows {
        let indent = if caption.is_empty() { 0.0 } else { caption_w + INFO_PAD };
        content_w = content_w.max(indent + text_width(cr, value, INFO_FONT)?);
    }
    let w = content_w + 2.0 * INFO_PAD;
    let h = INFO_LINE * (rows.len() as f64 + 1.0) + 2.0 * INFO_PAD;
    let (bx, by) = info_panel::place_box(pointer, (w, h), viewport);

    // Panel
    cr.rectangle(bx, by, w, h);
    cr.set_source_rgba(0.055, 0.082, 0.125, 0.92);
    cr.fill_preserve()?;
    cr.set_source_rgba(0.133, 0.188, 0.267, 1.0);
    cr.set_line_width(1.0);
    cr.stroke()?;

    // Text
    let x0 = bx + INFO_PAD;
    let mut y = by + INFO_PAD + INFO_LINE - 3.0;
    cr.set_font_size(INFO_TITLE_FONT);
    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.move_to(x0, y);
    cr.show_text(title)?;

    cr.set_font_size(INFO_FONT);
    for (caption, value) in rows {
        y += INFO_LINE;
        let mut x = x0;
        if !caption.is_empty() {
            cr.set_source_rgb(0.55, 0.62, 0.72);
            cr.move_to(x, y);
            cr.show_text(caption)?;
            x += caption_w + INFO_PAD;
        }
        cr.set_source_rgb(0.9, 0.93, 0.97);
        cr.move_to(x, y);
        cr.show_text(value)?;
    }

    cr.restore()
}

fn text_width(cr: &cairo::Context, text: &str, size: f64) -> Result<f64, cairo::Error> {
    cr.set_font_size(size);
    Ok(cr.text_extents(text)?.x_advance())
}

// ============================================================================
// VIEW ROSE
// ============================================================================

const ROSE_RADIUS: f64 = 48.0;
const ROSE_MARGIN: f64 = 16.0;

/// Camera-rotated unit axes in the top-right corner.
pub fn draw_view_rose(cr: &cairo::Context, camera: &Camera, width: f64) -> Result<(), cairo::Error> {
    let r = ROSE_RADIUS;
    let cx = width - r - ROSE_MARGIN;
    let cy = r + ROSE_MARGIN;

    let axes: [([f64; 3], Rgb, &str); 3] = [
        ([1.0, 0.0, 0.0], (1.0, 0.38, 0.38), "X"),
        ([0.0, 1.0, 0.0], (0.46, 0.89, 0.49), "Y"),
        ([0.0, 0.0, 1.0], (0.42, 0.66, 1.0), "Z"),
    ];

    let mut rotated: Vec<_> = axes
        .iter()
        .map(|(v, color, label)| (camera.rotate_vector(*v), *color, *label))
        .collect();
    // Far axes first so the near one ends up on top
    rotated.sort_by(|(a, _, _), (b, _, _)| b[2].partial_cmp(&a[2]).unwrap_or(Ordering::Equal));

    cr.save()?;

    cr.new_path();
    cr.arc(cx, cy, r + 8.0, 0.0, TAU);
    cr.set_source_rgba(0.055, 0.082, 0.125, 0.9);
    cr.fill_preserve()?;
    cr.set_source_rgba(0.133, 0.188, 0.267, 0.9);
    cr.set_line_width(1.5);
    cr.stroke()?;

    cr.set_line_cap(cairo::LineCap::Round);
    cr.set_line_width(3.5);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(11.0);

    for (v, (red, green, blue), label) in rotated {
        let x = cx + r * v[0];
        let y = cy - r * v[1];
        cr.set_source_rgb(red, green, blue);
        cr.move_to(cx, cy);
        cr.line_to(x, y);
        cr.stroke()?;

        let lx = cx + (x - cx) * 1.08;
        let ly = cy + (y - cy) * 1.08;
        let ext = cr.text_extents(label)?;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.move_to(lx - ext.width() / 2.0 - ext.x_bearing(), ly - ext.height() / 2.0 - ext.y_bearing());
        cr.show_text(label)?;
    }

    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spacing_clamps() {
        assert_eq!(grid_spacing(1.0), 48.0);
        assert_eq!(grid_spacing(0.25), 96.0);
        assert_eq!(grid_spacing(6.0), 24.0);
        assert!((grid_spacing(1.5) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_grid_line_through_center() {
        let s = grid_spacing(1.0);
        let x0 = grid_origin(1000.0, s);
        assert!(x0 >= 0.0 && x0 < s);
        let k = ((500.0 - x0) / s).round();
        assert!((x0 + k * s - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_radii() {
        // Small points get the 6 px floor.
        assert_eq!(hover_radii(3.0, 10.0), (6.0, 6.0 * 1.8));
        let (r1, r2) = hover_radii(3.0, 200.0);
        assert!((r1 - 18.0).abs() < 1e-12);
        assert!((r2 - 32.4).abs() < 1e-9);
    }

    fn sample_surface() -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 320, 240).unwrap();
        let cr = cairo::Context::new(&surface).unwrap();
        (surface, cr)
    }

    #[test]
    fn test_layers_draw_without_error() {
        let (_surface, cr) = sample_surface();
        let pt = ProjectedPoint {
            screen_x: 160.0,
            screen_y: 120.0,
            depth: 1.0,
            scale: 120.0,
            radius: 7.2,
            color: (0.6, 0.8, 1.0),
            record: 0,
        };
        draw_grid(&cr, 320.0, 240.0, 1.7).unwrap();
        draw_points(&cr, std::slice::from_ref(&pt), 0.9).unwrap();
        draw_hover(&cr, &pt, 3.0).unwrap();
        let rows = vec![("", "Z=1".to_string()), ("Band", "Ultraviolet".to_string())];
        draw_info_box(&cr, "H", &rows, (300.0, 230.0), (320.0, 240.0)).unwrap();
        draw_view_rose(&cr, &Camera::new(3.7), 320.0).unwrap();
    }
}
