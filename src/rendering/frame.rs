// src/rendering/frame.rs
use super::scene::{self, ProjectedPoint};
use super::{painter, trail};
use crate::state::AppState;
use crate::ui::info_panel;
use gtk4::prelude::*;
use gtk4::{cairo, DrawingArea};
use std::cell::RefCell;
use std::rc::Rc;

// --- Screen Rendering Entry Point ---
pub fn setup_drawing(drawing_area: &DrawingArea, state: Rc<RefCell<AppState>>) {
    drawing_area.set_draw_func(move |_, cr, width, height| {
        let mut st = state.borrow_mut();
        if let Err(e) = render_frame(cr, &mut st, width, height) {
            log::warn!("Frame render failed: {}", e);
        }
    });
}

/// Full frame: trail raster update, points, then the overlays.
pub fn render_frame(
    cr: &cairo::Context,
    st: &mut AppState,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    st.set_viewport(w, h);

    // 1. Accumulating layer
    let resized = st.trail.ensure(width, height)?;
    let force_clear = st.take_force_clear() || resized;
    let fade = trail::fade_alpha(st.display.trail_length(), st.display.trail_opacity());

    let params = st.frame_params();
    let projector = st.projector();
    let mut points = scene::project_visible(&st.scene, &st.model, &st.camera, &projector, &params);
    scene::depth_sort(&mut points);

    if let Some(tc) = st.trail.context()? {
        trail::begin_frame(&tc, force_clear, fade)?;
        painter::draw_points(&tc, &points, st.display.opacity())?;
    }
    st.trail.present(cr)?;

    // 2. Overlays, redrawn from scratch every frame
    painter::draw_grid(cr, w, h, st.camera.zoom())?;

    st.refresh_hover();
    if let (Some(hit), Some(pointer)) = (&st.hover, st.pointer) {
        if let Some(rec) = st.scene.get(hit.point.record) {
            draw_hover_layers(cr, &hit.point, scene::base_size(rec, params.point_size), rec, pointer, (w, h))?;
        }
    }

    painter::draw_view_rose(cr, &st.camera, w)
}

fn draw_hover_layers(
    cr: &cairo::Context,
    pt: &ProjectedPoint,
    base_size: f64,
    rec: &crate::model::IdentifierRecord,
    pointer: (f64, f64),
    viewport: (f64, f64),
) -> Result<(), cairo::Error> {
    painter::draw_hover(cr, pt, base_size)?;
    let (title, rows) = info_panel::info_lines(rec);
    painter::draw_info_box(cr, &title, &rows, pointer, viewport)
}
