// src/state.rs
use crate::animation::AnimationClock;
use crate::config::{ColorMode, Config, DisplayDefaults};
use crate::physics::FieldModel;
use crate::rendering::camera::{Camera, ViewPreset};
use crate::rendering::picker::{self, PickHit};
use crate::rendering::projector::Projector;
use crate::rendering::scene::{FrameParams, Scene, Visibility};
use crate::rendering::trail::TrailRaster;
use std::path::PathBuf;

pub const POINT_SIZE_RANGE: (f64, f64) = (1.0, 12.0);
pub const OPACITY_RANGE: (f64, f64) = (0.05, 1.0);
pub const ORBIT_SPEED_RANGE: (f64, f64) = (-2.0, 2.0);
/// Auto-orbit yaw in radians per second at speed 1.
const ORBIT_RATE: f64 = 0.5;

fn clamp_finite(v: f64, range: (f64, f64), fallback: f64) -> f64 {
    if v.is_finite() {
        v.clamp(range.0, range.1)
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayControls {
    pub color_mode: ColorMode,
    point_size: f64,
    opacity: f64,
    trail_length: f64,
    trail_opacity: f64,
}

impl DisplayControls {
    pub fn from_defaults(d: &DisplayDefaults) -> Self {
        let mut c = Self {
            color_mode: d.color_mode,
            point_size: 3.0,
            opacity: 0.9,
            trail_length: 0.5,
            trail_opacity: 0.6,
        };
        c.set_point_size(d.point_size);
        c.set_opacity(d.opacity);
        c.set_trail_length(d.trail_length);
        c.set_trail_opacity(d.trail_opacity);
        c
    }

    pub fn point_size(&self) -> f64 {
        self.point_size
    }
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
    pub fn trail_length(&self) -> f64 {
        self.trail_length
    }
    pub fn trail_opacity(&self) -> f64 {
        self.trail_opacity
    }

    pub fn set_point_size(&mut self, v: f64) {
        self.point_size = clamp_finite(v, POINT_SIZE_RANGE, self.point_size);
    }
    pub fn set_opacity(&mut self, v: f64) {
        self.opacity = clamp_finite(v, OPACITY_RANGE, self.opacity);
    }
    pub fn set_trail_length(&mut self, v: f64) {
        self.trail_length = clamp_finite(v, (0.0, 0.99), self.trail_length);
    }
    pub fn set_trail_opacity(&mut self, v: f64) {
        self.trail_opacity = clamp_finite(v, (0.0, 1.0), self.trail_opacity);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoOrbit {
    pub enabled: bool,
    speed: f64,
}

impl AutoOrbit {
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, v: f64) {
        self.speed = clamp_finite(v, ORBIT_SPEED_RANGE, self.speed);
    }
}

pub struct AppState {
    pub model: FieldModel,
    pub scene: Scene,
    pub camera: Camera,
    home: Camera,
    pub clock: AnimationClock,
    pub display: DisplayControls,
    pub visibility: Visibility,
    pub auto_orbit: AutoOrbit,
    /// Last pointer position over the canvas, `None` once it leaves.
    pub pointer: Option<(f64, f64)>,
    pub hover: Option<PickHit>,
    pub trail: TrailRaster,
    pub data_dir: PathBuf,
    viewport: (f64, f64),
    force_clear: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let model = FieldModel::new(config.field.clone());
        let scene = Scene::build(&model);
        let camera = Camera::new(model.frame_extent());
        Self {
            home: camera.clone(),
            camera,
            scene,
            model,
            clock: AnimationClock::new(config.display.time_scale_exp),
            display: DisplayControls::from_defaults(&config.display),
            visibility: Visibility::default(),
            auto_orbit: AutoOrbit {
                enabled: false,
                speed: 0.35,
            },
            pointer: None,
            hover: None,
            trail: TrailRaster::new(),
            data_dir: config.data_dir(),
            viewport: (1.0, 1.0),
            force_clear: true,
        }
    }

    pub fn frame_params(&self) -> FrameParams {
        FrameParams {
            t: self.clock.t(),
            visibility: self.visibility,
            point_size: self.display.point_size(),
            color_mode: self.display.color_mode,
        }
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self.viewport.0, self.viewport.1)
    }

    /// Resizes wipe the trail raster.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let vp = (width.max(1.0), height.max(1.0));
        if vp != self.viewport {
            self.viewport = vp;
            self.force_clear = true;
        }
    }

    pub fn request_clear(&mut self) {
        self.force_clear = true;
    }

    /// Reads and resets the one-shot clear flag.
    pub fn take_force_clear(&mut self) -> bool {
        std::mem::take(&mut self.force_clear)
    }

    // --- Camera changes that invalidate the trail ---

    pub fn set_zoom(&mut self, zoom: f64) {
        let before = self.camera.zoom();
        self.camera.set_zoom(zoom);
        if self.camera.zoom() != before {
            self.force_clear = true;
        }
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.camera.zoom() * factor);
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        self.camera.apply_preset(preset);
        self.force_clear = true;
    }

    pub fn go_home(&mut self) {
        self.camera = self.home.clone();
        self.force_clear = true;
    }

    pub fn set_omega(&mut self, omega: f64) {
        self.model.set_omega(omega);
    }

    /// One frame of wall time: advances the clock and the auto-orbit.
    pub fn tick(&mut self, dt: f64) {
        self.clock.tick(dt);
        if self.auto_orbit.enabled && dt.is_finite() && dt > 0.0 {
            self.camera.orbit(self.auto_orbit.speed() * dt * ORBIT_RATE, 0.0);
        }
    }

    /// Re-picks under the last pointer position.
    pub fn refresh_hover(&mut self) {
        self.hover = self.pointer.and_then(|(mx, my)| {
            picker::pick(
                &self.scene,
                &self.model,
                &self.camera,
                &self.projector(),
                &self.frame_params(),
                mx,
                my,
            )
        });
    }
}
