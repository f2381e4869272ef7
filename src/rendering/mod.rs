pub mod camera;
pub mod frame;
pub mod painter;
pub mod palette;
pub mod picker;
pub mod projector;
pub mod scene;
pub mod trail;

// Re-export the draw entry point to keep the API clean for the rest of the app
pub use frame::setup_drawing;
