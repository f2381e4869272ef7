pub mod info_panel;
pub mod interactions;

// Re-exports
pub use interactions::setup_interactions;
