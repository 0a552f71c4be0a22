//! egui/eframe shell for the builder.

pub mod builder;
pub mod components;
pub mod constants;

pub use builder::run_gui;
