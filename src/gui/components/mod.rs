//! Panel components for the builder window.

pub mod field_detail;
pub mod field_list;
pub mod form_preview;
pub mod general_settings;
pub mod preview_panel;
