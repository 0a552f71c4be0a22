//! GUI-specific constants for window sizing and layout spacing

/// Builder window dimensions
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 820.0;
pub const WINDOW_MIN_WIDTH: f32 = 960.0;
pub const WINDOW_MIN_HEIGHT: f32 = 640.0;

/// Side panel widths
pub const FIELD_PANEL_WIDTH: f32 = 430.0;
pub const PREVIEW_PANEL_WIDTH: f32 = 430.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Input widths
pub const KEY_INPUT_WIDTH: f32 = 140.0;
pub const TYPE_SELECT_WIDTH: f32 = 90.0;
pub const GROUP_INPUT_WIDTH: f32 = 110.0;
