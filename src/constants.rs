//! Visual constants for the overlay engine

/// Fill/stroke opacity and stroke multiplier per emphasis rule
pub mod emphasis {
    pub const BASE_FILL_OPACITY: f32 = 0.15;
    pub const BASE_STROKE_OPACITY: f32 = 0.8;

    pub const SELECTED_FILL_OPACITY: f32 = 0.35;
    pub const SELECTED_STROKE_OPACITY: f32 = 1.0;
    pub const SELECTED_STROKE_SCALE: f32 = 1.6;

    pub const HOVER_FILL_OPACITY: f32 = 0.25;
    pub const HOVER_STROKE_OPACITY: f32 = 0.9;
    pub const HOVER_STROKE_SCALE: f32 = 1.2;

    pub const PRESSED_FILL_OPACITY: f32 = 0.45;
    pub const PRESSED_STROKE_OPACITY: f32 = 1.0;
    /// Also the largest on-screen stroke, as a multiple of the base width
    pub const PRESSED_STROKE_SCALE: f32 = 2.0;

    /// Applied to unselected, unhovered annotations while a selection exists
    pub const DIM_FILL_FACTOR: f32 = 0.6;
    pub const DIM_STROKE_FACTOR: f32 = 0.7;
}

/// Smallest on-screen stroke width in surface pixels
pub const MIN_STROKE_WIDTH: f32 = 1.5;

/// How long a press stays emphasized, in milliseconds
pub const PRESS_DURATION_MS: u64 = 200;

/// Default display option values
pub mod display {
    pub const MASK_OPACITY: f32 = 0.5;
    pub const STROKE_WIDTH: f32 = 2.0;
}

/// Surface-pixel geometry of labels, badges and selection indicators
pub mod decoration {
    pub const BOX_DASH: (f32, f32) = (4.0, 4.0);

    pub const LABEL_OFFSET_Y: f32 = 20.0;
    pub const LABEL_WIDTH: f32 = 40.0;
    pub const LABEL_HEIGHT: f32 = 18.0;
    pub const LABEL_RADIUS: f32 = 2.0;
    pub const LABEL_OPACITY: f32 = 0.9;
    pub const LABEL_TEXT_INSET_X: f32 = 4.0;
    pub const LABEL_TEXT_OFFSET_Y: f32 = 8.0;
    pub const LABEL_FONT_SIZE: f32 = 12.0;

    pub const INDICATOR_PADDING: f32 = 4.0;
    pub const INDICATOR_RADIUS: f32 = 4.0;
    pub const INDICATOR_DASH: (f32, f32) = (4.0, 2.0);
    pub const INDICATOR_STROKE_WIDTH: f32 = 2.0;

    pub const BADGE_RADIUS: f32 = 12.0;
    pub const BADGE_OPACITY: f32 = 0.8;
    pub const BADGE_STROKE_WIDTH: f32 = 1.5;
    pub const BADGE_FONT_SIZE: f32 = 10.0;
    /// Baseline offset below the badge center that visually centers the text
    pub const BADGE_TEXT_OFFSET_Y: f32 = 3.5;

    pub const SKETCH_STROKE_WIDTH: f32 = 2.0;
}
