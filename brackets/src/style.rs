//! Style configuration for layout and rendering. All distances in pixels;
//! the terminal viewer feeds cell units through the same struct.

/// Caller-supplied round label override: `(round_number, total_rounds)`,
/// 1-based.
pub type RoundLabelFn = fn(usize, usize) -> String;

#[derive(Debug, Clone)]
pub struct RoundHeaderStyle {
    pub is_shown: bool,
    pub height: f64,
    pub font_size: f64,
    pub font_color: String,
    pub background_color: String,
    pub font_family: String,
    pub round_text_generator: Option<RoundLabelFn>,
}

impl Default for RoundHeaderStyle {
    fn default() -> Self {
        Self {
            is_shown: true,
            height: 40.0,
            font_size: 16.0,
            font_color: "#e2e8f0".to_string(),
            background_color: "#2d3748".to_string(),
            font_family: "monospace".to_string(),
            round_text_generator: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BracketStyle {
    /// Match box width.
    pub width: f64,
    /// Match box height.
    pub box_height: f64,
    /// Outer canvas padding.
    pub canvas_padding: f64,
    pub space_between_columns: f64,
    pub space_between_rows: f64,
    pub connector_color: String,
    pub connector_color_highlight: String,
    pub round_header: RoundHeaderStyle,
    pub won_by_walk_over_text: String,
    pub lost_by_no_show_text: String,
}

impl Default for BracketStyle {
    fn default() -> Self {
        Self {
            width: 220.0,
            box_height: 64.0,
            canvas_padding: 20.0,
            space_between_columns: 48.0,
            space_between_rows: 16.0,
            connector_color: "#718096".to_string(),
            connector_color_highlight: "#dd6b20".to_string(),
            round_header: RoundHeaderStyle::default(),
            won_by_walk_over_text: "Won by walkover".to_string(),
            lost_by_no_show_text: "Lost by no-show".to_string(),
        }
    }
}

impl BracketStyle {
    /// Vertical slot unit: box plus inter-row gap.
    pub fn row_height(&self) -> f64 {
        self.box_height + self.space_between_rows
    }

    /// Horizontal column stride: box plus inter-column gap.
    pub fn column_width(&self) -> f64 {
        self.width + self.space_between_columns
    }

    /// Vertical space reserved above the bracket for the header band.
    pub fn header_offset(&self) -> f64 {
        if self.round_header.is_shown {
            self.round_header.height + self.space_between_rows
        } else {
            0.0
        }
    }

    /// Label for a 1-based round number, honoring the caller's generator.
    pub fn round_title(&self, round_number: usize, total_rounds: usize) -> String {
        match self.round_header.round_text_generator {
            Some(generate) => generate(round_number, total_rounds),
            None => default_round_title(round_number, total_rounds),
        }
    }
}

/// "Round N" until the last two rounds, then "Semi-final" and "Final".
pub fn default_round_title(round_number: usize, total_rounds: usize) -> String {
    if total_rounds > 1 && round_number == total_rounds {
        "Final".to_string()
    } else if total_rounds > 2 && round_number + 1 == total_rounds {
        "Semi-final".to_string()
    } else {
        format!("Round {round_number}")
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
