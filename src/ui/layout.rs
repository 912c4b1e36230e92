//! Terminal size breakpoints.

/// Terminal width breakpoints
pub mod breakpoints {
    /// Below this the heatmap is shown by month instead of by week
    pub const HEATMAP_WIDTH: u16 = 60;
    /// Below this the footer shows only the essential keys
    pub const SM_WIDTH: u16 = 80;
    /// Below this slides drop their secondary lines
    pub const SM_HEIGHT: u16 = 20;
}

/// Layout context holding terminal dimensions for responsive decisions.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_narrow(&self) -> bool {
        self.width < breakpoints::SM_WIDTH
    }

    pub fn is_short(&self) -> bool {
        self.height < breakpoints::SM_HEIGHT
    }

    /// Room for a week-per-column heatmap (53 columns plus labels).
    pub fn fits_week_heatmap(&self) -> bool {
        self.width >= breakpoints::HEATMAP_WIDTH + 8
    }

    /// Width of a horizontal bar that leaves room for a label and a value.
    pub fn bar_width(&self) -> u16 {
        self.width.saturating_sub(36).clamp(10, 40)
    }
}
