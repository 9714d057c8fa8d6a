pub mod reporter;

pub use reporter::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One column of the totals table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub const fn new(title: &'static str, width: usize, align: Align) -> Self {
        Self {
            title,
            width,
            align,
        }
    }

    /// Pads `value` to the column width. Longer values are kept whole.
    pub fn pad(&self, value: &str) -> String {
        match self.align {
            Align::Left => format!("{:<width$}", value, width = self.width),
            Align::Right => format!("{:>width$}", value, width = self.width),
        }
    }

    pub fn rule(&self) -> String {
        "-".repeat(self.width)
    }
}
