/// How finite floats are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatStyle {
    /// Shortest round-trip form, exponent allowed (`1.0`, `1e100`, `-0.0`).
    #[default]
    Shortest,
    /// Plain decimal: no exponent, no trailing fractional zeros, `-0` as `0`.
    Plain,
}

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Hard cap on `max_depth`. Nesting recurses on the native stack, and this
/// many levels fit in a 2 MiB thread stack with unoptimized code.
pub const MAX_DEPTH_CEILING: usize = 512;

#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of nested composites (the root composite counts as 1).
    /// Values above [`MAX_DEPTH_CEILING`] act as the ceiling.
    pub max_depth: usize,
    pub float_style: FloatStyle,
}

impl Options {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_float_style(mut self, float_style: FloatStyle) -> Self {
        self.float_style = float_style;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            float_style: FloatStyle::default(),
        }
    }
}
