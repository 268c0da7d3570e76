//! Color assignment.
//!
//! Two independent color spaces by default:
//! - the **category scale** colors bars and the bar legend, keyed by
//!   `program_types` ordinal;
//! - the **fill legend** is the distinct map-fill colors from the payload's
//!   `color_code`, in first-seen order.
//!
//! Whether the UI presents one legend or two is `ColorMode` in `cm_core`;
//! the functions here never mix the spaces themselves.

/// Category palette (d3 category10 plus three house colors), used when the
/// server does not provide a legend of its own.
pub const DEFAULT_PALETTE: [&str; 13] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
    "#7f7f7f", "#bcbd22", "#17becf", "#749da1", "#424c51", "#eb9191",
];

/// Fill/bar color for anything outside the category universe, and for states
/// the payload assigns no fill.
pub const NEUTRAL_COLOR: &str = "#d3d3d3";

/// Ordinal category → color scale over the `program_types` universe.
///
/// Within one session this is a pure function: the same category always
/// returns the same color, and legend swatches come from the same table the
/// bars use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryScale {
    domain: Vec<String>,
    range: Vec<String>,
}

impl CategoryScale {
    /// Build the scale from the category universe and an optional
    /// server-provided legend. A provided legend wins over the default
    /// palette; either way colors repeat modulo the range length when the
    /// domain is longer (ordinal-scale semantics).
    pub fn new(program_types: &[String], provided: Option<&[String]>) -> Self {
        let range: Vec<String> = match provided {
            Some(colors) if !colors.is_empty() => colors.to_vec(),
            _ => DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        };
        Self { domain: program_types.to_vec(), range }
    }

    /// Total function: unknown categories get the neutral color, never an
    /// error.
    pub fn color_of(&self, category: &str) -> &str {
        match self.domain.iter().position(|c| c == category) {
            Some(i) => &self.range[i % self.range.len()],
            None => NEUTRAL_COLOR,
        }
    }

    /// One swatch per category, in universe order.
    pub fn swatches(&self) -> Vec<&str> {
        self.domain.iter().map(|c| self.color_of(c)).collect()
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Distinct map-fill colors in first-seen order (dedup by exact string
/// equality), independent of the category scale.
pub fn fill_legend_swatches(color_code: &[(String, String)]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (_, color) in color_code {
        if !out.iter().any(|c| c == color) {
            out.push(color.clone());
        }
    }
    out
}
