//! Hex colour helpers and the chart palettes.

use crate::error::DashboardError;

pub const BACKGROUND: &str = "#1e1e1e";
pub const TEXT: &str = "#f0f0f0";
/// Fill for countries with no movies on the map.
pub const LAND: &str = "#333333";

pub const ORANGE: &str = "#FFA500";
pub const BLUE: &str = "#1E90FF";
pub const GREEN: &str = "#2BA42B";

/// Scale each RGB channel of `#rrggbb` by `factor`, clamped to 0..=255.
/// A factor above 1 lightens, below 1 darkens.
pub fn adjust_color(hex: &str, factor: f64) -> Result<String, DashboardError> {
    let (r, g, b) = parse_hex(hex)?;
    let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
    Ok(format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b)))
}

fn parse_hex(hex: &str) -> Result<(u8, u8, u8), DashboardError> {
    let invalid = || DashboardError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| {
        expanded
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(invalid)
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// A three-step colour gradient, low to high.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub steps: [String; 3],
}

impl Palette {
    pub fn new(low: &str, mid: &str, high: &str) -> Self {
        Self {
            steps: [low.to_string(), mid.to_string(), high.to_string()],
        }
    }

    /// Lighter, base, darker.
    pub fn scale(base: &str) -> Result<Self, DashboardError> {
        Ok(Self {
            steps: [
                adjust_color(base, 1.5)?,
                base.to_string(),
                adjust_color(base, 0.5)?,
            ],
        })
    }

    pub fn orange() -> Self {
        Self::new("#FFCC66", ORANGE, "#FF8800")
    }

    pub fn blue() -> Self {
        Self::new("#66B2FF", BLUE, "#125E99")
    }

    pub fn green() -> Self {
        Self::new("#70D070", GREEN, "#238C23")
    }

    /// Plotly `colorscale` value: `[[0, low], [0.5, mid], [1, high]]`.
    pub fn colorscale(&self) -> serde_json::Value {
        serde_json::json!([
            [0.0, self.steps[0]],
            [0.5, self.steps[1]],
            [1.0, self.steps[2]],
        ])
    }
}
