use crate::foundation::error::{CountryballError, CountryballResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Side length of the exported square image when nothing else is configured.
pub const DEFAULT_OUTPUT_SIZE: u32 = 400;

/// Default file name used when exporting the composited image.
pub const DEFAULT_EXPORT_NAME: &str = "countryball.png";

/// Which way the ball faces. Selects both the eye subfolder and the flag list.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Folder segment used in asset paths (`left` / `right`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = CountryballError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(CountryballError::validation(format!(
                "unknown side '{other}' (expected 'left' or 'right')"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Square output canvas. Sizes must fit the CPU rasterizer (`1..=u16::MAX`).
    pub fn square(size: u32) -> CountryballResult<Self> {
        if size == 0 {
            return Err(CountryballError::validation("output size must be > 0"));
        }
        if size > u32::from(u16::MAX) {
            return Err(CountryballError::validation(format!(
                "output size {size} exceeds {}",
                u16::MAX
            )));
        }
        Ok(Self {
            width: size,
            height: size,
        })
    }

    pub fn size(self) -> u32 {
        self.width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
