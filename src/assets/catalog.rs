//! Fixed asset tables and path layout under the assets root.
//!
//! ```text
//! assets/template/<base|mask>
//! assets/eyes.s1/<lefteyes|righteyes>/<lefteyes|righteyes><n>.png
//! assets/<eyes.s2|eyes.s3>/<file>
//! assets/flag/<left|right>/<file>
//! assets/flag/thumb/<file>
//! ```

use crate::{
    foundation::core::Side,
    foundation::error::{CountryballError, CountryballResult},
    state::layer::EyeMode,
};

const TEMPLATE_DIR: &str = "assets/template";
const FLAG_DIR: &str = "assets/flag";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A template overlay paired with the cutout mask that shapes the background.
pub struct TemplateAsset {
    pub base: &'static str,
    pub mask: &'static str,
}

impl TemplateAsset {
    pub fn base_path(&self) -> String {
        format!("{TEMPLATE_DIR}/{}", self.base)
    }

    pub fn mask_path(&self) -> String {
        format!("{TEMPLATE_DIR}/{}", self.mask)
    }
}

pub const TEMPLATES: [TemplateAsset; 4] = [
    TemplateAsset {
        base: "circle_template.png",
        mask: "cutout.png",
    },
    TemplateAsset {
        base: "oval_template.png",
        mask: "oval_template.cutout.png",
    },
    TemplateAsset {
        base: "template3.png",
        mask: "cutout.png",
    },
    TemplateAsset {
        base: "template4.png",
        mask: "cutout.png",
    },
];

/// Template entry at `index`.
pub fn template(index: usize) -> CountryballResult<&'static TemplateAsset> {
    TEMPLATES.get(index).ok_or_else(|| {
        CountryballError::validation(format!(
            "template index {index} out of range (0..{})",
            TEMPLATES.len()
        ))
    })
}

const EYES_S1_PER_SIDE: usize = 11;

const EYES_S2: [&str; 13] = [
    "21.png", "23.png", "24.png", "22.png", "25.png", "26.png", "27.png", "28.png", "29.png",
    "210.png", "211.png", "212.png", "213.png",
];

const EYES_S3: [&str; 11] = [
    "20250417_095053.png",
    "20250417_095241.png",
    "20250417_095250.png",
    "20250417_095738.png",
    "20250417_100100.png",
    "20250417_100119.png",
    "20250417_100159.png",
    "20250417_100226.png",
    "20250417_100246.png",
    "20250417_100328.png",
    "countryballs_girl_eyes_scared__by_nightprid_dg7xly8-pre.png",
];

/// Eye graphic family. `eyes.s1` is authored to fill the whole frame and comes in a left and a
/// right facing variant; the other styles are side-independent and user-positioned.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EyeStyle {
    #[default]
    #[serde(rename = "eyes.s1")]
    S1,
    #[serde(rename = "eyes.s2")]
    S2,
    #[serde(rename = "eyes.s3")]
    S3,
}

impl EyeStyle {
    pub const ALL: [EyeStyle; 3] = [Self::S1, Self::S2, Self::S3];

    /// Identifier used in asset folders and configuration (`eyes.s1`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Self::S1 => "eyes.s1",
            Self::S2 => "eyes.s2",
            Self::S3 => "eyes.s3",
        }
    }

    pub fn eye_mode(self) -> EyeMode {
        match self {
            Self::S1 => EyeMode::FullFrame,
            Self::S2 | Self::S3 => EyeMode::Adjustable,
        }
    }

    /// Number of eye graphics available in this style (per side for `eyes.s1`).
    pub fn count(self) -> usize {
        match self {
            Self::S1 => EYES_S1_PER_SIDE,
            Self::S2 => EYES_S2.len(),
            Self::S3 => EYES_S3.len(),
        }
    }

    /// Asset path of eye graphic `index` facing `side`.
    pub fn eye_path(self, index: usize, side: Side) -> CountryballResult<String> {
        if index >= self.count() {
            return Err(CountryballError::validation(format!(
                "eye index {index} out of range for {} (0..{})",
                self.id(),
                self.count()
            )));
        }
        Ok(match self {
            Self::S1 => {
                let folder = match side {
                    Side::Left => "lefteyes",
                    Side::Right => "righteyes",
                };
                format!("assets/{}/{folder}/{folder}{}.png", self.id(), index + 1)
            }
            Self::S2 => format!("assets/{}/{}", self.id(), EYES_S2[index]),
            Self::S3 => format!("assets/{}/{}", self.id(), EYES_S3[index]),
        })
    }
}

impl std::fmt::Display for EyeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for EyeStyle {
    type Err = CountryballError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.id() == s || style.id().trim_start_matches("eyes.") == s)
            .ok_or_else(|| CountryballError::validation(format!("unknown eye style '{s}'")))
    }
}

/// Ordered flag file names per side plus the combined thumbnail list used by search.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FlagLists {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub thumb: Vec<String>,
}

// Keys may be missing or null in the manifest; both mean "empty".
#[derive(serde::Deserialize)]
struct RawFlagLists {
    #[serde(default)]
    left: Option<Vec<String>>,
    #[serde(default)]
    right: Option<Vec<String>>,
    #[serde(default)]
    thumb: Option<Vec<String>>,
}

impl FlagLists {
    /// Parse the `flags.json` manifest.
    pub fn from_json(bytes: &[u8]) -> CountryballResult<Self> {
        let raw: RawFlagLists = serde_json::from_slice(bytes)
            .map_err(|e| CountryballError::serde(format!("invalid flag list: {e}")))?;
        Ok(Self {
            left: raw.left.unwrap_or_default(),
            right: raw.right.unwrap_or_default(),
            thumb: raw.thumb.unwrap_or_default(),
        })
    }

    pub fn for_side(&self, side: Side) -> &[String] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Position of `name` in the list for `side`.
    pub fn index_on_side(&self, side: Side, name: &str) -> Option<usize> {
        self.for_side(side).iter().position(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.thumb.is_empty()
    }
}

pub fn flag_path(side: Side, file: &str) -> String {
    format!("{FLAG_DIR}/{side}/{file}")
}

pub fn flag_thumb_path(file: &str) -> String {
    format!("{FLAG_DIR}/thumb/{file}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
