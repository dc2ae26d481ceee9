//! Cards and the knobs that shape a generation request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SCENE_COUNT, MAX_SCENE_COUNT, MIN_SCENE_COUNT};
use crate::error::CardNewsError;

/// One generated slide: a title, a couple of sentences and an image.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Position in the deck, as numbered by the model.
    pub id: i64,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Image resolved from the model's keyword.
    pub image_url: String,
}

/// Shape of the rendered card.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 16:9
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Every ratio, in display order.
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
    ];

    /// Wire value, eg `16:9`.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }

    /// Label for the settings panel.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1 square",
            AspectRatio::Landscape => "16:9 landscape",
            AspectRatio::Portrait => "9:16 portrait",
        }
    }

    /// Orientation word used in the prompt.
    pub fn orientation(self) -> &'static str {
        match self {
            AspectRatio::Square => "square",
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = CardNewsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == value.trim())
            .ok_or_else(|| CardNewsError::BadRequest(format!("Unknown aspect ratio: {value}")))
    }
}

/// Output resolution class.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// 2K, the default
    #[default]
    #[serde(rename = "2K")]
    TwoK,
    /// 4K
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    /// Every resolution, in display order.
    pub const ALL: [Resolution; 2] = [Resolution::TwoK, Resolution::FourK];

    /// Wire value, eg `4K`.
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        }
    }
}

impl FromStr for Resolution {
    type Err = CardNewsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| CardNewsError::BadRequest(format!("Unknown resolution: {value}")))
    }
}

/// Pixel size of a rendered card.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Output size for a ratio at a resolution class.
    pub fn for_output(ratio: AspectRatio, resolution: Resolution) -> Self {
        let (width, height) = match (ratio, resolution) {
            (AspectRatio::Square, Resolution::TwoK) => (1080, 1080),
            (AspectRatio::Square, Resolution::FourK) => (2160, 2160),
            (AspectRatio::Landscape, Resolution::TwoK) => (1920, 1080),
            (AspectRatio::Landscape, Resolution::FourK) => (3840, 2160),
            (AspectRatio::Portrait, Resolution::TwoK) => (1080, 1920),
            (AspectRatio::Portrait, Resolution::FourK) => (2160, 3840),
        };
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Voice the script is written in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStyle {
    /// Modern minimal
    #[default]
    Modern,
    /// Formal business
    Formal,
    /// Casual and friendly
    Casual,
    /// Creative
    Creative,
}

impl ScriptStyle {
    /// Every style, in display order.
    pub const ALL: [ScriptStyle; 4] = [
        ScriptStyle::Modern,
        ScriptStyle::Formal,
        ScriptStyle::Casual,
        ScriptStyle::Creative,
    ];

    /// Wire value, eg `casual`.
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptStyle::Modern => "modern",
            ScriptStyle::Formal => "formal",
            ScriptStyle::Casual => "casual",
            ScriptStyle::Creative => "creative",
        }
    }

    /// Label for the settings panel.
    pub fn label(self) -> &'static str {
        match self {
            ScriptStyle::Modern => "Modern minimal",
            ScriptStyle::Formal => "Formal business",
            ScriptStyle::Casual => "Casual friendly",
            ScriptStyle::Creative => "Creative",
        }
    }

    /// Tone rule handed to the model.
    pub fn tone_instruction(self) -> &'static str {
        match self {
            ScriptStyle::Modern => {
                "Use a modern, minimal tone: short plain sentences with no filler."
            }
            ScriptStyle::Formal => "Use a formal business tone suitable for a company report.",
            ScriptStyle::Casual => "Use a casual, friendly tone as if talking to a friend.",
            ScriptStyle::Creative => "Use a creative tone with vivid, playful language.",
        }
    }
}

impl FromStr for ScriptStyle {
    type Err = CardNewsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        ScriptStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| CardNewsError::BadRequest(format!("Unknown script style: {value}")))
    }
}

/// Everything besides the topic that shapes the prompt.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Number of cards to ask for, always within `1..=20`.
    pub scene_count: u8,
    /// Card shape
    pub aspect_ratio: AspectRatio,
    /// Resolution class
    pub resolution: Resolution,
    /// Script tone
    pub script_style: ScriptStyle,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            scene_count: DEFAULT_SCENE_COUNT,
            aspect_ratio: AspectRatio::default(),
            resolution: Resolution::default(),
            script_style: ScriptStyle::default(),
        }
    }
}

impl GenerationOptions {
    /// Builds options from optional raw values; absent values take defaults.
    pub fn from_parts(
        scene_count: Option<i64>,
        aspect_ratio: Option<&str>,
        resolution: Option<&str>,
        script_style: Option<&str>,
    ) -> Result<Self, CardNewsError> {
        let defaults = Self::default();
        Ok(Self {
            scene_count: scene_count.map_or(defaults.scene_count, clamp_scene_count),
            aspect_ratio: parse_or_default(aspect_ratio)?,
            resolution: parse_or_default(resolution)?,
            script_style: parse_or_default(script_style)?,
        })
    }

    /// Output size implied by the ratio and resolution.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::for_output(self.aspect_ratio, self.resolution)
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, CardNewsError>
where
    T: FromStr<Err = CardNewsError> + Default,
{
    match value.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse(),
    }
}

/// Pins a requested scene count into the supported range.
pub fn clamp_scene_count(requested: i64) -> u8 {
    let clamped = requested.clamp(i64::from(MIN_SCENE_COUNT), i64::from(MAX_SCENE_COUNT));
    u8::try_from(clamped).unwrap_or(DEFAULT_SCENE_COUNT)
}
