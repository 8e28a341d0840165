//! User-facing filter settings, sort modes and purpose presets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default search radius in metres
pub const DEFAULT_RADIUS_M: u32 = 2500;

/// How the filtered view is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Nearest first, ties by composite score
    #[default]
    Distance,
    /// Highest rating first, ties by distance
    Rating,
    /// Most ratings first, ties by rating
    Reviews,
    /// Highest composite score first, ties by distance
    Smart,
}

/// Shortcut configurations for a visit purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurposePreset {
    Work,
    Date,
    Friends,
    Quick,
}

/// Returned when parsing an unknown sort mode or preset name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [Self::Distance, Self::Rating, Self::Reviews, Self::Smart];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::Smart => "smart",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "sort mode",
                value: s.to_string(),
            })
    }
}

impl PurposePreset {
    pub const ALL: [PurposePreset; 4] = [Self::Work, Self::Date, Self::Friends, Self::Quick];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Date => "date",
            Self::Friends => "friends",
            Self::Quick => "quick",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "For work",
            Self::Date => "Date",
            Self::Friends => "With friends",
            Self::Quick => "Quick coffee",
        }
    }

    /// Settings the preset stands for
    pub fn settings(self) -> FilterSettings {
        let (radius_m, min_rating, open_now, sort_by) = match self {
            Self::Work => (1000, 4.0, true, SortMode::Rating),
            Self::Date => (2000, 4.3, false, SortMode::Smart),
            Self::Friends => (3000, 4.0, false, SortMode::Reviews),
            Self::Quick => (500, 3.5, true, SortMode::Distance),
        };
        FilterSettings {
            radius_m,
            keyword: String::new(),
            min_rating,
            min_reviews: 0,
            open_now,
            sort_by,
            preset: Some(self),
        }
    }
}

impl fmt::Display for PurposePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurposePreset {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "preset",
                value: s.to_string(),
            })
    }
}

/// Criteria applied to raw search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Maximum distance from the user; 0 disables the radius check
    pub radius_m: u32,
    /// Substring matched against name and vicinity
    pub keyword: String,
    /// Places below this rating are dropped when greater than zero
    pub min_rating: f64,
    /// Places with fewer ratings are dropped when greater than zero
    pub min_reviews: u32,
    pub open_now: bool,
    pub sort_by: SortMode,
    /// Preset the settings came from, cleared by manual edits
    pub preset: Option<PurposePreset>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            keyword: String::new(),
            min_rating: 0.0,
            min_reviews: 0,
            open_now: false,
            sort_by: SortMode::default(),
            preset: None,
        }
    }
}

impl FilterSettings {
    /// Overwrite everything with the preset's values
    pub fn apply_preset(&mut self, preset: PurposePreset) {
        *self = preset.settings();
    }

    /// Clamp out-of-range values coming from user input or stored state
    pub fn normalized(mut self) -> Self {
        self.min_rating = if self.min_rating.is_finite() {
            self.min_rating.clamp(0.0, 5.0)
        } else {
            0.0
        };
        self.keyword = self.keyword.trim().to_string();
        self
    }
}
