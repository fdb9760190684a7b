use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::constants::horizons;

/// Forward-looking forecast bucket. Everything horizon-specific lives in [`HorizonSpec`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    Default,
)]
pub enum Horizon {
    #[serde(rename = "7d")]
    #[strum(to_string = "7d")]
    D7,
    #[serde(rename = "14d")]
    #[strum(to_string = "14d")]
    D14,
    #[default]
    #[serde(rename = "30d")]
    #[strum(to_string = "30d")]
    D30,
    #[serde(rename = "90d")]
    #[strum(to_string = "90d")]
    D90,
    #[serde(rename = "180d")]
    #[strum(to_string = "180d")]
    D180,
    #[serde(rename = "365d")]
    #[strum(to_string = "365d")]
    D365,
}

/// How a presentation layer should bucket the x-axis for this horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBucket {
    Daily,
    Weekly,
    Monthly,
}

/// One row of the horizon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonSpec {
    pub horizon: Horizon,
    /// Forward days evaluated; also the day the scenario is read at.
    pub days: usize,
    /// K(h): matches the forecast wants before it calls itself REAL.
    pub required_matches: usize,
    /// Candles in the query window.
    pub lookback: usize,
    /// Distance (in candles) between consecutive candidate windows.
    pub scan_stride: usize,
    pub render_bucket: RenderBucket,
}

impl Horizon {
    pub fn spec(self) -> &'static HorizonSpec {
        &horizons::TABLE[self as usize]
    }

    pub fn days(self) -> usize {
        self.spec().days
    }

    pub fn required_matches(self) -> usize {
        self.spec().required_matches
    }
}
