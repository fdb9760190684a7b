mod focus_pack;
mod matching;
mod paths;
mod scenario;

pub use {
    focus_pack::{
        Diagnostics, FocusMeta, FocusPack, Forecast, Overlay, OverlayMatch, PrimaryMatch,
        ScenarioBlock,
    },
    matching::{Match, MatchSet, MatchStats, PathPoint, PatternWindow, ReplayPath, WindowMatch},
    paths::{BandPoint, DivergenceSummary, SyntheticPath, UnifiedPath, UnifiedPathEntry},
    scenario::{
        DataStatus, DataStatusValue, FallbackReason, OutcomeStats, ScenarioCase, ScenarioLabel,
    },
};
