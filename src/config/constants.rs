//! Forecast constants (Immutable Blueprints)

pub mod matcher {
    /// Shortest series (in candles) the engine accepts at all.
    pub const MIN_LOOKBACK: usize = 7;
    /// Hard cap on candidate windows scored per call. Keeps latency bounded on deep history.
    pub const MAX_SCAN_WINDOWS: usize = 2_000;
    /// Added to every distance before inverting it into a weight (exact matches stay finite).
    pub const DISTANCE_EPSILON: f64 = 1e-6;
}

pub mod bands {
    use crate::config::BandQuantiles;

    pub const P10: f64 = 0.10;
    pub const P50: f64 = 0.50;
    pub const P90: f64 = 0.90;
    pub const TAIL_RISK: f64 = 0.95;

    pub const DEFAULT: BandQuantiles = BandQuantiles {
        low: P10,
        mid: P50,
        high: P90,
    };
}

pub mod quality {
    use crate::utils::TimeUtils;

    /// Mean relative gap between best replay and synthetic path above which the pack is FALLBACK.
    pub const HIGH_DIVERGENCE_THRESHOLD: f64 = 0.25;
    pub const STALENESS_WINDOW_MS: i64 = TimeUtils::MS_IN_D * 3;
}

pub mod horizons {
    use crate::domain::{Horizon, HorizonSpec, RenderBucket};

    /// Order must follow the `Horizon` declaration order (indexed by discriminant).
    pub const TABLE: &[HorizonSpec] = &[
        HorizonSpec {
            horizon: Horizon::D7,
            days: 7,
            required_matches: 30,
            lookback: 30,
            scan_stride: 5,
            render_bucket: RenderBucket::Daily,
        },
        HorizonSpec {
            horizon: Horizon::D14,
            days: 14,
            required_matches: 25,
            lookback: 30,
            scan_stride: 7,
            render_bucket: RenderBucket::Daily,
        },
        HorizonSpec {
            horizon: Horizon::D30,
            days: 30,
            required_matches: 20,
            lookback: 45,
            scan_stride: 10,
            render_bucket: RenderBucket::Daily,
        },
        HorizonSpec {
            horizon: Horizon::D90,
            days: 90,
            required_matches: 15,
            lookback: 60,
            scan_stride: 15,
            render_bucket: RenderBucket::Weekly,
        },
        HorizonSpec {
            horizon: Horizon::D180,
            days: 180,
            required_matches: 12,
            lookback: 90,
            scan_stride: 20,
            render_bucket: RenderBucket::Weekly,
        },
        HorizonSpec {
            horizon: Horizon::D365,
            days: 365,
            required_matches: 10,
            lookback: 120,
            scan_stride: 30,
            render_bucket: RenderBucket::Monthly,
        },
    ];
}
