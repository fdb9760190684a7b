mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{AppInstant, TimeUtils, epoch_ms_to_utc, format_duration};

pub(crate) use maths_utils::{max_drawdown, normalize_from_start, rms_distance, weighted_percentiles};
