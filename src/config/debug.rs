//! Debugging feature flags.

pub struct LogFlags {
    /// Log candidate counts and the best distances found by the matcher.
    pub log_matcher: bool,

    /// Log every FALLBACK decision with its reason.
    pub log_classifier: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_matcher: false,
    log_classifier: true,
    log_performance: false,
};
