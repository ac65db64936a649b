//! Debugging feature flags.

pub struct LogFlags {
    /// Per-asset evaluation summary from the engine.
    pub log_engine_core: bool,

    /// Indicator fallbacks (insufficient history, flat series).
    pub log_indicators: bool,

    /// Pillar scores and triggered amplifiers.
    pub log_composite: bool,

    pub log_canaries: bool,

    /// Background worker job timings
    pub log_worker: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_worker: true,

    log_engine_core: false,
    log_indicators: false,
    log_composite: false,
    log_canaries: false,
    log_performance: false,
};
