//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so
//! normal runs stay quiet. Everything reading these flags is additionally
//! gated behind `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit pair-scan job counts and completion summaries.
    pub print_pair_scan: bool,
    /// Emit per-series trend label summaries after labeling.
    pub print_trend_summary: bool,
    /// Emit detailed serialization/deserialization logs for the series cache.
    pub print_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_pair_scan: false,
    print_trend_summary: false,
    print_serde: false,
};
