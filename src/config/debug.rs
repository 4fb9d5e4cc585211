//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every check site is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit the swing points and CHOCH/BOS decision for every analysed window.
    pub print_structure: bool,
    /// Emit the volume averages, ratios and flags behind each volume analysis.
    pub print_volume: bool,
    /// Emit which fakeout rule (if any) matched.
    pub print_fakeout: bool,
    /// Emit RSI / EMA values as they are computed.
    pub print_indicators: bool,
    /// Emit the step-by-step confidence ledger of the fusion engine.
    pub print_fusion: bool,
    /// Emit per-headline sentiment, relevance and impact scores.
    pub print_news_scoring: bool,
    /// Emit candle-set load/validation details.
    pub print_serde: bool,
    /// If non-empty, restrict fusion tracing to this timeframe label (e.g. "4h").
    pub print_fusion_for_timeframe: &'static str,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_structure: false,
    print_volume: false,
    print_fakeout: false,
    print_indicators: false,
    print_fusion: false,
    print_news_scoring: false,
    print_serde: false,
    print_fusion_for_timeframe: "",
};
