//! Analysis and computation configuration

/// Swing point detection
pub struct SwingSettings {
    // Candles either side of a pivot that must be strictly beaten
    pub radius: usize,
}

/// CHOCH / BOS market structure settings
pub struct StructureSettings {
    // Trailing window inspected for swing points (also the minimum series length)
    pub window: usize,
    // Trailing candles scored for aggressiveness
    pub aggressiveness_window: usize,
    pub aggressiveness_cap: f64,
    // Base strength of an overlap CHOCH, before the overlap bonus
    pub overlap_base_strength: f64,
    pub overlap_strength_bonus: f64,
    // Aggressiveness credited per unit of overlap factor
    pub overlap_aggressiveness_bonus: f64,
    pub fallback_base_strength: f64,
    pub max_strength: f64,
    // BOS looks at this many trailing candles and ignores the newest `bos_exclude_recent` when
    // building the reference level
    pub bos_window: usize,
    pub bos_exclude_recent: usize,
}

/// Volume behaviour thresholds (all ratios are against the trailing average volume)
pub struct VolumeSettings {
    pub window: usize,
    pub absorption_volume_ratio: f64,
    // Body must stay under this share of the candle range to count as absorption
    pub absorption_max_body_ratio: f64,
    pub divergence_volume_ratio: f64,
    pub climax_volume_ratio: f64,
    pub fakeout_body_ratio: f64,
    pub fakeout_drop_ratio: f64,
    pub fakeout_volume_ratio: f64,
}

/// Five-candle fakeout detector thresholds
pub struct FakeoutSettings {
    pub window: usize,
    pub big_body_ratio: f64,
    pub inside_volume_ratio: f64,
    pub breakout_volume_ratio: f64,
    pub engulfing_volume_ratio: f64,
    pub climax_volume_ratio: f64,
    pub rejection_wick_ratio: f64,
    pub failed_breakout_volume_ratio: f64,
    pub compression_volume_ratio: f64,
    pub spring_volume_ratio: f64,
}

/// RSI / EMA indicator layer
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub agree_confidence: u8,
    pub single_confidence: u8,
    pub conflict_confidence: u8,
    pub neutral_confidence: u8,
}

/// Dashboard indicator panel periods
pub struct PanelSettings {
    pub ema_periods: [usize; 3],
    pub sma_periods: [usize; 3],
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub mfi_period: usize,
    pub atr_period: usize,
}

/// Entry / target / stop sizing
pub struct RiskSettings {
    pub min_candles: usize,
    pub atr_period: usize,
    pub level_window: usize,
    // Targets and stops placed against a level sit this far inside it
    pub level_buffer: f64,
    pub min_tick: f64,
}

/// Structural + indicator + news fusion weights
pub struct FusionSettings {
    pub base_confidence: u8,
    pub strong_choch_aggressiveness: f64,
    pub strong_choch_bonus: u8,
    pub choch_bonus: u8,
    pub bos_bonus: u8,
    pub absorption_bonus: u8,
    pub divergence_bonus: u8,
    pub promote_threshold: u8,
    pub reversal_min_fakeout_confidence: u8,
    pub confluence_bonus: u8,
    pub weak_signal_penalty: u8,
    pub weak_signal_floor: u8,
    pub conflict_confidence: u8,
    pub news_agree_bonus: u8,
    pub news_conflict_confidence: u8,
    pub news_only_confidence: u8,
    pub min_confidence: u8,
    pub max_confidence: u8,
}

/// Multi-timeframe roll-up
pub struct AggregationSettings {
    // A timeframe needs this many candles or it gets the placeholder signal
    pub min_candles: usize,
    pub min_winning_score: f64,
    pub default_confidence: u8,
    pub max_confidence: u8,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub swing: SwingSettings,
    pub structure: StructureSettings,
    pub volume: VolumeSettings,
    pub fakeout: FakeoutSettings,
    pub indicators: IndicatorSettings,
    pub panel: PanelSettings,
    pub risk: RiskSettings,
    pub fusion: FusionSettings,
    pub aggregation: AggregationSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    swing: SwingSettings { radius: 3 },

    structure: StructureSettings {
        window: 20,
        aggressiveness_window: 10,
        aggressiveness_cap: 25.0,
        overlap_base_strength: 75.0,
        overlap_strength_bonus: 20.0,
        overlap_aggressiveness_bonus: 15.0,
        fallback_base_strength: 70.0,
        max_strength: 95.0,
        bos_window: 10,
        bos_exclude_recent: 3,
    },

    volume: VolumeSettings {
        window: 20,
        absorption_volume_ratio: 1.8,
        absorption_max_body_ratio: 0.4,
        divergence_volume_ratio: 0.8,
        climax_volume_ratio: 3.0,
        fakeout_body_ratio: 0.7,
        fakeout_drop_ratio: 0.6,
        fakeout_volume_ratio: 0.6,
    },

    fakeout: FakeoutSettings {
        window: 5,
        big_body_ratio: 0.7,
        inside_volume_ratio: 0.8,
        breakout_volume_ratio: 1.2,
        engulfing_volume_ratio: 1.5,
        climax_volume_ratio: 2.0,
        rejection_wick_ratio: 0.5,
        failed_breakout_volume_ratio: 0.8,
        compression_volume_ratio: 0.7,
        spring_volume_ratio: 1.5,
    },

    indicators: IndicatorSettings {
        rsi_period: 14,
        rsi_oversold: 30.0,
        rsi_overbought: 70.0,
        ema_fast: 9,
        ema_mid: 21,
        ema_slow: 90,
        agree_confidence: 85,
        single_confidence: 65,
        conflict_confidence: 40,
        neutral_confidence: 50,
    },

    panel: PanelSettings {
        ema_periods: [12, 26, 50],
        sma_periods: [20, 50, 200],
        rsi_period: 14,
        macd_fast: 12,
        macd_slow: 26,
        macd_signal: 9,
        mfi_period: 14,
        atr_period: 14,
    },

    risk: RiskSettings {
        min_candles: 20,
        atr_period: 14,
        level_window: 20,
        level_buffer: 0.02,
        min_tick: 0.01,
    },

    fusion: FusionSettings {
        base_confidence: 50,
        strong_choch_aggressiveness: 15.0,
        strong_choch_bonus: 25,
        choch_bonus: 20,
        bos_bonus: 15,
        absorption_bonus: 12,
        divergence_bonus: 10,
        promote_threshold: 70,
        reversal_min_fakeout_confidence: 75,
        confluence_bonus: 15,
        weak_signal_penalty: 10,
        weak_signal_floor: 40,
        conflict_confidence: 45,
        news_agree_bonus: 15,
        news_conflict_confidence: 50,
        news_only_confidence: 60,
        min_confidence: 10,
        max_confidence: 95,
    },

    aggregation: AggregationSettings {
        min_candles: 20,
        min_winning_score: 0.4,
        default_confidence: 50,
        max_confidence: 95,
    },
};
