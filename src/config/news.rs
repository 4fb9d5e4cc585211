//! News sentiment configuration

pub struct ImpactWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

pub struct NewsConfig {
    // Upper bound on the whole sentiment fetch (all sources, in order)
    pub fetch_timeout_ms: u64,
    // Weighted score thresholds for overall sentiment (score range is -100..=100)
    pub bullish_threshold: f64,
    pub bearish_threshold: f64,
    pub short_term_bias_threshold: f64,
    pub long_term_bias_threshold: f64,
    // Headlines at or below this relevance are ignored
    pub min_relevance: f64,
    pub symbol_match_relevance: f64,
    pub market_keyword_relevance: f64,
    pub base_relevance: f64,
    pub max_relevance: f64,
    pub impact_weights: ImpactWeights,
    // Score average above/below which high-impact news reads as positive/negative
    pub impact_summary_threshold: f64,
    pub top_headlines: usize,
}

pub const NEWS: NewsConfig = NewsConfig {
    fetch_timeout_ms: 3000,
    bullish_threshold: 20.0,
    bearish_threshold: -20.0,
    short_term_bias_threshold: 30.0,
    long_term_bias_threshold: 50.0,
    min_relevance: 40.0,
    symbol_match_relevance: 20.0,
    market_keyword_relevance: 10.0,
    base_relevance: 30.0,
    max_relevance: 100.0,
    impact_weights: ImpactWeights {
        high: 3.0,
        medium: 2.0,
        low: 1.0,
    },
    impact_summary_threshold: 20.0,
    top_headlines: 2,
};

pub const BULLISH_KEYWORDS: &[&str] = &[
    "rally",
    "surge",
    "gains",
    "uptrend",
    "bullish",
    "positive",
    "growth",
    "expansion",
    "profit",
    "earnings beat",
    "upgrade",
    "buy",
    "outperform",
    "strong results",
    "record high",
    "breakout",
    "momentum",
    "optimistic",
    "recovery",
    "boost",
    "dividend",
    "bonus",
    "merger",
    "acquisition",
    "partnership",
    "contract win",
    "order book",
    "expansion plan",
    "capacity addition",
    "new product launch",
];

pub const BEARISH_KEYWORDS: &[&str] = &[
    "fall",
    "decline",
    "crash",
    "bear",
    "negative",
    "loss",
    "weak",
    "downtrend",
    "sell",
    "downgrade",
    "underperform",
    "miss",
    "disappointing",
    "concern",
    "risk",
    "volatility",
    "correction",
    "pressure",
    "slowdown",
    "recession",
    "inflation",
    "interest rate hike",
    "regulatory action",
    "investigation",
    "lawsuit",
    "debt",
    "liquidity crisis",
    "bankruptcy",
    "layoffs",
    "closure",
];

/// Market-wide terms: these both raise relevance and mark a headline as high impact
pub const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "rbi",
    "reserve bank",
    "interest rate",
    "monetary policy",
    "budget",
    "union budget",
    "sebi",
    "regulatory",
    "policy change",
    "tax",
    "gst",
    "crude oil",
    "inflation",
    "gdp",
    "fiscal deficit",
    "current account deficit",
    "foreign investment",
    "global markets",
    "fed decision",
    "geopolitical",
    "election",
    "covid",
    "lockdown",
    "emergency",
    "crisis",
    "scandal",
    "fraud",
    "investigation",
];

pub const MEDIUM_IMPACT_KEYWORDS: &[&str] = &[
    "earnings",
    "results",
    "guidance",
    "profit",
    "revenue",
    "merger",
    "acquisition",
];

/// Extra relevance keywords for well-known symbols (exchange suffix stripped, lower case)
pub const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    ("tcs", &["it", "software", "technology", "tata consultancy"]),
    ("reliance", &["oil", "petrochemical", "telecom", "jio", "retail"]),
    ("hdfcbank", &["banking", "finance", "hdfc", "loan", "credit"]),
    ("infy", &["infosys", "it", "software", "technology"]),
    ("icicibank", &["banking", "finance", "icici", "loan", "credit"]),
    ("sbin", &["sbi", "state bank", "banking", "psu bank"]),
    ("bhartiartl", &["airtel", "telecom", "mobile", "bharti"]),
    ("kotakbank", &["kotak", "banking", "finance"]),
    ("itc", &["cigarette", "tobacco", "fmcg", "hotels"]),
    ("maruti", &["automobile", "car", "auto", "suzuki"]),
    ("tatamotors", &["tata motors", "automobile", "car", "commercial vehicle"]),
    ("axisbank", &["axis", "banking", "finance"]),
    ("asianpaint", &["paint", "asian paints", "home improvement"]),
    ("nestleind", &["nestle", "fmcg", "food", "maggi"]),
    ("wipro", &["it", "software", "technology"]),
    ("ongc", &["oil", "gas", "petroleum", "psu"]),
    ("ntpc", &["power", "electricity", "thermal", "psu"]),
    ("powergrid", &["power", "transmission", "electricity", "psu"]),
    ("coalindia", &["coal", "mining", "psu"]),
    ("hindalco", &["aluminium", "metal", "mining"]),
    ("tatasteel", &["steel", "metal", "tata"]),
    ("jswsteel", &["steel", "metal", "jsw"]),
    ("vedl", &["vedanta", "mining", "metal", "oil"]),
    ("adaniports", &["adani", "port", "logistics", "infrastructure"]),
    ("adanigreen", &["adani", "renewable", "solar", "green energy"]),
    ("bajfinance", &["bajaj finance", "nbfc", "finance", "loan"]),
    ("hcltech", &["hcl", "it", "software", "technology"]),
    ("techm", &["tech mahindra", "it", "software", "technology"]),
    ("ltim", &["lti mindtree", "it", "software", "technology"]),
    ("dmart", &["retail", "avenue supermarts", "grocery"]),
    ("zomato", &["food delivery", "restaurant", "online"]),
    ("paytm", &["fintech", "payments", "digital"]),
    ("nykaa", &["beauty", "cosmetics", "e-commerce"]),
];

/// Exchange suffixes stripped from a symbol before keyword matching
pub const SYMBOL_SUFFIXES: &[&str] = &[".ns", ".bo"];
