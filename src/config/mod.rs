//! Configuration module for the signal engine.

pub mod analysis;
pub mod news;
pub mod timeframes;

mod debug; // Private: files use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig};
pub use news::{NEWS, NewsConfig};
pub use timeframes::{TIMEFRAMES, TimeframeConfig, TimeframeProfile};
