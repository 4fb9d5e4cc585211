use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Candle, CandleSet, Timeframe};
use crate::utils::time_utils::epoch_sec_to_utc;

pub const CANDLE_FILE_VERSION: f64 = 1.0;

/// Raw on-disk shape: timeframe label -> candles, labels not yet validated
pub type RawCandleSeries = BTreeMap<String, Vec<Candle>>;

/// Binary wrapper. JSON files hold the bare `RawCandleSeries` map instead.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CandleFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub series: RawCandleSeries,
}

impl CandleFile {
    pub fn new(series: RawCandleSeries) -> Self {
        Self {
            version: CANDLE_FILE_VERSION,
            timestamp_ms: Utc::now().timestamp_millis(),
            series,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open candle file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: Self = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize candle file: {:?}", path))?;
        if cache.version != CANDLE_FILE_VERSION {
            bail!(
                "Candle file version mismatch: file v{} vs required v{}",
                cache.version,
                CANDLE_FILE_VERSION
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize candles to: {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Bincode,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("bin") | Some("bincode") => Ok(Self::Bincode),
            _ => bail!(
                "Unsupported candle file {:?}: expected a .json, .bin or .bincode extension",
                path
            ),
        }
    }
}

/// Load a candle set, picking JSON or bincode by file extension
pub fn load_candle_set(path: &Path) -> Result<CandleSet> {
    let raw: RawCandleSeries = match FileFormat::from_path(path)? {
        FileFormat::Json => {
            let file =
                File::open(path).context(format!("Failed to open candle file: {:?}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .context(format!("Failed to parse candle JSON: {:?}", path))?
        }
        FileFormat::Bincode => CandleFile::load_from_path(path)?.series,
    };
    build_candle_set(raw).context(format!("Invalid candle data in {:?}", path))
}

pub async fn load_candle_set_async(path: PathBuf) -> Result<CandleSet> {
    tokio::task::spawn_blocking(move || load_candle_set(&path))
        .await
        .context("Candle load task panicked")?
}

pub fn save_candle_set(path: &Path, candles: &CandleSet) -> Result<()> {
    let raw: RawCandleSeries = candles
        .timeframes()
        .map(|tf| (tf.to_string(), candles.get(tf).to_vec()))
        .collect();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    match FileFormat::from_path(path)? {
        FileFormat::Json => {
            let file =
                File::create(path).context(format!("Failed to create file: {}", path.display()))?;
            serde_json::to_writer(BufWriter::new(file), &raw)
                .context(format!("Failed to write candle JSON: {}", path.display()))
        }
        FileFormat::Bincode => CandleFile::new(raw).save_to_path(path),
    }
}

/// Validate every known timeframe; unknown labels are skipped with a warning
pub fn build_candle_set(raw: RawCandleSeries) -> Result<CandleSet> {
    let mut set = CandleSet::new();
    for (label, candles) in raw {
        match Timeframe::from_str(label.trim()) {
            Ok(timeframe) => {
                let candles = validate_series(&label, candles)?;
                if !spacing_matches(timeframe, &candles) {
                    log::warn!(
                        "{}: candles closer than one {} interval apart, check the label",
                        label,
                        timeframe
                    );
                }
                set.insert(timeframe, candles);
            }
            Err(_) => log::warn!("Skipping unknown timeframe '{}'", label),
        }
    }
    Ok(set)
}

/// The tightest gap between consecutive candles should be one interval.
/// Wider gaps (sessions, weekends) are normal.
pub fn spacing_matches(timeframe: Timeframe, candles: &[Candle]) -> bool {
    candles
        .iter()
        .tuple_windows()
        .map(|(a, b)| b.time - a.time)
        .min()
        .is_none_or(|gap| gap >= timeframe.duration_secs())
}

/// Reject non-finite prices. Out-of-order or duplicate timestamps are repaired:
/// sorted ascending, and of several candles sharing a timestamp the last one wins.
pub fn validate_series(label: &str, candles: Vec<Candle>) -> Result<Vec<Candle>> {
    if let Some(bad) = candles.iter().find(|c| !c.has_finite_prices()) {
        bail!(
            "{}: candle at {} has a non-finite price",
            label,
            epoch_sec_to_utc(bad.time)
        );
    }

    let candles = if candles.is_sorted_by(|a, b| a.time < b.time) {
        candles
    } else {
        let original = candles.len();
        let repaired: Vec<Candle> = candles
            .into_iter()
            .sorted_by_key(|c| c.time)
            .coalesce(|prev, next| {
                if prev.time == next.time {
                    Ok(next)
                } else {
                    Err((prev, next))
                }
            })
            .collect();
        log::warn!(
            "{}: candles out of order or duplicated, repaired ({} -> {} candles)",
            label,
            original,
            repaired.len()
        );
        repaired
    };

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
            log::debug!(
                "{}: {} candles, {}",
                label,
                candles.len(),
                crate::utils::time_utils::describe_span(first.time, last.time)
            );
        }
    }

    Ok(candles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, close: f64) -> Candle {
        Candle::new(time, close, close + 1.0, close - 1.0, close, 10)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("signal_scope_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_repairs_order_and_duplicates() {
        let candles = vec![candle(120, 3.0), candle(0, 1.0), candle(60, 2.0), candle(60, 2.5)];
        let repaired = validate_series("1h", candles).unwrap();
        let times: Vec<i64> = repaired.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![0, 60, 120]);
        assert_eq!(repaired[1].close, 2.5, "last duplicate wins");
    }

    #[test]
    fn test_ordered_series_untouched() {
        let candles = vec![candle(0, 1.0), candle(60, 2.0)];
        assert_eq!(validate_series("15m", candles.clone()).unwrap(), candles);
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut bad = candle(60, 2.0);
        bad.high = f64::NAN;
        let err = validate_series("4h", vec![candle(0, 1.0), bad]).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_spacing_check() {
        let hourly = vec![candle(0, 1.0), candle(3600, 1.0), candle(4 * 3600, 1.0)];
        assert!(spacing_matches(Timeframe::H1, &hourly));
        assert!(!spacing_matches(Timeframe::D1, &hourly));
        assert!(spacing_matches(Timeframe::M15, &hourly[..1]));
    }

    #[test]
    fn test_unknown_labels_skipped() {
        let mut raw = RawCandleSeries::new();
        raw.insert("1h".to_string(), vec![candle(0, 1.0)]);
        raw.insert("1w".to_string(), vec![candle(0, 1.0)]);
        let set = build_candle_set(raw).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(Timeframe::H1).len(), 1);
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = temp_path("set.json");
        std::fs::write(
            &path,
            r#"{"1d":[{"time":86400,"open":10,"high":12,"low":9,"close":11,"volume":500},
                     {"time":0,"open":9,"high":11,"low":8,"close":10,"volume":400}],
               "15m":[]}"#,
        )
        .unwrap();
        let set = load_candle_set(&path).unwrap();
        let daily = set.get(Timeframe::D1);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].time, 0, "sorted on load");
        assert!(set.get(Timeframe::M15).is_empty());

        save_candle_set(&path, &set).unwrap();
        assert_eq!(load_candle_set(&path).unwrap(), set);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bincode_file_round_trip() {
        let path = temp_path("set.bin");
        let set = CandleSet::new().with(Timeframe::H4, vec![candle(0, 1.0), candle(14_400, 1.5)]);
        save_candle_set(&path, &set).unwrap();
        assert_eq!(load_candle_set(&path).unwrap(), set);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_candle_set(Path::new("candles.csv")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
