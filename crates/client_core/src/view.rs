//! Display models for the card grid, built fresh on every render call from the
//! full record set of that call.

use shared::domain::FeatureRecord;

use crate::classify::{fill_ratio, Brightness, Complexity, Loudness};

#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub label: &'static str,
    /// Raw metric value formatted for display.
    pub value_text: String,
    /// Bar fill in `[0.2, 1.0]` (or the neutral `0.4`).
    pub fill: f64,
}

/// Everything one card shows, derived from one [`FeatureRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub file_name: String,
    pub sample_rate_text: String,
    pub brightness: Brightness,
    pub complexity: Complexity,
    pub loudness: Loudness,
    pub metrics: [MetricView; 3],
}

pub fn file_count_text(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{count} files")
    }
}

struct Bounds {
    min: f64,
    max: f64,
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> Bounds {
    values.fold(
        Bounds {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |acc, v| Bounds {
            min: acc.min.min(v),
            max: acc.max.max(v),
        },
    )
}

/// Builds one card per record, in input order. Bar fills are normalized
/// against the min/max of exactly the records passed to this call, so the same
/// record can get a different bar length once the visible set changes.
pub fn build_cards(records: &[FeatureRecord]) -> Vec<CardView> {
    if records.is_empty() {
        return Vec::new();
    }

    let centroid = bounds(records.iter().map(|r| r.spectral_centroid_mean));
    let bandwidth = bounds(records.iter().map(|r| r.spectral_bandwidth_mean));
    let rms = bounds(records.iter().map(|r| r.rms_mean));

    records
        .iter()
        .map(|record| CardView {
            file_name: record.display_name().to_string(),
            sample_rate_text: format!("{} Hz", record.sr),
            brightness: Brightness::classify(record.spectral_centroid_mean),
            complexity: Complexity::classify(record.spectral_bandwidth_mean),
            loudness: Loudness::classify(record.rms_mean),
            metrics: [
                MetricView {
                    label: "Spectral centroid",
                    value_text: format!("{:.0}", record.spectral_centroid_mean),
                    fill: fill_ratio(record.spectral_centroid_mean, centroid.min, centroid.max),
                },
                MetricView {
                    label: "Spectral bandwidth",
                    value_text: format!("{:.0}", record.spectral_bandwidth_mean),
                    fill: fill_ratio(
                        record.spectral_bandwidth_mean,
                        bandwidth.min,
                        bandwidth.max,
                    ),
                },
                MetricView {
                    label: "RMS energy",
                    value_text: format!("{:.3}", record.rms_mean),
                    fill: fill_ratio(record.rms_mean, rms.min, rms.max),
                },
            ],
        })
        .collect()
}
