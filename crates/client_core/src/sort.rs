//! Display ordering for the card grid. Sorting always works on a copy; the
//! canonical insertion order is never touched.

use shared::domain::FeatureRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Canonical insertion order (load order, then upload order).
    #[default]
    Unsorted,
    BrightnessDesc,
    BrightnessAsc,
    LoudnessDesc,
    LoudnessAsc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Unsorted,
        SortMode::BrightnessDesc,
        SortMode::BrightnessAsc,
        SortMode::LoudnessDesc,
        SortMode::LoudnessAsc,
    ];

    /// Parses a selector value. Anything unrecognized is `Unsorted`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "brightness-desc" => Self::BrightnessDesc,
            "brightness-asc" => Self::BrightnessAsc,
            "loudness-desc" => Self::LoudnessDesc,
            "loudness-asc" => Self::LoudnessAsc,
            _ => Self::Unsorted,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Unsorted => "default",
            Self::BrightnessDesc => "brightness-desc",
            Self::BrightnessAsc => "brightness-asc",
            Self::LoudnessDesc => "loudness-desc",
            Self::LoudnessAsc => "loudness-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unsorted => "Load order",
            Self::BrightnessDesc => "Brightness (high to low)",
            Self::BrightnessAsc => "Brightness (low to high)",
            Self::LoudnessDesc => "Loudness (high to low)",
            Self::LoudnessAsc => "Loudness (low to high)",
        }
    }
}

/// Returns a sorted copy of `records` for display. Stable, so reapplying the
/// same mode to an already-sorted sequence is a no-op.
pub fn sorted_records(records: &[FeatureRecord], mode: SortMode) -> Vec<FeatureRecord> {
    let mut sorted = records.to_vec();
    match mode {
        SortMode::Unsorted => {}
        SortMode::BrightnessDesc => sorted
            .sort_by(|a, b| b.spectral_centroid_mean.total_cmp(&a.spectral_centroid_mean)),
        SortMode::BrightnessAsc => sorted
            .sort_by(|a, b| a.spectral_centroid_mean.total_cmp(&b.spectral_centroid_mean)),
        SortMode::LoudnessDesc => sorted.sort_by(|a, b| b.rms_mean.total_cmp(&a.rms_mean)),
        SortMode::LoudnessAsc => sorted.sort_by(|a, b| a.rms_mean.total_cmp(&b.rms_mean)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, centroid: f64, rms: f64) -> FeatureRecord {
        FeatureRecord {
            file_path: name.to_string(),
            sr: 44100,
            spectral_centroid_mean: centroid,
            spectral_bandwidth_mean: 2000.0,
            rms_mean: rms,
        }
    }

    fn centroids(records: &[FeatureRecord]) -> Vec<f64> {
        records.iter().map(|r| r.spectral_centroid_mean).collect()
    }

    #[test]
    fn brightness_modes_order_by_centroid() {
        let records = vec![
            record("a", 1000.0, 0.1),
            record("b", 3000.0, 0.2),
            record("c", 5000.0, 0.3),
        ];
        let asc = sorted_records(&records, SortMode::BrightnessAsc);
        assert_eq!(centroids(&asc), vec![1000.0, 3000.0, 5000.0]);
        let desc = sorted_records(&records, SortMode::BrightnessDesc);
        assert_eq!(centroids(&desc), vec![5000.0, 3000.0, 1000.0]);
    }

    #[test]
    fn loudness_modes_order_by_rms() {
        let records = vec![
            record("a", 1000.0, 0.30),
            record("b", 3000.0, 0.01),
            record("c", 5000.0, 0.09),
        ];
        let asc = sorted_records(&records, SortMode::LoudnessAsc);
        assert_eq!(
            asc.iter().map(|r| r.rms_mean).collect::<Vec<_>>(),
            vec![0.01, 0.09, 0.30]
        );
        let desc = sorted_records(&records, SortMode::LoudnessDesc);
        assert_eq!(
            desc.iter().map(|r| r.rms_mean).collect::<Vec<_>>(),
            vec![0.30, 0.09, 0.01]
        );
    }

    #[test]
    fn unsorted_preserves_insertion_order() {
        let records = vec![
            record("c", 5000.0, 0.3),
            record("a", 1000.0, 0.1),
            record("b", 3000.0, 0.2),
        ];
        let unsorted = sorted_records(&records, SortMode::Unsorted);
        assert_eq!(centroids(&unsorted), centroids(&records));
    }

    #[test]
    fn sorting_does_not_mutate_the_input() {
        let records = vec![record("b", 3000.0, 0.2), record("a", 1000.0, 0.1)];
        let _ = sorted_records(&records, SortMode::BrightnessAsc);
        assert_eq!(centroids(&records), vec![3000.0, 1000.0]);
    }

    #[test]
    fn reapplying_a_mode_is_idempotent() {
        let records = vec![
            record("a", 1000.0, 0.1),
            record("c", 5000.0, 0.3),
            record("b", 3000.0, 0.2),
        ];
        let once = sorted_records(&records, SortMode::BrightnessDesc);
        let twice = sorted_records(&once, SortMode::BrightnessDesc);
        assert_eq!(once, twice);
    }

    #[test]
    fn selector_values_round_trip_and_unknown_falls_back() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::from_value(mode.value()), mode);
        }
        assert_eq!(SortMode::from_value("bandwidth-desc"), SortMode::Unsorted);
        assert_eq!(SortMode::from_value(""), SortMode::Unsorted);
    }
}
