use serde::{Deserialize, Serialize};

/// Summary statistics for one analyzed audio file, exactly as served by
/// `GET /api/features` and returned by a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Server-side path of the analyzed file. Only the final segment is shown.
    pub file_path: String,
    /// Sample rate in Hz.
    pub sr: u32,
    /// Spectral centroid mean, Hz.
    pub spectral_centroid_mean: f64,
    /// Spectral bandwidth mean, Hz.
    pub spectral_bandwidth_mean: f64,
    /// Root-mean-square energy mean, amplitude ratio.
    pub rms_mean: f64,
}

impl FeatureRecord {
    /// Final path segment of `file_path`, used as the display name.
    pub fn display_name(&self) -> &str {
        self.file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file_path.as_str())
    }
}
