//! Commands the GUI queues for the backend worker.

use std::path::PathBuf;

#[derive(Debug)]
pub enum BackendCommand {
    /// Fetch the full feature list and replace the dashboard state.
    LoadFeatures,
    /// Read a local audio file and submit it for analysis.
    UploadFile { path: PathBuf },
}
