//! The adaptive document packaged for copy or download.

use std::io;
use std::path::Path;

use crate::ingest::SVG_MEDIA_TYPE;

/// File name offered when downloading an adaptive document.
pub const EXPORT_FILE_NAME: &str = "favicon-adaptive.svg";

/// An adaptive SVG ready to be handed to a clipboard or saved as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

impl ExportArtifact {
    /// Wraps adaptive markup with the default download metadata.
    pub fn new(adaptive: impl Into<String>) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            media_type: SVG_MEDIA_TYPE,
            contents: adaptive.into(),
        }
    }

    /// Overrides the download file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Writes the contents into `dir` under [`file_name`](Self::file_name).
    ///
    /// Returns the path written.
    pub fn save_in(&self, dir: &Path) -> io::Result<std::path::PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}
