//! Ingestion of uploaded, dropped or pasted SVG content.
//!
//! This is the engine's only inbound path: payloads are screened, decoded
//! and trimmed here before anything is parsed.

use crate::error::IngestError;
use crate::injector::inject;
use crate::theme::ColorPair;

/// Media type of SVG documents.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Where an inbound payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// A file picked from disk or dropped onto the page.
    File,
    /// Text pasted directly as markup.
    Paste,
}

/// An inbound payload and the metadata declared alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgUpload {
    pub kind: UploadKind,
    pub bytes: Vec<u8>,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
}

impl SvgUpload {
    /// A file upload or drop with its declared media type and name.
    pub fn file(
        bytes: impl Into<Vec<u8>>,
        media_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Self {
        Self {
            kind: UploadKind::File,
            bytes: bytes.into(),
            media_type: media_type.map(str::to_string),
            file_name: file_name.map(str::to_string),
        }
    }

    /// Markup pasted as text.
    pub fn paste(text: impl Into<String>) -> Self {
        Self {
            kind: UploadKind::Paste,
            bytes: text.into().into_bytes(),
            media_type: None,
            file_name: None,
        }
    }

    /// Returns `true` if the declared media type or file name indicate SVG.
    ///
    /// Pasted text carries no metadata and is always considered.
    pub fn looks_like_svg(&self) -> bool {
        if self.kind == UploadKind::Paste {
            return true;
        }
        let media_ok = self
            .media_type
            .as_deref()
            .is_some_and(|m| m.trim().eq_ignore_ascii_case(SVG_MEDIA_TYPE));
        let name_ok = self
            .file_name
            .as_deref()
            .is_some_and(|n| n.to_ascii_lowercase().ends_with(".svg"));
        media_ok || name_ok
    }
}

/// Screens, decodes and trims a payload into source text.
///
/// # Errors
///
/// - [`IngestError::NotSvg`] if neither media type nor file name indicate SVG
/// - [`IngestError::InvalidUtf8`] if the bytes are not UTF-8 text
/// - [`IngestError::Empty`] if nothing but whitespace remains
pub fn ingest(upload: &SvgUpload) -> Result<String, IngestError> {
    if !upload.looks_like_svg() {
        tracing::debug!(
            media_type = upload.media_type.as_deref(),
            file_name = upload.file_name.as_deref(),
            "rejected non-SVG upload"
        );
        return Err(IngestError::NotSvg);
    }

    let text =
        std::str::from_utf8(&upload.bytes).map_err(|e| IngestError::InvalidUtf8(e.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(text.to_string())
}

/// Ingests a payload and injects the theme into it.
///
/// Returns the trimmed source text (to keep for later color edits) together
/// with the adaptive document.
pub fn ingest_and_inject(
    upload: &SvgUpload,
    colors: &ColorPair,
) -> Result<(String, String), IngestError> {
    let source = ingest(upload)?;
    let adaptive = inject(&source, colors)?;
    Ok((source, adaptive))
}

// ============================================================================
// Tests
// ============================================================================
