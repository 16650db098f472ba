//! Caller-owned editing state around the stateless engine.

use crate::error::{IngestError, TransformError};
use crate::export::ExportArtifact;
use crate::ingest::{SvgUpload, ingest};
use crate::injector::inject;
use crate::preview::resolve_preview;
use crate::profile::ThemeProfile;
use crate::theme::{ColorPair, ThemeMode};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`ThemeProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &ThemeProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> ThemeProfile;
}

// ============================================================================
// ThemeSession
// ============================================================================

/// Editing state for one document: source, settings and derived outputs.
///
/// The session keeps the pristine source text and re-runs
/// [`inject`](crate::inject) on it after every source or color change, so the
/// adaptive result never accumulates stylesheets or markers. The preview is
/// derived lazily and cached until the adaptive result or the mode changes.
///
/// # Example
///
/// ```
/// use favicon_theme::{ThemeMode, ThemeSession};
///
/// let mut session = ThemeSession::default();
/// session.load_source(r#"<svg><rect width="4" height="4"/></svg>"#).unwrap();
///
/// session.set_color(ThemeMode::Dark, "#ffcc00");
/// session.set_preview_mode(ThemeMode::Dark);
/// assert!(session.preview().contains(r##"fill="#ffcc00""##));
///
/// let artifact = session.export().unwrap();
/// assert_eq!(artifact.file_name, "favicon-adaptive.svg");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThemeSession {
    /// The source document as loaded (never modified).
    source: Option<String>,

    profile: ThemeProfile,

    /// Result of the latest injection. `None` until a source is loaded.
    adaptive: Option<Result<String, TransformError>>,

    /// Increments whenever `adaptive` is recomputed.
    version: u64,

    /// Preview text with the adaptive version and mode it was derived from.
    preview_cache: Option<(u64, ThemeMode, String)>,
}

impl ThemeSession {
    /// Creates an empty session with the given settings.
    pub fn new(profile: ThemeProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Replaces the source document and re-derives the adaptive result.
    ///
    /// On failure the previous adaptive result is discarded as well.
    pub fn load_source(&mut self, source: impl Into<String>) -> Result<&str, TransformError> {
        self.source = Some(source.into());
        self.refresh();
        self.adaptive_result()
    }

    /// Ingests an upload and loads it as the new source.
    ///
    /// Uploads rejected before parsing leave the session untouched.
    pub fn load(&mut self, upload: &SvgUpload) -> Result<&str, IngestError> {
        let source = ingest(upload)?;
        Ok(self.load_source(source)?)
    }

    /// Drops the source and every derived output. Settings are kept.
    pub fn clear(&mut self) {
        self.source = None;
        self.adaptive = None;
        self.preview_cache = None;
        self.version = self.version.wrapping_add(1);
    }

    /// The source document, if one is loaded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The current settings.
    pub fn profile(&self) -> &ThemeProfile {
        &self.profile
    }

    /// Sets the color of one mode. Returns `true` if it changed.
    pub fn set_color(&mut self, mode: ThemeMode, color: impl Into<String>) -> bool {
        let color = color.into();
        if self.profile.colors.color_for(mode) == color {
            return false;
        }
        *self.profile.colors.color_for_mut(mode) = color;
        self.refresh();
        true
    }

    /// Sets both colors. Returns `true` if either changed.
    pub fn set_colors(&mut self, colors: ColorPair) -> bool {
        if self.profile.colors == colors {
            return false;
        }
        self.profile.colors = colors;
        self.refresh();
        true
    }

    /// Selects the mode shown by [`preview`](Self::preview).
    pub fn set_preview_mode(&mut self, mode: ThemeMode) {
        self.profile.preview_mode = mode;
    }

    /// Flips the preview between light and dark. Returns the new mode.
    pub fn toggle_preview(&mut self) -> ThemeMode {
        self.profile.preview_mode = self.profile.preview_mode.toggled();
        self.profile.preview_mode
    }

    /// The adaptive document, if the current source was transformed.
    pub fn adaptive(&self) -> Option<&str> {
        match &self.adaptive {
            Some(Ok(text)) => Some(text),
            _ => None,
        }
    }

    /// The error from the latest injection, if it failed.
    pub fn last_error(&self) -> Option<&TransformError> {
        match &self.adaptive {
            Some(Err(err)) => Some(err),
            _ => None,
        }
    }

    /// The adaptive document resolved for the current preview mode.
    ///
    /// Empty when there is nothing to show.
    pub fn preview(&mut self) -> &str {
        let mode = self.profile.preview_mode;
        let fresh = matches!(
            &self.preview_cache,
            Some((version, cached_mode, _)) if *version == self.version && *cached_mode == mode
        );
        if !fresh {
            let text = match self.adaptive() {
                Some(adaptive) => resolve_preview(adaptive, mode, &self.profile.colors),
                None => String::new(),
            };
            self.preview_cache = Some((self.version, mode, text));
        }
        self.preview_cache
            .as_ref()
            .map_or("", |(_, _, text)| text.as_str())
    }

    /// Packages the adaptive document for copy or download.
    pub fn export(&self) -> Option<ExportArtifact> {
        self.adaptive().map(ExportArtifact::new)
    }

    fn refresh(&mut self) {
        self.adaptive = self
            .source
            .as_deref()
            .map(|source| inject(source, &self.profile.colors));
        self.version = self.version.wrapping_add(1);
    }

    fn adaptive_result(&self) -> Result<&str, TransformError> {
        match &self.adaptive {
            Some(Ok(text)) => Ok(text),
            Some(Err(err)) => Err(err.clone()),
            None => Err(TransformError::invalid("no source document loaded")),
        }
    }
}

impl Configurable for ThemeSession {
    /// Applies colors and preview mode, re-deriving the adaptive result if
    /// the colors changed.
    fn apply_profile(&mut self, profile: &ThemeProfile) {
        self.set_colors(profile.colors.clone());
        self.set_preview_mode(profile.preview_mode);
    }

    fn export_profile(&self) -> ThemeProfile {
        self.profile.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
