//! favicon-theme: color-scheme adaptive SVG icons
//!
//! This crate turns a plain SVG (typically a favicon) into an adaptive one
//! whose paint follows the viewer's `prefers-color-scheme`, and renders
//! explicit light/dark previews of the result.
//!
//! # Example
//!
//! ```
//! use favicon_theme::{inject, resolve_preview, ColorPair, ThemeMode};
//!
//! let colors = ColorPair::new("#000000", "#FFFFFF");
//! let source = r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#111111" d="M0 0h16v16H0z"/></svg>"##;
//!
//! // Adaptive document: embedded stylesheet plus marker classes.
//! let adaptive = inject(source, &colors).unwrap();
//! assert!(adaptive.contains("@media (prefers-color-scheme: dark)"));
//! assert!(adaptive.contains(r#"class="dark-mode-fill""#));
//!
//! // Preview for an explicit mode: no stylesheet, literal colors.
//! let preview = resolve_preview(&adaptive, ThemeMode::Dark, &colors);
//! assert!(!preview.contains("<style>"));
//! assert!(preview.contains(r##"fill="#FFFFFF""##));
//! ```
//!
//! # Editing Sessions
//!
//! Interactive callers keep their state in a [`ThemeSession`], which stores
//! the pristine source and re-derives the adaptive document on every color
//! edit:
//!
//! ```
//! use favicon_theme::{Configurable, ThemeMode, ThemeProfile, ThemeSession};
//!
//! let mut session = ThemeSession::new(ThemeProfile::from_json(r##"{"dark":"#eeeeee"}"##).unwrap());
//! session.load_source("<svg><circle r=\"8\"/></svg>").unwrap();
//! session.set_preview_mode(ThemeMode::Dark);
//! assert!(session.preview().contains(r##"fill="#eeeeee""##));
//!
//! let json = session.export_profile().to_json().unwrap();
//! ```

mod document;
mod error;
mod export;
mod ingest;
mod injector;
mod preview;
mod profile;
mod session;
mod theme;

pub use document::{Attribute, Element, NodeId, SvgTree, ThemeTree};
pub use error::{IngestError, TransformError};
pub use export::{EXPORT_FILE_NAME, ExportArtifact};
pub use ingest::{SVG_MEDIA_TYPE, SvgUpload, UploadKind, ingest, ingest_and_inject};
pub use injector::{InjectionSummary, apply_theme, inject};
pub use preview::{render_preview, resolve_markers, resolve_preview};
pub use profile::ThemeProfile;
pub use session::{Configurable, ThemeSession};
pub use theme::{
    ColorPair, MarkerSet, SHAPE_TAGS, ThemeMarker, ThemeMode, is_painted, is_shape, stylesheet,
};
