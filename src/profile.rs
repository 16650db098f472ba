//! Serializable theme settings for cross-process communication.
//!
//! A [`ThemeProfile`] captures the caller-owned settings (the two theme
//! colors and the preview toggle) in a format that can be serialized to JSON
//! and sent between a frontend and the engine.
//!
//! # Example
//!
//! ```
//! use favicon_theme::{ColorPair, ThemeMode, ThemeProfile};
//!
//! let profile = ThemeProfile::new()
//!     .with_colors(ColorPair::new("#1e1e1e", "#fafafa"))
//!     .with_preview_mode(ThemeMode::Dark);
//!
//! let json = profile.to_json().unwrap();
//! let restored = ThemeProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::theme::{ColorPair, ThemeMode};

// ============================================================================
// ThemeProfile
// ============================================================================

/// Theme colors plus the preview toggle.
///
/// # JSON Format
///
/// ```json
/// {
///   "light": "#000000",
///   "dark": "#FFFFFF",
///   "previewMode": "light"
/// }
/// ```
///
/// Missing fields take their defaults: black in light mode, white in dark
/// mode, light preview.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct ThemeProfile {
    /// Colors used by the adaptive stylesheet.
    #[serde(flatten)]
    pub colors: ColorPair,

    /// Mode shown by the preview.
    #[serde(default)]
    pub preview_mode: ThemeMode,
}

impl ThemeProfile {
    /// Creates a profile with default colors and a light preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both colors.
    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the color of one mode.
    pub fn with_color(mut self, mode: ThemeMode, color: impl Into<String>) -> Self {
        *self.colors.color_for_mut(mode) = color.into();
        self
    }

    /// Sets the preview mode.
    pub fn with_preview_mode(mut self, mode: ThemeMode) -> Self {
        self.preview_mode = mode;
        self
    }

    /// The color the preview currently shows.
    pub fn preview_color(&self) -> &str {
        self.colors.color_for(self.preview_mode)
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_json_format() {
        let profile = ThemeProfile::new()
            .with_color(ThemeMode::Dark, "#eeeeee")
            .with_preview_mode(ThemeMode::Dark);

        let json = profile.to_json().unwrap();
        assert_eq!(
            json,
            r##"{"light":"#000000","dark":"#eeeeee","previewMode":"dark"}"##
        );
    }

    #[test]
    fn empty_profile_deserializes_to_defaults() {
        let profile = ThemeProfile::from_json("{}").unwrap();
        assert_eq!(profile, ThemeProfile::default());
        assert_eq!(profile.colors.light, "#000000");
        assert_eq!(profile.colors.dark, "#FFFFFF");
        assert_eq!(profile.preview_mode, ThemeMode::Light);
    }

    #[test]
    fn partial_profile_keeps_other_defaults() {
        let profile = ThemeProfile::from_json(r#"{"dark":"rebeccapurple"}"#).unwrap();
        assert_eq!(profile.colors.dark, "rebeccapurple");
        assert_eq!(profile.colors.light, "#000000");
    }

    #[test]
    fn preview_color_follows_mode() {
        let profile = ThemeProfile::new().with_colors(ColorPair::new("black", "white"));
        assert_eq!(profile.preview_color(), "black");
        assert_eq!(
            profile.with_preview_mode(ThemeMode::Dark).preview_color(),
            "white"
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(ThemeProfile::from_json(r#"{"previewMode":"sepia"}"#).is_err());
    }
}
