//! The tagging contract shared by the injector and the preview resolver.
//!
//! Markers record which paint of an element follows the active theme. The
//! injector realizes them as CSS classes targeted by a generated stylesheet;
//! the preview resolver erases them into literal paint attributes.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

/// Element tags that receive the fill marker when they carry no paint at all.
pub const SHAPE_TAGS: [&str; 6] = ["path", "circle", "rect", "polygon", "ellipse", "line"];

/// Tag name of the embedded stylesheet element.
pub const STYLE_TAG: &str = "style";

/// Returns `true` if `local_name` is one of the [`SHAPE_TAGS`].
pub fn is_shape(local_name: &str) -> bool {
    SHAPE_TAGS.contains(&local_name)
}

/// Returns `true` if a `fill`/`stroke` value actually paints something.
///
/// Empty values and the `none`/`transparent` keywords do not.
pub fn is_painted(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value.eq_ignore_ascii_case("none")
        || value.eq_ignore_ascii_case("transparent"))
}

// ============================================================================
// ThemeMarker
// ============================================================================

/// A paint channel that must react to the color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeMarker {
    /// The element's `fill` follows the theme.
    Fill,
    /// The element's `stroke` follows the theme.
    Stroke,
}

impl ThemeMarker {
    /// Every marker, in serialization order.
    pub const ALL: [ThemeMarker; 2] = [ThemeMarker::Fill, ThemeMarker::Stroke];

    /// CSS class name the marker is realized as.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Fill => "dark-mode-fill",
            Self::Stroke => "dark-mode-stroke",
        }
    }

    /// Looks up the marker realized by a CSS class name.
    pub fn from_class_name(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.class_name() == class)
    }

    /// The presentation attribute (and CSS property) the marker controls.
    pub fn paint_attribute(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Fill => 0b01,
            Self::Stroke => 0b10,
        }
    }
}

impl fmt::Display for ThemeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

// ============================================================================
// MarkerSet
// ============================================================================

/// The set of markers attached to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MarkerSet(u8);

impl MarkerSet {
    /// A set with no markers.
    pub const EMPTY: Self = Self(0);

    /// Adds a marker. Returns `true` if it was not already present.
    pub fn insert(&mut self, marker: ThemeMarker) -> bool {
        let added = !self.contains(marker);
        self.0 |= marker.bit();
        added
    }

    /// Returns `true` if the marker is present.
    pub fn contains(self, marker: ThemeMarker) -> bool {
        self.0 & marker.bit() != 0
    }

    /// Returns `true` if no marker is present.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of markers present.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the present markers in [`ThemeMarker::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = ThemeMarker> {
        ThemeMarker::ALL
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

impl FromIterator<ThemeMarker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = ThemeMarker>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for marker in iter {
            set.insert(marker);
        }
        set
    }
}

// ============================================================================
// ThemeMode
// ============================================================================

/// A color scheme the document can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Every mode, in stylesheet order.
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Dark, ThemeMode::Light];

    /// The `prefers-color-scheme` value selecting this mode.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

// ============================================================================
// ColorPair
// ============================================================================

/// The paint colors used in light and dark mode.
///
/// Values are opaque CSS color strings; they are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct ColorPair {
    /// Color used when the viewer prefers a light scheme.
    #[serde(default = "default_light")]
    pub light: String,

    /// Color used when the viewer prefers a dark scheme.
    #[serde(default = "default_dark")]
    pub dark: String,
}

fn default_light() -> String {
    "#000000".to_string()
}

fn default_dark() -> String {
    "#FFFFFF".to_string()
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            light: default_light(),
            dark: default_dark(),
        }
    }
}

impl ColorPair {
    /// Creates a color pair.
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// The color active in `mode`.
    pub fn color_for(&self, mode: ThemeMode) -> &str {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Mutable access to the color active in `mode`.
    pub fn color_for_mut(&mut self, mode: ThemeMode) -> &mut String {
        match mode {
            ThemeMode::Light => &mut self.light,
            ThemeMode::Dark => &mut self.dark,
        }
    }
}

// ============================================================================
// Stylesheet
// ============================================================================

/// Builds the stylesheet text that maps every marker to the color of each mode.
///
/// Rules are `!important` so they override presentation attributes and inline
/// styles already present on the marked elements.
pub fn stylesheet(colors: &ColorPair) -> String {
    let mut css = String::from("\n");
    for mode in ThemeMode::ALL {
        let color = colors.color_for(mode);
        // Writing to a String cannot fail.
        let _ = writeln!(css, "@media (prefers-color-scheme: {}) {{", mode.scheme());
        for marker in ThemeMarker::ALL {
            let _ = writeln!(
                css,
                "  .{} {{ {}: {} !important; }}",
                marker.class_name(),
                marker.paint_attribute(),
                color
            );
        }
        css.push_str("}\n");
    }
    css
}

/// Returns `true` if stylesheet text targets any marker class.
pub fn is_theme_stylesheet(css: &str) -> bool {
    ThemeMarker::ALL
        .into_iter()
        .any(|m| css.contains(&format!(".{}", m.class_name())))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painted_values() {
        assert!(is_painted("#111111"));
        assert!(is_painted("currentColor"));
        assert!(is_painted("url(#grad)"));
        assert!(!is_painted("none"));
        assert!(!is_painted(" None "));
        assert!(!is_painted("transparent"));
        assert!(!is_painted(""));
        assert!(!is_painted("   "));
    }

    #[test]
    fn shape_tags() {
        for tag in ["path", "circle", "rect", "polygon", "ellipse", "line"] {
            assert!(is_shape(tag));
        }
        assert!(!is_shape("g"));
        assert!(!is_shape("text"));
        assert!(!is_shape("polyline"));
    }

    #[test]
    fn marker_class_names() {
        assert_eq!(ThemeMarker::Fill.class_name(), "dark-mode-fill");
        assert_eq!(ThemeMarker::Stroke.class_name(), "dark-mode-stroke");
        assert_eq!(
            ThemeMarker::from_class_name("dark-mode-stroke"),
            Some(ThemeMarker::Stroke)
        );
        assert_eq!(ThemeMarker::from_class_name("dark-mode"), None);
    }

    #[test]
    fn marker_set_never_duplicates() {
        let mut set = MarkerSet::EMPTY;
        assert!(set.is_empty());
        assert!(set.insert(ThemeMarker::Fill));
        assert!(!set.insert(ThemeMarker::Fill));
        assert_eq!(set.len(), 1);
        assert!(set.insert(ThemeMarker::Stroke));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![ThemeMarker::Fill, ThemeMarker::Stroke]
        );
    }

    #[test]
    fn color_for_mode() {
        let colors = ColorPair::new("#000000", "#FFFFFF");
        assert_eq!(colors.color_for(ThemeMode::Light), "#000000");
        assert_eq!(colors.color_for(ThemeMode::Dark), "#FFFFFF");
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn stylesheet_contains_both_schemes() {
        let css = stylesheet(&ColorPair::new("#123456", "#abcdef"));
        assert!(css.contains("@media (prefers-color-scheme: dark) {"));
        assert!(css.contains("@media (prefers-color-scheme: light) {"));
        assert!(css.contains(".dark-mode-fill { fill: #abcdef !important; }"));
        assert!(css.contains(".dark-mode-stroke { stroke: #abcdef !important; }"));
        assert!(css.contains(".dark-mode-fill { fill: #123456 !important; }"));
        assert!(css.contains(".dark-mode-stroke { stroke: #123456 !important; }"));

        let dark = css.find("prefers-color-scheme: dark").unwrap();
        let dark_rule = css.find("fill: #abcdef").unwrap();
        let light = css.find("prefers-color-scheme: light").unwrap();
        assert!(dark < dark_rule && dark_rule < light);
        assert!(is_theme_stylesheet(&css));
    }

    #[test]
    fn user_stylesheets_are_not_theme_stylesheets() {
        assert!(!is_theme_stylesheet(".st0 { fill: #333; }"));
    }

    #[test]
    fn color_pair_defaults() {
        let colors: ColorPair = serde_json::from_str("{}").unwrap();
        assert_eq!(colors, ColorPair::new("#000000", "#FFFFFF"));
    }
}
