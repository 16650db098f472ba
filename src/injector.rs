//! Theme injection: turns a plain SVG into an adaptive one.
//!
//! The injector prepends a stylesheet that recolors marked elements under
//! `prefers-color-scheme`, then marks every element whose paint should follow
//! the theme:
//!
//! 1. descendants with a painted `fill` get [`ThemeMarker::Fill`];
//! 2. descendants with a painted `stroke` get [`ThemeMarker::Stroke`];
//! 3. shapes with neither attribute get [`ThemeMarker::Fill`], so they follow
//!    the theme instead of rendering in the default black.

use crate::document::{SvgTree, ThemeTree};
use crate::error::TransformError;
use crate::theme::{self, ColorPair, STYLE_TAG, ThemeMarker};

/// Number of markers each rule attached during [`apply_theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InjectionSummary {
    /// Elements marked because of a painted `fill`.
    pub fill: usize,
    /// Elements marked because of a painted `stroke`.
    pub stroke: usize,
    /// Unpainted shapes given the fill marker.
    pub default_ink: usize,
    /// Previously injected stylesheets that were replaced.
    pub replaced_stylesheets: usize,
}

/// Applies the theme stylesheet and markers to a tree in place.
///
/// A stylesheet left by an earlier injection (a root-level `<style>` that
/// targets marker classes) is removed first, so the tree always ends up with
/// exactly one theme stylesheet.
pub fn apply_theme<T: ThemeTree>(tree: &mut T, colors: &ColorPair) -> InjectionSummary {
    let mut summary = InjectionSummary::default();

    let root = tree.root();
    for child in tree.child_elements(root) {
        if tree.tag_name(child) == STYLE_TAG && theme::is_theme_stylesheet(&tree.text_content(child))
        {
            tree.remove(child);
            summary.replaced_stylesheets += 1;
        }
    }
    tree.insert_stylesheet(&theme::stylesheet(colors));

    for marker in ThemeMarker::ALL {
        let attribute = marker.paint_attribute();
        let painted = tree.select(|t, n| t.attribute(n, attribute).is_some_and(theme::is_painted));
        let count = painted
            .into_iter()
            .filter(|n| tree.add_marker(*n, marker))
            .count();
        match marker {
            ThemeMarker::Fill => summary.fill = count,
            ThemeMarker::Stroke => summary.stroke = count,
        }
    }

    let unpainted = tree.select(|t, n| {
        theme::is_shape(t.tag_name(n))
            && t.attribute(n, "fill").is_none()
            && t.attribute(n, "stroke").is_none()
    });
    summary.default_ink = unpainted
        .into_iter()
        .filter(|n| tree.add_marker(*n, ThemeMarker::Fill))
        .count();

    summary
}

/// Produces the adaptive version of an SVG document.
///
/// The source text is parsed fresh on every call, so calling this again with
/// different colors never accumulates markers or stylesheets.
///
/// # Errors
///
/// Returns [`TransformError::InvalidDocument`] if `source` is not well-formed
/// XML or its root element is not `<svg>`.
///
/// # Example
///
/// ```
/// use favicon_theme::{inject, ColorPair};
///
/// let colors = ColorPair::new("#000000", "#FFFFFF");
/// let adaptive = inject(r##"<svg><path fill="#111111" d="M0 0"/></svg>"##, &colors).unwrap();
///
/// assert!(adaptive.contains(".dark-mode-fill { fill: #FFFFFF !important; }"));
/// assert!(adaptive.contains(r##"<path fill="#111111" d="M0 0" class="dark-mode-fill"/>"##));
/// ```
pub fn inject(source: &str, colors: &ColorPair) -> Result<String, TransformError> {
    let mut tree = SvgTree::parse(source)?;
    let summary = apply_theme(&mut tree, colors);
    tracing::debug!(
        fill = summary.fill,
        stroke = summary.stroke,
        default_ink = summary.default_ink,
        replaced_stylesheets = summary.replaced_stylesheets,
        "injected theme stylesheet"
    );
    Ok(tree.to_svg_string())
}

// ============================================================================
// Tests
// ============================================================================
