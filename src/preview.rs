//! Preview resolution: bakes one theme's color into an adaptive document.
//!
//! An adaptive SVG follows the viewer's OS color scheme. A preview instead has
//! to follow an explicit light/dark toggle, so the theme stylesheet is removed
//! and every marked element gets a literal `fill`/`stroke` in the active color.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::document::{SvgTree, ThemeTree};
use crate::theme::{ColorPair, STYLE_TAG, ThemeMode};

// ============================================================================
// Resolution
// ============================================================================

/// Removes the stylesheet and writes `color` into every marked paint attribute.
///
/// The first `<style>` element in document order is taken to be the injected
/// one. Markers stay attached. Returns the number of attributes written.
pub fn resolve_markers<T: ThemeTree>(tree: &mut T, color: &str) -> usize {
    if let Some(style) = tree.select(|t, n| t.tag_name(n) == STYLE_TAG).first() {
        tree.remove(*style);
    }

    let mut written = 0;
    for node in tree.select(|t, n| !t.markers(n).is_empty()) {
        for marker in tree.markers(node).iter() {
            tree.set_attribute(node, marker.paint_attribute(), color);
            written += 1;
        }
    }
    written
}

/// Renders an adaptive document for one explicit mode.
///
/// Returns an empty string when `adaptive` cannot be parsed: previews feed a
/// passive display, which then shows nothing.
///
/// # Example
///
/// ```
/// use favicon_theme::{inject, resolve_preview, ColorPair, ThemeMode};
///
/// let colors = ColorPair::new("#000000", "#FFFFFF");
/// let adaptive = inject(r#"<svg><circle r="4"/></svg>"#, &colors).unwrap();
///
/// let dark = resolve_preview(&adaptive, ThemeMode::Dark, &colors);
/// assert_eq!(dark, r##"<svg><circle r="4" fill="#FFFFFF" class="dark-mode-fill"/></svg>"##);
///
/// assert_eq!(resolve_preview("not xml", ThemeMode::Dark, &colors), "");
/// ```
pub fn resolve_preview(adaptive: &str, mode: ThemeMode, colors: &ColorPair) -> String {
    if adaptive.trim().is_empty() {
        return String::new();
    }

    let mut tree = match SvgTree::parse(adaptive) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::warn!(%err, "preview source did not parse; rendering nothing");
            return String::new();
        }
    };

    let written = resolve_markers(&mut tree, colors.color_for(mode));
    tracing::debug!(%mode, written, "resolved preview");
    tree.to_svg_string()
}

// ============================================================================
// Rasterization
// ============================================================================

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Rasterizes preview markup to an RGBA image.
///
/// The document is scaled to fit within `size x size` pixels while preserving
/// aspect ratio. Returns `None` if the markup is empty, cannot be parsed or
/// has no drawable area.
pub fn render_preview(preview: &str, size: u32) -> Option<RgbaImage> {
    if preview.is_empty() || size == 0 {
        return None;
    }

    let markup = with_svg_namespace(preview)?;
    let opts = Options::default();
    let tree = Tree::from_str(&markup, &opts).ok()?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Declares the SVG default namespace on an unprefixed root that has none.
///
/// usvg only recognizes elements in the SVG namespace, while favicons are
/// often written as a bare `<svg>`.
fn with_svg_namespace(preview: &str) -> Option<String> {
    let mut tree = SvgTree::parse(preview).ok()?;
    let root = tree.root();
    let unprefixed = tree.element(root).is_some_and(|el| !el.name().contains(':'));
    if unprefixed && tree.attribute(root, "xmlns").is_none() {
        tree.set_attribute(root, "xmlns", SVG_NAMESPACE);
    }
    Some(tree.to_svg_string())
}

/// Converts a premultiplied tiny_skia pixmap to a straight-alpha image.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    img
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fake::FakeTree;
    use crate::injector::inject;
    use crate::theme::ThemeMarker;

    fn is_resolved<T: ThemeTree>(tree: &T, node: T::NodeId, marker: ThemeMarker, color: &str) -> bool {
        tree.attribute(node, marker.paint_attribute()) == Some(color)
    }

    fn colors() -> ColorPair {
        ColorPair::new("#000000", "#FFFFFF")
    }

    #[test]
    fn resolves_markers_on_fake_tree() {
        let mut tree = FakeTree::new("svg");
        let style = tree.add(0, "style", &[]);
        let a = tree.add(0, "path", &[("fill", "#111")]);
        let b = tree.add(0, "line", &[("stroke", "#222")]);
        let plain = tree.add(0, "g", &[("fill", "#333")]);
        tree.add_marker(a, ThemeMarker::Fill);
        tree.add_marker(b, ThemeMarker::Fill);
        tree.add_marker(b, ThemeMarker::Stroke);

        let written = resolve_markers(&mut tree, "orange");

        assert_eq!(written, 3);
        assert!(tree.elements[style].removed);
        assert!(is_resolved(&tree, a, ThemeMarker::Fill, "orange"));
        assert!(is_resolved(&tree, b, ThemeMarker::Fill, "orange"));
        assert!(is_resolved(&tree, b, ThemeMarker::Stroke, "orange"));
        assert_eq!(tree.attribute(plain, "fill"), Some("#333"));
        assert!(tree.markers(a).contains(ThemeMarker::Fill));
    }

    #[test]
    fn preview_round_trip() {
        let source = r##"<svg><g stroke="#444"><path fill="#111" d="M0 0"/></g><rect/><circle fill="none"/></svg>"##;
        let adaptive = inject(source, &colors()).unwrap();

        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let expected = colors().color_for(mode).to_string();
            let preview = resolve_preview(&adaptive, mode, &colors());
            let tree = SvgTree::parse(&preview).unwrap();

            assert!(tree.select(|t, n| t.tag_name(n) == "style").is_empty());
            for marker in ThemeMarker::ALL {
                let marked = tree.select(|t, n| t.markers(n).contains(marker));
                assert!(!marked.is_empty());
                for node in marked {
                    assert!(is_resolved(&tree, node, marker, &expected));
                }
            }
            let circle = tree.select(|t, n| t.tag_name(n) == "circle")[0];
            assert_eq!(tree.attribute(circle, "fill"), Some("none"));
        }
    }

    #[test]
    fn keeps_later_user_stylesheets() {
        let source = r#"<svg><defs><style>.st0 { opacity: 0.5; }</style></defs><path class="st0"/></svg>"#;
        let adaptive = inject(source, &colors()).unwrap();
        let preview = resolve_preview(&adaptive, ThemeMode::Light, &colors());

        assert!(!preview.contains("prefers-color-scheme"));
        assert!(preview.contains(".st0 { opacity: 0.5; }"));
        assert!(preview.contains(r##"class="st0 dark-mode-fill" fill="#000000""##));
    }

    #[test]
    fn degrades_to_empty_string() {
        assert_eq!(resolve_preview("", ThemeMode::Light, &colors()), "");
        assert_eq!(resolve_preview("<svg>", ThemeMode::Dark, &colors()), "");
        assert_eq!(resolve_preview("<html/>", ThemeMode::Dark, &colors()), "");
    }

    #[test]
    fn render_uses_preview_color() {
        let colors = ColorPair::new("#ff0000", "#0000ff");
        let adaptive = inject(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#,
            &colors,
        )
        .unwrap();

        let dark = resolve_preview(&adaptive, ThemeMode::Dark, &colors);
        let img = render_preview(&dark, 20).expect("preview should render");
        assert_eq!((img.width(), img.height()), (20, 20));
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 255, 255]);

        let light = resolve_preview(&adaptive, ThemeMode::Light, &colors);
        let img = render_preview(&light, 20).expect("preview should render");
        assert_eq!(img.get_pixel(10, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn render_accepts_root_without_namespace() {
        let colors = ColorPair::new("#ff0000", "#0000ff");
        let adaptive = inject(
            r#"<svg width="10" height="10"><rect width="10" height="10"/></svg>"#,
            &colors,
        )
        .unwrap();

        let dark = resolve_preview(&adaptive, ThemeMode::Dark, &colors);
        assert!(!dark.contains("xmlns"));
        let img = render_preview(&dark, 20).expect("preview should render");
        assert_eq!((img.width(), img.height()), (20, 20));
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 255, 255]);
    }

    #[test]
    fn namespace_added_only_when_missing() {
        assert_eq!(
            with_svg_namespace(r#"<svg width="1"/>"#).as_deref(),
            Some(r#"<svg width="1" xmlns="http://www.w3.org/2000/svg"/>"#)
        );
        let declared = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1"/>"#;
        assert_eq!(with_svg_namespace(declared).as_deref(), Some(declared));
        let prefixed = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(with_svg_namespace(prefixed).as_deref(), Some(prefixed));
    }

    #[test]
    fn resolve_markers_strips_stylesheet_ahead_of_user_styles() {
        let mut tree = FakeTree::new("svg");
        let user_style = tree.add(0, "style", &[]);
        let path = tree.add(0, "path", &[("fill", "#111")]);
        crate::injector::apply_theme(&mut tree, &colors());
        let theme_style = tree.select(|t, n| t.tag_name(n) == "style")[0];
        assert_ne!(theme_style, user_style);

        resolve_markers(&mut tree, "teal");

        assert!(tree.elements[theme_style].removed);
        assert!(!tree.elements[user_style].removed);
        assert_eq!(tree.attribute(path, "fill"), Some("teal"));
    }

    #[test]
    fn render_rejects_empty_preview() {
        assert!(render_preview("", 32).is_none());
        assert!(render_preview("not svg", 32).is_none());
    }
}
