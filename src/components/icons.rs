//! Icon Glyphs
//!
//! Inline vector glyphs generated from code rather than shipped as files.
//! The asset source serves the default markup under [`ARROW_LEFT_PATH`].

use gpui::{
    App, Hsla, IntoElement, Refineable, RenderOnce, StyleRefinement, Styled, Svg, Window,
    prelude::*, svg,
};

/// Asset path the arrow glyph is served under
pub const ARROW_LEFT_PATH: &str = "icons/exit-arrow.svg";

/// Path data for a leftward arrow on a 24x24 grid
const ARROW_LEFT_D: &str = "M10 19l-7-7m0 0l7-7m-7 7h18";

/// Attributes every glyph root carries, in output order
const ROOT_DEFAULTS: [(&str, &str); 4] = [
    ("xmlns", "http://www.w3.org/2000/svg"),
    ("fill", "none"),
    ("viewBox", "0 0 24 24"),
    ("stroke", "currentColor"),
];

/// SVG markup for the leftward arrow.
///
/// `attrs` land on the root `<svg>` element: a name matching a default
/// replaces it in place, anything else is appended in the given order.
pub fn arrow_left_markup<K, V>(attrs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut root: Vec<(&str, &str)> = ROOT_DEFAULTS.to_vec();
    for (name, value) in attrs {
        let (name, value) = (name.as_ref(), value.as_ref());
        match root.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => root.push((name, value)),
        }
    }

    let mut markup = String::from("<svg");
    for (name, value) in root {
        markup.push(' ');
        markup.push_str(name);
        markup.push_str("=\"");
        markup.push_str(&escape_attr(value));
        markup.push('"');
    }
    markup.push('>');
    markup.push_str(&format!(
        r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="{ARROW_LEFT_D}"/>"#
    ));
    markup.push_str("</svg>");
    markup
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Leftward arrow glyph element.
///
/// Any style set on it (size, margin, colour) is applied to the root SVG
/// element; without an explicit size it renders at 16px.
#[derive(IntoElement, Default)]
pub struct ArrowLeftIcon {
    style: StyleRefinement,
}

impl ArrowLeftIcon {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Styled for ArrowLeftIcon {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl ArrowLeftIcon {
    /// Root svg element in `color`, with this icon's refinements applied
    fn into_svg(self, color: Hsla) -> Svg {
        let has_size = self.style.size.width.is_some() || self.style.size.height.is_some();

        let mut glyph = svg()
            .path(ARROW_LEFT_PATH)
            .flex_none()
            .text_color(color)
            .when(!has_size, |this| this.size_4());
        glyph.style().refine(&self.style);
        glyph
    }
}

impl RenderOnce for ArrowLeftIcon {
    fn render(self, window: &mut Window, _cx: &mut App) -> impl IntoElement {
        self.into_svg(window.text_style().color)
    }
}
