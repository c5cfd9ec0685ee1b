//! Assets for secrets-gui
//!
//! Serves gpui-component's bundled icons plus the glyphs generated in
//! [`crate::components::icons`].

use crate::components::icons::{ARROW_LEFT_PATH, arrow_left_markup};
use gpui::{AssetSource, Result, SharedString};
use gpui_component_assets::Assets as ComponentAssets;
use std::borrow::Cow;

/// Asset source installed on the application
pub struct Assets;

/// Paths of glyphs generated in code
const GENERATED: [&str; 1] = [ARROW_LEFT_PATH];

fn generated(path: &str) -> Option<Vec<u8>> {
    const NO_ATTRS: [(&str, &str); 0] = [];
    match path {
        ARROW_LEFT_PATH => Some(arrow_left_markup(&NO_ATTRS).into_bytes()),
        _ => None,
    }
}

impl AssetSource for Assets {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }
        if let Some(bytes) = generated(path) {
            return Ok(Some(Cow::Owned(bytes)));
        }
        match ComponentAssets.load(path)? {
            Some(data) => Ok(Some(data)),
            None => Err(anyhow::anyhow!(r#"could not find asset at path "{path}""#)),
        }
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let mut files = ComponentAssets.list(path)?;

        files.extend(
            GENERATED
                .iter()
                .filter(|p| p.starts_with(path))
                .map(|p| SharedString::from(*p)),
        );

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ATTRS: [(&str, &str); 0] = [];

    #[test]
    fn arrow_glyph_is_served() {
        let data = Assets
            .load(ARROW_LEFT_PATH)
            .expect("load")
            .expect("present");
        let text = std::str::from_utf8(&data).expect("utf8");
        assert!(text.starts_with("<svg"));
        assert!(text.contains("M10 19l-7-7m0 0l7-7m-7 7h18"));
    }

    #[test]
    fn empty_path_loads_nothing() {
        assert!(Assets.load("").expect("load").is_none());
    }

    #[test]
    fn unknown_path_is_an_error() {
        assert!(Assets.load("icons/does-not-exist.svg").is_err());
    }

    #[test]
    fn list_includes_generated_glyphs_once() {
        let files = Assets.list("icons/").expect("list");
        let count = files
            .iter()
            .filter(|f| f.to_string() == ARROW_LEFT_PATH)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn generated_glyph_does_not_shadow_component_icons() {
        assert!(ComponentAssets.load(ARROW_LEFT_PATH).ok().flatten().is_none());

        let library = Assets
            .load("icons/arrow-left.svg")
            .expect("load")
            .expect("present");
        assert_ne!(library.as_ref(), arrow_left_markup(&NO_ATTRS).as_bytes());
    }
}
