//! Browser glue: image loading and window size

use std::future::Future;

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use super::viewport_for_window;
use crate::assets::{AssetError, AssetKind, SpriteLoader};
use crate::sim::Viewport;

/// Loads sprites as `<img>` elements, resolving on `load` and failing on `error`
pub struct ImageLoader;

impl SpriteLoader for ImageLoader {
    type Sprite = HtmlImageElement;

    fn load(
        &self,
        kind: AssetKind,
        path: &str,
    ) -> impl Future<Output = Result<HtmlImageElement, AssetError>> {
        let path = path.to_string();
        async move {
            let failed = || AssetError::Load {
                kind,
                path: path.clone(),
            };
            let image = HtmlImageElement::new().map_err(|_| failed())?;
            let loaded = js_sys::Promise::new(&mut |resolve, reject| {
                image.set_onload(Some(&resolve));
                image.set_onerror(Some(&reject));
            });
            image.set_src(&path);
            let result = JsFuture::from(loaded).await;
            image.set_onload(None);
            image.set_onerror(None);
            result.map_err(|_| failed())?;
            log::debug!("Loaded {} image {}", kind, path);
            Ok(image)
        }
    }
}

/// Current canvas viewport from the window's inner size
pub fn window_viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some(viewport_for_window(w as f32, h as f32))
}

/// Fresh run seed from the clock
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}
