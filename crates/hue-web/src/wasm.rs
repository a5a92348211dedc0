#![forbid(unsafe_code)]

use hue_field::{BlobElement, BlobHost, BlobLayout, Offset, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::runner::{FieldRunner, HueFieldOptions};
use crate::{HostError, style};

/// A blob's DOM element. Offsets land in the `--drift-x`/`--drift-y`
/// custom properties.
struct DomBlob(HtmlElement);

impl BlobElement for DomBlob {
    fn set_offset(&mut self, offset: Offset) {
        let css = self.0.style();
        for (name, value) in style::offset_declarations(offset) {
            // A failed style write only loses one frame of decoration.
            let _ = css.set_property(name, &value);
        }
    }
}

/// Appends generated blobs to the field container.
struct DomHost {
    document: Document,
    container: Element,
}

impl BlobHost for DomHost {
    type Element = DomBlob;

    fn spawn_blob(&mut self, layout: &BlobLayout) -> Option<DomBlob> {
        let el = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        el.set_class_name(style::DYNAMIC_BLOB_CLASS);
        let css = el.style();
        for (name, value) in style::layout_declarations(layout) {
            css.set_property(name, &value).ok()?;
        }
        self.container.append_child(&el).ok()?;
        Some(DomBlob(el))
    }
}

/// Page-level hue field bound to the DOM.
///
/// ```js
/// const field = HueFieldWeb.mount(JSON.stringify({ seed: 7 }));
/// const frame = (t) => { if (field.step(t)) requestAnimationFrame(frame); };
/// requestAnimationFrame(frame);
/// addEventListener("resize", () => field.resize(innerWidth, innerHeight));
/// ```
#[wasm_bindgen]
pub struct HueFieldWeb {
    runner: FieldRunner<DomBlob>,
}

#[wasm_bindgen]
impl HueFieldWeb {
    /// Find `.hue-field`, adopt existing `.hue-blob` elements, and fill the
    /// page. `options` is an optional JSON object (seed plus parameter
    /// overrides). Without a container the instance is dormant.
    pub fn mount(options: Option<String>) -> Result<HueFieldWeb, JsValue> {
        let options =
            HueFieldOptions::from_json(options.as_deref().unwrap_or("")).map_err(to_js)?;
        let window = web_sys::window().ok_or_else(|| to_js(HostError::Dom("window")))?;
        let document = window
            .document()
            .ok_or_else(|| to_js(HostError::Dom("document")))?;
        let viewport = viewport(&window);

        let Some(container) = document.query_selector(style::FIELD_SELECTOR).ok().flatten() else {
            return Ok(Self {
                runner: FieldRunner::dormant(viewport, options.params).map_err(to_js)?,
            });
        };

        let fixed = existing_blobs(&document);
        let page_height = document
            .body()
            .map(|body| f64::from(body.scroll_height()))
            .unwrap_or(0.0);
        let mut host = DomHost {
            document,
            container,
        };
        let runner = FieldRunner::mount(
            &mut host,
            fixed,
            viewport,
            page_height,
            options,
            random_seed(),
        )
        .map_err(to_js)?;
        Ok(Self { runner })
    }

    /// Advance one frame. Returns whether the host should schedule another
    /// (`false` once destroyed, and always `false` when dormant).
    pub fn step(&mut self, time: f64) -> bool {
        self.runner.step(time).running
    }

    /// Update drift bounds after a viewport change.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.runner.resize(width, height);
    }

    #[wasm_bindgen(js_name = blobCount)]
    pub fn blob_count(&self) -> usize {
        self.runner.field().len()
    }

    #[wasm_bindgen(js_name = isDormant)]
    pub fn is_dormant(&self) -> bool {
        self.runner.is_dormant()
    }

    /// Stop the loop. Elements stay in the page at their last offsets.
    pub fn destroy(&mut self) {
        self.runner.stop();
    }
}

fn to_js(err: HostError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn viewport(window: &Window) -> Viewport {
    let dim = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn existing_blobs(document: &Document) -> Vec<DomBlob> {
    let Ok(list) = document.query_selector_all(style::BLOB_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(DomBlob)
        .collect()
}

/// 64 bits from two `Math.random()` draws.
fn random_seed() -> u64 {
    let half = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}
