//! Bindings to the external formatter and compiler collaborators.
//!
//! Both are loaded as browser globals by `index.html` and consumed
//! strictly through their promise contracts. The adapter structs are
//! constructed once at startup and handed to the code that needs them,
//! so nothing on the Rust side reaches for ambient mutable state.

use js_sys::{Array, Object, Promise, Reflect};
use playground_rs::Session;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = esbuild, js_name = initialize)]
    fn esbuild_initialize(options: &JsValue) -> Promise;

    #[wasm_bindgen(js_namespace = esbuild, js_name = transform)]
    fn esbuild_transform(source: &str, options: &JsValue) -> Promise;

    #[wasm_bindgen(js_namespace = prettier, js_name = format)]
    fn prettier_format(source: &str, options: &JsValue) -> Promise;
}

/// WASM binary matching the esbuild loader script in `index.html`.
const COMPILER_WASM_URL: &str = "https://unpkg.com/esbuild-wasm@0.21.5/esbuild.wasm";

fn option_object(entries: &[(&str, &JsValue)]) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}

/// Adapter over the TypeScript compiler global.
#[derive(Clone, Copy, Default)]
pub struct ScriptCompiler;

impl ScriptCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Run the compiler's async initialization.
    ///
    /// Must complete before the first [`to_executable`](Self::to_executable)
    /// call for a typed session; the app calls it exactly once at
    /// startup and flips the readiness flag on completion.
    pub async fn initialize(&self) -> Result<(), JsValue> {
        let options = option_object(&[("wasmURL", &JsValue::from_str(COMPILER_WASM_URL))])?;
        JsFuture::from(esbuild_initialize(&options)).await?;
        Ok(())
    }

    /// Resolve the executable script for a session.
    ///
    /// Plain JavaScript passes through untouched, without suspension.
    /// Typed sources go through `transform`; a syntax error rejects and
    /// is propagated for the caller to keep the previous preview.
    pub async fn to_executable(&self, session: &Session) -> Result<String, JsValue> {
        if !session.script_is_typed {
            return Ok(session.script.clone());
        }
        let options = option_object(&[("loader", &JsValue::from_str("ts"))])?;
        let result = JsFuture::from(esbuild_transform(&session.script, &options)).await?;
        Reflect::get(&result, &JsValue::from_str("code"))?
            .as_string()
            .ok_or_else(|| JsValue::from_str("compiler returned a non-string result"))
    }
}

/// Adapter over the standalone formatter global.
#[derive(Clone, Copy, Default)]
pub struct Formatter;

impl Formatter {
    pub fn new() -> Self {
        Self
    }

    /// All plugin bundles registered by `index.html`, passed to every
    /// format call so the parser named in the options can resolve.
    fn plugin_list() -> Result<JsValue, JsValue> {
        let plugins = Reflect::get(&js_sys::global(), &JsValue::from_str("prettierPlugins"))?;
        let plugins: Object = plugins
            .dyn_into()
            .map_err(|_| JsValue::from_str("prettierPlugins global is missing"))?;
        Ok(Object::values(&plugins).into())
    }

    fn format_promise(&self, source: &str, parser: &str) -> Result<Promise, JsValue> {
        let options = option_object(&[
            ("parser", &JsValue::from_str(parser)),
            ("plugins", &Self::plugin_list()?),
        ])?;
        Ok(prettier_format(source, &options))
    }

    /// Format all three panes concurrently.
    ///
    /// A single rejection rejects the whole call before any field is
    /// produced, which gives the format trigger its all-or-nothing
    /// commit for free.
    pub async fn format_session(&self, session: &Session) -> Result<Session, JsValue> {
        let script_parser = if session.script_is_typed {
            "typescript"
        } else {
            "babel"
        };
        let batch = Array::of3(
            &self.format_promise(&session.markup, "html")?.into(),
            &self.format_promise(&session.style, "css")?.into(),
            &self.format_promise(&session.script, script_parser)?.into(),
        );
        let results = JsFuture::from(Promise::all(&batch.into())).await?;
        let results = Array::from(&results);

        let text = |index: u32, pane: &str| -> Result<String, JsValue> {
            results
                .get(index)
                .as_string()
                .ok_or_else(|| JsValue::from_str(&format!("formatter returned a non-string {pane}")))
        };

        Ok(Session {
            markup: text(0, "markup")?,
            style: text(1, "style")?,
            script: text(2, "script")?,
            ..session.clone()
        })
    }
}
