//! WASM bindings for Vinted profile analysis.
//!
//! The browser front end pastes the profile page into a text box and calls
//! these bindings. Errors are thrown as `{ kind, message }` objects whose
//! message can be shown as is. Panics abort on this target, so they arrive
//! as a `RuntimeError` rather than a `malformed_input` object.

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use vintalyze_core::{
    EngagementChart, ExtractionError, ExtractionOptions, ProfileExtractor, ProfileParser,
    ProfileRecord,
};

const EMPTY_INPUT_MESSAGE: &str = "Veuillez coller le contenu de la page du profil Vinted";

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Analyze pasted profile text.
///
/// `options` is a partial `ExtractionOptions` object, or `undefined` for defaults.
#[wasm_bindgen]
pub fn analyze_profile(text: &str, options: JsValue) -> Result<JsValue, JsValue> {
    ProfileAnalyzer::new(options)?.analyze(text)
}

/// Default extraction options, as a plain object the front end can edit.
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    to_js(&ExtractionOptions::default())
}

/// Engagement chart bars (followers, following, estimated sales) for pasted text.
#[wasm_bindgen]
pub fn engagement_chart(text: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let record = ProfileAnalyzer::new(options)?.record(text)?;
    to_js(&EngagementChart::from_record(&record))
}

/// Profile analyzer for repeated use from the browser.
///
/// Builds its rules once; reuse it across pastes.
#[wasm_bindgen]
pub struct ProfileAnalyzer {
    parser: ProfileParser,
}

#[wasm_bindgen]
impl ProfileAnalyzer {
    /// Create an analyzer from options, or defaults when `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<ProfileAnalyzer, JsValue> {
        let options = parse_options(options)?;
        let parser = ProfileParser::new(&options).map_err(extraction_error)?;
        Ok(Self { parser })
    }

    /// Analyze pasted text and return the profile record.
    #[wasm_bindgen]
    pub fn analyze(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.record(text)?)
    }

    /// Analyze pasted text and return the record with rule sources and warnings.
    #[wasm_bindgen]
    pub fn analyze_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        check_not_empty(text)?;
        let result = self.parser.parse(text).map_err(extraction_error)?;
        to_js(&result)
    }
}

impl ProfileAnalyzer {
    fn record(&self, text: &str) -> Result<ProfileRecord, JsValue> {
        check_not_empty(text)?;
        self.parser.extract(text).map_err(extraction_error)
    }
}

fn parse_options(options: JsValue) -> Result<ExtractionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ExtractionOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| error_object("invalid_options", &e.to_string()))
}

fn check_not_empty(text: &str) -> Result<(), JsValue> {
    if text.trim().is_empty() {
        return Err(error_object("empty_input", EMPTY_INPUT_MESSAGE));
    }
    Ok(())
}

fn extraction_error(err: ExtractionError) -> JsValue {
    // The cause stays in the console; the page only shows the user message.
    web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
    error_object(err.kind(), err.user_message())
}

fn error_object(kind: &str, message: &str) -> JsValue {
    let error = Object::new();
    // Setting a property on a fresh object cannot fail.
    let _ = Reflect::set(&error, &"kind".into(), &kind.into());
    let _ = Reflect::set(&error, &"message".into(), &message.into());
    error.into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than Maps, so the front end can read fields directly.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| error_object("serialization", &e.to_string()))
}
