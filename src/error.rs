use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures crossing the Rust/JavaScript boundary
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("browser API call failed: {0}")]
    Js(String),

    #[error("failed to convert value: {0}")]
    Serde(#[from] serde_wasm_bindgen::Error),
}

impl From<JsValue> for BridgeError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        BridgeError::Js(message)
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
