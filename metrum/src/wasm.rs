use crate::{print_units, Engine, MetrumError};
use serde_json::json;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
}

impl Default for WasmEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        WasmEngine {
            engine: Engine::new(),
        }
    }

    #[wasm_bindgen(js_name = parseUnits)]
    pub fn parse_units(&self, source: &str) -> String {
        match self.engine.parse_units(source) {
            Ok(units) => json!({
                "success": true,
                "units": units,
                "display": print_units(&units),
                "error": null,
            })
            .to_string(),
            Err(e) => error_json(&e),
        }
    }

    #[wasm_bindgen(js_name = addUnitSystem)]
    pub fn add_unit_system(&mut self, unit_system_json: &str) -> String {
        match self.engine.add_unit_system_json(unit_system_json) {
            Ok(()) => json!({
                "success": true,
                "units": self.engine.unit_system().len(),
                "error": null,
            })
            .to_string(),
            Err(e) => error_json(&e),
        }
    }

    #[wasm_bindgen(js_name = checkEquivalent)]
    pub fn check_equivalent(&self, left: &str, right: &str) -> String {
        match self.engine.check_equivalent(left, right) {
            Ok(equivalent) => json!({
                "success": true,
                "equivalent": equivalent,
                "error": null,
            })
            .to_string(),
            Err(e) => error_json(&e),
        }
    }
}

fn error_json(error: &MetrumError) -> String {
    let diagnostics = error
        .formatted()
        .map(|details| json!(details.diagnostics))
        .unwrap_or(serde_json::Value::Null);
    json!({
        "success": false,
        "error": error.to_string(),
        "diagnostics": diagnostics,
    })
    .to_string()
}
