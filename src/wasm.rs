use crate::{BreaksErr, equal_breaks, jenks_breaks, plot, quantile_breaks};
use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// Convert class breaks to an Array suitable for use by a JS function
fn breaks_to_js_array(result: Result<Vec<f64>, BreaksErr>) -> Result<Array, JsError> {
    let array = Array::new();
    for num in result.map_err(|e| JsError::new(&e.to_string()))? {
        array.push(&JsValue::from_f64(num));
    }
    Ok(array)
}

#[wasm_bindgen(js_name = equalBreaks)]
pub fn equal_breaks_wasm(data: &[f64], num_classes: u8) -> Result<Array, JsError> {
    breaks_to_js_array(equal_breaks(data, num_classes))
}

#[wasm_bindgen(js_name = quantileBreaks)]
pub fn quantile_breaks_wasm(data: &[f64], num_classes: u8) -> Result<Array, JsError> {
    breaks_to_js_array(quantile_breaks(data, num_classes))
}

#[wasm_bindgen(js_name = jenksBreaks)]
pub fn jenks_breaks_wasm(data: &[f64], num_classes: u8) -> Result<Array, JsError> {
    breaks_to_js_array(jenks_breaks(data, num_classes))
}

/// Class index of `value` within `breaks`, or -1 if it falls outside every class
#[wasm_bindgen(js_name = plot)]
pub fn plot_wasm(breaks: &[f64], value: f64, descending: bool) -> i32 {
    plot(breaks, value, descending)
        .and_then(|idx| i32::try_from(idx).ok())
        .unwrap_or(-1)
}
