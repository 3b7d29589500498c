//! JavaScript bindings.

use crate::hungarian::HungarianSolver;
use crate::matrix::CostMatrix;
use wasm_bindgen::prelude::*;

/// Solves an assignment problem given as a 2-D array of costs, where
/// `null` marks a forbidden cell. Returns the serialized `Assignment`.
#[wasm_bindgen]
pub fn solve(costs: JsValue) -> Result<JsValue, JsError> {
    let table: Vec<Vec<Option<u32>>> = serde_wasm_bindgen::from_value(costs)?;
    let matrix = CostMatrix::from_options(table)?;
    let result = HungarianSolver::solve(&matrix);
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
