pub mod emit;
pub mod error;
pub mod markdown;
pub mod measure;
pub mod openapi;
pub mod parser;
pub mod plantuml;
pub mod schema;
pub mod settings;
pub mod sql;
pub mod validate;
pub mod workbook;

use wasm_bindgen::prelude::*;

pub use error::{Error, RenderError};
pub use parser::{load, load_str, ParseError};
pub use schema::Document;

use markdown::render_markdown;
use openapi::render_openapi;
use plantuml::render_plantuml;
use sql::render_sql;
use workbook::{render_workbook, WorkbookLayout};

/// Render the ER diagram source and the Markdown reference together.
pub fn render_diagram(doc: &Document) -> (String, String) {
    (render_plantuml(doc), render_markdown(doc))
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render schema YAML to a MySQL DDL script
#[wasm_bindgen(js_name = "schemaToSql")]
pub fn schema_to_sql(source: &str) -> Result<String, String> {
    let doc = load_str(source).map_err(|e| e.to_string())?;
    render_sql(&doc).map_err(|e| e.to_string())
}

/// Render schema YAML to OpenAPI component schemas (YAML)
#[wasm_bindgen(js_name = "schemaToOpenApi")]
pub fn schema_to_openapi(source: &str) -> Result<String, String> {
    let doc = load_str(source).map_err(|e| e.to_string())?;
    render_openapi(&doc).to_yaml().map_err(|e| e.to_string())
}

#[wasm_bindgen(js_name = "schemaToPlantUml")]
pub fn schema_to_plantuml(source: &str) -> Result<String, String> {
    let doc = load_str(source).map_err(|e| e.to_string())?;
    Ok(render_plantuml(&doc))
}

#[wasm_bindgen(js_name = "schemaToMarkdown")]
pub fn schema_to_markdown(source: &str) -> Result<String, String> {
    let doc = load_str(source).map_err(|e| e.to_string())?;
    Ok(render_markdown(&doc))
}

/// Render schema YAML to `.xlsx` bytes
#[wasm_bindgen(js_name = "schemaToXlsx")]
pub fn schema_to_xlsx(source: &str) -> Result<Vec<u8>, String> {
    let doc = load_str(source).map_err(|e| e.to_string())?;
    render_workbook(&doc, &WorkbookLayout::default()).map_err(|e| e.to_string())
}
