//! Spreadsheet rendering: one sheet per table.

mod sheet;
mod xlsx;

pub use sheet::{
    build_sheet, build_sheets, Cell, CellRange, CellStyle, CellValue, SheetSpec, WorkbookLayout,
    DEFAULT_COLUMN_WIDTH, HEADER_ROW,
};
pub use xlsx::write_workbook;

use crate::error::RenderError;
use crate::schema::Document;

/// Render the document as `.xlsx` bytes.
pub fn render_workbook(doc: &Document, layout: &WorkbookLayout) -> Result<Vec<u8>, RenderError> {
    let sheets = build_sheets(doc, layout)?;
    write_workbook(&sheets)
}
