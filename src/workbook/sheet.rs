//! Per-table sheet descriptions.
//!
//! Each table is turned into a self-contained [`SheetSpec`] value. Nothing
//! here touches a spreadsheet library; the specs are merged into one
//! workbook by [`super::xlsx`].

use std::collections::HashSet;

use rust_xlsxwriter::{ColNum, RowNum};
use serde::Serialize;

use crate::error::RenderError;
use crate::schema::{Column, DefaultValue, Document, Index, Table};

pub const DEFAULT_COLUMN_WIDTH: f64 = 18.0;

const HEADERS: [&str; 9] = [
    "No",
    "Column",
    "Type",
    "PK",
    "NOT NULL",
    "AUTO_INCREMENT",
    "DEFAULT",
    "FK",
    "Comment",
];
const INDEX_HEADERS: [&str; 3] = ["Name", "Columns", "UNIQUE"];
const MARK: &str = "○";

/// Zero-based row of the column table header (row 4 in the sheet).
pub const HEADER_ROW: RowNum = 3;
/// Blank rows between the column table and the index block, plus one.
const INDEX_GAP: RowNum = 3;

/// Spreadsheet limit on sheet name length, in characters.
const MAX_SHEET_NAME: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
/// Name reserved by the spreadsheet application itself.
const RESERVED_SHEET_NAME: &str = "history";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkbookLayout {
    pub column_width: f64,
}

impl Default for WorkbookLayout {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSpec {
    /// Sheet tab name, derived from the table name and unique in the workbook.
    pub name: String,
    pub cells: Vec<Cell>,
    /// Width applied to the first `width_columns` columns.
    pub column_width: f64,
    pub width_columns: ColNum,
    pub autofilter: CellRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub row: RowNum,
    pub col: ColNum,
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    /// Bold, centered, thin border on all sides.
    Header,
    /// Bold red text.
    PrimaryKey,
    /// Blue text.
    ForeignKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub first_row: RowNum,
    pub first_col: ColNum,
    pub last_row: RowNum,
    pub last_col: ColNum,
}

impl SheetSpec {
    pub fn cell(&self, row: RowNum, col: ColNum) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    pub fn text(&self, row: RowNum, col: ColNum) -> Option<&str> {
        match self.cell(row, col).map(|c| &c.value) {
            Some(CellValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

/// Describe one sheet per table, in document order.
///
/// Sheet names that collide (ignoring case) after sanitizing get a `_2`,
/// `_3`, ... suffix.
pub fn build_sheets(doc: &Document, layout: &WorkbookLayout) -> Result<Vec<SheetSpec>, RenderError> {
    let mut taken = HashSet::from([RESERVED_SHEET_NAME.to_string()]);
    doc.tables
        .iter()
        .map(|table| {
            let mut sheet = build_sheet(table, layout)?;
            sheet.name = unique_sheet_name(&sheet.name, &mut taken);
            Ok(sheet)
        })
        .collect()
}

/// Sheet name for a table: forbidden characters removed, no leading or
/// trailing apostrophe, at most 31 characters.
pub fn sheet_name(table: &str) -> String {
    let cleaned: String = table
        .chars()
        .filter(|c| !FORBIDDEN_SHEET_CHARS.contains(c))
        .collect();
    let trimmed = cleaned.trim_matches('\'');
    if trimmed.is_empty() {
        return "Sheet".to_string();
    }
    trimmed.chars().take(MAX_SHEET_NAME).collect()
}

fn unique_sheet_name(base: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while !taken.insert(candidate.to_lowercase()) {
        let suffix = format!("_{}", n);
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }
    candidate
}

pub fn build_sheet(table: &Table, layout: &WorkbookLayout) -> Result<SheetSpec, RenderError> {
    if table.columns.is_empty() {
        return Err(RenderError::EmptyFilterRange {
            table: table.name.clone(),
        });
    }
    tracing::debug!(table = %table.name, "building workbook sheet");

    let mut builder = SheetBuilder::default();

    builder.text(0, 0, "Table");
    builder.text(0, 1, &table.name);
    builder.text(1, 0, "Comment");
    builder.text(1, 1, &table.comment);

    for (col, header) in (0..).zip(HEADERS) {
        builder.styled(HEADER_ROW, col, CellValue::Text(header.to_string()), CellStyle::Header);
    }

    for (row, (i, column)) in (HEADER_ROW + 1..).zip(table.columns.iter().enumerate()) {
        builder.column_row(row, i + 1, column);
    }

    let last_row = HEADER_ROW + table.columns.len() as RowNum;
    let index_start = last_row + INDEX_GAP;
    builder.index_block(index_start, &table.indexes);

    Ok(SheetSpec {
        name: sheet_name(&table.name),
        cells: builder.cells,
        column_width: layout.column_width,
        width_columns: HEADERS.len() as ColNum,
        autofilter: CellRange {
            first_row: HEADER_ROW,
            first_col: 0,
            last_row,
            last_col: HEADERS.len() as ColNum - 1,
        },
    })
}

#[derive(Default)]
struct SheetBuilder {
    cells: Vec<Cell>,
}

impl SheetBuilder {
    fn put(&mut self, row: RowNum, col: ColNum, value: CellValue, style: Option<CellStyle>) {
        self.cells.push(Cell {
            row,
            col,
            value,
            style,
        });
    }

    /// Empty strings leave the cell blank.
    fn text(&mut self, row: RowNum, col: ColNum, text: &str) {
        if !text.is_empty() {
            self.put(row, col, CellValue::Text(text.to_string()), None);
        }
    }

    fn styled(&mut self, row: RowNum, col: ColNum, value: CellValue, style: CellStyle) {
        self.put(row, col, value, Some(style));
    }

    fn mark(&mut self, row: RowNum, col: ColNum, flag: bool) {
        if flag {
            self.text(row, col, MARK);
        }
    }

    fn column_row(&mut self, row: RowNum, number: usize, column: &Column) {
        self.put(row, 0, CellValue::Number(number as f64), None);

        let name = CellValue::Text(column.name.clone());
        if column.pk {
            self.styled(row, 1, name, CellStyle::PrimaryKey);
        } else {
            self.put(row, 1, name, None);
        }

        self.text(row, 2, &column.typ);
        self.mark(row, 3, column.pk);
        self.mark(row, 4, column.not_null);
        self.mark(row, 5, column.auto_increment);

        if let Some(default) = &column.default {
            self.put(row, 6, default_value(default), None);
        }
        if let Some(fk) = &column.fk {
            let target = CellValue::Text(format!("{}.{}", fk.table, fk.column));
            self.styled(row, 7, target, CellStyle::ForeignKey);
        }

        self.text(row, 8, &column.comment);
    }

    fn index_block(&mut self, start: RowNum, indexes: &[Index]) {
        self.text(start, 0, "Indexes");
        for (col, header) in (0..).zip(INDEX_HEADERS) {
            self.text(start + 1, col, header);
        }
        for (row, index) in (start + 2..).zip(indexes) {
            self.text(row, 0, &index.name);
            self.text(row, 1, &index.columns.join(", "));
            self.mark(row, 2, index.unique);
        }
    }
}

fn default_value(value: &DefaultValue) -> CellValue {
    match value {
        DefaultValue::Bool(b) => CellValue::Bool(*b),
        DefaultValue::Integer(n) => CellValue::Number(*n as f64),
        // Beyond 2^53 a spreadsheet number would round; keep the digits.
        DefaultValue::Unsigned(n) => CellValue::Text(n.to_string()),
        DefaultValue::Float(x) => CellValue::Number(*x),
        DefaultValue::String(s) => CellValue::Text(s.clone()),
    }
}
