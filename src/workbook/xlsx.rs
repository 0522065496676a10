//! Merge sheet descriptions into one `.xlsx` workbook.

use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, IntoExcelData, Workbook, Worksheet, XlsxError,
};

use super::sheet::{Cell, CellStyle, CellValue, SheetSpec};
use crate::error::RenderError;

struct Styles {
    header: Format,
    primary_key: Format,
    foreign_key: Format,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin),
            primary_key: Format::new().set_bold().set_font_color(Color::RGB(0xFF0000)),
            foreign_key: Format::new().set_font_color(Color::RGB(0x0000FF)),
        }
    }
}

impl Styles {
    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::PrimaryKey => &self.primary_key,
            CellStyle::ForeignKey => &self.foreign_key,
        }
    }
}

/// Write every sheet into a fresh workbook and return the file bytes.
pub fn write_workbook(sheets: &[SheetSpec]) -> Result<Vec<u8>, RenderError> {
    let styles = Styles::default();
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = build_worksheet(sheet, &styles).map_err(|source| RenderError::Workbook {
            sheet: sheet.name.clone(),
            source,
        })?;
        workbook.push_worksheet(worksheet);
    }

    Ok(workbook.save_to_buffer()?)
}

fn build_worksheet(sheet: &SheetSpec, styles: &Styles) -> Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(&sheet.name)?;

    for cell in &sheet.cells {
        let format = cell.style.map(|s| styles.get(s));
        match &cell.value {
            CellValue::Text(s) => write_cell(&mut worksheet, cell, s.as_str(), format)?,
            CellValue::Number(n) => write_cell(&mut worksheet, cell, *n, format)?,
            CellValue::Bool(b) => write_cell(&mut worksheet, cell, *b, format)?,
        }
    }

    for col in 0..sheet.width_columns {
        worksheet.set_column_width(col, sheet.column_width)?;
    }

    let range = sheet.autofilter;
    worksheet.autofilter(range.first_row, range.first_col, range.last_row, range.last_col)?;

    Ok(worksheet)
}

fn write_cell(
    worksheet: &mut Worksheet,
    cell: &Cell,
    data: impl IntoExcelData,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match format {
        Some(format) => worksheet.write_with_format(cell.row, cell.col, data, format)?,
        None => worksheet.write(cell.row, cell.col, data)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::load_str;
    use crate::workbook::{build_sheets, WorkbookLayout};

    fn sheets(input: &str) -> Vec<SheetSpec> {
        build_sheets(&load_str(input).unwrap(), &WorkbookLayout::default()).unwrap()
    }

    #[test]
    fn test_writes_zip_container() {
        let specs = sheets(
            r#"
tables:
  - name: users
    columns: [ { name: id, type: bigint, pk: true, default: 1 } ]
  - name: orders
    columns: [ { name: user_id, type: bigint, fk: { table: users, column: id } } ]
"#,
        );
        let bytes = write_workbook(&specs).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_awkward_table_names_still_render() {
        let specs = sheets(
            r#"
tables:
  - { name: 'bad[name]', columns: [ { name: a } ] }
  - { name: users, columns: [ { name: a } ] }
  - { name: Users, columns: [ { name: a } ] }
  - { name: customer_subscription_billing_events, columns: [ { name: a } ] }
"#,
        );
        let bytes = write_workbook(&specs).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_duplicate_table_names_render() {
        let specs = sheets(
            "tables: [ { name: t, columns: [ { name: a } ] }, { name: t, columns: [ { name: b } ] } ]",
        );
        assert_eq!(specs[1].name, "t_2");
        assert!(write_workbook(&specs).is_ok());
    }
}
