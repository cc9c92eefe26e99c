use crate::sheet::{CellValue, SheetSpec};
use nuzum_render_core::RenderError;
use nuzum_types::Palette;
use rust_xlsxwriter::{Color as XlsxColor, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

/// The only sheet of the workbook produced when the real one cannot be built.
pub const ERROR_SHEET_NAME: &str = "خطأ";

fn xlsx_error(err: XlsxError) -> RenderError {
    RenderError::Xlsx(err.to_string())
}

fn xlsx_color(color: &nuzum_types::Color) -> XlsxColor {
    XlsxColor::RGB(color.to_hex_u32())
}

struct Formats {
    title: Format,
    header: Format,
    cell: Format,
    zebra: Format,
}

impl Formats {
    fn new(palette: &Palette) -> Self {
        let border = Format::new().set_border(FormatBorder::Thin).set_align(FormatAlign::Right);
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_font_color(XlsxColor::White)
                .set_background_color(xlsx_color(&palette.primary))
                .set_align(FormatAlign::Center),
            header: Format::new()
                .set_bold()
                .set_font_color(XlsxColor::White)
                .set_background_color(xlsx_color(&palette.primary))
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            zebra: border.clone().set_background_color(xlsx_color(&palette.zebra)),
            cell: border,
        }
    }
}

/// The sheets of a workbook, in tab order.
#[derive(Debug, Clone, Default)]
pub struct WorkbookSpec {
    pub sheets: Vec<SheetSpec>,
    pub palette: Palette,
}

impl WorkbookSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, sheet: SheetSpec) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Serializes the workbook to OOXML bytes.
    pub fn build(&self) -> Result<Vec<u8>, RenderError> {
        let formats = Formats::new(&self.palette);
        let mut workbook = Workbook::new();
        for spec in &self.sheets {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, spec, &formats).map_err(xlsx_error)?;
            log::debug!("Wrote sheet '{}' with {} rows", spec.name, spec.rows.len());
        }
        workbook.save_to_buffer().map_err(xlsx_error)
    }
}

fn write_sheet(worksheet: &mut Worksheet, spec: &SheetSpec, formats: &Formats) -> Result<(), XlsxError> {
    worksheet.set_name(&spec.name)?;
    worksheet.set_right_to_left(spec.right_to_left);

    let columns = spec.column_count();
    let last_col = u16::try_from(columns.saturating_sub(1)).unwrap_or(u16::MAX);

    if let Some(title) = &spec.title {
        if last_col > 0 {
            worksheet.merge_range(0, 0, 0, last_col, title, &formats.title)?;
        } else {
            worksheet.write_string_with_format(0, 0, title, &formats.title)?;
        }
    }

    let header_row = spec.header_row();
    for (col, label) in spec.header.iter().enumerate() {
        worksheet.write_string_with_format(header_row, col as u16, label, &formats.header)?;
    }

    for (i, row) in spec.rows.iter().enumerate() {
        let r = header_row + 1 + i as u32;
        let format = if spec.zebra && i % 2 == 1 { &formats.zebra } else { &formats.cell };
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(s) => worksheet.write_string_with_format(r, col, s, format)?,
                CellValue::Number(n) => worksheet.write_number_with_format(r, col, *n, format)?,
                CellValue::Integer(n) => worksheet.write_number_with_format(r, col, *n as f64, format)?,
            };
        }
    }

    for (col, width) in spec.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    if spec.freeze_header && !spec.header.is_empty() {
        worksheet.set_freeze_panes(header_row + 1, 0)?;
    }
    Ok(())
}

/// A one-sheet workbook carrying `message`, for when the real export failed.
pub fn emergency_workbook(message: &str) -> Result<Vec<u8>, RenderError> {
    log::error!("Producing emergency workbook: {}", message);
    let mut sheet = SheetSpec::new(ERROR_SHEET_NAME).header(["الرسالة"]).zebra(false);
    sheet.push_row(vec![CellValue::text("تعذر إنشاء ملف Excel")]);
    sheet.push_row(vec![CellValue::text(message)]);
    WorkbookSpec::new().sheet(sheet).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
    use std::io::Cursor;

    fn read(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        open_workbook_from_rs(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn writes_titled_sheet_with_header_and_rows() {
        let mut data = SheetSpec::new("البيانات").header(["الاسم", "الراتب"]);
        data.push_row(vec!["علي".into(), CellValue::Number(1700.5)]);
        data.push_row(vec!["".into(), CellValue::Integer(0)]);
        let stats = SheetSpec::new("الإحصائيات").title("إحصائيات عامة").header(["المقياس", "القيمة"]);

        let bytes = WorkbookSpec::new().sheet(data).sheet(stats).build().unwrap();
        assert!(bytes.starts_with(b"PK"));

        let mut book = read(bytes);
        assert_eq!(book.sheet_names(), vec!["البيانات".to_string(), "الإحصائيات".to_string()]);

        let range = book.worksheet_range("البيانات").unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("الاسم".into())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(1700.5)));
        assert_eq!(range.get_value((2, 1)), Some(&Data::Float(0.0)));

        let range = book.worksheet_range("الإحصائيات").unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("إحصائيات عامة".into())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("القيمة".into())));
    }

    #[test]
    fn invalid_sheet_name_is_an_error() {
        let bad = SheetSpec::new("a/b?");
        let err = WorkbookSpec::new().sheet(bad).build().unwrap_err();
        assert!(matches!(err, RenderError::Xlsx(_)));
    }

    #[test]
    fn emergency_workbook_has_single_error_sheet() {
        let bytes = emergency_workbook("boom").unwrap();
        let mut book = read(bytes);
        assert_eq!(book.sheet_names(), vec![ERROR_SHEET_NAME.to_string()]);
        let range = book.worksheet_range(ERROR_SHEET_NAME).unwrap();
        assert_eq!(range.get_value((2, 0)), Some(&Data::String("boom".into())));
    }
}
