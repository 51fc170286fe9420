//! Excel出力（rust_xlsxwriter）

use super::{table_header, table_row};
use crate::error::{DiagnosisError, Result};
use hashtag_diagnosis_common::DiagnosisResult;
use rust_xlsxwriter::{Format, FormatBorder, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "진단결과";
const COLUMN_WIDTHS: [f64; 4] = [60.0, 24.0, 24.0, 24.0];

pub fn generate_excel(results: &[DiagnosisResult], output_path: &Path) -> Result<()> {
    build_workbook(results)
        .and_then(|mut workbook| workbook.save(output_path))
        .map_err(|e| DiagnosisError::ExcelGeneration(e.to_string()))
}

fn build_workbook(results: &[DiagnosisResult]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color("#D9E1F2")
        .set_border(FormatBorder::Thin);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (name, width)) in table_header().iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, width)?;
        sheet.write_string_with_format(0, col, *name, &header_format)?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in table_row(result).iter().enumerate() {
            sheet.write_string(row, col as u16, value)?;
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    Ok(workbook)
}
