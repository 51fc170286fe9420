//! CSV出力
//!
//! 表計算ソフトで文字化けしないよう UTF-8 BOM 付きで書き出す。

use super::{table_header, table_row};
use crate::error::Result;
use hashtag_diagnosis_common::DiagnosisResult;
use std::io::Write;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn generate_csv(results: &[DiagnosisResult], output_path: &Path) -> Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(output_path)?);
    write_csv(&mut file, results)?;
    file.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: &mut W, results: &[DiagnosisResult]) -> Result<()> {
    writer.write_all(UTF8_BOM)?;
    write_record(writer, &table_header())?;
    for result in results {
        write_record(writer, &table_row(result))?;
    }
    Ok(())
}

fn write_record<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
