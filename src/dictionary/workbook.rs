//! Excel辞書の読み込み（calamine）

use crate::error::{DiagnosisError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use hashtag_diagnosis_common::dictionary::DictionaryColumns;
use hashtag_diagnosis_common::{LoadedDictionary, RuleSet};
use std::path::Path;

/// 先頭シートを読み込む（1行目は見出し）
pub fn load_workbook(path: &Path) -> Result<LoadedDictionary> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DiagnosisError::Config(format!("シートがありません: {}", path.display())))??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let columns = DictionaryColumns::locate(&header)?;

    let rows = rows.map(|cells| {
        let cells: Vec<String> = cells.iter().map(cell_to_string).collect();
        columns.row(&cells)
    });

    Ok(RuleSet::from_rows(rows))
}

/// セル値を文字列化する（整数値の小数は ".0" を付けない）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
