//! ハッシュタグ辞書ローダー
//!
//! 拡張子で形式を判定し、Excel（calamine）またはCSVから [`LoadedDictionary`] を作る。

mod workbook;

pub use workbook::load_workbook;

use crate::config::DictionarySource;
use crate::error::{DiagnosisError, Result};
use hashtag_diagnosis_common::dictionary::from_csv_str;
use hashtag_diagnosis_common::LoadedDictionary;
use std::path::Path;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 辞書ファイルを読み込む
pub fn load_dictionary(path: &Path) -> Result<LoadedDictionary> {
    if !path.exists() {
        return Err(DiagnosisError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let loaded = if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        load_workbook(path)?
    } else if ext == "csv" {
        let content = std::fs::read_to_string(path)?;
        from_csv_str(&content)?
    } else {
        return Err(DiagnosisError::UnsupportedDictionaryFormat(
            path.display().to_string(),
        ));
    };

    if loaded.skipped_rows > 0 {
        tracing::warn!(
            skipped = loaded.skipped_rows,
            "タグが空の辞書行をスキップしました"
        );
    }
    if loaded.overwritten_rows > 0 {
        tracing::warn!(
            overwritten = loaded.overwritten_rows,
            "重複したタグを後の行で上書きしました"
        );
    }
    tracing::info!(tags = loaded.rules.len(), path = %path.display(), "辞書を読み込みました");

    Ok(loaded)
}

/// 解決済みの辞書ソースから読み込む
pub fn load_from_source(source: &DictionarySource) -> Result<LoadedDictionary> {
    if let DictionarySource::Default(path) = source {
        tracing::debug!(path = %path.display(), "既定辞書を使用");
    }
    load_dictionary(source.path())
}
