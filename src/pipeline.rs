//! 診断パイプライン
//!
//! 辞書とタイトルの両方が揃ったときだけ診断を行う。
//! 片方でも欠けていれば何も実行せず、部分的な結果も返さない。

use crate::config::{Config, DictionarySource};
use crate::dictionary;
use crate::error::{DiagnosisError, Result};
use crate::extractor::{self, ExtractionStats, Selectors};
use hashtag_diagnosis_common::{diagnose_all, DiagnosisResult};
use std::path::PathBuf;

/// 1回の診断実行に必要な入力
#[derive(Debug, Clone, Default)]
pub struct DiagnosisRun {
    pub title_source: Option<PathBuf>,
    pub dictionary: Option<DictionarySource>,
}

/// 診断実行の結果
#[derive(Debug, Clone, Default)]
pub struct DiagnosisReport {
    pub results: Vec<DiagnosisResult>,
    pub tag_count: usize,
    pub dictionary_skipped_rows: usize,
    pub extraction: ExtractionStats,
}

impl DiagnosisRun {
    fn validate(&self) -> Result<(&PathBuf, &DictionarySource)> {
        match (&self.title_source, &self.dictionary) {
            (Some(titles), Some(dict)) => Ok((titles, dict)),
            (None, Some(_)) => Err(DiagnosisError::MissingInput("公告HTMLファイル".into())),
            (Some(_), None) => Err(DiagnosisError::MissingInput(
                "ハッシュタグ辞書（--dictionary または --use-default）".into(),
            )),
            (None, None) => Err(DiagnosisError::MissingInput(
                "公告HTMLファイルとハッシュタグ辞書".into(),
            )),
        }
    }
}

pub fn run_diagnosis(run: &DiagnosisRun, config: &Config) -> Result<DiagnosisReport> {
    let (title_source, dictionary_source) = run.validate()?;
    let selectors = Selectors::from_config(config)?;

    let loaded = dictionary::load_from_source(dictionary_source)?;
    let extraction = extractor::extract_from_path(title_source, &selectors)?;
    let titles = extraction.candidate_titles();

    let results = diagnose_all(&titles, &loaded.rules);
    tracing::info!(
        titles = titles.len(),
        results = results.len(),
        "診断が完了しました"
    );

    Ok(DiagnosisReport {
        results,
        tag_count: loaded.rules.len(),
        dictionary_skipped_rows: loaded.skipped_rows,
        extraction: extraction.stats(),
    })
}
