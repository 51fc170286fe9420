pub mod csv;
pub mod excel;

use crate::cli::OutputFormat;
use crate::error::Result;
use hashtag_diagnosis_common::{DiagnosisResult, RankField};
use std::path::{Path, PathBuf};

/// 出力ファイル名（拡張子なし）
pub const DEFAULT_FILE_STEM: &str = "해시태그_진단결과";

/// 表の見出し行
pub fn table_header() -> [&'static str; 4] {
    [
        "제목",
        RankField::MatchedTags.column_name(),
        RankField::MatchedKeywords.column_name(),
        RankField::BlockedTags.column_name(),
    ]
}

/// 診断結果1件を表の1行にする（リストは ", " で連結）
pub fn table_row(result: &DiagnosisResult) -> [String; 4] {
    [
        result.title.clone(),
        result.matched_tags.join(", "),
        result.matched_keywords.join(", "),
        result.blocked_tags.join(", "),
    ]
}

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, extension))
    } else {
        output.with_extension(extension)
    }
}

fn write_json(results: &[DiagnosisResult], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 診断結果を書き出し、作成したファイルを返す
pub fn export_results(
    results: &[DiagnosisResult],
    format: &OutputFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, OutputFormat::Csv | OutputFormat::Both) {
        let path = output_path_for_format(output, "csv");
        println!("- CSVを生成中...");
        csv::generate_csv(results, &path)?;
        println!("✔ CSV出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, OutputFormat::Excel | OutputFormat::Both) {
        let path = output_path_for_format(output, "xlsx");
        println!("- Excelを生成中...");
        excel::generate_excel(results, &path)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, OutputFormat::Json) {
        let path = output_path_for_format(output, "json");
        write_json(results, &path)?;
        println!("✔ JSON出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
