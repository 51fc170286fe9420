//! 辞書読み込みから出力までの統合テスト

use hashtag_diagnosis::cli::OutputFormat;
use hashtag_diagnosis::config::{Config, DictionarySource};
use hashtag_diagnosis::dictionary;
use hashtag_diagnosis::export;
use hashtag_diagnosis::pipeline::{run_diagnosis, DiagnosisRun};
use hashtag_diagnosis_common::{rank_counts, DiagnosisResult, RankField};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

const LIST_HTML: &str = r#"<html><body><ul>
<li class="guide_list_item">
  <h3 class="guide_list_title">만39세 이하 청년 일자리 지원</h3>
  <ul class="hashtag_area"></ul>
</li>
<li class="guide_list_item">
  <h3 class="guide_list_title">예비창업패키지 모집</h3>
</li>
<li class="guide_list_item">
  <h3 class="guide_list_title">여성 기업인 지원</h3>
</li>
<li class="guide_list_item">
  <h3 class="guide_list_title">청년 창업 사관학교</h3>
  <ul class="hashtag_area"><li class="hashtag_list">#청년</li></ul>
</li>
</ul></body></html>"#;

fn write_dictionary_xlsx(path: &Path) {
    let rows = [
        ["해시태그", "하위키워드", "예외키워드"],
        ["청년", "청년, 만39세", ""],
        ["창업", "창업", "예비창업"],
        ["여성", "", ""],
        ["", "고아키워드", ""],
    ];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).expect("xlsx保存失敗");
}

fn setup() -> (tempfile::TempDir, DiagnosisRun) {
    let dir = tempdir().expect("Failed to create temp dir");
    let html = dir.path().join("list.html");
    let dict = dir.path().join("tag_default.xlsx");
    std::fs::write(&html, LIST_HTML).unwrap();
    write_dictionary_xlsx(&dict);

    let run = DiagnosisRun {
        title_source: Some(html),
        dictionary: Some(DictionarySource::Uploaded(dict)),
    };
    (dir, run)
}

#[test]
fn test_load_xlsx_dictionary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dict.xlsx");
    write_dictionary_xlsx(&path);

    let loaded = dictionary::load_dictionary(&path).unwrap();
    let tags: Vec<_> = loaded.rules.iter().map(|r| r.tag.as_str()).collect();
    assert_eq!(tags, vec!["청년", "창업", "여성"]);
    assert_eq!(loaded.skipped_rows, 1);
    assert_eq!(loaded.rules.get("청년").unwrap().includes, vec!["청년", "만39세"]);
    assert!(loaded.rules.get("여성").unwrap().includes.is_empty());
}

#[test]
fn test_run_diagnosis_end_to_end() {
    let (_dir, run) = setup();
    let report = run_diagnosis(&run, &Config::default()).unwrap();

    assert_eq!(report.tag_count, 3);
    assert_eq!(report.dictionary_skipped_rows, 1);
    assert_eq!(report.extraction.items, 4);
    assert_eq!(report.extraction.tagged, 1);

    let titles: Vec<_> = report.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["만39세 이하 청년 일자리 지원", "예비창업패키지 모집", "여성 기업인 지원"]
    );

    // 包含キーワードは記載順に評価されるので "청년" が先に当たる
    assert_eq!(report.results[0].matched_tags, vec!["청년"]);
    assert_eq!(report.results[0].matched_keywords, vec!["청년"]);

    assert_eq!(report.results[1].blocked_tags, vec!["창업"]);
    assert!(report.results[1].matched_tags.is_empty());

    assert!(report.results[2].is_unmatched());
}

#[test]
fn test_rankings_from_run() {
    let (_dir, run) = setup();
    let report = run_diagnosis(&run, &Config::default()).unwrap();

    let matched = rank_counts(&report.results, RankField::MatchedTags);
    assert_eq!(matched.entries().len(), 1);
    assert_eq!(matched.entries()[0].label, "청년");
    assert!((matched.entries()[0].percent - 100.0).abs() < 1e-9);

    let blocked = rank_counts(&report.results, RankField::BlockedTags);
    assert_eq!(blocked.entries()[0].label, "창업");
}

#[test]
fn test_zero_candidates_is_not_an_error() {
    let (dir, mut run) = setup();
    let html = dir.path().join("maintenance.html");
    std::fs::write(&html, "<html><body><p>점검 중</p></body></html>").unwrap();
    run.title_source = Some(html);

    let report = run_diagnosis(&run, &Config::default()).unwrap();
    assert!(report.results.is_empty());
    assert!(rank_counts(&report.results, RankField::MatchedTags).is_no_data());
}

#[test]
fn test_export_both_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let results = vec![DiagnosisResult {
        title: "청년, 창업 지원".into(),
        matched_tags: vec!["청년".into(), "창업".into()],
        matched_keywords: vec!["청년".into(), "창업".into()],
        blocked_tags: vec![],
    }];

    let written = export::export_results(&results, &OutputFormat::Both, dir.path()).unwrap();
    assert_eq!(written.len(), 2);

    let csv_path = dir.path().join("해시태그_진단결과.csv");
    let xlsx_path = dir.path().join("해시태그_진단결과.xlsx");
    assert!(csv_path.exists(), "CSVファイルが作成されていない");
    assert!(xlsx_path.exists(), "Excelファイルが作成されていない");

    let bytes = std::fs::read(&csv_path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "BOMがない");
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert!(text.contains("\"청년, 창업 지원\",\"청년, 창업\",\"청년, 창업\","));
}

#[test]
fn test_export_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written = export::export_results(&[], &OutputFormat::Csv, dir.path()).unwrap();

    let text = std::fs::read_to_string(&written[0]).unwrap();
    assert_eq!(text.trim_start_matches('\u{feff}').lines().count(), 1);
}

#[test]
fn test_export_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.json");
    let results = vec![DiagnosisResult {
        title: "여성 기업인 지원".into(),
        ..Default::default()
    }];

    export::export_results(&results, &OutputFormat::Json, &output).unwrap();
    let loaded: Vec<DiagnosisResult> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(loaded, results);
}
