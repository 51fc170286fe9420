use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagnosisError {
    #[error("入力が不足しています: {0}")]
    MissingInput(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応の辞書形式です: {0}（xlsx/xlsm/xlsb/xls/ods/csv）")]
    UnsupportedDictionaryFormat(String),

    #[error("Excel読み込みエラー: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("辞書エラー: {0}")]
    Dictionary(#[from] hashtag_diagnosis_common::Error),

    #[error("CSSセレクタが不正: {0}")]
    InvalidSelector(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiagnosisError>;
