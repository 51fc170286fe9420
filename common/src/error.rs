//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("必須列が見つかりません: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
