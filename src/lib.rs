//! 공고 제목 해시태그 분류 실패 진단기
//!
//! 分類エンジン本体は `hashtag-diagnosis-common` にあり、
//! このクレートは辞書・HTMLの読み込みと結果の出力を担う。

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod extractor;
pub mod pipeline;
pub mod report;

pub use hashtag_diagnosis_common as common;
