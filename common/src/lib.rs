//! Hashtag Diagnosis Common Library
//!
//! CLIと他のフロントエンドで共有される型と分類エンジン

pub mod types;
pub mod error;
pub mod dictionary;
pub mod engine;
pub mod ranking;

pub use types::{DiagnosisResult, KeywordRule, RuleSet};
pub use error::{Error, Result};
pub use dictionary::{parse_keyword_cell, DictionaryRow, LoadedDictionary};
pub use engine::{diagnose, diagnose_all, AsTitle};
pub use ranking::{label_distribution, rank_counts, RankEntry, RankField, Ranking, TOP_N};
