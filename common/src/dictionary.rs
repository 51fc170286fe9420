//! ハッシュタグ辞書の取り込み
//!
//! 表形式の辞書（해시태그 / 하위키워드 / 예외키워드）を [`RuleSet`] に変換する。
//! Excelの読み込み自体はCLI側で行い、ここではセル値からの変換とCSV文字列の解析を扱う。

use crate::error::{Error, Result};
use crate::types::{KeywordRule, RuleSet};
use serde::{Deserialize, Serialize};

/// タグ列の見出し
pub const TAG_COLUMN: &str = "해시태그";
/// 包含キーワード列の見出し
pub const INCLUDES_COLUMN: &str = "하위키워드";
/// 除外キーワード列の見出し
pub const EXCLUDES_COLUMN: &str = "예외키워드";

/// 辞書の1行（セルが空なら None）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRow {
    pub tag: Option<String>,
    pub includes: Option<String>,
    pub excludes: Option<String>,
}

/// 読み込み済み辞書
#[derive(Debug, Clone, Default)]
pub struct LoadedDictionary {
    pub rules: RuleSet,
    /// タグが空で読み飛ばした行数
    pub skipped_rows: usize,
    /// 同じタグが再登場して上書きした行数
    pub overwritten_rows: usize,
}

/// キーワードセルをリストに分割する
///
/// カンマ区切り、前後の空白を除去。空セルや分割後に空になった要素は含めない。
pub fn parse_keyword_cell(cell: Option<&str>) -> Vec<String> {
    let Some(cell) = cell else {
        return Vec::new();
    };

    cell.split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

impl RuleSet {
    /// 辞書の行からルールセットを作る
    ///
    /// タグが空の行は不正行としてスキップし件数だけ数える。
    pub fn from_rows<I>(rows: I) -> LoadedDictionary
    where
        I: IntoIterator<Item = DictionaryRow>,
    {
        let mut loaded = LoadedDictionary::default();

        for row in rows {
            let tag = match row.tag.as_deref().map(str::trim) {
                Some(tag) if !tag.is_empty() => tag.to_string(),
                _ => {
                    loaded.skipped_rows += 1;
                    continue;
                }
            };

            let rule = KeywordRule {
                tag,
                includes: parse_keyword_cell(row.includes.as_deref()),
                excludes: parse_keyword_cell(row.excludes.as_deref()),
            };

            if loaded.rules.insert(rule) {
                loaded.overwritten_rows += 1;
            }
        }

        loaded
    }
}

/// 見出し行から求めた列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryColumns {
    pub tag: usize,
    pub includes: usize,
    /// 列自体がなければ全タグの除外キーワードは空
    pub excludes: Option<usize>,
}

impl DictionaryColumns {
    /// 見出し行から列位置を探す
    pub fn locate<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h.as_ref().trim() == name);

        let tag = find(TAG_COLUMN).ok_or_else(|| Error::MissingColumn(TAG_COLUMN.into()))?;
        let includes =
            find(INCLUDES_COLUMN).ok_or_else(|| Error::MissingColumn(INCLUDES_COLUMN.into()))?;

        Ok(Self {
            tag,
            includes,
            excludes: find(EXCLUDES_COLUMN),
        })
    }

    /// セル列から1行を取り出す（空白のみのセルは None）
    pub fn row<S: AsRef<str>>(&self, cells: &[S]) -> DictionaryRow {
        let cell = |idx: usize| {
            cells
                .get(idx)
                .map(|c| c.as_ref().trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        };

        DictionaryRow {
            tag: cell(self.tag),
            includes: cell(self.includes),
            excludes: self.excludes.and_then(cell),
        }
    }
}

/// CSV文字列から辞書を読み込む
///
/// 1行目は見出し。クォート内の改行には対応しない。
pub fn from_csv_str(content: &str) -> Result<LoadedDictionary> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    let header = lines
        .next()
        .map(parse_csv_line)
        .ok_or_else(|| Error::Csv("見出し行がありません".into()))?;
    let columns = DictionaryColumns::locate(&header)?;

    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| columns.row(&parse_csv_line(line)));

    Ok(RuleSet::from_rows(rows))
}

/// CSV行をパース（ダブルクォートと "" エスケープ対応）
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}
