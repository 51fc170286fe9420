//! 診断の型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - KeywordRule: 1つのハッシュタグに対する包含・除外キーワード
//! - RuleSet: 読み込み順を保持したハッシュタグ→ルールの対応表
//! - DiagnosisResult: タイトル1件の診断結果

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// ハッシュタグ1件分のルール
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub tag: String,

    /// 包含キーワード（記載順に評価）
    #[serde(default)]
    pub includes: Vec<String>,

    /// 除外キーワード
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl KeywordRule {
    pub fn new(
        tag: impl Into<String>,
        includes: impl IntoIterator<Item = impl Into<String>>,
        excludes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            tag: tag.into(),
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// 最初にタイトルへ含まれる包含キーワード
    pub fn first_include_in<'a>(&'a self, title: &str) -> Option<&'a str> {
        self.includes
            .iter()
            .map(String::as_str)
            .find(|kw| title.contains(kw))
    }

    /// いずれかの除外キーワードがタイトルに含まれるか
    pub fn is_excluded(&self, title: &str) -> bool {
        self.excludes.iter().any(|ex| title.contains(ex.as_str()))
    }
}

/// ハッシュタグ辞書
///
/// タグは一意。反復順は読み込み順で、これがどのキーワードを
/// 「マッチしたキーワード」として報告するかを決める。
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<KeywordRule>,
    index: HashMap<String, usize>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルールを追加する
    ///
    /// 既存のタグは包含・除外キーワードを置き換え、位置は最初の登録順のまま。
    /// 置き換えが発生した場合は `true` を返す。
    pub fn insert(&mut self, rule: KeywordRule) -> bool {
        if let Some(&pos) = self.index.get(&rule.tag) {
            self.rules[pos] = rule;
            true
        } else {
            self.index.insert(rule.tag.clone(), self.rules.len());
            self.rules.push(rule);
            false
        }
    }

    pub fn get(&self, tag: &str) -> Option<&KeywordRule> {
        self.index.get(tag).map(|&pos| &self.rules[pos])
    }

    /// 読み込み順でルールを返す
    pub fn iter(&self) -> impl Iterator<Item = &KeywordRule> {
        self.rules.iter()
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<KeywordRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = KeywordRule>>(iter: I) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a KeywordRule;
    type IntoIter = std::slice::Iter<'a, KeywordRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// タイトル1件の診断結果
///
/// `matched_keywords` は `matched_tags` と同じ長さで、同じ位置のタグに対応する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub title: String,

    #[serde(default)]
    pub matched_tags: Vec<String>,

    #[serde(default)]
    pub matched_keywords: Vec<String>,

    #[serde(default)]
    pub blocked_tags: Vec<String>,
}

impl DiagnosisResult {
    /// (タグ, キーワード) の組を返す
    pub fn matches(&self) -> impl Iterator<Item = (&str, &str)> {
        self.matched_tags
            .iter()
            .map(String::as_str)
            .zip(self.matched_keywords.iter().map(String::as_str))
    }

    /// マッチも除外もされなかった（分類失敗の原因が辞書側にある）
    pub fn is_unmatched(&self) -> bool {
        self.matched_tags.is_empty() && self.blocked_tags.is_empty()
    }
}
