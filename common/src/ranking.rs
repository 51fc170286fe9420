//! 出現頻度ランキング
//!
//! 診断結果の1フィールドをラベル単位に平坦化して集計する。
//! 割合の分母は空でないラベルの総数（タイトル数ではない）。

use crate::types::DiagnosisResult;
use serde::Serialize;
use std::collections::HashMap;

/// ランキング表示の上限件数
pub const TOP_N: usize = 10;

/// 集計対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankField {
    MatchedTags,
    MatchedKeywords,
    BlockedTags,
}

impl RankField {
    pub const ALL: [RankField; 3] = [
        RankField::MatchedTags,
        RankField::MatchedKeywords,
        RankField::BlockedTags,
    ];

    /// 出力表の列名
    pub fn column_name(&self) -> &'static str {
        match self {
            RankField::MatchedTags => "매칭된 해시태그",
            RankField::MatchedKeywords => "매칭된 하위키워드",
            RankField::BlockedTags => "예외 키워드로 막힌 태그",
        }
    }

    fn values<'a>(&self, result: &'a DiagnosisResult) -> &'a [String] {
        match self {
            RankField::MatchedTags => &result.matched_tags,
            RankField::MatchedKeywords => &result.matched_keywords,
            RankField::BlockedTags => &result.blocked_tags,
        }
    }
}

/// ランキングの1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    /// 1始まりの順位
    pub rank: usize,
    pub label: String,
    pub count: usize,
    /// 空でないラベル総数に対する百分率
    pub percent: f64,
}

/// ランキング結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ranking {
    /// 集計対象のラベルが1件もない
    NoData,
    Ranked(Vec<RankEntry>),
}

impl Ranking {
    pub fn entries(&self) -> &[RankEntry] {
        match self {
            Ranking::NoData => &[],
            Ranking::Ranked(entries) => entries,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Ranking::NoData)
    }
}

/// ラベルごとの件数（件数の降順、同数は初出順）
///
/// 空文字列のラベルは数えない。ラベルは加工せずそのまま比較する。上限なしの全分布を返す。
pub fn label_distribution(results: &[DiagnosisResult], field: RankField) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for label in results.iter().flat_map(|r| field.values(r)) {
        let label = label.as_str();
        if label.is_empty() {
            continue;
        }
        match index.get(label) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label.to_string(), 1));
            }
        }
    }

    // 安定ソートなので同数は初出順のまま
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// 上位 [`TOP_N`] 件のランキングを求める
pub fn rank_counts(results: &[DiagnosisResult], field: RankField) -> Ranking {
    let distribution = label_distribution(results, field);
    let total: usize = distribution.iter().map(|(_, count)| count).sum();

    if total == 0 {
        return Ranking::NoData;
    }

    let entries = distribution
        .into_iter()
        .take(TOP_N)
        .enumerate()
        .map(|(i, (label, count))| RankEntry {
            rank: i + 1,
            label,
            count,
            percent: count as f64 / total as f64 * 100.0,
        })
        .collect();

    Ranking::Ranked(entries)
}
