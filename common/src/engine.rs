//! 分類エンジン
//!
//! タイトルに辞書のルールを再適用し、どのタグがどのキーワードで
//! マッチしたか、どのタグが除外キーワードで止められたかを求める。
//!
//! ## 評価順
//! 1. タグは辞書の読み込み順
//! 2. タグごとに包含キーワードを記載順に調べ、最初に含まれたもので打ち切る
//! 3. そのタグの除外キーワードが1つでも含まれていれば blocked、なければ matched
//!
//! 2番目以降の包含キーワードは除外判定の対象にならない。

use crate::types::{DiagnosisResult, RuleSet};

/// タイトル1件を診断する
///
/// 大文字小文字を区別する部分文字列一致のみ。副作用なし。
pub fn diagnose(title: &str, rules: &RuleSet) -> DiagnosisResult {
    let mut result = DiagnosisResult {
        title: title.to_string(),
        ..Default::default()
    };

    for rule in rules {
        let Some(keyword) = rule.first_include_in(title) else {
            continue;
        };

        if rule.is_excluded(title) {
            result.blocked_tags.push(rule.tag.clone());
        } else {
            result.matched_tags.push(rule.tag.clone());
            result.matched_keywords.push(keyword.to_string());
        }
    }

    result
}

/// 診断対象として渡せるタイトル
///
/// `None` を返す入力（欠損タイトル）は一括診断でスキップされる。
pub trait AsTitle {
    fn as_title(&self) -> Option<&str>;
}

impl AsTitle for str {
    fn as_title(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsTitle for String {
    fn as_title(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: AsTitle + ?Sized> AsTitle for &T {
    fn as_title(&self) -> Option<&str> {
        (**self).as_title()
    }
}

impl<T: AsTitle> AsTitle for Option<T> {
    fn as_title(&self) -> Option<&str> {
        self.as_ref().and_then(AsTitle::as_title)
    }
}

/// 複数タイトルを診断する（入力順を保持）
///
/// 欠損タイトルはレコードを生成せずに読み飛ばす。
#[cfg(feature = "parallel")]
pub fn diagnose_all<T: AsTitle + Sync>(titles: &[T], rules: &RuleSet) -> Vec<DiagnosisResult> {
    use rayon::prelude::*;

    titles
        .par_iter()
        .filter_map(|t| t.as_title().map(|title| diagnose(title, rules)))
        .collect()
}

/// 複数タイトルを診断する（入力順を保持）
///
/// 欠損タイトルはレコードを生成せずに読み飛ばす。
#[cfg(not(feature = "parallel"))]
pub fn diagnose_all<T: AsTitle>(titles: &[T], rules: &RuleSet) -> Vec<DiagnosisResult> {
    titles
        .iter()
        .filter_map(|t| t.as_title().map(|title| diagnose(title, rules)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeywordRule;

    fn rules(rules: Vec<KeywordRule>) -> RuleSet {
        rules.into_iter().collect()
    }

    fn none() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_later_include_keyword_reported() {
        let set = rules(vec![KeywordRule::new("청년", ["청년", "만39세"], none())]);
        let result = diagnose("만39세 이하 지원", &set);

        assert_eq!(result.matched_tags, vec!["청년"]);
        assert_eq!(result.matched_keywords, vec!["만39세"]);
        assert!(result.blocked_tags.is_empty());
    }

    #[test]
    fn test_exclude_keyword_blocks_tag() {
        let set = rules(vec![KeywordRule::new("창업", ["창업"], ["예비창업"])]);
        let result = diagnose("예비창업패키지 모집", &set);

        assert_eq!(result.blocked_tags, vec!["창업"]);
        assert!(result.matched_tags.is_empty());
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_empty_includes_never_match() {
        let set = rules(vec![KeywordRule::new("여성", none(), none())]);
        let result = diagnose("여성 기업인 지원", &set);

        assert!(result.matched_tags.is_empty());
        assert!(result.blocked_tags.is_empty());
    }

    #[test]
    fn test_empty_title_matches_nothing() {
        let set = rules(vec![
            KeywordRule::new("청년", ["청년"], none()),
            KeywordRule::new("창업", ["창업"], ["예비"]),
        ]);
        let result = diagnose("", &set);

        assert_eq!(result.title, "");
        assert!(result.matched_tags.is_empty());
        assert!(result.matched_keywords.is_empty());
        assert!(result.blocked_tags.is_empty());
    }

    #[test]
    fn test_exclude_equal_to_include_always_blocks() {
        let set = rules(vec![KeywordRule::new("수출", ["수출"], ["수출"])]);
        let result = diagnose("수출 바우처", &set);

        assert_eq!(result.blocked_tags, vec!["수출"]);
        assert!(result.matched_tags.is_empty());
    }

    #[test]
    fn test_exclusion_needs_include_match_first() {
        let set = rules(vec![KeywordRule::new("창업", ["창업"], ["예비"])]);
        let result = diagnose("예비 사회적기업 지정", &set);

        assert!(result.is_unmatched());
    }

    #[test]
    fn test_tag_order_follows_dictionary() {
        let set = rules(vec![
            KeywordRule::new("창업", ["창업"], none()),
            KeywordRule::new("청년", ["청년"], none()),
            KeywordRule::new("지역", ["서울"], ["경기"]),
        ]);
        let result = diagnose("서울 경기 청년 창업 지원", &set);

        assert_eq!(result.matched_tags, vec!["창업", "청년"]);
        assert_eq!(result.matched_keywords, vec!["창업", "청년"]);
        assert_eq!(result.blocked_tags, vec!["지역"]);
    }

    #[test]
    fn test_tag_reported_once_even_if_many_keywords_match() {
        let set = rules(vec![
            KeywordRule::new("청년", ["청년", "만39세", "대학생"], none()),
            KeywordRule::new("창업", ["창업", "스타트업"], ["예비창업"]),
        ]);
        let result = diagnose("청년 대학생 만39세 예비창업 스타트업", &set);

        assert_eq!(result.matched_tags, vec!["청년"]);
        assert_eq!(result.matched_keywords, vec!["청년"]);
        assert_eq!(result.blocked_tags, vec!["창업"]);
        for tag in &result.matched_tags {
            assert!(!result.blocked_tags.contains(tag));
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let set = rules(vec![KeywordRule::new("IT", ["AI"], none())]);
        assert!(diagnose("ai 바우처", &set).is_unmatched());
        assert_eq!(diagnose("AI 바우처", &set).matched_tags, vec!["IT"]);
    }

    #[test]
    fn test_diagnose_is_deterministic() {
        let set = rules(vec![
            KeywordRule::new("청년", ["청년"], none()),
            KeywordRule::new("창업", ["창업"], ["예비창업"]),
        ]);
        let title = "청년 예비창업 지원";
        assert_eq!(diagnose(title, &set), diagnose(title, &set));
    }

    #[test]
    fn test_diagnose_all_preserves_order_and_skips_missing() {
        let set = rules(vec![KeywordRule::new("청년", ["청년"], none())]);
        let titles = vec![
            Some("청년 지원".to_string()),
            None,
            Some("소상공인 지원".to_string()),
            Some("청년 창업".to_string()),
        ];

        let results = diagnose_all(&titles, &set);
        let got: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(got, vec!["청년 지원", "소상공인 지원", "청년 창업"]);
        assert!(results[1].is_unmatched());
    }

    #[test]
    fn test_diagnose_all_accepts_plain_strings() {
        let set = rules(vec![KeywordRule::new("청년", ["청년"], none())]);
        let titles = ["청년 지원", ""];

        let results = diagnose_all(&titles, &set);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].matched_tags, vec!["청년"]);
        assert!(results[1].is_unmatched());
    }

    #[test]
    fn test_matched_keyword_pairs_with_its_tag() {
        let set = rules(vec![
            KeywordRule::new("청년", ["대학생", "청년"], none()),
            KeywordRule::new("수출", ["해외", "수출"], ["내수"]),
            KeywordRule::new("창업", ["창업"], ["예비창업"]),
        ]);
        let title = "청년 수출기업 예비창업 지원";
        let result = diagnose(title, &set);

        assert_eq!(result.matched_tags.len(), result.matched_keywords.len());
        let pairs: Vec<_> = result.matches().collect();
        assert_eq!(pairs, vec![("청년", "청년"), ("수출", "수출")]);
        for (tag, keyword) in pairs {
            assert!(set.get(tag).unwrap().includes.iter().any(|kw| kw == keyword));
            assert!(title.contains(keyword));
        }
    }
}
