//! ランキング表示

use hashtag_diagnosis_common::{rank_counts, DiagnosisResult, RankField, Ranking, TOP_N};
use std::fmt::Write;

fn heading(field: RankField) -> String {
    let icon = match field {
        RankField::MatchedTags => "✔",
        RankField::MatchedKeywords => "🔍",
        RankField::BlockedTags => "🚫",
    };
    format!("{} {} 分布 (Top {})", icon, field.column_name(), TOP_N)
}

/// 1フィールド分のランキングを文字列にする
pub fn render_ranking(field: RankField, ranking: &Ranking) -> String {
    match ranking {
        Ranking::NoData => format!("ℹ '{}' のデータがありません\n", field.column_name()),
        Ranking::Ranked(entries) => {
            let mut out = heading(field);
            out.push('\n');
            for entry in entries {
                // String への書き込みは失敗しない
                let _ = writeln!(out, "{}. `{}` - {:.1}%", entry.rank, entry.label, entry.percent);
            }
            out
        }
    }
}

/// 3フィールドすべてのランキングを表示する
pub fn print_rankings(results: &[DiagnosisResult]) {
    println!("📊 ハッシュタグマッチ分布サマリー\n");
    for field in RankField::ALL {
        let ranking = rank_counts(results, field);
        println!("{}", render_ranking(field, &ranking));
    }
}
