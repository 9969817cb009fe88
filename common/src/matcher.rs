//! カタログ照合
//!
//! フラグメントのテキストをカタログの全エントリと照合し、スコアの最も高いエントリを選ぶ。
//!
//! ## スコア
//! - カード名がそのまま含まれる: +3
//! - セット名が含まれる: +2
//! - 抽出したカード番号がエントリの番号と一致する、または番号に含まれる: +2
//! - カード名の各単語が含まれる: 単語ごとに +1（カード名一致の +3 と重複加点する）

use crate::catalog::Catalog;
use crate::types::{CatalogEntry, InputFragment, MatchCandidate};
use tracing::debug;

/// 照合を受け入れる最低スコアのデフォルト
pub const DEFAULT_MIN_SCORE: i32 = 2;

const NAME_SCORE: i32 = 3;
const SET_SCORE: i32 = 2;
const NUMBER_SCORE: i32 = 2;
const NAME_WORD_SCORE: i32 = 1;

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// このスコア未満は未照合として扱う
    pub min_score: i32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// 1エントリに対するスコアを計算
pub fn score_entry(text_lower: &str, card_number: Option<&str>, entry: &CatalogEntry) -> i32 {
    let name = entry.name.to_lowercase();
    let set = entry.set.to_lowercase();
    let mut score = 0;

    if !name.is_empty() && text_lower.contains(&name) {
        score += NAME_SCORE;
    }

    if !set.is_empty() && text_lower.contains(&set) {
        score += SET_SCORE;
    }

    if let Some(number) = card_number {
        if !number.is_empty() && (entry.number == number || entry.number.contains(number)) {
            score += NUMBER_SCORE;
        }
    }

    score += name
        .split_whitespace()
        .filter(|word| text_lower.contains(word))
        .count() as i32
        * NAME_WORD_SCORE;

    score
}

/// 全エントリのスコアをカタログ順で返す
pub fn score_all<'a>(fragment: &InputFragment, catalog: &'a Catalog) -> Vec<MatchCandidate<'a>> {
    let text_lower = fragment.text.to_lowercase();
    let card_number = fragment.card_number.as_deref();

    catalog
        .entries()
        .iter()
        .map(|entry| MatchCandidate {
            entry,
            score: score_entry(&text_lower, card_number, entry),
        })
        .collect()
}

/// 最もスコアの高いエントリを選ぶ
///
/// 同点の場合はカタログ順で先のエントリを採用する。
/// 最高スコアが `options.min_score` 未満ならNone。
pub fn best_match<'a>(
    fragment: &InputFragment,
    catalog: &'a Catalog,
    options: &MatchOptions,
) -> Option<MatchCandidate<'a>> {
    let mut best: Option<MatchCandidate<'a>> = None;

    for candidate in score_all(fragment, catalog) {
        // 厳密に大きい場合のみ更新（同点は先勝ち）
        if best.as_ref().map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) if candidate.score >= options.min_score => {
            debug!(
                entry = %candidate.entry.id,
                score = candidate.score,
                "照合: {}",
                fragment.text
            );
            Some(candidate)
        }
        Some(candidate) => {
            debug!(
                best_score = candidate.score,
                min_score = options.min_score,
                "未照合: {}",
                fragment.text
            );
            None
        }
        None => None,
    }
}
