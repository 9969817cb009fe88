//! 状態キーワードの正規化
//!
//! テキスト中の状態表記（"near mint", "LP" など）を [`Condition`] に変換する。
//! 表は上から順に照合し、最初に見つかったキーワードを採用する。
//! "near mint" を "mint" より先に置かないと、"near mint" が Mint と判定される。

use crate::types::Condition;

/// 状態キーワード表（順序に意味がある）
///
/// すべて部分文字列として照合する。"Champion's Path" の "mp" のような
/// 単語内の一致も状態として扱う。
const CONDITION_KEYWORDS: &[(&str, Condition)] = &[
    ("near mint", Condition::NearMint),
    ("nm", Condition::NearMint),
    ("lightly played", Condition::LightlyPlayed),
    ("lp", Condition::LightlyPlayed),
    ("moderately played", Condition::ModeratelyPlayed),
    ("mp", Condition::ModeratelyPlayed),
    ("heavily played", Condition::HeavilyPlayed),
    ("hp", Condition::HeavilyPlayed),
    ("damaged", Condition::HeavilyPlayed),
    ("poor", Condition::HeavilyPlayed),
    ("mint", Condition::Mint),
];

/// 状態キーワードを検出する（見つからなければNone）
///
/// OCR経由ではこちらを使う。状態の根拠が無いことを呼び出し側に残すため、
/// デフォルト値は補わない。
pub fn detect(text: &str) -> Option<Condition> {
    let lower = text.to_lowercase();

    CONDITION_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, condition)| *condition)
}

/// 状態を正規化する（テキスト行用、見つからなければNear Mint）
pub fn normalize(text: &str) -> Condition {
    detect(text).unwrap_or(Condition::NearMint)
}
