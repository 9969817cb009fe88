//! OCR検出の信頼度
//!
//! OCRテキストからどの項目が取れたかで `[0, 1]` の信頼度を加点方式で計算する。
//! 呼び出し側に見せる目安であって確率ではない（正解データとの較正はしていない）。

use crate::extract::{is_fraction_number, is_known_card_name};
use crate::types::OcrFields;

const BASE: f64 = 0.1;
const CARD_NAME: f64 = 0.4;
const KNOWN_CARD_NAME: f64 = 0.2;
const SET_NAME: f64 = 0.3;
const CARD_NUMBER: f64 = 0.2;
const FRACTION_NUMBER: f64 = 0.1;

/// 信頼度を計算する
///
/// | 条件 | 加点 |
/// |------|------|
/// | 常に | 0.1 |
/// | カード名あり | +0.4 |
/// | カード名が許可リストに載っている | +0.2 |
/// | セット名あり | +0.3 |
/// | カード番号あり | +0.2 |
/// | カード番号が分数形式 | +0.1 |
///
/// 合計は1.0で頭打ち。
pub fn estimate(card_name: Option<&str>, set_name: Option<&str>, card_number: Option<&str>) -> f64 {
    let mut confidence = BASE;

    if let Some(name) = card_name.filter(|n| !n.trim().is_empty()) {
        confidence += CARD_NAME;
        if is_known_card_name(name) {
            confidence += KNOWN_CARD_NAME;
        }
    }

    if set_name.is_some_and(|s| !s.trim().is_empty()) {
        confidence += SET_NAME;
    }

    if let Some(number) = card_number.filter(|n| !n.trim().is_empty()) {
        confidence += CARD_NUMBER;
        if is_fraction_number(number) {
            confidence += FRACTION_NUMBER;
        }
    }

    confidence.min(1.0)
}

/// 抽出結果から信頼度を計算する
pub fn estimate_fields(fields: &OcrFields) -> f64 {
    estimate(
        fields.card_name.as_deref(),
        fields.set_name.as_deref(),
        fields.card_number.as_deref(),
    )
}
