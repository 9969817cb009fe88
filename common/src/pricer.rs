//! 買取価格の計算
//!
//! - 状態別相場 = round2(相場 × 状態倍率)
//! - 買取価格 = round2(状態別相場 × 0.7)

use crate::error::{Error, Result};
use crate::types::{CatalogEntry, Condition, IdentifiedCard};
use serde::{Deserialize, Serialize};

/// 買取率
pub const OFFER_RATE: f64 = 0.7;

/// 査定結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub market_price: f64,
    pub offer_price: f64,
}

/// 小数第2位で四捨五入（金額用）
pub fn round2(value: f64) -> f64 {
    // 0.105 が 0.10499… になる誤差を先に吸収してから四捨五入する
    let cents = (value * 100.0 * 1e6).round() / 1e6;
    cents.round() / 100.0
}

/// 買取価格の合計
pub fn total_offer(cards: &[IdentifiedCard]) -> f64 {
    round2(cards.iter().map(|c| c.offer_price).sum())
}

/// エントリと状態から査定する
///
/// エントリが対応していない状態の場合は `UnsupportedCondition`。
pub fn price(entry: &CatalogEntry, condition: Condition) -> Result<Offer> {
    if !entry.supports(condition) {
        return Err(Error::UnsupportedCondition {
            entry_id: entry.id.clone(),
            condition,
        });
    }

    let market_price = round2(entry.market_price * condition.multiplier());
    let offer_price = round2(market_price * OFFER_RATE);

    Ok(Offer {
        market_price,
        offer_price,
    })
}
