//! フラグメント処理（バッチ単位）
//!
//! 入力行またはOCRテキストの一覧を受け取り、1件ずつ独立に
//! 状態判定 → カタログ照合 → 査定（OCRは信頼度も）を行う。
//!
//! 各フラグメントは互いに依存しないため並列に処理できる。結果は入力位置で
//! 並べた上で集計するので、出力順は実行順に関係なく入力順になる。

use crate::catalog::Catalog;
use crate::condition;
use crate::confidence;
use crate::error::{Error, Result};
use crate::extract::extract_ocr_fields;
use crate::matcher::{best_match, MatchOptions};
use crate::pricer;
use crate::types::{
    Condition, FragmentSource, IdentifiedCard, InputFragment, OcrFields, ProcessingResult,
};
use std::sync::Arc;
use tracing::{info, warn};

/// 処理オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    pub match_options: MatchOptions,
    /// フラグメントを並列に照合する
    pub parallel: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            match_options: MatchOptions::default(),
            parallel: true,
        }
    }
}

/// 1フラグメントの処理結果
#[derive(Debug)]
enum Outcome {
    Matched(Box<IdentifiedCard>),
    Unmatched(String),
}

/// フラグメント処理器
///
/// カタログはスナップショットを保持するので、処理中に差し替えられても影響を受けない。
#[derive(Debug, Clone)]
pub struct FragmentProcessor {
    catalog: Arc<Catalog>,
    options: ProcessOptions,
}

impl FragmentProcessor {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_options(catalog, ProcessOptions::default())
    }

    pub fn with_options(catalog: Arc<Catalog>, options: ProcessOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// 複数行のテキストを1行1フラグメントとして処理する
    pub fn process_text(&self, text: &str) -> Result<ProcessingResult> {
        self.process(&fragments_from_text(text))
    }

    /// フラグメントを一括処理する
    ///
    /// 空のバッチ、または全件が空白のみのバッチは `InputEmpty`。
    pub fn process(&self, fragments: &[InputFragment]) -> Result<ProcessingResult> {
        if fragments.iter().all(InputFragment::is_blank) {
            return Err(Error::InputEmpty);
        }

        let outcomes = self.process_all(fragments);

        let mut result = ProcessingResult::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Matched(mut card) => {
                    card.id = result.matched.len() + 1;
                    result.matched.push(*card);
                }
                Outcome::Unmatched(text) => result.unmatched.push(text),
            }
        }

        info!(
            total = fragments.len(),
            matched = result.matched.len(),
            unmatched = result.unmatched.len(),
            "バッチ処理完了"
        );

        Ok(result)
    }

    #[cfg(feature = "parallel")]
    fn process_all(&self, fragments: &[InputFragment]) -> Vec<Outcome> {
        use rayon::prelude::*;

        if self.options.parallel {
            // インデックス付きcollectなので入力順が保たれる
            fragments.par_iter().map(|f| self.process_one(f)).collect()
        } else {
            fragments.iter().map(|f| self.process_one(f)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn process_all(&self, fragments: &[InputFragment]) -> Vec<Outcome> {
        fragments.iter().map(|f| self.process_one(f)).collect()
    }

    fn process_one(&self, fragment: &InputFragment) -> Outcome {
        // 未照合には入力テキストをそのまま残す
        if fragment.is_blank() {
            return Outcome::Unmatched(fragment.text.clone());
        }

        let candidate = match best_match(fragment, &self.catalog, &self.options.match_options) {
            Some(candidate) => candidate,
            None => return Outcome::Unmatched(fragment.text.clone()),
        };
        let entry = candidate.entry;

        let (condition, confidence, ocr_fields) = match fragment.source {
            FragmentSource::Line => (Some(condition::normalize(&fragment.text)), None, None),
            FragmentSource::Ocr => {
                let fields = extract_ocr_fields(&fragment.text, &self.catalog);
                let confidence = confidence::estimate_fields(&fields);
                (fragment.condition, Some(confidence), Some(fields))
            }
        };

        // OCRで状態が読めなかった場合は Near Mint 基準で査定し、condition はNoneのまま残す
        let pricing_condition = condition.unwrap_or(Condition::NearMint);

        let offer = match pricer::price(entry, pricing_condition) {
            Ok(offer) => offer,
            Err(e) => {
                warn!(entry = %entry.id, "査定できません: {}", e);
                return Outcome::Unmatched(fragment.text.clone());
            }
        };

        Outcome::Matched(Box::new(IdentifiedCard {
            id: 0,
            entry: entry.clone(),
            condition,
            market_price: offer.market_price,
            offer_price: offer.offer_price,
            confidence,
            ocr_fields: ocr_fields.filter(|f: &OcrFields| *f != OcrFields::default()),
            source_text: fragment.text.trim().to_string(),
        }))
    }
}

/// テキストを行ごとのフラグメントに分割する（空行は除く）
pub fn fragments_from_text(text: &str) -> Vec<InputFragment> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(InputFragment::line)
        .collect()
}
