//! 照合エンジンの型定義
//!
//! CLIと照合エンジンで共有される型:
//! - CatalogEntry: カタログの1枚分（読み込み後は不変）
//! - InputFragment: 照合対象の生テキスト（入力行 or 画像1枚分のOCRテキスト）
//! - IdentifiedCard: 照合・査定済みのカード
//! - ProcessingResult: バッチ全体の結果（照合済み + 未照合）

use crate::condition;
use crate::extract;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// カードの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Mint,
    NearMint,
    LightlyPlayed,
    ModeratelyPlayed,
    HeavilyPlayed,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Mint,
        Condition::NearMint,
        Condition::LightlyPlayed,
        Condition::ModeratelyPlayed,
        Condition::HeavilyPlayed,
    ];

    /// 相場価格に掛ける倍率
    pub fn multiplier(&self) -> f64 {
        match self {
            Condition::Mint => 1.1,
            Condition::NearMint => 1.0,
            Condition::LightlyPlayed => 0.8,
            Condition::ModeratelyPlayed => 0.6,
            Condition::HeavilyPlayed => 0.4,
        }
    }

    /// 略称（NM, LPなど）
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Condition::Mint => "M",
            Condition::NearMint => "NM",
            Condition::LightlyPlayed => "LP",
            Condition::ModeratelyPlayed => "MP",
            Condition::HeavilyPlayed => "HP",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Mint => write!(f, "Mint"),
            Condition::NearMint => write!(f, "Near Mint"),
            Condition::LightlyPlayed => write!(f, "Lightly Played"),
            Condition::ModeratelyPlayed => write!(f, "Moderately Played"),
            Condition::HeavilyPlayed => write!(f, "Heavily Played"),
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "m" | "mint" => Ok(Condition::Mint),
            "nm" | "nearmint" => Ok(Condition::NearMint),
            "lp" | "lightlyplayed" => Ok(Condition::LightlyPlayed),
            "mp" | "moderatelyplayed" => Ok(Condition::ModeratelyPlayed),
            "hp" | "heavilyplayed" => Ok(Condition::HeavilyPlayed),
            _ => Err(format!("Unknown condition: {}. Use M, NM, LP, MP or HP", s)),
        }
    }
}

fn all_conditions() -> BTreeSet<Condition> {
    Condition::ALL.into_iter().collect()
}

/// カタログエントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub set: String,
    /// カードに印字された番号（"4/102" など）
    #[serde(default)]
    pub number: String,
    pub market_price: f64,
    #[serde(default = "all_conditions")]
    pub supported_conditions: BTreeSet<Condition>,
}

impl CatalogEntry {
    /// 全状態に対応したエントリを作成
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        set: impl Into<String>,
        number: impl Into<String>,
        market_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set: set.into(),
            number: number.into(),
            market_price,
            supported_conditions: all_conditions(),
        }
    }

    pub fn supports(&self, condition: Condition) -> bool {
        self.supported_conditions.contains(&condition)
    }
}

/// 入力の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentSource {
    /// ユーザーが入力したテキスト行
    Line,
    /// 画像1枚分のOCRテキスト
    Ocr,
}

/// 照合対象の生テキスト1件
#[derive(Debug, Clone, PartialEq)]
pub struct InputFragment {
    pub text: String,
    pub source: FragmentSource,
    /// 抽出したカード番号（"#" は除去済み）
    pub card_number: Option<String>,
    /// テキスト中で見つかった状態キーワード
    pub condition: Option<Condition>,
}

impl InputFragment {
    /// 入力行からフラグメントを作成
    pub fn line(text: impl Into<String>) -> Self {
        Self::with_source(text.into(), FragmentSource::Line)
    }

    /// OCRテキストからフラグメントを作成
    pub fn ocr(text: impl Into<String>) -> Self {
        Self::with_source(text.into(), FragmentSource::Ocr)
    }

    fn with_source(text: String, source: FragmentSource) -> Self {
        let card_number = extract::extract_card_number(&text);
        let condition = condition::detect(&text);
        Self {
            text,
            source,
            card_number,
            condition,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// スコアリング中の候補（永続化しない）
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate<'a> {
    pub entry: &'a CatalogEntry,
    pub score: i32,
}

/// OCRテキストから抽出した項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrFields {
    pub card_name: Option<String>,
    pub set_name: Option<String>,
    pub card_number: Option<String>,
}

/// 照合・査定済みのカード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedCard {
    /// バッチ内の連番（1始まり）
    pub id: usize,
    pub entry: CatalogEntry,
    /// OCR経由で状態キーワードが無かった場合はNone
    pub condition: Option<Condition>,
    pub market_price: f64,
    pub offer_price: f64,
    /// OCR経由のみ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_fields: Option<OcrFields>,
    pub source_text: String,
}

/// バッチ処理結果
///
/// 入力フラグメントはすべて `matched` か `unmatched` のどちらか一方に、入力順で入る。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub matched: Vec<IdentifiedCard>,
    pub unmatched: Vec<String>,
}

impl ProcessingResult {
    /// 買取価格の合計
    pub fn total_offer(&self) -> f64 {
        crate::pricer::total_offer(&self.matched)
    }
}
