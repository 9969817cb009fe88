//! 査定レポート
//!
//! 照合エンジンの結果に件数・合計などの集計を付けた出力形式。

use card_buyback_common::{IdentifiedCard, ProcessingResult};
use serde::{Deserialize, Serialize};

/// 入力の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Lines,
    Images,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuybackReport {
    pub generated_at: String,
    pub source: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_images: Option<usize>,
    pub matched: usize,
    pub unmatched_lines: usize,
    pub total_offer: f64,
    pub cards: Vec<IdentifiedCard>,
    pub unmatched: Vec<String>,
}

impl BuybackReport {
    /// 処理結果からレポートを作成
    ///
    /// `total` は入力件数（行数または画像数）。
    pub fn new(source: InputKind, total: usize, result: ProcessingResult) -> Self {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::with_timestamp(source, total, result, generated_at)
    }

    pub fn with_timestamp(
        source: InputKind,
        total: usize,
        result: ProcessingResult,
        generated_at: String,
    ) -> Self {
        let (total_lines, total_images) = match source {
            InputKind::Lines => (Some(total), None),
            InputKind::Images => (None, Some(total)),
        };

        Self {
            generated_at,
            source,
            total_lines,
            total_images,
            matched: result.matched.len(),
            unmatched_lines: result.unmatched.len(),
            total_offer: result.total_offer(),
            cards: result.matched,
            unmatched: result.unmatched,
        }
    }

    /// 画面表示用のサマリー
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for card in &self.cards {
            let condition = card
                .condition
                .map(|c| c.abbreviation().to_string())
                .unwrap_or_else(|| "?".to_string());
            let confidence = card
                .confidence
                .map(|c| format!(" (信頼度 {:.2})", c))
                .unwrap_or_default();

            lines.push(format!(
                "  {:>3}. {} [{}] {} {}  相場 {:.2} → 買取 {:.2}{}",
                card.id,
                card.entry.name,
                card.entry.set,
                card.entry.number,
                condition,
                card.market_price,
                card.offer_price,
                confidence
            ));
        }

        for text in &self.unmatched {
            let preview: String = text.replace('\n', " / ").chars().take(60).collect();
            lines.push(format!("   -   未照合: {}", preview));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_buyback_common::{Catalog, FragmentProcessor};
    use std::sync::Arc;

    fn sample_result() -> ProcessingResult {
        FragmentProcessor::new(Arc::new(Catalog::builtin()))
            .process_text("Charizard Base Set Near Mint\nrandom unrelated text xyz\nBlastoise Base Set LP")
            .unwrap()
    }

    #[test]
    fn test_report_counts() {
        let report = BuybackReport::with_timestamp(
            InputKind::Lines,
            3,
            sample_result(),
            "2026-01-01 00:00:00".into(),
        );

        assert_eq!(report.total_lines, Some(3));
        assert_eq!(report.total_images, None);
        assert_eq!(report.matched, 2);
        assert_eq!(report.unmatched_lines, 1);
        // 315.00 + 100.80
        assert_eq!(report.total_offer, 415.80);
    }

    #[test]
    fn test_report_json_shape() {
        let report = BuybackReport::with_timestamp(
            InputKind::Images,
            3,
            sample_result(),
            "2026-01-01 00:00:00".into(),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["totalImages"], 3);
        assert!(json.get("totalLines").is_none());
        assert_eq!(json["unmatchedLines"], 1);
        assert_eq!(json["cards"][0]["entry"]["name"], "Charizard");
        assert_eq!(json["cards"][0]["offerPrice"], 315.0);
        assert_eq!(json["source"], "images");
    }

    #[test]
    fn test_summary_lines() {
        let report = BuybackReport::with_timestamp(
            InputKind::Lines,
            3,
            sample_result(),
            String::new(),
        );
        let lines = report.summary_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Charizard"));
        assert!(lines[0].contains("315.00"));
        assert!(lines[2].contains("未照合"));
    }
}
