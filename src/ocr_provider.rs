use crate::error::Result;
use card_buyback_common::ocr::parse_vision_response;
use card_buyback_common::InputFragment;
use clap::ValueEnum;

/// OCRレスポンスの保存形式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OcrProvider {
    /// Google Vision `images:annotate` のレスポンスJSON
    Vision,
    /// OCR結果のプレーンテキスト（1ファイル=1画像）
    Text,
}

impl OcrProvider {
    /// 対象とするファイル拡張子
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            OcrProvider::Vision => &["json"],
            OcrProvider::Text => &["txt"],
        }
    }

    /// ファイル内容をフラグメントに変換
    pub fn parse(&self, content: &str) -> Result<Vec<InputFragment>> {
        match self {
            OcrProvider::Vision => Ok(parse_vision_response(content)?),
            OcrProvider::Text => Ok(vec![InputFragment::ocr(content.trim())]),
        }
    }
}

impl std::fmt::Display for OcrProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrProvider::Vision => write!(f, "vision"),
            OcrProvider::Text => write!(f, "text"),
        }
    }
}
