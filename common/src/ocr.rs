//! OCRレスポンスのパース
//!
//! OCRプロバイダ（Google Vision の `images:annotate` 形式）のレスポンスJSONを、
//! 画像1枚につき1件の [`InputFragment`] に変換する。
//! 画像単位のエラーや空のレスポンスは空のフラグメントになり、照合側で未照合に回る。

use crate::error::{Error, Result};
use crate::types::InputFragment;
use serde::{Deserialize, Serialize};

/// `images:annotate` レスポンス全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrResponse {
    pub responses: Vec<AnnotateImageResponse>,
}

/// 画像1枚分のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateImageResponse {
    pub text_annotations: Vec<TextAnnotation>,
    pub error: Option<OcrStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextAnnotation {
    pub description: String,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrStatus {
    pub code: i32,
    pub message: String,
}

impl AnnotateImageResponse {
    /// 注釈テキストを連結してフラグメントにする
    pub fn to_fragment(&self) -> InputFragment {
        if self.error.is_some() {
            return InputFragment::ocr("");
        }
        fragment_from_annotations(self.text_annotations.iter().map(|a| a.description.as_str()))
    }
}

/// 注釈テキストを改行で連結してOCRフラグメントにする
pub fn fragment_from_annotations<'a>(texts: impl IntoIterator<Item = &'a str>) -> InputFragment {
    let joined = texts
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    InputFragment::ocr(joined)
}

/// レスポンスJSONをパースして画像ごとのフラグメントを返す
///
/// # Examples
/// ```
/// use card_buyback_common::ocr::parse_vision_response;
///
/// let json = r#"{"responses": [{"textAnnotations": [{"description": "Pikachu\n58/102"}]}]}"#;
/// let fragments = parse_vision_response(json).unwrap();
/// assert_eq!(fragments.len(), 1);
/// assert_eq!(fragments[0].card_number.as_deref(), Some("58/102"));
/// ```
pub fn parse_vision_response(json: &str) -> Result<Vec<InputFragment>> {
    let response: OcrResponse = serde_json::from_str(json.trim())
        .map_err(|e| Error::Parse(format!("OCRレスポンスのJSONパースエラー: {}", e)))?;

    Ok(response
        .responses
        .iter()
        .map(AnnotateImageResponse::to_fragment)
        .collect())
}
