//! エラー型定義

use crate::types::Condition;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 空行を除くと処理対象の入力が1件もない
    #[error("入力が空です: 照合対象の行・画像がありません")]
    InputEmpty,

    /// カタログエントリが対応していない状態で査定しようとした
    #[error("未対応の状態: {entry_id} は {condition} に対応していません")]
    UnsupportedCondition {
        entry_id: String,
        condition: Condition,
    },

    #[error("カタログが不正: {0}")]
    InvalidCatalog(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
