use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuybackError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("OCRレスポンスが見つかりません: {0}")]
    NoInputFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] card_buyback_common::Error),
}

pub type Result<T> = std::result::Result<T, BuybackError>;
