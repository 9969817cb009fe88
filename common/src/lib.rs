//! Card Buyback Common Library
//!
//! 入力テキスト・OCRテキストからカードを特定し、カタログと照合して買取価格を算出する照合エンジン

pub mod types;
pub mod error;
pub mod condition;
pub mod extract;
pub mod catalog;
pub mod matcher;
pub mod confidence;
pub mod pricer;
pub mod processor;
pub mod ocr;
pub mod export;

pub use types::{
    CatalogEntry, Condition, FragmentSource, IdentifiedCard, InputFragment, MatchCandidate,
    OcrFields, ProcessingResult,
};
pub use error::{Error, Result};
pub use catalog::{Catalog, CatalogStore};
pub use matcher::{best_match, MatchOptions, DEFAULT_MIN_SCORE};
pub use pricer::{price, round2, total_offer, Offer, OFFER_RATE};
pub use processor::{fragments_from_text, FragmentProcessor, ProcessOptions};
pub use ocr::parse_vision_response;
