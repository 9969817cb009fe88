//! テキストからの項目抽出
//!
//! - カード番号（"74/73" 形式 / "#4" 形式）
//! - OCRテキストからのカード名・セット名

use crate::catalog::Catalog;
use crate::types::OcrFields;
use regex::Regex;

/// カード名の許可リスト
///
/// OCRが任意の単語を拾った場合と区別するため、ここに載っている名前だけ信頼度を上乗せする。
pub const KNOWN_CARD_NAMES: &[&str] = &[
    "Charizard",
    "Charizard VMAX",
    "Charizard EX",
    "Pikachu",
    "Pikachu VMAX",
    "Blastoise",
    "Venusaur",
    "Mewtwo",
    "Mew",
    "Lugia",
    "Rayquaza",
    "Umbreon",
    "Umbreon VMAX",
    "Gengar",
    "Dragonite",
    "Gyarados",
    "Eevee",
    "Snorlax",
];

/// 既知のセット名（カタログに無いセットもOCRで拾えるように）
pub const KNOWN_SET_NAMES: &[&str] = &[
    "Base Set",
    "Jungle",
    "Fossil",
    "Team Rocket",
    "Neo Genesis",
    "Champion's Path",
    "Evolving Skies",
    "Hidden Fates",
    "Shining Fates",
    "Celebrations",
];

/// カード番号を抽出する
///
/// "74/73" はそのまま、"#4" は "#" を除いた "4" を返す。
pub fn extract_card_number(text: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"(\d+/\d+)|#(\d+)").unwrap();
    }

    NUMBER_RE.captures(text).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// 番号が分数形式（"74/73"）かどうか
pub fn is_fraction_number(number: &str) -> bool {
    number.contains('/')
}

/// 名前が許可リストに載っているか（大文字小文字は区別しない）
pub fn is_known_card_name(name: &str) -> bool {
    KNOWN_CARD_NAMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name.trim()))
}

/// OCRテキストからカード名・セット名・番号を抽出する
pub fn extract_ocr_fields(text: &str, catalog: &Catalog) -> OcrFields {
    let lower = text.to_lowercase();

    let card_name = longest_contained(
        &lower,
        catalog
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .chain(KNOWN_CARD_NAMES.iter().copied()),
    )
    .or_else(|| first_title_line(text));

    let set_name = longest_contained(
        &lower,
        catalog
            .entries()
            .iter()
            .map(|e| e.set.as_str())
            .chain(KNOWN_SET_NAMES.iter().copied()),
    );

    OcrFields {
        card_name,
        set_name,
        card_number: extract_card_number(text),
    }
}

/// テキストに含まれる候補のうち最長のものを返す
fn longest_contained<'a>(
    lower_text: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    candidates
        .filter(|c| !c.trim().is_empty() && lower_text.contains(&c.to_lowercase()))
        .fold(None, |best: Option<&str>, c| match best {
            Some(b) if b.len() >= c.len() => Some(b),
            _ => Some(c),
        })
        .map(|s| s.to_string())
}

/// 候補に無い名前のフォールバック: カード上部のタイトルらしい最初の行
fn first_title_line(text: &str) -> Option<String> {
    lazy_static::lazy_static! {
        // "HP 120" / "120 HP" / 番号だけの行
        static ref NOISE_RE: Regex = Regex::new(r"(?i)^(hp\s*\d+|\d+\s*hp|[\d/#\s]+)$").unwrap();
    }

    text.lines()
        .map(str::trim)
        .find(|line| {
            line.chars().count() >= 3
                && line.chars().any(char::is_alphabetic)
                && !NOISE_RE.is_match(line)
        })
        .map(|line| line.to_string())
}
