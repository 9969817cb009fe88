//! OCRレスポンス読み込みの統合テスト

use card_buyback::ocr_provider::OcrProvider;
use card_buyback::scanner;
use card_buyback_common::{Catalog, FragmentProcessor};
use std::sync::Arc;
use tempfile::tempdir;

const VISION_RESPONSE: &str = r#"{
  "responses": [
    {"textAnnotations": [{"locale": "en", "description": "Charizard VMAX\nHP 330\nChampion's Path\n74/73"}]},
    {"textAnnotations": [{"description": "Blastoise\nBase Set\n2/102\nlightly played"}]}
  ]
}"#;

#[tokio::test]
async fn test_load_vision_fragments_in_file_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("01.json"), VISION_RESPONSE).unwrap();
    std::fs::write(
        dir.path().join("02.json"),
        r#"{"responses": [{"textAnnotations": [{"description": "Lugia Neo Genesis 9/111"}]}]}"#,
    )
    .unwrap();

    let files = scanner::scan_folder(dir.path(), OcrProvider::Vision).unwrap();
    let fragments = scanner::load_fragments(&files, OcrProvider::Vision).await.unwrap();

    assert_eq!(fragments.len(), 3);
    assert!(fragments[0].text.starts_with("Charizard VMAX"));
    assert!(fragments[1].text.starts_with("Blastoise"));
    assert!(fragments[2].text.starts_with("Lugia"));

    let result = FragmentProcessor::new(Arc::new(Catalog::builtin()))
        .process(&fragments)
        .unwrap();
    let ids: Vec<_> = result.matched.iter().map(|c| c.entry.id.as_str()).collect();
    assert_eq!(ids, vec!["swsh35-74", "base1-2", "neo1-9"]);
}

#[tokio::test]
async fn test_broken_file_becomes_unmatched() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("a.json"), "{ not json").unwrap();
    std::fs::write(
        dir.path().join("b.json"),
        r#"{"responses": [{"textAnnotations": [{"description": "Pikachu Jungle"}]}]}"#,
    )
    .unwrap();

    let files = scanner::scan_folder(dir.path(), OcrProvider::Vision).unwrap();
    let fragments = scanner::load_fragments(&files, OcrProvider::Vision).await.unwrap();
    assert_eq!(fragments.len(), 2);
    assert!(fragments[0].is_blank());

    let result = FragmentProcessor::new(Arc::new(Catalog::builtin()))
        .process(&fragments)
        .unwrap();
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].entry.id, "base2-60");
    assert_eq!(result.unmatched, vec![String::new()]);
}

#[tokio::test]
async fn test_load_text_fragments() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("card1.txt"), "Venusaur\n15/102\nNM\n").unwrap();

    let files = scanner::scan_folder(dir.path(), OcrProvider::Text).unwrap();
    let fragments = scanner::load_fragments(&files, OcrProvider::Text).await.unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].card_number.as_deref(), Some("15/102"));
}

#[tokio::test]
async fn test_non_utf8_file_becomes_blank_fragment() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("a.txt"), [0xffu8, 0xfe]).unwrap();
    std::fs::write(dir.path().join("b.txt"), "Lugia\nNeo Genesis\n9/111").unwrap();

    let files = scanner::scan_folder(dir.path(), OcrProvider::Text).unwrap();
    let fragments = scanner::load_fragments(&files, OcrProvider::Text).await.unwrap();

    assert_eq!(fragments.len(), 2);
    assert!(fragments[0].is_blank());
    assert!(fragments[1].text.starts_with("Lugia"));
}
