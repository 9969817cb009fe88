//! 照合エンジンの統合テスト
//!
//! 組み込みカタログを使って、入力行・OCRテキストから査定結果までを検証

use card_buyback_common::{
    confidence, fragments_from_text, round2, Catalog, CatalogEntry, Condition, FragmentProcessor,
    InputFragment, MatchOptions, ProcessOptions,
};
use std::sync::Arc;

fn processor() -> FragmentProcessor {
    FragmentProcessor::new(Arc::new(Catalog::builtin()))
}

/// 名前+セットでの入力は必ずそのエントリに5点以上で一致する
#[test]
fn test_name_and_set_always_match() {
    let catalog = Catalog::builtin();
    for entry in catalog.entries() {
        let fragment = InputFragment::line(format!("{} {}", entry.name, entry.set));
        let best = card_buyback_common::best_match(&fragment, &catalog, &MatchOptions::default())
            .expect("一致しない");
        assert_eq!(best.entry.id, entry.id);
        assert!(best.score >= 5);
    }
}

#[test]
fn test_charizard_near_mint_scenario() {
    let result = processor().process_text("Charizard Base Set Near Mint").unwrap();

    let card = &result.matched[0];
    assert_eq!(card.entry.name, "Charizard");
    assert_eq!(card.condition, Some(Condition::NearMint));
    assert_eq!(card.market_price, 450.00);
    assert_eq!(card.offer_price, 315.00);
}

#[test]
fn test_unrelated_text_is_unmatched() {
    let result = processor().process_text("random unrelated text xyz").unwrap();
    assert!(result.matched.is_empty());
    assert_eq!(result.unmatched, vec!["random unrelated text xyz"]);
}

/// [a, b, c] で a, c が一致、b が不一致 → matched=[A, C], unmatched=[b]
#[test]
fn test_order_is_preserved() {
    let result = processor()
        .process_text("Lugia Neo Genesis\nsome random words\nUmbreon VMAX Evolving Skies")
        .unwrap();

    let names: Vec<_> = result.matched.iter().map(|c| c.entry.name.as_str()).collect();
    assert_eq!(names, vec!["Lugia", "Umbreon VMAX"]);
    assert_eq!(result.unmatched, vec!["some random words"]);
}

/// 全フラグメントがどちらか一方に1回だけ入る
#[test]
fn test_every_fragment_reported_once() {
    let text = "Charizard #4\nxyz\nPikachu Jungle LP\n\nMew\nBlastoise 2/102 damaged";
    let fragments = fragments_from_text(text);
    let result = processor().process(&fragments).unwrap();
    assert_eq!(result.matched.len() + result.unmatched.len(), fragments.len());
}

#[test]
fn test_process_twice_is_identical() {
    let fragments = fragments_from_text("Charizard Base Set\nPikachu\nVenusaur 15/102 mp\n???");
    let processor = processor();
    assert_eq!(
        processor.process(&fragments).unwrap(),
        processor.process(&fragments).unwrap()
    );
}

/// 買取価格 ≤ 状態別相場 ≤ 相場×1.1
#[test]
fn test_offer_bounds() {
    let catalog = Catalog::builtin();
    let text: String = catalog
        .entries()
        .iter()
        .flat_map(|e| {
            ["mint", "nm", "lp", "mp", "hp"]
                .iter()
                .map(move |c| format!("{} {} {}\n", e.name, e.set, c))
        })
        .collect();

    let result = processor().process_text(&text).unwrap();
    assert!(result.unmatched.is_empty());

    for card in &result.matched {
        assert!(card.offer_price <= card.market_price);
        assert!(card.market_price <= round2(card.entry.market_price * 1.1));
    }
}

/// 単語ごとの加点はカード名一致の加点と重複する（現行の配点をそのまま維持）
#[test]
fn test_word_bonus_overlaps_whole_name_bonus() {
    let catalog = Catalog::new(vec![CatalogEntry::new(
        "swsh7-215",
        "Umbreon VMAX",
        "Evolving Skies",
        "215/203",
        520.0,
    )]);
    let fragment = InputFragment::line("Umbreon VMAX");
    let best = card_buyback_common::best_match(&fragment, &catalog, &MatchOptions::default()).unwrap();
    // 3(名前) + 1(umbreon) + 1(vmax)
    assert_eq!(best.score, 5);
}

#[test]
fn test_ocr_confidence_scenario() {
    let confidence = confidence::estimate(Some("Charizard VMAX"), Some("Champion's Path"), Some("74/73"));
    assert_eq!(confidence, 1.0);

    let text = "Charizard VMAX\nHP 330\nChampion's Path\n74/73";
    let result = processor().process(&[InputFragment::ocr(text)]).unwrap();
    assert_eq!(result.matched[0].confidence, Some(1.0));
    // "Champion's Path" の "mp" を状態として拾う
    assert_eq!(result.matched[0].condition, Some(Condition::ModeratelyPlayed));
}

/// 状態キーワードは単語境界を見ずに部分文字列で照合する
#[test]
fn test_condition_keywords_match_inside_words() {
    let result = processor().process_text("Charizard VMAX Champion's Path").unwrap();

    let card = &result.matched[0];
    assert_eq!(card.entry.id, "swsh35-74");
    assert_eq!(card.condition, Some(Condition::ModeratelyPlayed));
    assert_eq!(card.market_price, 168.00);
    assert_eq!(card.offer_price, 117.60);
}

#[test]
fn test_unmatched_keeps_raw_text() {
    let fragments = vec![
        InputFragment::line("Charizard Base Set"),
        InputFragment::line("  no such card  "),
    ];
    let result = processor().process(&fragments).unwrap();
    assert_eq!(result.unmatched, vec!["  no such card  "]);
}

#[test]
fn test_min_score_option_trades_recall_for_precision() {
    let catalog = Arc::new(Catalog::builtin());
    let text = "vmax";

    let default = FragmentProcessor::new(Arc::clone(&catalog));
    assert!(default.process_text(text).unwrap().matched.is_empty());

    let loose = FragmentProcessor::with_options(
        catalog,
        ProcessOptions {
            match_options: MatchOptions { min_score: 1 },
            ..Default::default()
        },
    );
    let result = loose.process_text(text).unwrap();
    // 同点はカタログ順で先の Charizard VMAX
    assert_eq!(result.matched[0].entry.name, "Charizard VMAX");
}
