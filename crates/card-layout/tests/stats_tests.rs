use card_layout::*;

#[test]
fn test_stats_folded() {
    // A4 landscape with default cards: 4 front/back pairs per page
    let stats =
        calculate_statistics(&PageSpec::default(), &CardSpec::default(), PrintMode::Folded, 10)
            .unwrap();

    assert_eq!(stats.cards, 10);
    assert_eq!(stats.cards_per_sheet, 4);
    assert_eq!(stats.sheets, 3);
    assert_eq!(stats.output_pages, 3);
    assert_eq!(stats.empty_slots, 2);
}

#[test]
fn test_stats_two_sided() {
    // 4x2 grid, every sheet is a front page and a back page
    let stats =
        calculate_statistics(&PageSpec::default(), &CardSpec::default(), PrintMode::TwoSided, 10)
            .unwrap();

    assert_eq!(stats.cards_per_sheet, 8);
    assert_eq!(stats.sheets, 2);
    assert_eq!(stats.output_pages, 4);
    assert_eq!(stats.empty_slots, 6);
}

#[test]
fn test_stats_exact_multiple() {
    let stats =
        calculate_statistics(&PageSpec::default(), &CardSpec::default(), PrintMode::Folded, 8)
            .unwrap();

    assert_eq!(stats.sheets, 2);
    assert_eq!(stats.empty_slots, 0);
}

#[test]
fn test_stats_no_cards() {
    let stats =
        calculate_statistics(&PageSpec::default(), &CardSpec::default(), PrintMode::TwoSided, 0)
            .unwrap();

    assert_eq!(stats.sheets, 0);
    assert_eq!(stats.output_pages, 0);
    assert_eq!(stats.empty_slots, 0);
}

#[test]
fn test_stats_invalid_geometry() {
    let card = CardSpec {
        width_mm: 400.0,
        ..Default::default()
    };
    let result = calculate_statistics(&PageSpec::default(), &card, PrintMode::Folded, 1);
    match result {
        Err(LayoutError::Config(_)) => {}
        _ => panic!("Expected Config error"),
    }
}
