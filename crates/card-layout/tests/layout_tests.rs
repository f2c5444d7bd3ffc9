use card_layout::*;

fn page(paper: PaperSize, orientation: Orientation, margin_mm: f32) -> PageSpec {
    PageSpec {
        paper,
        orientation,
        margin_mm,
        ..Default::default()
    }
}

fn card(width_mm: f32, height_mm: f32, bleed_mm: f32, spacing_mm: f32) -> CardSpec {
    CardSpec {
        width_mm,
        height_mm,
        bleed_mm,
        spacing_mm,
        ..Default::default()
    }
}

fn assert_no_overlap(placements: &[Placement], spacing_mm: f32) {
    for (i, a) in placements.iter().enumerate() {
        for b in placements.iter().skip(i + 1) {
            if a.page != b.page {
                continue;
            }
            assert!(
                !a.rect.overlaps(&b.rect),
                "cards {} and {} overlap on page {}",
                a.card,
                b.card,
                a.page
            );
            assert!(
                a.rect.distance_to(&b.rect) + 1e-3 >= spacing_mm,
                "cards {} and {} closer than {} mm",
                a.card,
                b.card,
                spacing_mm
            );
        }
    }
}

fn assert_inside_margins(placements: &[Placement], page: &PageSpec) {
    for p in placements {
        assert!(p.rect.x + 1e-3 >= page.margin_mm);
        assert!(p.rect.y + 1e-3 >= page.margin_mm);
        assert!(p.rect.right() <= page.width_mm() - page.margin_mm + 1e-3);
        assert!(p.rect.bottom() <= page.height_mm() - page.margin_mm + 1e-3);
    }
}

#[test]
fn test_grid_never_overlaps() {
    let papers = [PaperSize::A4, PaperSize::A3, PaperSize::Letter, PaperSize::Tabloid];
    let orientations = [Orientation::Portrait, Orientation::Landscape];
    let cards = [
        card(61.5, 88.0, 3.0, 1.0),
        card(63.0, 88.0, 0.0, 0.0),
        card(44.0, 67.0, 1.5, 2.5),
        card(88.0, 61.5, 3.0, 0.0),
        card(120.0, 70.0, 2.0, 4.0),
    ];

    for paper in papers {
        for orientation in orientations {
            let page = page(paper, orientation, 6.0);
            for card in &cards {
                let placements = layout_cards(&page, card, 40).unwrap();
                assert_eq!(placements.len(), 40);
                assert_no_overlap(&placements, card.spacing_mm);
                assert_inside_margins(&placements, &page);
            }
        }
    }
}

#[test]
fn test_exact_fit_fills_one_page() {
    // Printable 86 x 40 mm: 4 columns of 20 mm cards with 2 mm gaps, 1 row
    let page = page(
        PaperSize::Custom {
            width_mm: 96.0,
            height_mm: 50.0,
        },
        Orientation::Landscape,
        5.0,
    );
    let card = card(20.0, 40.0, 0.0, 2.0);

    assert_eq!(cards_per_page(&page, &card).unwrap(), 4);

    let placements = layout_cards(&page, &card, 4).unwrap();
    assert_eq!(placements.len(), 4);
    assert!(placements.iter().all(|p| p.page == 0));
    // No leftover space, so the grid starts right at the margin
    assert!((placements[0].rect.x - 5.0).abs() < 1e-4);
    assert!((placements[3].rect.right() - 91.0).abs() < 1e-4);

    let placements = layout_cards(&page, &card, 5).unwrap();
    assert_eq!(placements[4].page, 1);
    assert_eq!(page_count(&page, &card, 5).unwrap(), 2);
}

#[test]
fn test_decimal_sizes_fit_exactly() {
    // 3 x 63.5 + 2 x 0.3 = 191.1 mm
    let page = page(
        PaperSize::Custom {
            width_mm: 201.1,
            height_mm: 98.9,
        },
        Orientation::Landscape,
        5.0,
    );
    let card = card(63.5, 88.9, 0.0, 0.3);
    let grid = create_grid(&page, &card).unwrap();
    assert_eq!(grid.cols, 3);
    assert_eq!(grid.rows, 1);
}

#[test]
fn test_card_larger_than_printable_area() {
    let page = page(PaperSize::A4, Orientation::Portrait, 10.0);
    let big = card(200.0, 100.0, 0.0, 0.0);

    assert!(matches!(
        layout_cards(&page, &big, 1),
        Err(LayoutError::Config(_))
    ));
    assert!(matches!(
        fold_placements(&page, &big, 1),
        Err(LayoutError::Config(_))
    ));
    assert!(matches!(
        duplex_placements(&page, &big, 1),
        Err(LayoutError::Config(_))
    ));
}

#[test]
fn test_invalid_geometry_rejected_before_placement() {
    let page = page(PaperSize::A4, Orientation::Portrait, 6.0);
    let bad = card(-5.0, 88.0, 3.0, 1.0);
    assert!(layout_cards(&page, &bad, 0).is_err());

    let no_area = PageSpec {
        margin_mm: 200.0,
        ..Default::default()
    };
    assert!(layout_cards(&no_area, &CardSpec::default(), 3).is_err());
}

#[test]
fn test_zero_cards() {
    let placements = layout_cards(&PageSpec::default(), &CardSpec::default(), 0).unwrap();
    assert!(placements.is_empty());
}

#[test]
fn test_fold_offset_independent_of_page_size() {
    let card = CardSpec {
        fold_distance_mm: 4.0,
        ..Default::default()
    };

    for paper in [PaperSize::A4, PaperSize::A3, PaperSize::Letter, PaperSize::Tabloid] {
        let page = page(paper, Orientation::Landscape, 6.0);
        let center = page.height_mm() / 2.0;

        for p in fold_placements(&page, &card, 12).unwrap() {
            let front_gap = center - p.front.rect.bottom();
            let back_gap = p.back.rect.y - center;
            assert!((front_gap - 4.0).abs() < 1e-3, "{:?}: front gap {}", paper, front_gap);
            assert!((back_gap - 4.0).abs() < 1e-3, "{:?}: back gap {}", paper, back_gap);
        }
    }
}

#[test]
fn test_fold_placements_do_not_overlap() {
    let page = PageSpec::default();
    let card = CardSpec::default();
    let placements = fold_placements(&page, &card, 9).unwrap();

    let all: Vec<Placement> = placements
        .iter()
        .flat_map(|p| [p.front, p.back])
        .collect();
    assert_no_overlap(&all, card.spacing_mm);
    assert_inside_margins(&all, &page);
}

#[test]
fn test_duplex_backs_cover_the_same_slots() {
    for feed in [FeedDirection::Portrait, FeedDirection::Landscape] {
        let page = PageSpec {
            feed_direction: feed,
            ..Default::default()
        };
        let placements = duplex_placements(&page, &CardSpec::default(), 8).unwrap();

        let mut back_slots: Vec<usize> = placements.iter().map(|p| p.back.slot).collect();
        back_slots.sort();
        assert_eq!(back_slots, (0..8).collect::<Vec<_>>());

        let backs: Vec<Placement> = placements.iter().map(|p| p.back).collect();
        assert_no_overlap(&backs, 1.0);
    }
}
