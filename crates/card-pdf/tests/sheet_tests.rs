use card_image::CardImage;
use card_layout::{CardSpec, FeedDirection, PrintMode};
use card_pdf::*;
use image::{Rgba, RgbaImage};

fn face(color: [u8; 4]) -> CardImage {
    // Low resolution keeps the documents small
    CardImage::new(RgbaImage::from_pixel(27, 38, Rgba(color)), 67.5, 94.0).unwrap()
}

fn sheet_with_cards(options: PdfOptions, count: usize) -> CardSheet {
    let mut sheet = CardSheet::new(options).unwrap();
    let back = sheet.add_face(face([0, 0, 255, 255]));
    for _ in 0..count {
        let front = sheet.add_face(face([255, 0, 0, 255]));
        sheet.add_card(Some(front), Some(back)).unwrap();
    }
    sheet
}

fn page_count(bytes: &[u8]) -> usize {
    let doc = lopdf::Document::load_mem(bytes).unwrap();
    doc.get_pages().len()
}

fn two_sided() -> PdfOptions {
    PdfOptions {
        mode: PrintMode::TwoSided,
        ..Default::default()
    }
}

#[test]
fn test_folded_page_count() {
    let sheet = sheet_with_cards(PdfOptions::default(), 10);
    let stats = sheet.statistics().unwrap();
    assert_eq!(stats.cards_per_sheet, 4);
    assert_eq!(stats.output_pages, 3);

    let bytes = sheet.render().unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&bytes), 3);
}

#[test]
fn test_two_sided_page_count() {
    let sheet = sheet_with_cards(two_sided(), 10);
    assert_eq!(sheet.cards_per_sheet(), 8);
    assert_eq!(page_count(&sheet.render().unwrap()), 4);
}

#[test]
fn test_two_sided_landscape_feed() {
    let mut options = two_sided();
    options.page.feed_direction = FeedDirection::Landscape;
    let sheet = sheet_with_cards(options, 8);
    assert_eq!(page_count(&sheet.render().unwrap()), 2);
}

#[test]
fn test_only_fronts_drops_back_pages() {
    let options = PdfOptions {
        backs: false,
        ..two_sided()
    };
    let sheet = sheet_with_cards(options, 10);
    assert_eq!(sheet.statistics().unwrap().output_pages, 2);
    assert_eq!(page_count(&sheet.render().unwrap()), 2);
}

#[test]
fn test_only_backs_with_offset() {
    let options = PdfOptions {
        fronts: false,
        back_offset_x_mm: 1.5,
        back_offset_y_mm: -0.5,
        ..two_sided()
    };
    let sheet = sheet_with_cards(options, 9);
    assert_eq!(page_count(&sheet.render().unwrap()), 2);
}

#[test]
fn test_missing_faces_render_blank() {
    let mut sheet = CardSheet::new(PdfOptions::default()).unwrap();
    let front = sheet.add_face(face([0, 255, 0, 255]));
    sheet.add_card(Some(front), None).unwrap();
    sheet.add_card(None, None).unwrap();
    assert_eq!(page_count(&sheet.render().unwrap()), 1);
}

#[test]
fn test_card_too_large_for_page() {
    let options = PdfOptions {
        card: CardSpec {
            width_mm: 400.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(CardSheet::new(options), Err(SheetError::Layout(_))));
}

#[test]
fn test_excluding_both_sides_fails() {
    let options = PdfOptions {
        fronts: false,
        backs: false,
        ..Default::default()
    };
    assert!(matches!(CardSheet::new(options), Err(SheetError::Config(_))));
}

#[tokio::test]
async fn test_generate_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.pdf");

    let bytes = generate_pdf(sheet_with_cards(two_sided(), 3))
        .await
        .unwrap();
    save_pdf(&bytes, &path, false).await.unwrap();
    assert_eq!(page_count(&std::fs::read(&path).unwrap()), 2);
}

#[tokio::test]
async fn test_save_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.pdf");
    std::fs::write(&path, b"keep me").unwrap();

    let bytes = sheet_with_cards(PdfOptions::default(), 1).render().unwrap();
    let result = save_pdf(&bytes, &path, false).await;
    assert!(matches!(result, Err(SheetError::OutputExists(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");

    save_pdf(&bytes, &path, true).await.unwrap();
    assert_eq!(page_count(&std::fs::read(&path).unwrap()), 1);
}
