use card_config::*;
use card_layout::{FeedDirection, PaperSize, PrintMode};
use std::path::PathBuf;

#[tokio::test]
async fn test_missing_file_is_empty_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigFile::load(dir.path().join("none.toml")).await.unwrap();
    assert_eq!(config, ConfigFile::default());
    assert_eq!(config.profile_names().count(), 0);
}

#[tokio::test]
async fn test_load_and_resolve_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardsheet.toml");
    std::fs::write(
        &path,
        r#"
pagesize = "letter"
feed_dir = "landscape"
twosided = true

[arkham]
card_width_mm = 63.5
card_height_mm = 88.9
backside_image_file = "~/backs/arkham.png"
backside_bleed_mm = 2
"#,
    )
    .unwrap();

    let config = ConfigFile::load(&path).await.unwrap();
    assert!(config.validate().is_empty());
    assert_eq!(config.profile_names().collect::<Vec<_>>(), vec!["arkham"]);

    let settings = Settings::resolve(&SettingsOverrides::default(), &config, Some("arkham")).unwrap();
    assert_eq!(settings.paper, PaperSize::Letter);
    assert_eq!(settings.feed_direction, FeedDirection::Landscape);
    assert_eq!(settings.print_mode(), PrintMode::TwoSided);
    assert_eq!(settings.card_spec().width_mm, 63.5);
    assert_eq!(settings.bleed_mm, 1.5);
    assert_eq!(settings.back_bleed_mm, 2.0);
    assert_eq!(
        settings.back_image,
        Some(expand_tilde("~/backs/arkham.png"))
    );
}

#[tokio::test]
async fn test_broken_toml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardsheet.toml");
    std::fs::write(&path, "pagesize = \n").unwrap();
    assert!(matches!(
        ConfigFile::load(&path).await,
        Err(ConfigError::Parse(_))
    ));
}

#[tokio::test]
async fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardsheet.toml");

    let mut config = ConfigFile::default();
    config.set(None, Property::PageDpi, 300);
    config.set(Some("lotr"), Property::TwoSided, true);
    config.save(&path).await.unwrap();

    let loaded = ConfigFile::load(&path).await.unwrap();
    assert_eq!(loaded.get_f32(Some("lotr"), Property::PageDpi).unwrap(), Some(300.0));
    assert_eq!(loaded.get_bool(Some("lotr"), Property::TwoSided).unwrap(), Some(true));
}

#[tokio::test]
async fn test_card_list_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.txt");

    let first = CardSet {
        back: PathBuf::from("back.png"),
        back_bleed_mm: 0.0,
        front_bleed_mm: 3.0,
        fronts: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
    };
    let second = CardSet {
        back: PathBuf::from("encounter.png"),
        back_bleed_mm: 2.0,
        front_bleed_mm: 2.0,
        fronts: vec![PathBuf::from("c.png")],
    };
    let text = format_card_set(&first) + &format_card_set(&second);
    std::fs::write(&path, text).unwrap();

    let sets = load_card_list(&path).await.unwrap();
    assert_eq!(sets, vec![first, second]);
}
