use super::*;

#[test]
fn keys_map_to_png_paths_under_their_roots() {
    let r = AssetResolver::new("assets");
    assert_eq!(
        r.background(Background::Mroczny),
        Path::new("assets/backgrounds/mroczny.png")
    );
    assert_eq!(r.portrait("elf_01"), Path::new("assets/characters/elf_01.png"));
    assert_eq!(r.weapon("slash"), Path::new("assets/weapons/slash.png"));
    assert_eq!(r.armor("impact"), Path::new("assets/armors/impact.png"));
    assert_eq!(r.language("Rh'lo"), Path::new("assets/languages/Rh'lo.png"));
    assert_eq!(
        r.ui(UiElement::Health),
        Path::new("assets/ui_elements/health_icon.png")
    );
    assert_eq!(r.font(), Path::new("assets/fonts/PressJobs.ttf"));
}

#[test]
fn keys_are_trimmed() {
    let r = AssetResolver::new("a");
    assert_eq!(r.weapon(" shield "), Path::new("a/weapons/shield.png"));
}

#[test]
fn require_dirs_reports_the_missing_directory() {
    let root = std::env::temp_dir().join(format!(
        "cardsmith_resolver_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(root.join(BACKGROUNDS_DIR)).unwrap();

    let r = AssetResolver::new(&root);
    r.require_dirs(&[BACKGROUNDS_DIR]).unwrap();

    let err = r.require_render_dirs().unwrap_err();
    assert!(matches!(err, CardError::AssetMissing(_)));
    assert!(err.to_string().contains(CHARACTERS_DIR));

    std::fs::remove_dir_all(&root).ok();
}
