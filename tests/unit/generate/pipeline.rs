use super::*;
use crate::foundation::random::{RngSource, SequenceRandom};
use crate::model::record::Background;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cardsmith_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn pipeline(dir: &Path, names: NamePool) -> CharacterGenerationPipeline {
    CharacterGenerationPipeline::new(TagRuleEngine::default(), names, dir)
}

#[test]
fn descriptors_are_txt_files_in_name_order() {
    let dir = temp_dir("gen_descriptors");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("b.txt"), "elf").unwrap();
    std::fs::write(dir.join("a.txt"), "elf").unwrap();
    std::fs::write(dir.join("a.png"), b"not a descriptor").unwrap();

    let found = pipeline(&dir, NamePool::default()).descriptors().unwrap();
    assert_eq!(found, vec![dir.join("a.txt"), dir.join("b.txt")]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_characters_dir_is_asset_missing() {
    let dir = temp_dir("gen_missing");
    let err = pipeline(&dir, NamePool::default()).descriptors().unwrap_err();
    assert!(matches!(err, CardError::AssetMissing(_)));
}

#[test]
fn generate_one_fills_name_and_image() {
    let dir = temp_dir("gen_one");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("elf_01.txt");
    std::fs::write(&path, "1girl, elf, dagger, leather_armor").unwrap();

    let names = NamePool::new(vec!["Ala".into()], vec!["Jan".into()]);
    let record = pipeline(&dir, names)
        .generate_one(&path, &mut SequenceRandom::constant(3))
        .unwrap();
    assert_eq!(record.name, "Ala");
    assert_eq!(record.image, "elf_01");
    assert_eq!(record.background, Background::Fantasy);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_name_pool_falls_back_to_image_key() {
    let dir = temp_dir("gen_fallback");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("orc.txt");
    std::fs::write(&path, "1boy").unwrap();

    let record = pipeline(&dir, NamePool::default())
        .generate_one(&path, &mut SequenceRandom::constant(0))
        .unwrap();
    assert_eq!(record.name, "orc");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn run_writes_a_sheet_that_parses_back() {
    let dir = temp_dir("gen_run");
    let chars = dir.join("characters");
    std::fs::create_dir_all(&chars).unwrap();
    std::fs::write(chars.join("one.txt"), "1girl,elf,dagger").unwrap();
    std::fs::write(chars.join("two.txt"), "1boy,horns,mace,shield,robe").unwrap();
    std::fs::write(chars.join("three.txt"), "").unwrap();

    let names = NamePool::new(vec!["Ala".into()], vec!["Jan".into()]);
    let sheet_path = dir.join("out").join("characters.csv");
    let report = pipeline(&chars, names)
        .run(&mut RngSource::seeded(11), &sheet_path)
        .unwrap();
    assert_eq!(report.records.len(), 3);
    assert!(report.skipped.is_empty());

    let sheet = Sheet::read(&sheet_path).unwrap();
    assert_eq!(sheet.len(), 3);
    let parsed: Vec<CharacterRecord> = sheet
        .rows()
        .iter()
        .map(|row| CharacterRecord::from_row(row).unwrap())
        .collect();
    assert_eq!(parsed, report.records);
    assert_eq!(parsed[2].image, "two");
    assert_eq!(parsed[2].weapons[1].image, "shield");
    assert_eq!(parsed[1].background, Background::Secret);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = temp_dir("gen_seeded");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.txt"), "kobold,spear,sword,gambeson").unwrap();
    std::fs::write(dir.join("b.txt"), "catgirl,staff").unwrap();

    let names = NamePool::new(vec!["Ala".into(), "Ewa".into()], vec!["Jan".into()]);
    let p = pipeline(&dir, names);
    let a = p.generate(&mut RngSource::seeded(5)).unwrap();
    let b = p.generate(&mut RngSource::seeded(5)).unwrap();
    assert_eq!(a.records, b.records);

    std::fs::remove_dir_all(&dir).ok();
}
