use super::*;
use crate::foundation::random::SequenceRandom;

fn pool() -> NamePool {
    NamePool::new(
        vec!["Ala".into(), "".into(), "  Ewa ".into()],
        vec!["Jan".into()],
    )
}

#[test]
fn blank_lines_are_dropped_and_names_trimmed() {
    let p = pool();
    assert_eq!(p.names(Gender::Girl), ["Ala".to_string(), "Ewa".to_string()]);
    assert_eq!(p.names(Gender::Boy), ["Jan".to_string()]);
}

#[test]
fn pick_uses_the_gender_pool() {
    let p = pool();
    assert_eq!(p.pick(Gender::Girl, &mut SequenceRandom::constant(1)), Some("Ewa"));
    assert_eq!(p.pick(Gender::Girl, &mut SequenceRandom::constant(0)), Some("Ala"));
    assert_eq!(p.pick(Gender::Boy, &mut SequenceRandom::constant(7)), Some("Jan"));
}

#[test]
fn empty_pool_picks_nothing() {
    let p = NamePool::new(vec![], vec!["Jan".into()]);
    assert_eq!(p.pick(Gender::Girl, &mut SequenceRandom::constant(0)), None);
}

#[test]
fn missing_files_load_as_empty_pools() {
    let dir = std::env::temp_dir().join(format!("cardsmith_names_{}", std::process::id()));
    let p = NamePool::load(&dir.join("nope_girl.txt"), &dir.join("nope_boy.txt")).unwrap();
    assert_eq!(p, NamePool::default());
}
