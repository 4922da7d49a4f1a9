use super::*;

#[test]
fn parse_trims_lowercases_and_dedups() {
    let tags = TagSet::parse(" 1girl, Elf ,elf,,dagger\n");
    assert_eq!(tags.len(), 3);
    assert!(tags.contains("elf"));
    assert!(tags.contains("1girl"));
    assert!(!tags.contains("Elf"));
}

#[test]
fn empty_text_is_empty_set() {
    assert!(TagSet::parse("").is_empty());
    assert!(TagSet::parse(" , ,\n").is_empty());
}

#[test]
fn matching_counts_distinct_keywords() {
    let tags = TagSet::parse("muscular,tall,robe");
    assert!(tags.matches_any(&["robe", "tunic"]));
    assert!(!tags.matches_any(Vec::<String>::new()));
    assert_eq!(tags.count_matches(&["muscular", "tall", "tall", "huge"]), 2);
}
