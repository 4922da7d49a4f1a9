use super::*;

#[test]
fn sequence_cycles_and_clamps() {
    let mut rng = SequenceRandom::new(vec![1, 5, 50]);
    assert_eq!(rng.random_range(1, 20), 1);
    assert_eq!(rng.random_range(6, 20), 6);
    assert_eq!(rng.random_range(1, 20), 20);
    assert_eq!(rng.random_range(1, 20), 1);
}

#[test]
fn seeded_source_is_reproducible_and_in_range() {
    let mut a = RngSource::seeded(7);
    let mut b = RngSource::seeded(7);
    for _ in 0..200 {
        let va = a.random_range(-3, 12);
        assert_eq!(va, b.random_range(-3, 12));
        assert!((-3..=12).contains(&va));
    }
}

#[test]
fn sample_indices_are_distinct() {
    let mut rng = RngSource::seeded(42);
    for count in 0..=6 {
        let mut picked = rng.sample_indices(5, count);
        assert_eq!(picked.len(), count.min(5));
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), count.min(5));
        assert!(picked.iter().all(|&i| i < 5));
    }
}

#[test]
fn degenerate_range_returns_min() {
    let mut rng = RngSource::seeded(1);
    assert_eq!(rng.random_range(4, 4), 4);
}
