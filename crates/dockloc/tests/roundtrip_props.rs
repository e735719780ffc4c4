//! Property-style invariants for location conversion.
//!
//! Random builder sequences are grown from every root kind; each resulting
//! chain must survive collapse, JSON, and expand unchanged, and `aside` must
//! stay well-formed on every head.

use dockloc::{
    ExpandOptions, ExtendedMode, Location, LocationProperty, NodeId, RootKind, ScreenRect, Side,
    SlotIndex, Step, collapse, expand, expand_with,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        if min == max {
            return min;
        }
        let span = u64::from(max - min + 1);
        min + (self.next_u64() % span) as u32
    }

    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    fn choose_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 0
    }
}

fn random_root(rng: &mut Lcg) -> Location {
    match rng.choose_index(5) {
        0 => Location::center(),
        1 => Location::working_area("editors").expect("non-empty owner"),
        2 => Location::externalized(),
        3 => Location::minimized(Side::ALL[rng.choose_index(Side::ALL.len())]),
        _ => Location::maximized(),
    }
}

fn random_slot(rng: &mut Lcg) -> SlotIndex {
    if rng.choose_index(4) == 0 {
        SlotIndex::APPEND
    } else {
        SlotIndex::new(rng.next_u32_range(0, 8))
    }
}

fn random_screen(rng: &mut Lcg) -> ScreenRect {
    let x = rng.next_u32_range(0, 4000) as i32 - 2000;
    let y = rng.next_u32_range(0, 2000) as i32 - 1000;
    ScreenRect::new(
        x,
        y,
        rng.next_u32_range(1, 2560) as i32,
        rng.next_u32_range(1, 1440) as i32,
    )
}

/// Apply one random builder operation, or return `None` if the head rejects it.
fn random_step(location: &Location, rng: &mut Lcg, sequence: u64) -> Option<Location> {
    let result = match rng.choose_index(7) {
        0 => {
            let side = Side::ALL[rng.choose_index(Side::ALL.len())];
            let id = rng.choose_bool().then(|| NodeId::new(sequence + 1));
            location.split(side, rng.next_unit(), id)
        }
        1 => location.leaf(NodeId::new(1000 + sequence)),
        2 => {
            let x = rng.next_unit();
            let y = rng.next_unit();
            location.rectangle(x, y, rng.next_unit(), rng.next_unit())
        }
        3 => location.stack(random_slot(rng)),
        4 => location.insert(random_slot(rng)),
        5 => {
            let rect = random_screen(rng);
            if rng.choose_bool() {
                location.screen(rect)
            } else {
                location.maximized_screen(rect)
            }
        }
        _ => Ok(location.aside()),
    };
    result.ok()
}

/// Grow a chain with at least one step beyond its root.
///
/// Bare roots are excluded: a split-tree root collapses to an empty path,
/// which expands to the full rectangle of the root rather than the root
/// itself. That case is pinned by the unit tests in `convert.rs`.
fn random_chain(seed: u64, steps: usize) -> Location {
    let mut rng = Lcg::new(seed);
    let mut location = random_root(&mut rng);
    let mut sequence = 0;
    while sequence < steps as u64 || location.is_root() {
        if let Some(next) = random_step(&location, &mut rng, sequence) {
            location = next;
        }
        sequence += 1;
    }
    location
}

fn assert_round_trip(location: &Location) {
    let property = collapse(location);
    let anchor = location.root().clone();
    let restored = expand(&property, &anchor).expect("collapsed chains expand onto their root");
    assert_eq!(&restored, location, "property: {property:?}");

    let json = serde_json::to_string(&property).expect("encode");
    let decoded: LocationProperty = serde_json::from_str(&json).expect("decode");
    assert_eq!(decoded, property, "json: {json}");
    assert_eq!(collapse(&restored), property);
}

fn assert_aside_invariants(location: &Location) {
    let aside = location.aside();
    assert_eq!(aside.root_area(), location.root_area());
    match location.step() {
        Some(Step::Index(index)) if index.is_append() => assert_eq!(&aside, location),
        Some(Step::Index(index)) => {
            assert_eq!(aside.depth(), location.depth());
            assert_eq!(aside.step(), Some(&Step::Index(index.next())));
        }
        None if location.root_area().kind() == RootKind::Externalized => {
            assert_eq!(&aside, location);
        }
        _ => {
            assert_eq!(aside.depth(), location.depth() + 1);
            assert_eq!(aside.parent(), Some(location));
        }
    }
    // Every head reached by `aside` collapses into something expandable.
    let property = collapse(&aside);
    assert!(expand(&property, aside.root()).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_chains_survive_collapse_and_expand(
        seed in any::<u64>(),
        steps in 1usize..24,
    ) {
        let location = random_chain(seed, steps);
        assert_round_trip(&location);
    }

    #[test]
    fn aside_is_well_formed_on_every_prefix(
        seed in any::<u64>(),
        steps in 0usize..16,
    ) {
        let location = random_chain(seed, steps);
        for node in location.ancestors() {
            assert_aside_invariants(node);
        }
    }

    #[test]
    fn depth_limit_rejects_only_deeper_properties(
        seed in any::<u64>(),
        steps in 1usize..24,
        limit in 1usize..8,
    ) {
        let location = random_chain(seed, steps);
        let property = collapse(&location);
        let options = ExpandOptions::new(limit).expect("positive limit");
        let result = expand_with(&property, location.root(), &options);
        prop_assert_eq!(result.is_ok(), property.depth() <= limit);
    }
}

#[test]
fn fuzz_seed_corpus_round_trips() {
    for seed in [0_u64, 1, 7, 42, 1337, 0xDEAD_BEEF, u64::MAX] {
        for steps in [1_usize, 3, 12, 40] {
            let location = random_chain(seed, steps);
            assert_round_trip(&location);
        }
    }
}

#[test]
fn nested_flap_successor_round_trips() {
    let location = Location::minimized(Side::West)
        .insert(SlotIndex::new(2))
        .and_then(|c| c.rectangle(0.0, 0.0, 1.0, 1.0))
        .expect("flap rectangle");
    let property = collapse(&location);
    assert_eq!(property.depth(), 2);
    assert_eq!(location.mode(), ExtendedMode::Minimized);
    assert_round_trip(&location);
}

#[test]
fn fullscreen_screen_anywhere_in_chain_maximizes() {
    let location = Location::externalized()
        .maximized_screen(ScreenRect::new(0, 0, 1920, 1080))
        .and_then(|c| c.north(0.5))
        .expect("fullscreen split");
    assert_eq!(location.mode(), ExtendedMode::Maximized);
    assert_round_trip(&location);
}
