//! Pull simulator tests against in-memory catalogs.

mod common;

use md_pull_sdk::odds::{is_pity_pack, ANCHOR_SLOT, SLOTS_PER_PACK};
use md_pull_sdk::pulls::BASELINE_SLOTS;
use md_pull_sdk::{
    CatalogClient, FixupTable, Foil, InMemoryCatalog, PackDefinition, PackKind, PullError,
    PullRequest, PullSimulator, Rarity, ScriptedRolls,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{CountingCatalog, FlakyCatalog, MASTER_PACK, SECRET_PACK, SELECTION_PACK};

fn simulate_seeded(
    catalog: &dyn CatalogClient,
    pack_name: &str,
    num_packs: usize,
    seed: u64,
) -> md_pull_sdk::Result<md_pull_sdk::PullResponse> {
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(catalog, &fixups);
    let mut rng = StdRng::seed_from_u64(seed);
    sim.simulate(&PullRequest::new(pack_name, num_packs), &mut rng)
}

// ---------------------------------------------------------------------------
// Forced-roll scenarios
// ---------------------------------------------------------------------------

#[test]
fn forced_ultra_rares_on_baseline_pack() {
    let catalog = InMemoryCatalog::new().with_pack(
        PackDefinition::new("base", PackKind::Baseline, "Base"),
        common::card_set("Base", 4, 4, 10, 20),
    );
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);
    let mut rolls = ScriptedRolls::new(common::forced_rolls(0.0, 50.0));

    let response = sim.simulate(&PullRequest::new("Base", 1), &mut rolls).unwrap();

    assert_eq!(response.pack_name, "Base");
    assert_eq!(response.total_ultra_rare_count, 7);
    assert_eq!(response.pulls.len(), 1);
    let pack = &response.pulls[0];
    assert_eq!(pack.len(), SLOTS_PER_PACK);
    for card in &pack[..ANCHOR_SLOT] {
        assert_eq!(card.card_rarity, Rarity::UltraRare);
        assert!(card.card_name.starts_with("Base UR"));
        assert_eq!(card.card_foil, Foil::Normal);
    }
    assert_eq!(pack[ANCHOR_SLOT].card_rarity, Rarity::Rare);
    assert!(pack[ANCHOR_SLOT].card_name.starts_with("Base R"));
}

#[test]
fn forced_pity_pack_anchor_is_super_rare() {
    let catalog = InMemoryCatalog::new().with_pack(
        PackDefinition::new("base", PackKind::Baseline, "Base"),
        common::card_set("Base", 4, 4, 10, 20),
    );
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);
    let mut rolls = ScriptedRolls::new(common::forced_rolls(99.0, 50.0));

    let response = sim
        .simulate_from(&PullRequest::new("Base", 1), 9, &mut rolls)
        .unwrap();

    let pack = &response.pulls[0];
    assert_eq!(pack[ANCHOR_SLOT].card_rarity, Rarity::SuperRare);
    assert!(pack[..ANCHOR_SLOT].iter().all(|c| c.card_rarity == Rarity::Common));
    assert_eq!(response.total_ultra_rare_count, 0);
}

#[test]
fn selected_card_fields_are_materialized() {
    let catalog = InMemoryCatalog::new().with_pack(
        PackDefinition::new("base", PackKind::Baseline, "Base"),
        common::card_set("Base", 4, 4, 10, 20),
    );
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);
    let mut rolls = ScriptedRolls::new(vec![0.0, 0.5]).with_picks(vec![3]);

    let response = sim.simulate(&PullRequest::new("Base", 1), &mut rolls).unwrap();
    let card = &response.pulls[0][0];
    assert_eq!(card.card_name, "Base UR 3");
    assert_eq!(card.card_id, "base-UR-3");
    assert_eq!(card.card_img, "https://img.test/Base_UR_3.webp");
    assert_eq!(card.card_foil, Foil::Royal);
}

#[test]
fn pack_position_wraps_instead_of_overflowing() {
    let catalog = InMemoryCatalog::new().with_pack(
        PackDefinition::new("base", PackKind::Baseline, "Base"),
        common::card_set("Base", 4, 4, 10, 20),
    );
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);
    let mut rolls = ScriptedRolls::new(common::forced_rolls(99.0, 50.0));

    let response = sim
        .simulate_from(&PullRequest::new("Base", 2), usize::MAX, &mut rolls)
        .unwrap();

    assert_eq!(response.pulls.len(), 2);
    // Positions usize::MAX and 0 are both outside the pity slot.
    for pack in &response.pulls {
        assert_eq!(pack[ANCHOR_SLOT].card_rarity, Rarity::Rare);
    }
}

// ---------------------------------------------------------------------------
// Pool selection
// ---------------------------------------------------------------------------

#[test]
fn augmented_pack_draws_first_slots_from_baseline() {
    let catalog = common::sample_catalog();
    let response = simulate_seeded(&catalog, SECRET_PACK, 30, 5).unwrap();

    for pack in &response.pulls {
        for (slot, card) in pack.iter().enumerate() {
            let expected = if slot < BASELINE_SLOTS { "Master " } else { "Secret " };
            assert!(
                card.card_name.starts_with(expected),
                "slot {slot}: {}",
                card.card_name
            );
        }
    }
}

#[test]
fn curated_and_baseline_packs_draw_only_from_own_pool() {
    let catalog = common::sample_catalog();

    let curated = simulate_seeded(&catalog, SELECTION_PACK, 20, 11).unwrap();
    assert!(curated
        .pulls
        .iter()
        .flatten()
        .all(|c| c.card_name.starts_with("Selection ")));

    let baseline = simulate_seeded(&catalog, MASTER_PACK, 20, 11).unwrap();
    assert!(baseline
        .pulls
        .iter()
        .flatten()
        .all(|c| c.card_name.starts_with("Master ")));
}

#[test]
fn only_augmented_packs_fetch_the_baseline_pool() {
    let catalog = CountingCatalog::new(common::sample_catalog());
    simulate_seeded(&catalog, SELECTION_PACK, 1, 1).unwrap();
    assert_eq!(catalog.card_calls.get(), 1);

    simulate_seeded(&catalog, SECRET_PACK, 1, 1).unwrap();
    assert_eq!(catalog.card_calls.get(), 3);
}

#[test]
fn response_has_eight_cards_per_pack_and_counts_ultra_rares() {
    let catalog = common::sample_catalog();
    let response = simulate_seeded(&catalog, SECRET_PACK, 25, 2024).unwrap();

    assert_eq!(response.pulls.len(), 25);
    assert!(response.pulls.iter().all(|p| p.len() == SLOTS_PER_PACK));

    let urs = response
        .pulls
        .iter()
        .flatten()
        .filter(|c| c.card_rarity == Rarity::UltraRare)
        .count();
    assert_eq!(response.total_ultra_rare_count, urs);
}

#[test]
fn pity_packs_in_a_long_session() {
    let catalog = common::sample_catalog();
    let response = simulate_seeded(&catalog, SELECTION_PACK, 40, 77).unwrap();

    for (i, pack) in response.pulls.iter().enumerate() {
        let anchor = pack[ANCHOR_SLOT].card_rarity;
        assert_ne!(anchor, Rarity::Common);
        if is_pity_pack(i) {
            assert!(anchor >= Rarity::SuperRare, "pack {i} anchor {anchor}");
        }
    }
}

#[test]
fn same_seed_gives_identical_output() {
    let catalog = common::sample_catalog();
    let a = simulate_seeded(&catalog, SECRET_PACK, 15, 31337).unwrap();
    let b = simulate_seeded(&catalog, SECRET_PACK, 15, 31337).unwrap();
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );

    let c = simulate_seeded(&catalog, SECRET_PACK, 15, 31338).unwrap();
    assert_ne!(a, c);
}

#[test]
fn pools_are_built_with_fixups() {
    let catalog = common::sample_catalog();
    let fixups = FixupTable::empty()
        .with_pack_fixup(SELECTION_PACK, md_pull_sdk::Fixup::add_if_absent("Injected", Rarity::UltraRare));
    let sim = PullSimulator::new(&catalog, &fixups);

    let (pack, pools) = sim.pools_for(SELECTION_PACK).unwrap();
    assert_eq!(pack.kind, PackKind::Curated);
    assert!(pools.target.contains("Injected"));
    assert!(pools.baseline.is_none());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_pack_fails_without_fetching_cards() {
    let catalog = CountingCatalog::new(common::sample_catalog());
    let err = simulate_seeded(&catalog, "No Such Pack", 1, 0).unwrap_err();

    assert!(matches!(err, PullError::PackNotFound(ref name) if name == "No Such Pack"));
    assert!(err.is_client_error());
    assert_eq!(catalog.pack_calls.get(), 1);
    assert_eq!(catalog.card_calls.get(), 0);
}

#[test]
fn augmented_pack_without_baseline_fails() {
    let catalog = InMemoryCatalog::new().with_pack(
        PackDefinition::new("sp", PackKind::Augmented, "Lonely Secret"),
        common::card_set("Secret", 4, 4, 4, 4),
    );
    let err = simulate_seeded(&catalog, "Lonely Secret", 1, 0).unwrap_err();
    assert!(matches!(err, PullError::BaselinePackNotFound));
}

#[test]
fn zero_packs_is_invalid() {
    let catalog = common::sample_catalog();
    let err = simulate_seeded(&catalog, SECRET_PACK, 0, 0).unwrap_err();
    assert!(matches!(err, PullError::InvalidArgument(_)));
}

#[test]
fn empty_bucket_aborts_with_pool_exhausted() {
    let catalog = InMemoryCatalog::new().with_pack(
        PackDefinition::new("sel", PackKind::Curated, "No Commons"),
        common::card_set("NC", 2, 2, 2, 0),
    );
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);
    let mut rolls = ScriptedRolls::new(common::forced_rolls(99.0, 50.0));

    let err = sim
        .simulate(&PullRequest::new("No Commons", 3), &mut rolls)
        .unwrap_err();
    assert!(matches!(err, PullError::PoolExhausted(Rarity::Common)));
    assert!(!err.is_client_error());
}

#[test]
fn empty_baseline_bucket_aborts_augmented_pack() {
    let catalog = InMemoryCatalog::new()
        .with_pack(
            PackDefinition::new("mp", PackKind::Baseline, MASTER_PACK),
            common::card_set("Master", 0, 1, 1, 1),
        )
        .with_pack(
            PackDefinition::new("sp", PackKind::Augmented, SECRET_PACK),
            common::card_set("Secret", 2, 2, 2, 2),
        );
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);
    let mut rolls = ScriptedRolls::new(common::forced_rolls(0.0, 50.0));

    let err = sim
        .simulate(&PullRequest::new(SECRET_PACK, 1), &mut rolls)
        .unwrap_err();
    assert!(matches!(err, PullError::PoolExhausted(Rarity::UltraRare)));
}

#[test]
fn catalog_failure_is_catalog_unavailable() {
    let catalog = FlakyCatalog {
        packs: vec![PackDefinition::new("sel", PackKind::Curated, SELECTION_PACK)],
    };
    let err = simulate_seeded(&catalog, SELECTION_PACK, 1, 0).unwrap_err();
    assert!(matches!(err, PullError::CatalogUnavailable(_)));
}

#[test]
fn empty_card_list_is_valid_until_a_card_is_needed() {
    let catalog = InMemoryCatalog::new()
        .with_pack(PackDefinition::new("new", PackKind::Curated, "Upcoming"), Vec::new());
    let fixups = FixupTable::empty();
    let sim = PullSimulator::new(&catalog, &fixups);

    let (_, pools) = sim.pools_for("Upcoming").unwrap();
    assert!(pools.target.is_empty());

    let mut rng = StdRng::seed_from_u64(3);
    let err = sim
        .simulate(&PullRequest::new("Upcoming", 1), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PullError::PoolExhausted(_)));
}
