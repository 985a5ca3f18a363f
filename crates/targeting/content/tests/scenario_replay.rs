//! Replays the bundled arena through the finder with file-backed settings.

use std::path::PathBuf;

use targeting_content::{ConfigLoader, FileConfigStore, Scenario, ScenarioLoader};
use targeting_core::{
    DistanceRange, EnemyConfig, EnemyOption, EntityId, SharedEnemyConfig, TargetEnv,
    find_nearest_enemy, rank_enemies,
};

fn arena() -> Scenario {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/arena.ron");
    ScenarioLoader::load(&path).expect("bundled arena parses")
}

fn nearest(scenario: &Scenario, range: f64, config: EnemyConfig) -> Option<(EntityId, f64)> {
    let bots = scenario.bot_registry();
    let teams = scenario.team_roster();
    let env = TargetEnv::with_all(&scenario.friends, &teams, &bots);

    find_nearest_enemy(
        &scenario.entities,
        scenario.viewer().as_ref(),
        DistanceRange::up_to(range).unwrap(),
        config,
        env,
    )
    .unwrap()
    .map(|candidate| (candidate.entity.id, candidate.distance))
}

#[test]
fn default_settings_skip_friend_bot_and_animal() {
    let (id, distance) = nearest(&arena(), 8.0, EnemyConfig::default()).unwrap();

    assert_eq!(id, EntityId(3));
    assert!((distance - 4.2).abs() < 1e-9);
}

#[test]
fn range_excludes_everything_past_upper_bound() {
    assert_eq!(nearest(&arena(), 4.0, EnemyConfig::default()), None);
}

#[test]
fn allowing_friends_targets_buddy() {
    let config = EnemyConfig::default().with(EnemyOption::Friends, true);
    let (id, distance) = nearest(&arena(), 8.0, config).unwrap();

    assert_eq!(id, EntityId(2));
    assert!((distance - 7.78f64.sqrt()).abs() < 1e-9);
}

#[test]
fn animals_rank_first_when_enabled() {
    let scenario = arena();
    let bots = scenario.bot_registry();
    let teams = scenario.team_roster();
    let env = TargetEnv::with_all(&scenario.friends, &teams, &bots);
    let config = EnemyConfig::default().with(EnemyOption::Animals, true);

    let ranked: Vec<_> = rank_enemies(
        &scenario.entities,
        scenario.viewer().as_ref(),
        DistanceRange::up_to(8.0).unwrap(),
        config,
        env,
    )
    .unwrap()
    .into_iter()
    .map(|candidate| candidate.entity.id)
    .collect();

    assert_eq!(ranked, vec![EntityId(4), EntityId(3), EntityId(1)]);
}

#[test]
fn saved_settings_drive_the_next_replay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/enemies.toml");

    let shared = SharedEnemyConfig::default();
    let mut store = FileConfigStore::new(&path);
    shared.register_with(&mut store);
    shared.toggle(EnemyOption::Mobs);
    shared.toggle(EnemyOption::Friends);
    store.save().unwrap();

    // A fresh session picks the file up through either entry point.
    let restored = SharedEnemyConfig::default();
    let mut next = FileConfigStore::new(&path);
    restored.register_with(&mut next);
    next.load().unwrap();
    assert_eq!(restored.snapshot(), shared.snapshot());
    assert_eq!(ConfigLoader::load(&path).unwrap(), shared.snapshot());

    let (id, _) = nearest(&arena(), 8.0, restored.snapshot()).unwrap();
    assert_eq!(id, EntityId(2));
}
