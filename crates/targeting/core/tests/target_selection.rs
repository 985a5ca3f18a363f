//! End-to-end target selection against a small arena.
//!
//! Collaborators are hand-written stand-ins so each test controls exactly
//! what the host would answer.

use std::sync::Mutex;

use targeting_core::{
    AntiBotClassifier, BoundingBox, DistanceRange, EnemyConfig, EnemyOption, EnemyPredicate,
    EntityId, EntityKind, EntityView, FriendList, NearestEnemyFinder, SharedEnemyConfig,
    TargetEnv, TeamService, Vec3, Viewer, WorldSnapshot, find_nearest_enemy,
};

const VIEWER: EntityId = EntityId(0);

/// Friend list whose backing service is down; answers "not a friend".
struct OfflineFriendList;

impl FriendList for OfflineFriendList {
    fn is_friend(&self, _name: &str) -> bool {
        false
    }
}

/// Counts how often the bot classifier is consulted.
#[derive(Default)]
struct CountingAntiBot {
    bots: Vec<EntityId>,
    calls: Mutex<u32>,
}

impl AntiBotClassifier for CountingAntiBot {
    fn is_bot(&self, entity: &EntityView) -> bool {
        *self.calls.lock().unwrap() += 1;
        self.bots.contains(&entity.id)
    }
}

/// Everyone is on the viewer's team.
struct SingleTeam;

impl TeamService for SingleTeam {
    fn is_on_viewer_team(&self, _entity: &EntityView) -> bool {
        true
    }
}

fn standing(id: u32, kind: EntityKind, x: f64, z: f64) -> EntityView {
    EntityView::new(EntityId(id), kind, Vec3::new(x, 64.0, z))
}

fn arena() -> Vec<EntityView> {
    vec![
        standing(0, EntityKind::player("me"), 0.0, 0.0),
        standing(1, EntityKind::player("Rival"), 6.0, 0.0),
        standing(2, EntityKind::HostileCreature, 0.0, 3.0),
        standing(3, EntityKind::PassiveCreature, 1.5, 0.0),
        standing(4, EntityKind::Other, 0.5, 0.5),
        standing(5, EntityKind::HostileCreature, 2.0, 2.0).dead(),
    ]
}

fn viewer(entities: &[EntityView]) -> Viewer {
    Viewer::from_entity(&entities[0])
}

#[test]
fn default_settings_pick_closest_living_mob() {
    let entities = arena();
    let found = find_nearest_enemy(
        &entities,
        Some(&viewer(&entities)),
        DistanceRange::up_to(8.0).unwrap(),
        EnemyConfig::default(),
        TargetEnv::empty(),
    )
    .unwrap()
    .expect("a mob is in range");

    // The animal at 1.5 is ignored by default, the dead mob too.
    assert_eq!(found.entity.id, EntityId(2));
    assert!((found.distance - 2.7).abs() < 1e-9);
}

#[test]
fn enabling_animals_changes_the_pick() {
    let entities = arena();
    let config = EnemyConfig::default().with(EnemyOption::Animals, true);

    let found = find_nearest_enemy(
        &entities,
        Some(&viewer(&entities)),
        DistanceRange::up_to(8.0).unwrap(),
        config,
        TargetEnv::empty(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(found.entity.id, EntityId(3));
}

#[test]
fn unavailable_friend_list_fails_open() {
    let entities = arena();
    let friends = OfflineFriendList;
    let env = TargetEnv::empty().with_friends(&friends);
    let config = EnemyConfig::none().with(EnemyOption::Players, true);

    let found = find_nearest_enemy(
        &entities,
        Some(&viewer(&entities)),
        DistanceRange::up_to(8.0).unwrap(),
        config,
        env,
    )
    .unwrap()
    .unwrap();
    assert_eq!(found.entity.name(), Some("Rival"));
}

#[test]
fn bot_check_runs_after_cheap_filters() {
    let entities = arena();
    let anti_bot = CountingAntiBot {
        bots: vec![EntityId(1)],
        ..CountingAntiBot::default()
    };
    let env = TargetEnv::empty().with_anti_bot(&anti_bot);
    let predicate = EnemyPredicate::new(EnemyConfig::default(), env).with_viewer(VIEWER);

    let shown: Vec<_> = entities
        .iter()
        .filter(|entity| predicate.should_be_shown(entity))
        .map(|entity| entity.id)
        .collect();

    assert_eq!(shown, vec![EntityId(2)]);
    // Only the one non-viewer player reaches the classifier.
    assert_eq!(*anti_bot.calls.lock().unwrap(), 1);
}

#[test]
fn everyone_on_team_means_nothing_to_attack() {
    let entities = arena();
    let teams = SingleTeam;
    let env = TargetEnv::empty().with_teams(&teams);
    let config = EnemyConfig::default().with(EnemyOption::Animals, true);

    let found = find_nearest_enemy(
        &entities,
        Some(&viewer(&entities)),
        DistanceRange::up_to(100.0).unwrap(),
        config,
        env,
    )
    .unwrap();
    assert!(found.is_none());

    let predicate = EnemyPredicate::new(config, env).with_viewer(VIEWER);
    assert!(predicate.should_be_shown(&entities[2]));
}

#[test]
fn margin_pulls_target_into_range() {
    let eye_level = Vec3::new(0.0, 0.0, 0.0);
    let viewer = Viewer::new(VIEWER, eye_level);
    let target = EntityView::new(EntityId(9), EntityKind::HostileCreature, Vec3::new(3.5, 0.0, 0.0))
        .with_bounding_box(BoundingBox::new(Vec3::new(3.5, -1.0, -1.0), Vec3::new(4.5, 1.0, 1.0)));
    let range = DistanceRange::up_to(3.0).unwrap();

    let plain = [target.clone()];
    assert!(
        find_nearest_enemy(&plain, Some(&viewer), range, EnemyConfig::default(), TargetEnv::empty())
            .unwrap()
            .is_none()
    );

    let padded = [target.with_margin(0.5)];
    let found =
        find_nearest_enemy(&padded, Some(&viewer), range, EnemyConfig::default(), TargetEnv::empty())
            .unwrap()
            .unwrap();
    assert_eq!(found.distance, 3.0);
}

#[test]
fn settings_toggled_between_ticks_apply_next_query() {
    let world = WorldSnapshot::new(arena(), Some(VIEWER));
    let finder = NearestEnemyFinder::new(&world, TargetEnv::empty());
    let shared = SharedEnemyConfig::default();
    let range = DistanceRange::up_to(8.0).unwrap();

    let tick = || {
        finder
            .find(range, shared.snapshot())
            .unwrap()
            .map(|(entity, _)| entity.id)
    };

    assert_eq!(tick(), Some(EntityId(2)));
    shared.toggle(EnemyOption::Mobs);
    assert_eq!(tick(), Some(EntityId(1)));
    shared.toggle(EnemyOption::Players);
    assert_eq!(tick(), None);
}
