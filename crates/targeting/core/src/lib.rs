//! Enemy classification and target acquisition for a hosted game client.
//!
//! `targeting-core` decides which entities of a live world count as enemies
//! and picks the nearest one inside a distance window. It never owns world
//! state: hosts hand in read-only [`EntityView`]s each tick and answer the
//! narrow collaborator queries declared in [`oracle`].
//!
//! The two stable entry points are [`EnemyPredicate`] and
//! [`find_nearest_enemy`]; everything else supports them.
pub mod config;
pub mod entity;
pub mod error;
pub mod finder;
pub mod geometry;
pub mod movement;
pub mod oracle;
pub mod predicate;

pub use config::{ConfigRoot, EnemyConfig, EnemyFlags, EnemyOption, SharedEnemyConfig};
pub use entity::{EntityId, EntityKind, EntityView, PlayerProfile, Viewer};
pub use error::{ClassifiedError, ErrorSeverity, TargetingError};
pub use finder::{
    DistanceRange, NearestEnemyFinder, TargetCandidate, find_nearest_enemy, rank_enemies,
};
pub use geometry::{
    BoundingBox, Vec3, boxed_distance, interpolate_position, nearest_point,
    squared_boxed_distance, would_block_hit,
};
pub use movement::{MovementKeys, Rotation};
pub use oracle::{
    AntiBotClassifier, BotRegistry, ConfigStore, FriendList, FriendRegistry, TargetEnv,
    TeamRoster, TeamService, ViewerOracle, WorldOracle, WorldSnapshot,
};
pub use predicate::{EnemyPredicate, should_be_attacked, should_be_shown};
