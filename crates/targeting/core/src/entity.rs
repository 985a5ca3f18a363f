//! Read-only entity views handed in by the host each tick.
//!
//! The host engine owns the real entities. Adapters copy the handful of
//! fields targeting needs into an [`EntityView`] so the core never touches
//! engine types and never holds references across ticks.

use core::fmt;

use crate::geometry::{BoundingBox, Vec3};
use crate::movement::Rotation;

/// Host-assigned identifier, unique within one world snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a player as shown in the tab list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    /// Account name; the friend list is keyed by it.
    pub name: String,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What sort of thing an entity is, as far as targeting cares.
///
/// Matched exhaustively by the predicate; new kinds must pick a rule.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// Another (or the local) player.
    Player(PlayerProfile),
    /// Animals such as cows and pigs.
    PassiveCreature,
    /// Monsters such as zombies and skeletons.
    HostileCreature,
    /// Items, projectiles, vehicles, decorations.
    #[default]
    Other,
}

impl EntityKind {
    pub fn player(name: impl Into<String>) -> Self {
        Self::Player(PlayerProfile::new(name))
    }

    /// Living kinds are the only ones that can ever be enemies.
    pub const fn is_living(&self) -> bool {
        !matches!(self, Self::Other)
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        match self {
            Self::Player(profile) => Some(profile),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Player(_) => "player",
            Self::PassiveCreature => "animal",
            Self::HostileCreature => "mob",
            Self::Other => "other",
        }
    }
}

/// Snapshot of one entity for the duration of a single query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub alive: bool,
    pub invisible: bool,
    /// Holding up a shield or sword block.
    pub blocking: bool,
    /// Feet position at the current simulation step.
    pub position: Vec3,
    /// Position the entity was last rendered at; lags `position` by one step.
    pub previous_position: Vec3,
    /// Height of the eyes above the feet.
    pub eye_height: f64,
    pub bounding_box: BoundingBox,
    /// Extra padding applied to the box before measuring distances.
    pub targeting_margin: f64,
    pub rotation: Rotation,
    /// Scoreboard team tag, if any.
    pub team: Option<String>,
}

impl EntityView {
    /// Player-sized standing entity at `position`.
    pub fn new(id: EntityId, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            previous_position: position,
            bounding_box: BoundingBox::around_feet(position, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            ..Self::default()
        }
    }

    pub const DEFAULT_WIDTH: f64 = 0.6;
    pub const DEFAULT_HEIGHT: f64 = 1.8;
    pub const DEFAULT_EYE_HEIGHT: f64 = 1.62;

    #[must_use]
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.targeting_margin = margin;
        self
    }

    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    #[must_use]
    pub fn with_eye_height(mut self, eye_height: f64) -> Self {
        self.eye_height = eye_height;
        self
    }

    #[must_use]
    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    #[must_use]
    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::UP * self.eye_height
    }

    /// Bounding box padded by the targeting margin.
    pub fn targeting_box(&self) -> BoundingBox {
        self.bounding_box.expand(self.targeting_margin)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn name(&self) -> Option<&str> {
        self.kind.profile().map(|profile| profile.name.as_str())
    }
}

impl Default for EntityView {
    fn default() -> Self {
        Self {
            id: EntityId(0),
            kind: EntityKind::Other,
            alive: true,
            invisible: false,
            blocking: false,
            position: Vec3::ZERO,
            previous_position: Vec3::ZERO,
            eye_height: Self::DEFAULT_EYE_HEIGHT,
            bounding_box: BoundingBox::around_feet(Vec3::ZERO, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            targeting_margin: 0.0,
            rotation: Rotation::default(),
            team: None,
        }
    }
}

impl fmt::Display for EntityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}{} ({})", self.kind.label(), self.id, name),
            None => write!(f, "{}{}", self.kind.label(), self.id),
        }
    }
}

/// The local player, from whose eyes every distance is measured.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewer {
    pub id: EntityId,
    pub eye_position: Vec3,
    pub team: Option<String>,
}

impl Viewer {
    pub fn new(id: EntityId, eye_position: Vec3) -> Self {
        Self {
            id,
            eye_position,
            team: None,
        }
    }

    pub fn from_entity(entity: &EntityView) -> Self {
        Self {
            id: entity.id,
            eye_position: entity.eye_position(),
            team: entity.team.clone(),
        }
    }
}
