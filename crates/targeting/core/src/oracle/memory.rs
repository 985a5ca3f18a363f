//! In-memory collaborator implementations.
//!
//! Good enough for tools, scenario replays and tests; real hosts usually
//! back these traits with their own services.

use std::collections::{BTreeSet, HashSet};

use super::{AntiBotClassifier, FriendList, TeamService, ViewerOracle, WorldOracle};
use crate::entity::{EntityId, EntityView, Viewer};

/// Friend list keyed by exact player name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FriendRegistry {
    names: BTreeSet<String>,
}

impl FriendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a friend; returns `false` if the name was already present.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Removes a friend; returns `false` if the name was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FriendRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FriendList for FriendRegistry {
    fn is_friend(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Team detection by scoreboard tag.
///
/// An entity is a teammate when it carries the same team tag as the viewer.
/// Without a viewer team nobody is a teammate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamRoster {
    viewer_team: Option<String>,
}

impl TeamRoster {
    pub fn new(viewer_team: Option<String>) -> Self {
        Self { viewer_team }
    }

    pub fn for_viewer(viewer: &Viewer) -> Self {
        Self::new(viewer.team.clone())
    }

    pub fn viewer_team(&self) -> Option<&str> {
        self.viewer_team.as_deref()
    }
}

impl TeamService for TeamRoster {
    fn is_on_viewer_team(&self, entity: &EntityView) -> bool {
        match (&self.viewer_team, &entity.team) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

/// Set of entity ids already flagged as bots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BotRegistry {
    flagged: HashSet<EntityId>,
}

impl BotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(&mut self, id: EntityId) -> bool {
        self.flagged.insert(id)
    }

    pub fn clear(&mut self, id: EntityId) -> bool {
        self.flagged.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }
}

impl FromIterator<EntityId> for BotRegistry {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            flagged: iter.into_iter().collect(),
        }
    }
}

impl AntiBotClassifier for BotRegistry {
    fn is_bot(&self, entity: &EntityView) -> bool {
        self.flagged.contains(&entity.id)
    }
}

/// Frozen world: a fixed entity list and the id of the local player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    entities: Vec<EntityView>,
    viewer: Option<EntityId>,
}

impl WorldSnapshot {
    pub fn new(entities: Vec<EntityView>, viewer: Option<EntityId>) -> Self {
        Self { entities, viewer }
    }

    pub fn entities(&self) -> &[EntityView] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn viewer_entity(&self) -> Option<&EntityView> {
        self.viewer.and_then(|id| self.entity(id))
    }

    pub fn set_viewer(&mut self, viewer: Option<EntityId>) {
        self.viewer = viewer;
    }
}

impl WorldOracle for WorldSnapshot {
    fn current_entities(&self) -> Vec<EntityView> {
        self.entities.clone()
    }
}

impl ViewerOracle for WorldSnapshot {
    fn viewer(&self) -> Option<Viewer> {
        self.viewer_entity().map(Viewer::from_entity)
    }
}
