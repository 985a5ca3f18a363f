//! Collaborator interfaces the host provides.
//!
//! Friend lists, team detection and bot detection live outside this crate.
//! The core reaches them only through the narrow traits below, bundled per
//! query in a [`TargetEnv`]. Implementations must be total: when they cannot
//! answer (a backing service is down, data not loaded yet) they return
//! `false` instead of failing, so a tick never blocks on them.
mod memory;

pub use memory::{BotRegistry, FriendRegistry, TeamRoster, WorldSnapshot};

use crate::config::ConfigRoot;
use crate::entity::{EntityView, Viewer};

/// Client-side friend list.
pub trait FriendList: Send + Sync {
    fn is_friend(&self, name: &str) -> bool;
}

/// Team membership relative to the local player.
pub trait TeamService: Send + Sync {
    fn is_on_viewer_team(&self, entity: &EntityView) -> bool;
}

/// Detects server-side fake players (anti-cheat bots, NPCs posing as players).
pub trait AntiBotClassifier: Send + Sync {
    fn is_bot(&self, entity: &EntityView) -> bool;
}

/// Persistence and UI registry for settings roots.
pub trait ConfigStore {
    fn register_root(&mut self, root: ConfigRoot);
}

/// Live entity list of the current world.
///
/// The returned views are only valid for the query in progress.
pub trait WorldOracle {
    fn current_entities(&self) -> Vec<EntityView>;
}

/// Accessor for the local player.
pub trait ViewerOracle {
    /// `None` while the local player is not spawned.
    fn viewer(&self) -> Option<Viewer>;
}

/// Collaborators consulted by one predicate evaluation.
///
/// Each collaborator is optional. A missing one answers `false`, meaning
/// "not a friend", "not a teammate", "not a bot".
#[derive(Clone, Copy, Default)]
pub struct TargetEnv<'a> {
    friends: Option<&'a dyn FriendList>,
    teams: Option<&'a dyn TeamService>,
    anti_bot: Option<&'a dyn AntiBotClassifier>,
}

impl<'a> TargetEnv<'a> {
    pub fn new(
        friends: Option<&'a dyn FriendList>,
        teams: Option<&'a dyn TeamService>,
        anti_bot: Option<&'a dyn AntiBotClassifier>,
    ) -> Self {
        Self {
            friends,
            teams,
            anti_bot,
        }
    }

    pub fn with_all(
        friends: &'a dyn FriendList,
        teams: &'a dyn TeamService,
        anti_bot: &'a dyn AntiBotClassifier,
    ) -> Self {
        Self::new(Some(friends), Some(teams), Some(anti_bot))
    }

    /// Environment with no collaborators: nobody is a friend, teammate or bot.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_friends(mut self, friends: &'a dyn FriendList) -> Self {
        self.friends = Some(friends);
        self
    }

    #[must_use]
    pub fn with_teams(mut self, teams: &'a dyn TeamService) -> Self {
        self.teams = Some(teams);
        self
    }

    #[must_use]
    pub fn with_anti_bot(mut self, anti_bot: &'a dyn AntiBotClassifier) -> Self {
        self.anti_bot = Some(anti_bot);
        self
    }

    pub fn is_friend(&self, name: &str) -> bool {
        match self.friends {
            Some(friends) => friends.is_friend(name),
            None => {
                tracing::trace!("no friend list attached, treating {name} as stranger");
                false
            }
        }
    }

    pub fn is_on_viewer_team(&self, entity: &EntityView) -> bool {
        match self.teams {
            Some(teams) => teams.is_on_viewer_team(entity),
            None => {
                tracing::trace!("no team service attached, treating {entity} as opponent");
                false
            }
        }
    }

    pub fn is_bot(&self, entity: &EntityView) -> bool {
        match self.anti_bot {
            Some(anti_bot) => anti_bot.is_bot(entity),
            None => {
                tracing::trace!("no anti-bot classifier attached, treating {entity} as real");
                false
            }
        }
    }
}

impl core::fmt::Debug for TargetEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TargetEnv")
            .field("friends", &self.friends.is_some())
            .field("teams", &self.teams.is_some())
            .field("anti_bot", &self.anti_bot.is_some())
            .finish()
    }
}
