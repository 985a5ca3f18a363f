//! World scenario loader.
//!
//! A scenario freezes one tick of a world: every entity, which of them is
//! the local player, and the collaborator answers (friends, bots) that
//! applied at the time. The CLI replays scenarios through the finder.
//!
//! ```ron
//! Scenario(
//!     viewer: Some(0),
//!     friends: ["Buddy"],
//!     bots: [7],
//!     entities: [
//!         (id: 0, kind: Player((name: "me")), position: (x: 0.0, y: 64.0, z: 0.0)),
//!         (id: 2, kind: HostileCreature, position: (x: 3.0, y: 64.0, z: 0.0), height: Some(1.95)),
//!     ],
//! )
//! ```

use std::path::Path;

use serde::Deserialize;
use targeting_core::{
    BotRegistry, BoundingBox, EntityId, EntityKind, EntityView, FriendRegistry, Rotation,
    TeamRoster, Vec3, Viewer, WorldSnapshot,
};

use crate::loaders::{LoadResult, read_file};

/// One entity as written in a scenario file.
///
/// Omitted geometry falls back to a player-sized box standing at
/// `position`; an explicit `bounding_box` wins over `width`/`height`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityRecord {
    pub id: EntityId,
    #[serde(default)]
    pub kind: EntityKind,
    pub position: Vec3,
    #[serde(default)]
    pub previous_position: Option<Vec3>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub eye_height: Option<f64>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub margin: f64,
    #[serde(default = "alive_by_default")]
    pub alive: bool,
    #[serde(default)]
    pub invisible: bool,
    #[serde(default)]
    pub blocking: bool,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub team: Option<String>,
}

fn alive_by_default() -> bool {
    true
}

impl EntityRecord {
    pub fn into_view(self) -> EntityView {
        let bounding_box = self.bounding_box.unwrap_or_else(|| {
            BoundingBox::around_feet(
                self.position,
                self.width.unwrap_or(EntityView::DEFAULT_WIDTH),
                self.height.unwrap_or(EntityView::DEFAULT_HEIGHT),
            )
        });

        EntityView {
            id: self.id,
            kind: self.kind,
            alive: self.alive,
            invisible: self.invisible,
            blocking: self.blocking,
            position: self.position,
            previous_position: self.previous_position.unwrap_or(self.position),
            eye_height: self.eye_height.unwrap_or(EntityView::DEFAULT_EYE_HEIGHT),
            bounding_box,
            targeting_margin: self.margin,
            rotation: self.rotation,
            team: self.team,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename = "Scenario", deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    viewer: Option<EntityId>,
    #[serde(default)]
    friends: FriendRegistry,
    #[serde(default)]
    bots: Vec<EntityId>,
    #[serde(default)]
    entities: Vec<EntityRecord>,
}

/// One recorded tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scenario {
    /// Id of the local player among `entities`.
    pub viewer: Option<EntityId>,
    pub friends: FriendRegistry,
    pub bots: Vec<EntityId>,
    pub entities: Vec<EntityView>,
}

impl Scenario {
    pub fn viewer(&self) -> Option<Viewer> {
        let id = self.viewer?;
        self.entities
            .iter()
            .find(|entity| entity.id == id)
            .map(Viewer::from_entity)
    }

    pub fn world(&self) -> WorldSnapshot {
        WorldSnapshot::new(self.entities.clone(), self.viewer)
    }

    pub fn bot_registry(&self) -> BotRegistry {
        self.bots.iter().copied().collect()
    }

    /// Team detection relative to the scenario's viewer.
    pub fn team_roster(&self) -> TeamRoster {
        self.viewer()
            .map(|viewer| TeamRoster::for_viewer(&viewer))
            .unwrap_or_default()
    }

    /// Entities whose box does not surround their feet.
    ///
    /// Usually means the box was recorded in local instead of world space.
    pub fn misplaced_boxes(&self) -> impl Iterator<Item = &EntityView> {
        self.entities
            .iter()
            .filter(|entity| !entity.bounding_box.expand(1.0e-6).contains(entity.position))
    }
}

impl From<ScenarioFile> for Scenario {
    fn from(file: ScenarioFile) -> Self {
        Self {
            viewer: file.viewer,
            friends: file.friends,
            bots: file.bots,
            entities: file.entities.into_iter().map(EntityRecord::into_view).collect(),
        }
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

        tracing::debug!(
            "Loaded scenario {} with {} entities",
            path.display(),
            scenario.entities.len()
        );
        Ok(scenario)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let file: ScenarioFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        let scenario = Scenario::from(file);

        if let Some(id) = scenario.viewer {
            anyhow::ensure!(
                scenario.entities.iter().any(|entity| entity.id == id),
                "scenario viewer {id} is not among its entities"
            );
        }
        for entity in scenario.misplaced_boxes() {
            tracing::warn!("{entity} stands outside its own bounding box");
        }

        Ok(scenario)
    }
}
