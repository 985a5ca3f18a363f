//! Nearest-enemy search.
//!
//! Every call scans the full entity list once: filter by the attack policy,
//! measure eye-to-box distance, keep the distance window, take the minimum.
//! Nothing is cached between calls because hosts add and remove entities
//! every tick.

use core::fmt;

use crate::config::EnemyConfig;
use crate::entity::{EntityView, Viewer};
use crate::error::TargetingError;
use crate::geometry::boxed_distance;
use crate::oracle::{TargetEnv, ViewerOracle, WorldOracle};
use crate::predicate::EnemyPredicate;

/// Distance window with an exclusive lower and inclusive upper bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceRange {
    lower: f64,
    upper: f64,
}

impl DistanceRange {
    /// Window `(lower, upper]`.
    ///
    /// `upper` may be infinite. `lower == upper` is accepted and matches
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TargetingError::InvalidRange`] if either bound is NaN or
    /// `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, TargetingError> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(TargetingError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Window `(0, upper]`.
    ///
    /// # Errors
    ///
    /// Same as [`DistanceRange::new`].
    pub fn up_to(upper: f64) -> Result<Self, TargetingError> {
        Self::new(0.0, upper)
    }

    pub const fn lower(&self) -> f64 {
        self.lower
    }

    pub const fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, distance: f64) -> bool {
        distance > self.lower && distance <= self.upper
    }
}

impl fmt::Display for DistanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.lower, self.upper)
    }
}

/// A qualifying enemy and its distance from the viewer's eyes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetCandidate<'e> {
    pub entity: &'e EntityView,
    /// Always `>= 0`.
    pub distance: f64,
}

/// Closest attackable enemy within `range`.
///
/// Returns `Ok(None)` when nothing qualifies. When two candidates are
/// equally close the earlier one in iteration order wins, but callers must
/// not rely on which.
///
/// # Errors
///
/// Returns [`TargetingError::NoViewer`] if `viewer` is `None`.
pub fn find_nearest_enemy<'e, I>(
    entities: I,
    viewer: Option<&Viewer>,
    range: DistanceRange,
    config: EnemyConfig,
    env: TargetEnv<'_>,
) -> Result<Option<TargetCandidate<'e>>, TargetingError>
where
    I: IntoIterator<Item = &'e EntityView>,
{
    let viewer = viewer.ok_or(TargetingError::NoViewer)?;

    let nearest = candidates(entities, viewer, range, config, env).fold(
        None,
        |best: Option<TargetCandidate<'e>>, candidate| match best {
            Some(current) if current.distance <= candidate.distance => Some(current),
            _ => Some(candidate),
        },
    );

    match &nearest {
        Some(candidate) => tracing::debug!(
            "nearest enemy {} at {:.3} within {range}",
            candidate.entity,
            candidate.distance
        ),
        None => tracing::debug!("no enemy within {range}"),
    }

    Ok(nearest)
}

/// Every attackable enemy within `range`, nearest first.
///
/// Equal distances keep their iteration order.
///
/// # Errors
///
/// Returns [`TargetingError::NoViewer`] if `viewer` is `None`.
pub fn rank_enemies<'e, I>(
    entities: I,
    viewer: Option<&Viewer>,
    range: DistanceRange,
    config: EnemyConfig,
    env: TargetEnv<'_>,
) -> Result<Vec<TargetCandidate<'e>>, TargetingError>
where
    I: IntoIterator<Item = &'e EntityView>,
{
    let viewer = viewer.ok_or(TargetingError::NoViewer)?;

    let mut ranked: Vec<_> = candidates(entities, viewer, range, config, env).collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(ranked)
}

fn candidates<'e, 'v, I>(
    entities: I,
    viewer: &'v Viewer,
    range: DistanceRange,
    config: EnemyConfig,
    env: TargetEnv<'v>,
) -> impl Iterator<Item = TargetCandidate<'e>>
where
    I: IntoIterator<Item = &'e EntityView>,
{
    let predicate = EnemyPredicate::new(config, env).with_viewer(viewer.id);
    let eye = viewer.eye_position;

    entities
        .into_iter()
        .filter(move |entity| predicate.should_be_attacked(entity))
        .map(move |entity| TargetCandidate {
            entity,
            distance: boxed_distance(eye, entity),
        })
        .filter(move |candidate| range.contains(candidate.distance))
}

/// Finder bound to a host world.
///
/// Pulls the entity list and the viewer from the host on every call, so it
/// can be kept around for the whole session.
pub struct NearestEnemyFinder<'a, W>
where
    W: WorldOracle + ViewerOracle + ?Sized,
{
    world: &'a W,
    env: TargetEnv<'a>,
}

impl<'a, W> NearestEnemyFinder<'a, W>
where
    W: WorldOracle + ViewerOracle + ?Sized,
{
    pub fn new(world: &'a W, env: TargetEnv<'a>) -> Self {
        Self { world, env }
    }

    /// Nearest enemy within `range`, as an owned copy of its view.
    ///
    /// # Errors
    ///
    /// Returns [`TargetingError::NoViewer`] if the host has no local player.
    pub fn find(
        &self,
        range: DistanceRange,
        config: EnemyConfig,
    ) -> Result<Option<(EntityView, f64)>, TargetingError> {
        let viewer = self.world.viewer().ok_or(TargetingError::NoViewer)?;
        let entities = self.world.current_entities();

        let nearest = find_nearest_enemy(&entities, Some(&viewer), range, config, self.env)?;
        Ok(nearest.map(|candidate| (candidate.entity.clone(), candidate.distance)))
    }
}
