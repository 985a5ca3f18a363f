//! The enemy classifier.
//!
//! One rule chain serves two policies:
//! - **shown**: visual highlighting, friends and teammates stay marked
//! - **attacked**: attack eligibility, friends and teammates are exempt
//!   unless the settings opt in
//!
//! The bot check applies in both modes, so detected bots are hidden from
//! highlighting as well.

use crate::config::EnemyConfig;
use crate::entity::{EntityId, EntityKind, EntityView};
use crate::oracle::TargetEnv;

/// Decides whether an entity counts as an enemy under one settings snapshot.
#[derive(Clone, Copy, Debug)]
pub struct EnemyPredicate<'a> {
    config: EnemyConfig,
    env: TargetEnv<'a>,
    viewer: Option<EntityId>,
}

impl<'a> EnemyPredicate<'a> {
    pub fn new(config: EnemyConfig, env: TargetEnv<'a>) -> Self {
        Self {
            config,
            env,
            viewer: None,
        }
    }

    /// Sets the local player; it is never its own enemy.
    #[must_use]
    pub fn with_viewer(mut self, viewer: EntityId) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn config(&self) -> EnemyConfig {
        self.config
    }

    /// Runs the rule chain.
    ///
    /// `attackable` selects the stricter attack policy which additionally
    /// exempts friends and teammates. Cheap state checks run first; the
    /// collaborator lookups only run for entities that survive them.
    pub fn is_targeted(&self, entity: &EntityView, attackable: bool) -> bool {
        let config = &self.config;

        if !entity.kind.is_living() {
            return false;
        }
        if !config.dead() && !entity.alive {
            return false;
        }
        if !config.invisible() && entity.invisible {
            return false;
        }
        if attackable && !config.teammates() && self.env.is_on_viewer_team(entity) {
            tracing::trace!("{entity} skipped: teammate");
            return false;
        }

        match &entity.kind {
            EntityKind::Player(profile) if Some(entity.id) != self.viewer => {
                if attackable && !config.friends() && self.env.is_friend(&profile.name) {
                    tracing::trace!("{entity} skipped: friend");
                    return false;
                }
                if self.env.is_bot(entity) {
                    tracing::trace!("{entity} skipped: flagged as bot");
                    return false;
                }
                config.players()
            }
            // The viewer itself.
            EntityKind::Player(_) => false,
            EntityKind::PassiveCreature => config.animals(),
            EntityKind::HostileCreature => config.hostile_mobs(),
            EntityKind::Other => false,
        }
    }

    /// Display policy: should the entity be highlighted?
    pub fn should_be_shown(&self, entity: &EntityView) -> bool {
        self.is_targeted(entity, false)
    }

    /// Attack policy: may the entity be attacked?
    pub fn should_be_attacked(&self, entity: &EntityView) -> bool {
        self.is_targeted(entity, true)
    }
}

/// One-shot [`EnemyPredicate::should_be_shown`].
pub fn should_be_shown(
    entity: &EntityView,
    config: EnemyConfig,
    env: TargetEnv<'_>,
    viewer: Option<EntityId>,
) -> bool {
    predicate_for(config, env, viewer).should_be_shown(entity)
}

/// One-shot [`EnemyPredicate::should_be_attacked`].
pub fn should_be_attacked(
    entity: &EntityView,
    config: EnemyConfig,
    env: TargetEnv<'_>,
    viewer: Option<EntityId>,
) -> bool {
    predicate_for(config, env, viewer).should_be_attacked(entity)
}

fn predicate_for(
    config: EnemyConfig,
    env: TargetEnv<'_>,
    viewer: Option<EntityId>,
) -> EnemyPredicate<'_> {
    let predicate = EnemyPredicate::new(config, env);
    match viewer {
        Some(id) => predicate.with_viewer(id),
        None => predicate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyOption;
    use crate::geometry::Vec3;
    use crate::oracle::{BotRegistry, FriendRegistry, TeamRoster};

    const VIEWER: EntityId = EntityId(0);

    fn player(id: u32, name: &str) -> EntityView {
        EntityView::new(EntityId(id), EntityKind::player(name), Vec3::new(3.0, 0.0, 0.0))
    }

    fn creature(id: u32, kind: EntityKind) -> EntityView {
        EntityView::new(EntityId(id), kind, Vec3::new(0.0, 0.0, 3.0))
    }

    fn players_only() -> EnemyConfig {
        EnemyConfig::none().with(EnemyOption::Players, true)
    }

    #[test]
    fn players_only_config_accepts_live_visible_players() {
        let predicate = EnemyPredicate::new(players_only(), TargetEnv::empty()).with_viewer(VIEWER);

        assert!(predicate.should_be_shown(&player(1, "Steve")));
        assert!(predicate.should_be_attacked(&player(1, "Steve")));
        assert!(!predicate.should_be_attacked(&creature(2, EntityKind::HostileCreature)));
        assert!(!predicate.should_be_attacked(&creature(3, EntityKind::PassiveCreature)));
    }

    #[test]
    fn bots_are_rejected_in_both_modes() {
        let bots: BotRegistry = [EntityId(1)].into_iter().collect();
        let env = TargetEnv::empty().with_anti_bot(&bots);
        let predicate = EnemyPredicate::new(players_only(), env).with_viewer(VIEWER);

        assert!(!predicate.should_be_shown(&player(1, "npc")));
        assert!(!predicate.should_be_attacked(&player(1, "npc")));
        assert!(predicate.should_be_attacked(&player(2, "real")));
    }

    #[test]
    fn viewer_is_never_an_enemy() {
        let config = EnemyConfig::default()
            .with(EnemyOption::Friends, true)
            .with(EnemyOption::TeamMates, true);
        let predicate = EnemyPredicate::new(config, TargetEnv::empty()).with_viewer(EntityId(1));

        assert!(!predicate.should_be_shown(&player(1, "me")));
        assert!(!predicate.should_be_attacked(&player(1, "me")));
    }

    #[test]
    fn dead_entities_need_dead_switch() {
        let config = EnemyConfig::default();
        let corpse = creature(4, EntityKind::HostileCreature).dead();

        assert!(!EnemyPredicate::new(config, TargetEnv::empty()).should_be_shown(&corpse));
        assert!(
            EnemyPredicate::new(config.with(EnemyOption::Dead, true), TargetEnv::empty())
                .should_be_shown(&corpse)
        );
    }

    #[test]
    fn invisible_entities_need_invisible_switch() {
        let config = EnemyConfig::default().with(EnemyOption::Invisible, false);
        let ghost = creature(5, EntityKind::HostileCreature).invisible();

        assert!(!EnemyPredicate::new(config, TargetEnv::empty()).should_be_attacked(&ghost));
        assert!(
            EnemyPredicate::new(config.with(EnemyOption::Invisible, true), TargetEnv::empty())
                .should_be_attacked(&ghost)
        );
    }

    #[test]
    fn non_living_kinds_are_rejected_with_every_switch_on() {
        let everything = EnemyConfig::from_flags(crate::config::EnemyFlags::all());
        let predicate = EnemyPredicate::new(everything, TargetEnv::empty());

        assert!(!predicate.should_be_shown(&creature(6, EntityKind::Other)));
    }

    #[test]
    fn teammates_exempt_only_when_attacking() {
        let roster = TeamRoster::new(Some("red".into()));
        let env = TargetEnv::empty().with_teams(&roster);
        let mate = player(7, "mate").with_team("red");
        let mob_mate = creature(8, EntityKind::HostileCreature).with_team("red");

        let strict = EnemyPredicate::new(EnemyConfig::default(), env).with_viewer(VIEWER);
        assert!(!strict.should_be_attacked(&mate));
        assert!(!strict.should_be_attacked(&mob_mate));
        assert!(strict.should_be_shown(&mate));

        let lenient = EnemyPredicate::new(EnemyConfig::default().with(EnemyOption::TeamMates, true), env)
            .with_viewer(VIEWER);
        assert!(lenient.should_be_attacked(&mate));
    }

    #[test]
    fn teammates_never_attackable_whatever_else_is_enabled() {
        use crate::config::EnemyFlags;

        let roster = TeamRoster::new(Some("red".into()));
        let env = TargetEnv::empty().with_teams(&roster);
        let mates = [
            player(7, "mate").with_team("red"),
            creature(8, EntityKind::HostileCreature).with_team("red"),
            creature(9, EntityKind::PassiveCreature).with_team("red"),
            player(10, "ghost").with_team("red").invisible().dead(),
        ];
        let configs = [
            EnemyConfig::from_flags(EnemyFlags::all() - EnemyFlags::TEAMMATES),
            players_only(),
            EnemyConfig::default(),
        ];

        for config in configs {
            let predicate = EnemyPredicate::new(config, env).with_viewer(VIEWER);
            for mate in &mates {
                assert!(!predicate.should_be_attacked(mate), "{mate} attackable under {config:?}");
            }
        }
    }

    #[test]
    fn friends_exempt_only_when_attacking() {
        let friends: FriendRegistry = ["Buddy"].into_iter().collect();
        let env = TargetEnv::empty().with_friends(&friends);
        let buddy = player(9, "Buddy");

        let strict = EnemyPredicate::new(EnemyConfig::default(), env).with_viewer(VIEWER);
        assert!(!strict.should_be_attacked(&buddy));
        assert!(strict.should_be_shown(&buddy));

        let lenient = EnemyPredicate::new(EnemyConfig::default().with(EnemyOption::Friends, true), env)
            .with_viewer(VIEWER);
        assert!(lenient.should_be_attacked(&buddy));
    }

    #[test]
    fn creature_switches_are_independent() {
        let animals = EnemyConfig::none().with(EnemyOption::Animals, true);
        let predicate = EnemyPredicate::new(animals, TargetEnv::empty());

        assert!(predicate.should_be_attacked(&creature(10, EntityKind::PassiveCreature)));
        assert!(!predicate.should_be_attacked(&creature(11, EntityKind::HostileCreature)));
        assert!(!predicate.should_be_attacked(&player(12, "p")));
    }

    #[test]
    fn free_helpers_match_predicate() {
        let friends: FriendRegistry = ["Buddy"].into_iter().collect();
        let env = TargetEnv::empty().with_friends(&friends);
        let buddy = player(9, "Buddy");

        assert!(should_be_shown(&buddy, EnemyConfig::default(), env, Some(VIEWER)));
        assert!(!should_be_attacked(&buddy, EnemyConfig::default(), env, Some(VIEWER)));
        assert!(!should_be_shown(&buddy, EnemyConfig::default(), env, Some(EntityId(9))));
    }
}
