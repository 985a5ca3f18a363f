//! Run the nearest-enemy search over a recorded scenario.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use serde::Serialize;
use targeting_content::{Scenario, ScenarioLoader};
use targeting_core::{
    DistanceRange, EnemyConfig, EnemyOption, EnemyPredicate, EntityId, TargetCandidate,
    TargetEnv, TargetingError, Vec3, find_nearest_enemy, interpolate_position, rank_enemies,
};

use super::Settings;
use crate::config::CliConfig;

/// Find enemies in a recorded scenario
#[derive(Parser)]
pub struct Scan {
    /// Scenario file (RON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Upper bound of the search distance, inclusive
    #[arg(short, long, default_value_t = 6.0)]
    range: f64,

    /// Lower bound of the search distance, exclusive
    #[arg(long, default_value_t = 0.0)]
    min: f64,

    /// Enable an option for this scan only (repeatable)
    #[arg(short, long, value_name = "OPTION", value_parser = parse_option)]
    enable: Vec<EnemyOption>,

    /// Disable an option for this scan only (repeatable)
    #[arg(short, long, value_name = "OPTION", value_parser = parse_option)]
    disable: Vec<EnemyOption>,

    /// Partial tick used to report render positions (0 = last rendered, 1 = current)
    #[arg(long, default_value_t = 1.0)]
    tick_delta: f32,

    /// Also show the display/attack verdict for every entity
    #[arg(short, long)]
    all: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ScanReport {
    range: String,
    target: Option<Hit>,
    candidates: Vec<Hit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entities: Vec<Verdict>,
}

#[derive(Serialize)]
struct Hit {
    id: EntityId,
    label: String,
    distance: f64,
    render_position: Vec3,
}

#[derive(Serialize)]
struct Verdict {
    id: EntityId,
    label: String,
    shown: bool,
    attackable: bool,
}

impl Scan {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = Settings::open(config)?;
        let enemies = self.effective_config(settings.enemies.snapshot());
        let range = DistanceRange::new(self.min, self.range)?;

        let scenario = ScenarioLoader::load(&self.scenario)?;
        let report = self.build_report(&scenario, range, enemies)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }

    fn effective_config(&self, base: EnemyConfig) -> EnemyConfig {
        let enabled = self
            .enable
            .iter()
            .fold(base, |config, &option| config.with(option, true));
        self.disable
            .iter()
            .fold(enabled, |config, &option| config.with(option, false))
    }

    fn build_report(
        &self,
        scenario: &Scenario,
        range: DistanceRange,
        enemies: EnemyConfig,
    ) -> Result<ScanReport> {
        let bots = scenario.bot_registry();
        let teams = scenario.team_roster();
        let env = TargetEnv::with_all(&scenario.friends, &teams, &bots);
        let viewer = scenario.viewer();

        let no_viewer = |e: TargetingError| {
            anyhow::anyhow!(e).context(format!(
                "{} does not name a viewer entity",
                self.scenario.display()
            ))
        };

        let target = find_nearest_enemy(&scenario.entities, viewer.as_ref(), range, enemies, env)
            .map_err(no_viewer)?;
        let candidates = rank_enemies(&scenario.entities, viewer.as_ref(), range, enemies, env)
            .map_err(no_viewer)?;

        let entities = match (&viewer, self.all) {
            (Some(viewer), true) => {
                let predicate = EnemyPredicate::new(enemies, env).with_viewer(viewer.id);
                scenario
                    .entities
                    .iter()
                    .map(|entity| Verdict {
                        id: entity.id,
                        label: entity.to_string(),
                        shown: predicate.should_be_shown(entity),
                        attackable: predicate.should_be_attacked(entity),
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Ok(ScanReport {
            range: range.to_string(),
            target: target.map(|candidate| self.hit(&candidate)),
            candidates: candidates.iter().map(|candidate| self.hit(candidate)).collect(),
            entities,
        })
    }

    fn hit(&self, candidate: &TargetCandidate<'_>) -> Hit {
        Hit {
            id: candidate.entity.id,
            label: candidate.entity.to_string(),
            distance: candidate.distance,
            render_position: interpolate_position(candidate.entity, self.tick_delta),
        }
    }
}

fn print_report(report: &ScanReport) {
    println!("{} {}", style("Search range:").bold().cyan(), report.range);

    match &report.target {
        Some(hit) => println!(
            "{} {} at {:.3} (render {})",
            style("Target:").bold().cyan(),
            style(&hit.label).bold().red(),
            hit.distance,
            hit.render_position
        ),
        None => println!("{} {}", style("Target:").bold().cyan(), style("none").dim()),
    }

    if !report.candidates.is_empty() {
        println!();
        println!("{}", style("Candidates:").bold().yellow());
        for hit in &report.candidates {
            println!("  {:>8.3}  {}", hit.distance, hit.label);
        }
    }

    if !report.entities.is_empty() {
        println!();
        println!("{}", style("Entities:").bold().yellow());
        for verdict in &report.entities {
            println!(
                "  {:<28} shown={:<5} attack={}",
                verdict.label, verdict.shown, verdict.attackable
            );
        }
    }
}

fn parse_option(name: &str) -> Result<EnemyOption, TargetingError> {
    EnemyOption::parse(name)
}
