//! List and change the persisted enemy switches.

use anyhow::Result;
use clap::Parser;
use console::style;
use strum::IntoEnumIterator;
use targeting_core::{EnemyConfig, EnemyOption, TargetingError};

use super::Settings;
use crate::config::CliConfig;

/// Show every option and whether it is enabled
#[derive(Parser, Default)]
pub struct List {
    /// Print the settings as JSON
    #[arg(long)]
    json: bool,
}

/// Turn an option on or off
#[derive(Parser)]
pub struct Set {
    /// Option name (players, mobs, animals, invisible, dead, friends, teammates)
    #[arg(value_name = "OPTION", value_parser = parse_option)]
    option: EnemyOption,

    /// New state (on/off, true/false, yes/no, 1/0)
    #[arg(value_name = "STATE", value_parser = parse_switch, action = clap::ArgAction::Set)]
    enabled: bool,
}

/// Flip an option
#[derive(Parser)]
pub struct Toggle {
    /// Option name
    #[arg(value_name = "OPTION", value_parser = parse_option)]
    option: EnemyOption,
}

/// Restore the default settings
#[derive(Parser)]
pub struct Reset {
    /// Only restore this option
    #[arg(value_name = "OPTION", value_parser = parse_option)]
    option: Option<EnemyOption>,
}

impl List {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = Settings::open(config)?;
        let current = settings.enemies.snapshot();

        if self.json {
            let map: serde_json::Map<String, serde_json::Value> = EnemyOption::iter()
                .map(|option| (option.to_string(), current.get(option).into()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        println!(
            "{} {}",
            style("Enemies").bold().green(),
            style(format!("({})", settings.store.path().display())).dim()
        );
        print_options(&current);
        Ok(())
    }
}

impl Set {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = Settings::open(config)?;
        let updated = settings
            .enemies
            .update(|enemies| enemies.set(self.option, self.enabled));
        settings.save()?;

        print_change(self.option, updated.get(self.option));
        Ok(())
    }
}

impl Toggle {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = Settings::open(config)?;
        let enabled = settings.enemies.toggle(self.option);
        settings.save()?;

        print_change(self.option, enabled);
        Ok(())
    }
}

impl Reset {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = Settings::open(config)?;
        let defaults = EnemyConfig::default();

        match self.option {
            Some(option) => {
                settings
                    .enemies
                    .update(|enemies| enemies.set(option, defaults.get(option)));
                settings.save()?;
                print_change(option, defaults.get(option));
            }
            None => {
                settings.enemies.store(defaults);
                settings.save()?;
                print_options(&defaults);
            }
        }
        Ok(())
    }
}

fn print_options(config: &EnemyConfig) {
    for option in EnemyOption::iter() {
        println!(
            "  {:<10} {:<4} {}",
            option.to_string(),
            state_label(config.get(option)),
            style(option.description()).dim()
        );
    }
}

fn print_change(option: EnemyOption, enabled: bool) {
    println!("{} is now {}", style(option).bold(), state_label(enabled));
}

fn state_label(enabled: bool) -> console::StyledObject<&'static str> {
    if enabled {
        style("on").green()
    } else {
        style("off").red()
    }
}

fn parse_option(name: &str) -> Result<EnemyOption, TargetingError> {
    EnemyOption::parse(name)
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}
