/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ConfigError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub car: CarConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    pub n_floors: u8,
    pub n_cars: usize,
    pub capacity: usize,
}

impl Default for BuildingConfig {
    fn default() -> BuildingConfig {
        BuildingConfig {
            n_floors: 10,
            n_cars: 7,
            capacity: 5,
        }
    }
}

/**
 * Timing of a single car, counted in simulation ticks.
 *
 * # Fields
 * - `door_open_ticks`:     Ticks the doors stay open at a served floor.
 * - `dwell_ticks`:         Ticks an idle car waits at a terminus before patrolling to the other one.
 * - `ticks_per_floor`:     Ticks needed to travel one floor.
 */
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CarConfig {
    pub door_open_ticks: u32,
    pub dwell_ticks: u32,
    pub ticks_per_floor: u32,
}

impl Default for CarConfig {
    fn default() -> CarConfig {
        CarConfig {
            door_open_ticks: 3,
            dwell_ticks: 5,
            ticks_per_floor: 1,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(config_str)?)
}

/***************************************/
/*             Unit tests              */
/***************************************/
