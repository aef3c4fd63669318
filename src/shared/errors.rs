/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::SystemStatus;

/***************************************/
/*               Errors                */
/***************************************/

/// Failures reported by the dispatcher. None of them leave the dispatcher changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidConfig {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("illegal request from floor {origin} to floor {destination}")]
    InvalidRequest { origin: i64, destination: i64 },

    #[error("building is not accepting requests while {0}")]
    NotAccepting(SystemStatus),

    #[error("elevator system is stopping")]
    AlreadyStopping,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list of commands")]
    Unknown(String),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}
