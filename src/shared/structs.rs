/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Floor offset of one step in this direction.
    pub fn step(&self) -> i8 {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Stop => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Stop => write!(f, "Stop"),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Closed,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DoorState::Open => write!(f, "Open"),
            DoorState::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    #[serde(rename = "outOfService")]
    OutOfService,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "stopping")]
    Stopping,
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SystemStatus::OutOfService => write!(f, "Out Of Service"),
            SystemStatus::Running => write!(f, "Running"),
            SystemStatus::Stopping => write!(f, "Stopping"),
        }
    }
}

/**
 * A passenger trip between two floors.
 *
 * Floors are checked against the building when the request is admitted, not here.
 */
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub origin: u8,
    pub destination: u8,
}

impl Request {
    pub fn new(origin: u8, destination: u8) -> Request {
        Request {
            origin,
            destination,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.destination > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
