/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::CarState;
use crate::shared::{Direction, DoorState, Request, SystemStatus};

const REPORT_WIDTH: usize = 62;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Snapshot of one car. Owns copies of everything it shows.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CarReport {
    pub id: usize,
    pub floor: u8,
    pub direction: Direction,
    pub door: DoorState,
    pub state: CarState,
    #[serde(rename = "floorRequests")]
    pub floor_requests: Vec<bool>,
    #[serde(rename = "doorCountdown")]
    pub door_countdown: u32,
    #[serde(rename = "dwellCountdown")]
    pub dwell_countdown: u32,
    #[serde(rename = "outOfService")]
    pub out_of_service: bool,
    pub accepting: bool,
}

/**
 * Snapshot of the whole building, created fresh for every query.
 *
 * Nothing in here points back into the dispatcher, so mutating a report can never
 * change the simulation.
 *
 * # Fields
 * - `n_floors`:        Number of floors.
 * - `n_cars`:          Number of cars.
 * - `capacity`:        Maximum batch size per car.
 * - `tick`:            Ticks elapsed since construction.
 * - `status`:          Overall system status.
 * - `up_requests`:     Waiting up requests, oldest first.
 * - `down_requests`:   Waiting down requests, oldest first.
 * - `cars`:            One report per car, in fleet order.
 */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    #[serde(rename = "floors")]
    pub n_floors: u8,
    #[serde(rename = "cars")]
    pub n_cars: usize,
    pub capacity: usize,
    pub tick: u64,
    pub status: SystemStatus,
    #[serde(rename = "upRequests")]
    pub up_requests: Vec<Request>,
    #[serde(rename = "downRequests")]
    pub down_requests: Vec<Request>,
    #[serde(rename = "carReports")]
    pub cars: Vec<CarReport>,
}

/***************************************/
/*             Public API              */
/***************************************/
impl StatusReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(REPORT_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "{}",
            centre(&format!(
                "Floors: {}, Elevators: {}, Capacity: {}",
                self.n_floors, self.n_cars, self.capacity
            ))
        )?;
        writeln!(f, "{}", centre(&format!("Elevator System: {}", self.status)))?;
        writeln!(f, "{}", centre(&format!("Tick: {}", self.tick)))?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "*Requests:")?;
        writeln!(f, "Up: {}", join_requests(&self.up_requests))?;
        writeln!(f, "Down: {}", join_requests(&self.down_requests))?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "*Elevator Status:")?;
        for car in &self.cars {
            writeln!(f, "Elevator {}: {}", car.id, car)?;
        }
        Ok(())
    }
}

impl fmt::Display for CarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            CarState::OutOfService => write!(f, "Out of Service[Floor {}]", self.floor),
            CarState::Idle => write!(
                f,
                "Waiting[Floor {}, Time {}]",
                self.floor, self.dwell_countdown
            ),
            _ => {
                let arrow = match self.direction {
                    Direction::Up => "^",
                    Direction::Down => "v",
                    Direction::Stop => "-",
                };
                match self.door {
                    DoorState::Open => {
                        write!(f, "[{}|{}|O {}]", self.floor, arrow, self.door_countdown)?
                    }
                    DoorState::Closed => write!(f, "[{}|{}|C  ]", self.floor, arrow)?,
                }

                // Floor indicator lights
                write!(f, "<")?;
                for (floor, &lit) in self.floor_requests.iter().enumerate() {
                    if lit {
                        write!(f, " {:>2}", floor)?;
                    } else {
                        write!(f, " --")?;
                    }
                }
                write!(f, ">")
            }
        }
    }
}

fn centre(text: &str) -> String {
    let inner = REPORT_WIDTH - 2;
    let left = inner.saturating_sub(text.len()) / 2;
    let right = inner.saturating_sub(text.len() + left);
    format!("*{}{}{}*", " ".repeat(left), text, " ".repeat(right))
}

fn join_requests(requests: &[Request]) -> String {
    requests
        .iter()
        .map(|request| request.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
