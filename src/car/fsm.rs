use log::trace;
use serde::Serialize;

use crate::config::CarConfig;
use crate::report::CarReport;
use crate::shared::{Direction, DoorState, Request};

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CarState {
    /// Parked at a terminus with doors closed, accepting a new batch.
    Idle,
    /// Travelling towards pending floor stops.
    EnRoute,
    /// Stopped at a served floor until the door countdown runs out.
    DoorOpen,
    /// Travelling to a terminus without any pending stops.
    Repositioning { target: u8 },
    /// Heading for the ground floor after the system was stopped.
    ReturningToGround,
    OutOfService,
}

/**
 * One elevator car, advanced by exactly one transition per `tick`.
 *
 * A car only takes new work while `Idle`, and it is only ever idle at one of the
 * two terminus floors. When a batch is finished mid-shaft the car repositions to
 * the nearest terminus before accepting again. An idle car with nothing assigned
 * dwells for `dwell_ticks` and then patrols to the opposite terminus.
 *
 * # Fields
 * - `id`:                  Index of the car in the fleet.
 * - `n_floors`:            Number of floors in the building.
 * - `current_floor`:       Floor the car is at.
 * - `direction`:           Current direction of travel.
 * - `door`:                Door state.
 * - `floor_stops`:         Pending stops, one flag per floor.
 * - `door_countdown`:      Ticks left before the doors close.
 * - `dwell_countdown`:     Ticks left before an idle car leaves its terminus.
 * - `travel_progress`:     Ticks spent on the floor currently being travelled.
 * - `state`:               State machine state.
 * - `config`:              Timing parameters.
 */
#[derive(Debug, Clone)]
pub struct Car {
    id: usize,
    n_floors: u8,
    current_floor: u8,
    direction: Direction,
    door: DoorState,
    floor_stops: Vec<bool>,
    door_countdown: u32,
    dwell_countdown: u32,
    travel_progress: u32,
    state: CarState,
    config: CarConfig,
}

impl Car {
    pub fn new(id: usize, n_floors: u8, config: CarConfig) -> Car {
        Car {
            id,
            n_floors,
            current_floor: 0,
            direction: Direction::Stop,
            door: DoorState::Closed,
            floor_stops: vec![false; n_floors as usize],
            door_countdown: 0,
            dwell_countdown: 0,
            travel_progress: 0,
            state: CarState::OutOfService,
            config,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn door(&self) -> DoorState {
        self.door
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn floor_stops(&self) -> &[bool] {
        &self.floor_stops
    }

    pub fn door_countdown(&self) -> u32 {
        self.door_countdown
    }

    pub fn dwell_countdown(&self) -> u32 {
        self.dwell_countdown
    }

    pub fn is_out_of_service(&self) -> bool {
        self.state == CarState::OutOfService
    }

    pub fn is_accepting(&self) -> bool {
        self.state == CarState::Idle
    }

    pub fn has_stops(&self) -> bool {
        self.floor_stops.iter().any(|&stop| stop)
    }

    pub fn report(&self) -> CarReport {
        CarReport {
            id: self.id,
            floor: self.current_floor,
            direction: self.direction,
            door: self.door,
            state: self.state,
            floor_requests: self.floor_stops.clone(),
            door_countdown: self.door_countdown,
            dwell_countdown: self.dwell_countdown,
            out_of_service: self.is_out_of_service(),
            accepting: self.is_accepting(),
        }
    }

    /// Puts an out-of-service car back in service. Returns false if it already was.
    pub fn start(&mut self) -> bool {
        if self.state != CarState::OutOfService {
            return false;
        }

        self.floor_stops.iter_mut().for_each(|stop| *stop = false);
        self.door_countdown = 0;
        self.become_idle();
        trace!("car {}: started at floor {}", self.id, self.current_floor);
        true
    }

    /// Drops every pending stop and sends the car to the ground floor.
    pub fn take_out_of_service(&mut self) {
        if self.state == CarState::OutOfService {
            return;
        }

        self.floor_stops.iter_mut().for_each(|stop| *stop = false);
        self.door = DoorState::Closed;
        self.door_countdown = 0;
        self.dwell_countdown = 0;
        self.travel_progress = 0;
        self.state = CarState::ReturningToGround;
        self.direction = if self.current_floor > 0 {
            Direction::Down
        } else {
            Direction::Stop
        };
        trace!("car {}: returning to ground from floor {}", self.id, self.current_floor);
    }

    /// Marks the origin and destination of every request as a stop.
    /// Returns false, and changes nothing, unless the car is idle and the batch non-empty.
    pub(crate) fn assign(&mut self, batch: &[Request]) -> bool {
        let first = match batch.first() {
            Some(request) if self.is_accepting() => request,
            _ => return false,
        };

        for request in batch {
            for floor in [request.origin, request.destination] {
                if let Some(stop) = self.floor_stops.get_mut(floor as usize) {
                    *stop = true;
                }
            }
        }

        self.direction = first.direction();
        self.dwell_countdown = 0;
        self.state = CarState::EnRoute;
        true
    }

    pub fn tick(&mut self) {
        let previous = self.state;

        match self.state {
            CarState::OutOfService => {}
            CarState::Idle => self.dwell(),
            CarState::EnRoute => self.serve_or_move(),
            CarState::DoorOpen => self.count_down_door(),
            CarState::Repositioning { target } => self.reposition(target),
            CarState::ReturningToGround => self.return_to_ground(),
        }

        if self.state != previous {
            trace!(
                "car {}: {:?} -> {:?} at floor {}",
                self.id,
                previous,
                self.state,
                self.current_floor
            );
        }
    }

    fn top_floor(&self) -> u8 {
        self.n_floors - 1
    }

    fn at_terminus(&self) -> bool {
        self.current_floor == 0 || self.current_floor == self.top_floor()
    }

    fn dwell(&mut self) {
        if self.dwell_countdown > 0 {
            self.dwell_countdown -= 1;
            return;
        }

        // Nothing was handed out while waiting, patrol to the other terminus
        let target = if self.current_floor == 0 {
            self.top_floor()
        } else {
            0
        };
        self.state = CarState::Repositioning { target };
        self.reposition(target);
    }

    fn serve_or_move(&mut self) {
        let floor = self.current_floor as usize;
        if self.floor_stops[floor] {
            self.floor_stops[floor] = false;
            self.open_doors();
            return;
        }

        match self.choose_direction() {
            Direction::Stop => self.finish_trip(),
            direction => {
                self.direction = direction;
                self.travel(direction);
            }
        }
    }

    fn count_down_door(&mut self) {
        self.door_countdown = self.door_countdown.saturating_sub(1);
        if self.door_countdown > 0 {
            return;
        }

        self.door = DoorState::Closed;
        if self.has_stops() {
            self.state = CarState::EnRoute;
        } else {
            self.finish_trip();
        }
    }

    fn reposition(&mut self, target: u8) {
        if self.current_floor != target {
            let direction = if target > self.current_floor {
                Direction::Up
            } else {
                Direction::Down
            };
            self.direction = direction;
            self.travel(direction);
        }

        if self.current_floor == target {
            self.become_idle();
        }
    }

    fn return_to_ground(&mut self) {
        if self.current_floor > 0 {
            self.direction = Direction::Down;
            self.travel(Direction::Down);
        }

        if self.current_floor == 0 {
            self.direction = Direction::Stop;
            self.travel_progress = 0;
            self.state = CarState::OutOfService;
        }
    }

    fn open_doors(&mut self) {
        self.door = DoorState::Open;
        self.door_countdown = self.config.door_open_ticks;
        self.travel_progress = 0;
        self.state = CarState::DoorOpen;
    }

    fn become_idle(&mut self) {
        self.door = DoorState::Closed;
        self.direction = Direction::Stop;
        self.dwell_countdown = self.config.dwell_ticks;
        self.travel_progress = 0;
        self.state = CarState::Idle;
    }

    fn finish_trip(&mut self) {
        if self.at_terminus() {
            self.become_idle();
            return;
        }

        // Ties go to the ground floor
        let top = self.top_floor();
        let target = if self.current_floor <= top - self.current_floor {
            0
        } else {
            top
        };
        self.direction = if target == 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        self.state = CarState::Repositioning { target };
    }

    /// Moves one floor once `ticks_per_floor` ticks have been spent travelling.
    fn travel(&mut self, direction: Direction) {
        self.travel_progress += 1;
        if self.travel_progress < self.config.ticks_per_floor {
            return;
        }
        self.travel_progress = 0;

        let next = self.current_floor as i16 + direction.step() as i16;
        if next >= 0 && next < self.n_floors as i16 {
            self.current_floor = next as u8;
        }
    }

    fn choose_direction(&self) -> Direction {
        // Continue in current direction of travel if there are any further stops in that direction
        if self.has_stops_in_direction(self.direction) {
            return self.direction;
        }

        match self.direction {
            Direction::Up if self.has_stops_in_direction(Direction::Down) => Direction::Down,
            Direction::Down if self.has_stops_in_direction(Direction::Up) => Direction::Up,
            Direction::Stop => {
                if self.has_stops_in_direction(Direction::Up) {
                    Direction::Up
                } else if self.has_stops_in_direction(Direction::Down) {
                    Direction::Down
                } else {
                    Direction::Stop
                }
            }
            _ => Direction::Stop,
        }
    }

    fn has_stops_in_direction(&self, direction: Direction) -> bool {
        let floor = self.current_floor as usize;
        match direction {
            Direction::Up => self.floor_stops[floor + 1..].iter().any(|&stop| stop),
            Direction::Down => self.floor_stops[..floor].iter().any(|&stop| stop),
            Direction::Stop => false,
        }
    }
}
