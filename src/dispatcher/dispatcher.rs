/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::Car;
use crate::config::{BuildingConfig, CarConfig};
use crate::report::StatusReport;
use crate::shared::{Direction, DispatchError, Request, SystemStatus};

/***************************************/
/*             Constants               */
/***************************************/
pub const MIN_FLOORS: u8 = 3;
pub const MAX_FLOORS: u8 = 30;
pub const MIN_CARS: usize = 1;
pub const MIN_CAPACITY: usize = 4;
pub const MAX_CAPACITY: usize = 20;

/**
 * The building: owns the fleet and the two waiting queues.
 *
 * Requests are admitted into the up or down queue, and handed out in batches of at
 * most `capacity` to idle cars standing at the matching terminus: the up queue at
 * the ground floor, the down queue at the top floor. Every call validates before it
 * mutates, so a failed call leaves the dispatcher as it was.
 *
 * # Fields
 * - `n_floors`:        Number of floors, in `MIN_FLOORS..=MAX_FLOORS`.
 * - `n_cars`:          Number of cars, at least `MIN_CARS`.
 * - `capacity`:        Maximum batch size, in `MIN_CAPACITY..=MAX_CAPACITY`.
 * - `status`:          Overall system status.
 * - `tick`:            Ticks processed so far.
 * - `up_queue`:        Waiting up requests, oldest first.
 * - `down_queue`:      Waiting down requests, oldest first.
 * - `cars`:            The fleet. Never grows or shrinks.
 */
#[derive(Debug, Clone)]
pub struct Dispatcher {
    n_floors: u8,
    n_cars: usize,
    capacity: usize,
    status: SystemStatus,
    tick: u64,
    up_queue: VecDeque<Request>,
    down_queue: VecDeque<Request>,
    cars: Box<[Car]>,
}

impl Dispatcher {
    pub fn new(n_floors: u8, n_cars: usize, capacity: usize) -> Result<Dispatcher, DispatchError> {
        Dispatcher::with_car_config(n_floors, n_cars, capacity, CarConfig::default())
    }

    pub fn from_config(
        building: &BuildingConfig,
        car: &CarConfig,
    ) -> Result<Dispatcher, DispatchError> {
        Dispatcher::with_car_config(building.n_floors, building.n_cars, building.capacity, *car)
    }

    pub fn with_car_config(
        n_floors: u8,
        n_cars: usize,
        capacity: usize,
        car_config: CarConfig,
    ) -> Result<Dispatcher, DispatchError> {
        check_range("n_floors", n_floors as usize, MIN_FLOORS as usize, MAX_FLOORS as usize)?;
        check_range("n_cars", n_cars, MIN_CARS, usize::MAX)?;
        check_range("capacity", capacity, MIN_CAPACITY, MAX_CAPACITY)?;
        check_range(
            "door_open_ticks",
            car_config.door_open_ticks as usize,
            1,
            u32::MAX as usize,
        )?;
        check_range(
            "ticks_per_floor",
            car_config.ticks_per_floor as usize,
            1,
            u32::MAX as usize,
        )?;

        let cars = (0..n_cars)
            .map(|id| Car::new(id, n_floors, car_config))
            .collect::<Vec<Car>>()
            .into_boxed_slice();

        info!(
            "Building ready: {} floors, {} cars, capacity {}",
            n_floors, n_cars, capacity
        );

        Ok(Dispatcher {
            n_floors,
            n_cars,
            capacity,
            status: SystemStatus::OutOfService,
            tick: 0,
            up_queue: VecDeque::new(),
            down_queue: VecDeque::new(),
            cars,
        })
    }

    pub fn status(&self) -> SystemStatus {
        self.status
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Queues a trip. Only allowed while the system is running.
    pub fn add_request(&mut self, origin: u8, destination: u8) -> Result<(), DispatchError> {
        if origin >= self.n_floors || destination >= self.n_floors || origin == destination {
            debug!("Rejected request {}->{}", origin, destination);
            return Err(DispatchError::InvalidRequest {
                origin: origin.into(),
                destination: destination.into(),
            });
        }

        if self.status != SystemStatus::Running {
            debug!(
                "Rejected request {}->{} while {}",
                origin, destination, self.status
            );
            return Err(DispatchError::NotAccepting(self.status));
        }

        let request = Request::new(origin, destination);
        match request.direction() {
            Direction::Up => self.up_queue.push_back(request),
            _ => self.down_queue.push_back(request),
        }
        debug!("Queued request {}", request);
        Ok(())
    }

    /// Returns true if the system went from out of service to running.
    pub fn start(&mut self) -> Result<bool, DispatchError> {
        match self.status {
            SystemStatus::Stopping => Err(DispatchError::AlreadyStopping),
            SystemStatus::Running => Ok(false),
            SystemStatus::OutOfService => {
                for car in self.cars.iter_mut() {
                    car.start();
                }
                self.status = SystemStatus::Running;
                info!("Elevator system running");
                Ok(true)
            }
        }
    }

    /// Drops every waiting request and sends all cars to the ground floor.
    pub fn stop(&mut self) {
        if self.status != SystemStatus::Running {
            return;
        }

        let dropped = self.up_queue.len() + self.down_queue.len();
        self.up_queue.clear();
        self.down_queue.clear();
        for car in self.cars.iter_mut() {
            car.take_out_of_service();
        }
        self.status = SystemStatus::Stopping;
        info!("Elevator system stopping, {} waiting requests dropped", dropped);
    }

    /// Runs one assignment pass without advancing any car.
    pub fn distribute_requests(&mut self) -> Result<(), DispatchError> {
        if self.status != SystemStatus::Running {
            return Err(DispatchError::NotAccepting(self.status));
        }
        self.assign_requests();
        Ok(())
    }

    /// Advances the simulation by one step: assignment first, then every car once.
    pub fn tick(&mut self) {
        match self.status {
            SystemStatus::OutOfService => return,
            SystemStatus::Running => {
                self.assign_requests();
                self.cars.iter_mut().for_each(Car::tick);
            }
            SystemStatus::Stopping => {
                self.cars.iter_mut().for_each(Car::tick);
                if self.cars.iter().all(Car::is_out_of_service) {
                    self.status = SystemStatus::OutOfService;
                    info!("All cars at ground floor, elevator system out of service");
                }
            }
        }
        self.tick += 1;
    }

    pub fn snapshot(&self) -> StatusReport {
        StatusReport {
            n_floors: self.n_floors,
            n_cars: self.n_cars,
            capacity: self.capacity,
            tick: self.tick,
            status: self.status,
            up_requests: self.up_queue.iter().copied().collect(),
            down_requests: self.down_queue.iter().copied().collect(),
            cars: self.cars.iter().map(Car::report).collect(),
        }
    }

    fn assign_requests(&mut self) {
        let top_floor = self.n_floors - 1;

        for car in self.cars.iter_mut() {
            if !car.is_accepting() {
                continue;
            }

            let queue = match car.current_floor() {
                0 => &mut self.up_queue,
                floor if floor == top_floor => &mut self.down_queue,
                _ => continue,
            };

            let batch = pop_batch(queue, self.capacity);
            if batch.is_empty() {
                continue;
            }

            debug!(
                "Car {} at floor {} takes {} requests",
                car.id(),
                car.current_floor(),
                batch.len()
            );
            car.assign(&batch);
        }
    }
}

/// Removes up to `capacity` requests from the front of the queue.
fn pop_batch(queue: &mut VecDeque<Request>, capacity: usize) -> Vec<Request> {
    let mut batch = Vec::with_capacity(capacity.min(queue.len()));
    while batch.len() < capacity {
        match queue.pop_front() {
            Some(request) => batch.push(request),
            None => break,
        }
    }
    batch
}

fn check_range(field: &'static str, value: usize, min: usize, max: usize) -> Result<(), DispatchError> {
    if value < min || value > max {
        return Err(DispatchError::InvalidConfig {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
