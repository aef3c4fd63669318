/* Modules */
pub mod car;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod report;
pub mod shared;

/* Public API */
pub use car::{Car, CarState};
pub use config::{BuildingConfig, CarConfig, Config};
pub use dispatcher::{Dispatcher, MAX_CAPACITY, MAX_FLOORS, MIN_CAPACITY, MIN_CARS, MIN_FLOORS};
pub use report::{CarReport, StatusReport};
pub use shared::{Direction, DispatchError, DoorState, Request, SystemStatus};
