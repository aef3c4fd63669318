pub mod dispatcher;
mod dispatcher_tests;

pub use dispatcher::Dispatcher;
pub use dispatcher::{MAX_CAPACITY, MAX_FLOORS, MIN_CAPACITY, MIN_CARS, MIN_FLOORS};
