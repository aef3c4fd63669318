pub mod fsm;

pub use fsm::Car;
pub use fsm::CarState;
