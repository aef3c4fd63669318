pub mod errors;
pub mod macros;
pub mod structs;

pub use errors::CommandError;
pub use errors::ConfigError;
pub use errors::DispatchError;
pub use structs::Direction;
pub use structs::DoorState;
pub use structs::Request;
pub use structs::SystemStatus;
