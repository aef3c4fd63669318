pub mod console;

pub use console::run;
pub use console::Command;
pub use console::HELP;
pub use console::MAX_STEPS;
