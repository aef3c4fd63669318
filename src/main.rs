/* 3rd party libraries */
use clap::Parser;
use log::{info, warn};
use std::io;
use std::path::PathBuf;

/* Custom libraries */
use elevator_bank::config::{self, Config};
use elevator_bank::console;
use elevator_bank::exit_on_error;
use elevator_bank::Dispatcher;

/* Command line */
#[derive(Parser, Debug)]
#[clap(name = "elevator-bank", version, about = "Tick-driven simulation of a bank of elevators")]
struct Args {
    /// Configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of floors, overrides the configuration file
    #[clap(long)]
    floors: Option<u8>,

    /// Number of cars, overrides the configuration file
    #[clap(long)]
    cars: Option<usize>,

    /// Capacity of each car, overrides the configuration file
    #[clap(long)]
    capacity: Option<usize>,

    /// Print status reports as JSON
    #[clap(long)]
    json: bool,
}

/* Main */
fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = if args.config.exists() {
        exit_on_error!(config::load_config(&args.config), "loading configuration")
    } else {
        warn!(
            "No configuration file at {}, using defaults",
            args.config.display()
        );
        Config::default()
    };

    if let Some(floors) = args.floors {
        config.building.n_floors = floors;
    }
    if let Some(cars) = args.cars {
        config.building.n_cars = cars;
    }
    if let Some(capacity) = args.capacity {
        config.building.capacity = capacity;
    }

    // Create the building
    let mut dispatcher = exit_on_error!(
        Dispatcher::from_config(&config.building, &config.car),
        "creating the building"
    );

    println!("{}", console::HELP);
    let stdin = io::stdin();
    let stdout = io::stdout();
    console::run(&mut dispatcher, stdin.lock(), stdout.lock(), args.json)?;

    info!("Simulation ended");
    Ok(())
}
