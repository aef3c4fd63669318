/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Dispatcher;
use crate::shared::{CommandError, DispatchError};

pub const HELP: &str = "\
Commands:
  start                   start the elevator system
  stop                    stop the elevator system, cars return to floor 0
  step [n]                advance the simulation by n ticks (default 1, at most 10000)
  request <from> <to>     request a trip between two floors
  status                  show the building status
  help                    show this message
  quit                    leave the simulation";

/// Largest tick count a single `step` command may ask for.
pub const MAX_STEPS: usize = 10_000;
const STEP_USAGE: &str = "step [n], with n at most 10000";

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Step(usize),
    Request { origin: i64, destination: i64 },
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match (name.to_lowercase().as_str(), args.as_slice()) {
            ("start", []) => Ok(Command::Start),
            ("stop", []) => Ok(Command::Stop),
            ("step", []) => Ok(Command::Step(1)),
            ("step", [n]) => match parse_number(n)? {
                n if n <= MAX_STEPS => Ok(Command::Step(n)),
                _ => Err(CommandError::Usage(STEP_USAGE)),
            },
            ("step", _) => Err(CommandError::Usage(STEP_USAGE)),
            ("request", [origin, destination]) => Ok(Command::Request {
                origin: parse_number(origin)?,
                destination: parse_number(destination)?,
            }),
            ("request", _) => Err(CommandError::Usage("request <from> <to>")),
            ("status", []) => Ok(Command::Status),
            ("help", _) => Ok(Command::Help),
            ("quit", []) | ("exit", []) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

fn parse_number<T: FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Drives a dispatcher from line-based text input.
 *
 * Every command is forwarded to the dispatcher and followed by the current status
 * report, as text or as JSON. Failures are written as error lines and the loop
 * carries on. Returns when the input ends or `quit` is read.
 */
pub fn run<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    input: R,
    mut output: W,
    json: bool,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "Error: {}", e)?;
                continue;
            }
        };
        debug!("Console command: {:?}", command);

        let outcome = match command {
            Command::Quit => {
                writeln!(output, "Goodbye")?;
                return Ok(());
            }
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Command::Start => dispatcher.start().map(|started| {
                if !started {
                    Some("Elevator system already running")
                } else {
                    None
                }
            }),
            Command::Stop => {
                dispatcher.stop();
                Ok(None)
            }
            Command::Step(n) => {
                (0..n).for_each(|_| dispatcher.tick());
                Ok(None)
            }
            Command::Request {
                origin,
                destination,
            } => match (u8::try_from(origin), u8::try_from(destination)) {
                (Ok(from), Ok(to)) => dispatcher.add_request(from, to).map(|_| None),
                _ => Err(DispatchError::InvalidRequest {
                    origin,
                    destination,
                }),
            },
            Command::Status => Ok(None),
        };

        match outcome {
            Ok(Some(note)) => writeln!(output, "{}", note)?,
            Ok(None) => {}
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
        write_report(dispatcher, &mut output, json)?;
    }
    Ok(())
}

fn write_report<W: Write>(dispatcher: &Dispatcher, output: &mut W, json: bool) -> io::Result<()> {
    let report = dispatcher.snapshot();
    if json {
        let text = report
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(output, "{}", text)
    } else {
        write!(output, "{}", report)
    }
}
