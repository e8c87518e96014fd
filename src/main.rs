use lc3::config::USAGE;
use lc3::terminal::{install_interrupt_handler, InputMode};
use lc3::{Breakpoints, Config, Error};
use log::{debug, error};
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let config = match Config::with(&args) {
        Ok(config) => config,
        Err(Error::MissingImage) => {
            println!("{}", USAGE);
            process::exit(2);
        }
        Err(Error::Help(message)) => {
            println!("{}", message);
            process::exit(0);
        }
        Err(e) => {
            println!("{}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(config) {
        println!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Error> {
    let mut state = lc3::boot(&config)?;

    // Breakpoints are typed before the terminal leaves line mode.
    let breakpoints = if config.debug {
        Some(Breakpoints::prompt(
            state.memory.keyboard(),
            state.screen.as_mut(),
        )?)
    } else {
        None
    };

    install_interrupt_handler()?;
    let input_mode = match InputMode::raw() {
        Ok(mode) => Some(mode),
        Err(e) => {
            debug!("leaving input buffering alone: {}", e);
            None
        }
    };

    let result = lc3::run(&mut state, breakpoints.as_ref());
    drop(input_mode);

    match result {
        Err(e) if e.is_fatal() => {
            error!("{}", e);
            println!("\n{}", e);
            process::abort();
        }
        other => other,
    }
}
