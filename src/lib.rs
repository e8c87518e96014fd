pub mod config;
pub mod cpu;
pub mod debugger;
pub mod device;
pub mod encoding;
pub mod error;
pub mod file_loader;
pub mod instruction;
pub mod opcode;
pub mod process;
pub mod state;
pub mod terminal;
pub mod trap;
pub mod trap_vector;

pub use crate::config::Config;
pub use crate::debugger::Breakpoints;
pub use crate::error::{Error, Result};
pub use crate::state::State;

use crate::debugger::run as run_debugger;
use crate::device::{Keyboard, Screen, StdinKeyboard, StdoutScreen};
use crate::file_loader::load_file;
use crate::process::run as run_processor;
use log::warn;

/// A machine on the host terminal with every image from `config` loaded.
pub fn boot(config: &Config) -> Result<State> {
    boot_with(config, Box::new(StdinKeyboard), Box::new(StdoutScreen))
}

/// Loads the images in order. When the first argument was an image and it fails to load, it is
/// reported and skipped; any other failure is returned. In debug mode every loaded word is
/// listed on the screen.
pub fn boot_with(
    config: &Config,
    keyboard: Box<dyn Keyboard>,
    screen: Box<dyn Screen>,
) -> Result<State> {
    let mut state = State::new(keyboard, screen);

    for (index, image) in config.images.iter().enumerate() {
        match load_file(image, &mut state.memory) {
            Ok(image) => {
                if config.debug {
                    image.dump(state.screen.as_mut())?;
                }
            }
            Err(e) if index == 0 && config.first_image_optional => warn!("{}", e),
            Err(e) => return Err(e),
        }
    }

    Ok(state)
}

pub fn run(state: &mut State, breakpoints: Option<&Breakpoints>) -> Result<()> {
    match breakpoints {
        Some(breakpoints) => run_debugger(state, breakpoints),
        None => run_processor(state),
    }
}
