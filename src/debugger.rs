mod disassemble;

pub use crate::debugger::disassemble::disassemble;

use crate::device::{Keyboard, Screen};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::process::Status;
use crate::state::State;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

lazy_static! {
    static ref COUNT_REGEX: Regex = Regex::new(r"^\s*(\d{1,5})\s*$").unwrap();
    static ref ADDRESS_REGEX: Regex =
        Regex::new(r"^\s*(?:0[xX])?([0-9a-fA-F]{1,4})\s*$").unwrap();
}

/// Addresses to stop at. Duplicates are allowed and stop only once.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Breakpoints {
    addresses: Vec<u16>,
}

impl Breakpoints {
    pub fn new(addresses: Vec<u16>) -> Self {
        Self { addresses }
    }

    pub fn contains(&self, address: u16) -> bool {
        self.addresses.contains(&address)
    }

    pub fn addresses(&self) -> &[u16] {
        &self.addresses
    }

    /// Asks for a breakpoint count and then that many hexadecimal addresses, one per line.
    pub fn prompt(keyboard: &mut dyn Keyboard, screen: &mut dyn Screen) -> Result<Breakpoints> {
        screen.write_str("Enter the number of breakpoints: ")?;
        screen.flush()?;

        let line = read_line(keyboard)?;
        let count: usize = COUNT_REGEX
            .captures(&line)
            .and_then(|captures| captures.get(1))
            .and_then(|count| count.as_str().parse().ok())
            .ok_or_else(|| Error::Breakpoint(format!("bad breakpoint count {:?}", line)))?;

        let mut addresses = Vec::with_capacity(count);
        for i in 0..count {
            screen.write_str(&format!("Enter location for breakpoint {}: 0x", i + 1))?;
            screen.flush()?;

            addresses.push(parse_address(&read_line(keyboard)?)?);
        }

        Ok(Breakpoints::new(addresses))
    }
}

pub fn parse_address(line: &str) -> Result<u16> {
    ADDRESS_REGEX
        .captures(line)
        .and_then(|captures| captures.get(1))
        .and_then(|address| u16::from_str_radix(address.as_str(), 16).ok())
        .ok_or_else(|| Error::Breakpoint(format!("bad address {:?}", line)))
}

fn read_line(keyboard: &mut dyn Keyboard) -> Result<String> {
    let mut line = String::new();

    loop {
        match keyboard.read_char()? {
            b'\n' => return Ok(line),
            b'\r' => {}
            character => line.push(char::from(character)),
        }
    }
}

/// The execution loop with a stop before every instruction fetched from a breakpoint address.
pub fn run(state: &mut State, breakpoints: &Breakpoints) -> Result<()> {
    loop {
        let (address, word) = state.fetch();

        if breakpoints.contains(address) {
            suspend(state, address, word)?;
        }

        if state.execute_word(word)? == Status::Halted {
            return Ok(());
        }
    }
}

/// Describes the instruction about to run and waits for a `1` on the keyboard.
fn suspend(state: &mut State, address: u16, word: u16) -> Result<()> {
    info!("breakpoint hit at {:#06x}", address);

    let screen = state.screen.as_mut();
    screen.write_str("Breakpoint reached.\n")?;
    screen.write_str(&format!(
        "Executing instruction: 0x{:04X}, OP: 0x{:01X}, PC: 0x{:04X}\n",
        word,
        word >> 12,
        address
    ))?;
    screen.write_str(&format!(
        "    {}    ; {:?}\n",
        disassemble(&Instruction::decode(word)),
        state.registers.registers()
    ))?;
    screen.write_str("Press enter 1 to continue: ")?;
    screen.flush()?;

    while state.memory.keyboard().read_char()? != b'1' {}

    Ok(())
}
