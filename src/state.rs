pub mod memory;
pub mod registers;

use crate::device::{Keyboard, Screen};
use crate::instruction::Register;
use memory::Memory;
use registers::Registers;
use std::fmt;

pub const PC_START: u16 = 0x3000;

/// Everything the machine owns: memory (with the keyboard mapped into it), the register file,
/// and the screen traps write to.
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub pc: u16,
    pub condition: Condition,
    pub running: bool,
    pub screen: Box<dyn Screen>,
}

impl State {
    pub fn new(keyboard: Box<dyn Keyboard>, screen: Box<dyn Screen>) -> State {
        State {
            memory: Memory::new(keyboard),
            registers: Registers::new(),
            pc: PC_START,
            condition: Condition::Z,
            running: true,
            screen,
        }
    }

    /// Sets the condition register from the value just written to `register`.
    pub fn update_flags(&mut self, register: Register) {
        self.condition = Condition::from_value(self.registers.read(register));
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "pc: {:#06x}, registers: {:?}, condition: {:?}",
            self.pc,
            self.registers.registers(),
            self.condition
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    P = 1 << 0,
    Z = 1 << 1,
    N = 1 << 2,
}

impl Condition {
    pub fn from_value(value: u16) -> Condition {
        if value == 0 {
            Condition::Z
        } else if (value >> 15) == 1 {
            Condition::N
        } else {
            Condition::P
        }
    }

    pub fn bits(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> (
    State,
    crate::device::BufferedKeyboard,
    crate::device::BufferedScreen,
) {
    let keyboard = crate::device::BufferedKeyboard::default();
    let screen = crate::device::BufferedScreen::default();
    let state = State::new(Box::new(keyboard.clone()), Box::new(screen.clone()));

    (state, keyboard, screen)
}
