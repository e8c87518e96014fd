use crate::device::Keyboard;
use std::fmt;

pub const MEMORY_SIZE: usize = 1 << 16;

// Keyboard status register. The ready bit (bit [15]) indicates if the keyboard has received a new
// character.
pub const KBSR: u16 = 0xfe00;

// Keyboard data register. Bits [7:0] contain the last character typed on the keyboard.
pub const KBDR: u16 = 0xfe02;

const READY: u16 = 1 << 15;

/// The full 16-bit address space plus the keyboard mapped into it.
pub struct Memory {
    memory: Box<[u16]>,
    keyboard: Box<dyn Keyboard>,
}

impl Memory {
    pub fn new(keyboard: Box<dyn Keyboard>) -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            keyboard,
        }
    }

    /// Reading KBSR polls the keyboard first; every other address is plain storage.
    pub fn read(&mut self, address: u16) -> u16 {
        if address == KBSR {
            self.poll_keyboard();
        }

        self.peek(address)
    }

    /// Reads without touching any device.
    pub fn peek(&self, address: u16) -> u16 {
        self.memory[usize::from(address)]
    }

    /// Writes go straight to storage, including the device registers.
    pub fn write(&mut self, address: u16, value: u16) {
        self.memory[usize::from(address)] = value;
    }

    pub fn keyboard(&mut self) -> &mut dyn Keyboard {
        self.keyboard.as_mut()
    }

    fn poll_keyboard(&mut self) {
        match self.keyboard.poll() {
            Some(character) => {
                self.write(KBSR, READY);
                self.write(KBDR, u16::from(character));
            }
            None => self.write(KBSR, 0),
        }
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Memory {{ kbsr: {:#06x}, kbdr: {:#06x} }}",
            self.peek(KBSR),
            self.peek(KBDR)
        )
    }
}
