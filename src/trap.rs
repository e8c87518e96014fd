use crate::error::Result;
use crate::instruction::Register::R0;
use crate::state::State;
use crate::trap_vector::TrapVector;
use log::{debug, warn};

const IN_PROMPT: &str = "Enter a character: ";

/// Runs the service routine for `trap_vector`. R7 has already been set by the TRAP instruction.
pub fn dispatch(state: &mut State, trap_vector: TrapVector) -> Result<()> {
    match trap_vector {
        // Read a single character from the keyboard. The character is not echoed onto the
        // console. Its ASCII code is copied into R0. The high eight bits of R0 are cleared.
        TrapVector::GETC => {
            let character = state.memory.keyboard().read_char()?;

            state.registers.write(R0, u16::from(character));
            state.update_flags(R0);
        }

        // Write a character in R0[7:0] to the console display.
        TrapVector::OUT => {
            state.screen.write_byte(state.registers.read(R0) as u8)?;
            state.screen.flush()?;
        }

        // Write a string of ASCII characters, one per memory location, starting at the address in
        // R0 and stopping at the first x0000.
        TrapVector::PUTS => {
            let mut address = state.registers.read(R0);

            loop {
                let word = state.memory.peek(address);
                if word == 0 {
                    break;
                }
                state.screen.write_byte(word as u8)?;
                address = address.wrapping_add(1);
            }

            state.screen.flush()?;
        }

        // Print a prompt on the screen and read a single character from the keyboard. The
        // character is echoed onto the console monitor, and its ASCII code is copied into R0.
        TrapVector::IN => {
            state.screen.write_str(IN_PROMPT)?;
            state.screen.flush()?;

            let character = state.memory.keyboard().read_char()?;
            state.screen.write_byte(character)?;
            state.screen.flush()?;

            state.registers.write(R0, u16::from(character));
            state.update_flags(R0);
        }

        // Write a string packed two characters per memory location: bits [7:0] first, then bits
        // [15:8] unless they are x00. Stops at the first x0000.
        TrapVector::PUTSP => {
            let mut address = state.registers.read(R0);

            loop {
                let word = state.memory.peek(address);
                if word == 0 {
                    break;
                }

                state.screen.write_byte((word & 0xff) as u8)?;
                let high = (word >> 8) as u8;
                if high != 0 {
                    state.screen.write_byte(high)?;
                }
                address = address.wrapping_add(1);
            }

            state.screen.flush()?;
        }

        // Halt execution and print a message on the console.
        TrapVector::HALT => {
            state.screen.write_str("HALT\n")?;
            state.screen.flush()?;

            debug!("halted at {:#06x}", state.pc.wrapping_sub(1));
            state.running = false;
        }

        TrapVector::Unknown(vector) => {
            warn!(
                "ignoring unknown trap vector {:#04x} at {:#06x}",
                vector,
                state.pc.wrapping_sub(1)
            );
        }
    }

    Ok(())
}
