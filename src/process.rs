use crate::cpu::execute;
use crate::error::Result;
use crate::instruction::Instruction;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

impl State {
    /// Reads the word at PC and moves PC past it. Returns the address fetched from and the word.
    pub fn fetch(&mut self) -> (u16, u16) {
        let address = self.pc;
        let word = self.memory.read(address);
        self.pc = self.pc.wrapping_add(1);

        (address, word)
    }

    /// Decodes and executes a word that has just been fetched.
    pub fn execute_word(&mut self, word: u16) -> Result<Status> {
        execute(self, Instruction::decode(word))?;

        Ok(self.status())
    }

    pub fn step(&mut self) -> Result<Status> {
        let (_, word) = self.fetch();
        self.execute_word(word)
    }

    pub fn status(&self) -> Status {
        if self.running {
            Status::Running
        } else {
            Status::Halted
        }
    }
}

/// Runs until HALT. A reserved opcode ends the run with `Error::IllegalOpcode`.
pub fn run(state: &mut State) -> Result<()> {
    while state.step()? == Status::Running {}

    Ok(())
}

#[cfg(test)]
pub(crate) fn load_program(state: &mut State, words: &[u16]) {
    let mut address = state.pc;
    for word in words {
        state.memory.write(address, *word);
        address = address.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::instruction::Register::*;
    use crate::state::memory::{KBDR, KBSR};
    use crate::state::{test_state, Condition};

    const HALT: u16 = 0xf025;

    #[test]
    fn fetch_advances_pc() {
        let (mut state, _, _) = test_state();
        state.memory.write(0x3000, 0x1234);

        assert_eq!(state.fetch(), (0x3000, 0x1234));
        assert_eq!(state.pc, 0x3001);
    }

    #[test]
    fn fetch_wraps_at_top_of_memory() {
        let (mut state, _, _) = test_state();
        state.pc = 0xffff;

        state.fetch();

        assert_eq!(state.pc, 0);
    }

    #[test]
    fn clear_and_halt() {
        let (mut state, _, screen) = test_state();
        state.registers.write(R0, 5);
        load_program(
            &mut state,
            &[
                0b0101_000_000_1_00000, // AND R0, R0, #0
                HALT,
            ],
        );

        run(&mut state).unwrap();

        assert_eq!(state.registers.read(R0), 0);
        assert_eq!(state.condition, Condition::Z);
        assert_eq!(state.status(), Status::Halted);
        // Only the halt notice; the program itself printed nothing.
        assert_eq!(screen.text(), "HALT\n");
    }

    #[test]
    fn print_string() {
        let (mut state, _, screen) = test_state();
        load_program(
            &mut state,
            &[
                0b1110_000_000000010, // LEA R0, #2
                0xf022,               // PUTS
                HALT,
                0x0048, // 'H'
                0x0069, // 'i'
                0x0021, // '!'
                0x0000,
            ],
        );

        assert_eq!(state.step().unwrap(), Status::Running);
        assert_eq!(state.step().unwrap(), Status::Running);
        assert_eq!(screen.text(), "Hi!");

        assert_eq!(state.step().unwrap(), Status::Halted);
    }

    #[test]
    fn reserved_opcodes_are_fatal() {
        for reserved in &[0x8000u16, 0xd000] {
            let (mut state, _, _) = test_state();
            load_program(
                &mut state,
                &[
                    0b0001_001_001_1_00011, // ADD R1, R1, #3
                    *reserved,
                    0b0001_001_001_1_00011, // never runs
                    HALT,
                ],
            );

            let error = run(&mut state).unwrap_err();

            assert!(error.is_fatal());
            match error {
                Error::IllegalOpcode { address, .. } => assert_eq!(address, 0x3001),
                other => panic!("unexpected error {:?}", other),
            }
            assert_eq!(state.registers.read(R1), 3);
            assert_eq!(state.condition, Condition::P);
            assert_eq!(state.memory.peek(0x3002), 0b0001_001_001_1_00011);
            assert!(state.running);
        }
    }

    #[test]
    fn subroutine_call_and_return() {
        let (mut state, _, _) = test_state();
        load_program(
            &mut state,
            &[
                0b0100_1_00000000010, // JSR #2
                0b0001_010_001_1_00000, // ADD R2, R1, #0
                HALT,
                0b0001_001_001_1_00111, // ADD R1, R1, #7
                0b1100_000_111_000000, // RET
            ],
        );

        run(&mut state).unwrap();

        assert_eq!(state.registers.read(R1), 7);
        assert_eq!(state.registers.read(R2), 7);
        // HALT overwrote R7 with its own return address.
        assert_eq!(state.registers.read(R7), 0x3003);
    }

    #[test]
    fn countdown_loop() {
        let (mut state, _, _) = test_state();
        load_program(
            &mut state,
            &[
                0b0001_001_001_1_00101, // ADD R1, R1, #5
                0b0001_010_010_1_00010, // ADD R2, R2, #2  <- loop
                0b0001_001_001_1_11111, // ADD R1, R1, #-1
                0b0000_001_111111101,   // BRp loop
                HALT,
            ],
        );

        run(&mut state).unwrap();

        assert_eq!(state.registers.read(R1), 0);
        assert_eq!(state.registers.read(R2), 10);
    }

    #[test]
    fn keyboard_polling_program() {
        let (mut state, keyboard, _) = test_state();
        keyboard.push(b"k");
        load_program(
            &mut state,
            &[
                0b1010_001_000000011, // LDI R1, KBSR_PTR  <- poll
                0b0000_011_111111110, // BRzp poll
                0b1010_000_000000010, // LDI R0, KBDR_PTR
                HALT,
                KBSR,
                KBDR,
            ],
        );

        run(&mut state).unwrap();

        assert_eq!(state.registers.read(R0), u16::from(b'k'));
        assert_eq!(state.memory.peek(KBSR), 1 << 15);
    }

    #[test]
    fn echo_program() {
        let (mut state, keyboard, screen) = test_state();
        keyboard.push(b"q");
        load_program(
            &mut state,
            &[
                0xf020, // GETC
                0xf021, // OUT
                HALT,
            ],
        );

        run(&mut state).unwrap();

        assert_eq!(screen.text(), "qHALT\n");
    }
}
