#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    BR,
    ADD,
    LD,
    ST,
    JSR,
    AND,
    LDR,
    STR,
    RTI,
    NOT,
    LDI,
    STI,
    JMP,
    RES,
    LEA,
    TRAP,
}

impl Opcode {
    pub fn from_instruction(instruction: u16) -> Opcode {
        match instruction >> 12 {
            0x00 => Opcode::BR,
            0x01 => Opcode::ADD,
            0x02 => Opcode::LD,
            0x03 => Opcode::ST,
            0x04 => Opcode::JSR,
            0x05 => Opcode::AND,
            0x06 => Opcode::LDR,
            0x07 => Opcode::STR,
            0x08 => Opcode::RTI,
            0x09 => Opcode::NOT,
            0x0a => Opcode::LDI,
            0x0b => Opcode::STI,
            0x0c => Opcode::JMP,
            0x0d => Opcode::RES,
            0x0e => Opcode::LEA,
            _ => Opcode::TRAP,
        }
    }

    /// RTI and RES have no defined behaviour on this machine.
    pub fn is_reserved(self) -> bool {
        self == Opcode::RTI || self == Opcode::RES
    }
}
