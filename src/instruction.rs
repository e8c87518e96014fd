use crate::encoding::SignExtend;
use crate::opcode::Opcode;
use crate::trap_vector::TrapVector;

/// These instruction types don't map directly to the 4-bit opcodes.
/// Some have been split into multiple enum variants for better ergonomics.
///
/// Offsets and immediates are stored already sign-extended to 16 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    BR(ConditionMask, u16),
    ADD(Register, Register, Register),
    ADDIMM(Register, Register, u16),
    LD(Register, u16),
    ST(Register, u16),
    JSR(u16),
    JSRR(Register),
    AND(Register, Register, Register),
    ANDIMM(Register, Register, u16),
    LDR(Register, Register, u16),
    STR(Register, Register, u16),
    RTI,
    NOT(Register, Register),
    LDI(Register, u16),
    STI(Register, u16),
    JMP(Register),
    RES,
    LEA(Register, u16),
    TRAP(TrapVector),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl Register {
    const ALL: [Register; 8] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
    ];

    /// Picks the register named by the low three bits of `n`.
    pub fn from_bits(n: u16) -> Register {
        Register::ALL[usize::from(n & 0x7)]
    }
}

/// The n, z and p bits of a BR instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionMask {
    pub n: bool,
    pub z: bool,
    pub p: bool,
}

impl ConditionMask {
    /// Laid out the same way as the condition register: n = bit 2, z = bit 1, p = bit 0.
    pub fn bits(self) -> u16 {
        (u16::from(self.n) << 2) | (u16::from(self.z) << 1) | u16::from(self.p)
    }
}

impl Instruction {
    pub fn decode(instruction: u16) -> Self {
        let dr = Register::from_bits(instruction >> 9);
        let sr1 = Register::from_bits(instruction >> 6);
        let sr2 = Register::from_bits(instruction);
        let immediate_flag = ((instruction >> 5) & 0x1) == 0x1;
        let imm5 = (instruction & 0x1f).sign_extend(5);
        let offset6 = (instruction & 0x3f).sign_extend(6);
        let pc_offset9 = (instruction & 0x1ff).sign_extend(9);
        let pc_offset11 = (instruction & 0x7ff).sign_extend(11);

        match Opcode::from_instruction(instruction) {
            Opcode::BR => {
                let n = ((instruction >> 11) & 0x1) == 1;
                let z = ((instruction >> 10) & 0x1) == 1;
                let p = ((instruction >> 9) & 0x1) == 1;

                Instruction::BR(ConditionMask { n, z, p }, pc_offset9)
            }

            Opcode::ADD => {
                if immediate_flag {
                    Instruction::ADDIMM(dr, sr1, imm5)
                } else {
                    Instruction::ADD(dr, sr1, sr2)
                }
            }

            Opcode::LD => Instruction::LD(dr, pc_offset9),

            Opcode::ST => Instruction::ST(dr, pc_offset9),

            Opcode::JSR => {
                if ((instruction >> 11) & 1) == 1 {
                    Instruction::JSR(pc_offset11)
                } else {
                    Instruction::JSRR(sr1)
                }
            }

            Opcode::AND => {
                if immediate_flag {
                    Instruction::ANDIMM(dr, sr1, imm5)
                } else {
                    Instruction::AND(dr, sr1, sr2)
                }
            }

            Opcode::LDR => Instruction::LDR(dr, sr1, offset6),

            Opcode::STR => Instruction::STR(dr, sr1, offset6),

            Opcode::RTI => Instruction::RTI,

            Opcode::NOT => Instruction::NOT(dr, sr1),

            Opcode::LDI => Instruction::LDI(dr, pc_offset9),

            Opcode::STI => Instruction::STI(dr, pc_offset9),

            Opcode::JMP => Instruction::JMP(sr1),

            Opcode::RES => Instruction::RES,

            Opcode::LEA => Instruction::LEA(dr, pc_offset9),

            Opcode::TRAP => Instruction::TRAP(TrapVector::decode(instruction)),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::BR(..) => Opcode::BR,
            Instruction::ADD(..) | Instruction::ADDIMM(..) => Opcode::ADD,
            Instruction::LD(..) => Opcode::LD,
            Instruction::ST(..) => Opcode::ST,
            Instruction::JSR(..) | Instruction::JSRR(..) => Opcode::JSR,
            Instruction::AND(..) | Instruction::ANDIMM(..) => Opcode::AND,
            Instruction::LDR(..) => Opcode::LDR,
            Instruction::STR(..) => Opcode::STR,
            Instruction::RTI => Opcode::RTI,
            Instruction::NOT(..) => Opcode::NOT,
            Instruction::LDI(..) => Opcode::LDI,
            Instruction::STI(..) => Opcode::STI,
            Instruction::JMP(..) => Opcode::JMP,
            Instruction::RES => Opcode::RES,
            Instruction::LEA(..) => Opcode::LEA,
            Instruction::TRAP(..) => Opcode::TRAP,
        }
    }
}
