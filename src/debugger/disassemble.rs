use crate::instruction::{Instruction, Register};
use crate::trap_vector::TrapVector;

/// Renders a decoded instruction in assembler syntax, e.g. `ADD R2, R1, #-1`.
pub fn disassemble(instruction: &Instruction) -> String {
    match *instruction {
        Instruction::BR(mask, pc_offset) => {
            let mut name = String::from("BR");
            if mask.n {
                name.push('n');
            }
            if mask.z {
                name.push('z');
            }
            if mask.p {
                name.push('p');
            }

            format!("{} {}", name, offset(pc_offset))
        }

        Instruction::ADD(dr, sr1, sr2) => format!("ADD {}, {}, {}", r(dr), r(sr1), r(sr2)),
        Instruction::ADDIMM(dr, sr1, imm) => format!("ADD {}, {}, {}", r(dr), r(sr1), offset(imm)),
        Instruction::AND(dr, sr1, sr2) => format!("AND {}, {}, {}", r(dr), r(sr1), r(sr2)),
        Instruction::ANDIMM(dr, sr1, imm) => format!("AND {}, {}, {}", r(dr), r(sr1), offset(imm)),
        Instruction::NOT(dr, sr) => format!("NOT {}, {}", r(dr), r(sr)),

        Instruction::LD(dr, pc_offset) => format!("LD {}, {}", r(dr), offset(pc_offset)),
        Instruction::LDI(dr, pc_offset) => format!("LDI {}, {}", r(dr), offset(pc_offset)),
        Instruction::LEA(dr, pc_offset) => format!("LEA {}, {}", r(dr), offset(pc_offset)),
        Instruction::LDR(dr, base_r, off) => {
            format!("LDR {}, {}, {}", r(dr), r(base_r), offset(off))
        }

        Instruction::ST(sr, pc_offset) => format!("ST {}, {}", r(sr), offset(pc_offset)),
        Instruction::STI(sr, pc_offset) => format!("STI {}, {}", r(sr), offset(pc_offset)),
        Instruction::STR(sr, base_r, off) => {
            format!("STR {}, {}, {}", r(sr), r(base_r), offset(off))
        }

        Instruction::JSR(pc_offset) => format!("JSR {}", offset(pc_offset)),
        Instruction::JSRR(base_r) => format!("JSRR {}", r(base_r)),
        Instruction::JMP(Register::R7) => "RET".to_string(),
        Instruction::JMP(base_r) => format!("JMP {}", r(base_r)),

        Instruction::TRAP(TrapVector::Unknown(vector)) => format!("TRAP x{:02X}", vector),
        Instruction::TRAP(trap_vector) => {
            format!("TRAP x{:02X} ({:?})", trap_vector.vector(), trap_vector)
        }

        Instruction::RTI => "RTI (illegal)".to_string(),
        Instruction::RES => "RES (illegal)".to_string(),
    }
}

fn r(register: Register) -> String {
    format!("R{}", register as u8)
}

fn offset(value: u16) -> String {
    format!("#{}", value as i16)
}
