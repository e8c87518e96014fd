use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::instruction::Register::*;
use crate::state::State;
use crate::trap;

/// Executes one decoded instruction. `state.pc` must already point past the instruction, as it
/// does after a fetch: every PC-relative offset is taken from there.
pub fn execute(state: &mut State, instruction: Instruction) -> Result<()> {
    match instruction {
        // BR - Conditional Branch
        //
        //      |0 0 0 0|n|z|p|pc_offset_9      |
        //
        // Branches when any of the tested condition codes is currently set. BRnzp (or plain BR)
        // always branches; BR with no bits set never does.
        //
        //      BRzp LOOP    ; Branch to LOOP if the last result was zero or positive.
        Instruction::BR(mask, pc_offset) => {
            if mask.bits() & state.condition.bits() != 0 {
                state.pc = state.pc.wrapping_add(pc_offset);
            }
        }

        // ADD - Addition
        //
        //      |0 0 0 1|DR   |SR1  |0|0 0|SR2  |
        //      |0 0 0 1|DR   |SR1  |1|imm_5    |
        //
        // Bit [5] selects between SR2 and the sign-extended imm5. Wraps at 16 bits.
        //
        //      ADD R2, R3, R4 ; R2 <- R3 + R4
        //      ADD R2, R3, #7 ; R2 <- R3 + 7
        Instruction::ADD(dr, sr1, sr2) => {
            let value = state
                .registers
                .read(sr1)
                .wrapping_add(state.registers.read(sr2));

            state.registers.write(dr, value);
            state.update_flags(dr);
        }
        Instruction::ADDIMM(dr, sr1, immediate_value) => {
            let value = state.registers.read(sr1).wrapping_add(immediate_value);

            state.registers.write(dr, value);
            state.update_flags(dr);
        }

        // LD - Load
        //
        //      |0 0 1 0|DR   |pc_offset_9      |
        //
        //      LD R4, VALUE ; R4 <- mem[VALUE]
        Instruction::LD(dr, pc_offset) => {
            let address = state.pc.wrapping_add(pc_offset);
            let value = state.memory.read(address);

            state.registers.write(dr, value);
            state.update_flags(dr);
        }

        // ST - Store
        //
        //      |0 0 1 1|SR   |pc_offset_9      |
        //
        //      ST R4, HERE ; mem[HERE] <- R4
        Instruction::ST(sr, pc_offset) => {
            let address = state.pc.wrapping_add(pc_offset);

            state.memory.write(address, state.registers.read(sr));
        }

        // JSR - Jump to Subroutine
        // JSRR
        //
        //      |0 1 0 0|1|pc_offset_11         |
        //      |0 1 0 0|0|0 0|BaseR|0 0 0 0 0 0|
        //
        // R7 receives the incremented PC (the return linkage) in both forms. The target is read
        // before R7 is written, so `JSRR R7` jumps to the old R7.
        //
        //      JSR QUEUE    ; R7 <- return address; jump to QUEUE.
        //      JSRR R3      ; R7 <- return address; jump to the address in R3.
        Instruction::JSR(pc_offset) => {
            let temp = state.pc;
            state.pc = state.pc.wrapping_add(pc_offset);
            state.registers.write(R7, temp);
        }
        Instruction::JSRR(base_r) => {
            let temp = state.pc;
            state.pc = state.registers.read(base_r);
            state.registers.write(R7, temp);
        }

        // AND - Bit-wise Logical AND
        //
        //      |0 1 0 1|DR   |SR1  |0|0 0|SR2  |
        //      |0 1 0 1|DR   |SR1  |1|imm_5    |
        //
        //      AND R2, R3, R4 ; R2 <- R3 AND R4
        //      AND R2, R3, #7 ; R2 <- R3 AND 7
        Instruction::AND(dr, sr1, sr2) => {
            let value = state.registers.read(sr1) & state.registers.read(sr2);

            state.registers.write(dr, value);
            state.update_flags(dr);
        }
        Instruction::ANDIMM(dr, sr1, immediate_value) => {
            let value = state.registers.read(sr1) & immediate_value;

            state.registers.write(dr, value);
            state.update_flags(dr);
        }

        // LDR - Load Base+offset
        //
        //      |0 1 1 0|DR   |BaseR|offset_6   |
        //
        //      LDR R4, R2, #-5 ; R4 <- mem[R2 - 5]
        Instruction::LDR(dr, base_r, offset) => {
            let address = state.registers.read(base_r).wrapping_add(offset);
            let value = state.memory.read(address);

            state.registers.write(dr, value);
            state.update_flags(dr);
        }

        // STR - Store Base+offset
        //
        //      |0 1 1 1|SR   |BaseR|offset_6   |
        //
        //      STR R4, R2, #5 ; mem[R2 + 5] <- R4
        Instruction::STR(sr, base_r, offset) => {
            let address = state.registers.read(base_r).wrapping_add(offset);
            let value = state.registers.read(sr);

            state.memory.write(address, value);
        }

        // NOT - Bit-Wise Complement
        //
        //      |1 0 0 1|DR   |SR   |1|1 1 1 1 1|
        //
        //      NOT R4, R2 ; R4 <- NOT(R2)
        Instruction::NOT(dr, sr) => {
            state.registers.write(dr, !state.registers.read(sr));
            state.update_flags(dr);
        }

        // LDI - Load Indirect
        //
        //      |1 0 1 0|DR   |pc_offset_9      |
        //
        // The word at PC + offset is the address of the value.
        //
        //      LDI R4, ONEMORE ; R4 <- mem[mem[ONEMORE]]
        Instruction::LDI(dr, pc_offset) => {
            let address = state.memory.read(state.pc.wrapping_add(pc_offset));
            let value = state.memory.read(address);

            state.registers.write(dr, value);
            state.update_flags(dr);
        }

        // STI - Store Indirect
        //
        //      |1 0 1 1|SR   |pc_offset_9      |
        //
        //      STI R4, NOT_HERE ; mem[mem[NOT_HERE]] <- R4
        Instruction::STI(sr, pc_offset) => {
            let address = state.memory.read(state.pc.wrapping_add(pc_offset));

            state.memory.write(address, state.registers.read(sr));
        }

        // JMP - Jump
        // RET - Return from Subroutine
        //
        //      |1 1 0 0|0 0 0|BaseR|0 0 0 0 0 0|
        //      |1 1 0 0|0 0 0|1 1 1|0 0 0 0 0 0|
        //
        // RET is JMP R7.
        Instruction::JMP(base_r) => {
            state.pc = state.registers.read(base_r);
        }

        // LEA - Load Effective Address
        //
        //      |1 1 1 0|DR   |pc_offset_9      |
        //
        // Memory is not read: the address itself lands in DR.
        //
        //      LEA R4, TARGET ; R4 <- address of TARGET.
        Instruction::LEA(dr, pc_offset) => {
            state.registers.write(dr, state.pc.wrapping_add(pc_offset));
            state.update_flags(dr);
        }

        // TRAP - System Call
        //
        //      |1 1 1 1|0 0 0 0|trap_vector_8  |
        //
        // R7 receives the incremented PC, then the service routine runs on the host.
        //
        //      TRAP x23    ; IN
        Instruction::TRAP(trap_vector) => {
            state.registers.write(R7, state.pc);
            trap::dispatch(state, trap_vector)?;
        }

        // RTI - Return from Interrupt
        // RES - Reserved
        //
        // Neither has a meaning on this machine; running one is fatal.
        Instruction::RTI | Instruction::RES => {
            let address = state.pc.wrapping_sub(1);

            return Err(Error::IllegalOpcode {
                opcode: instruction.opcode(),
                instruction: state.memory.peek(address),
                address,
            });
        }
    }

    Ok(())
}
