// Shift and rotate instructions
//
// The shifted-out bit lands in carry before the shift result is written
// back, either to the accumulator or to the effective address.

use super::super::opcodes::OPCODE_TABLE;
use super::super::{flags, Cpu};
use crate::cpu::addressing::AddressingMode;
use crate::error::CoreResult;

impl Cpu {
    /// Whether the in-flight instruction runs in accumulator mode
    fn accumulator_mode(&self) -> bool {
        OPCODE_TABLE[self.opcode as usize].mode == AddressingMode::Accumulator
    }

    /// Write a shift result to A or back to memory, and set Z/N
    fn write_shift_result(&mut self, result: u8) -> CoreResult<()> {
        if self.accumulator_mode() {
            self.a = result;
        } else {
            self.bus.write(self.effective_address, result)?;
        }
        self.update_zero_and_negative_flags(result);
        Ok(())
    }

    /// ASL - arithmetic shift left; bit 7 into carry
    ///
    /// Flags: C, Z, N
    pub(crate) fn asl(&mut self) -> CoreResult<()> {
        let value = self.operation_value as u8;
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.write_shift_result(value << 1)
    }

    /// LSR - logical shift right; bit 0 into carry
    ///
    /// Flags: C, Z, N (N always clears)
    pub(crate) fn lsr(&mut self) -> CoreResult<()> {
        let value = self.operation_value as u8;
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.write_shift_result(value >> 1)
    }

    /// ROL - rotate left through carry; old carry into bit 0
    ///
    /// Flags: C, Z, N
    pub(crate) fn rol(&mut self) -> CoreResult<()> {
        let value = self.operation_value as u8;
        let carry_in = u8::from(self.get_flag(flags::CARRY));
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.write_shift_result((value << 1) | carry_in)
    }

    /// ROR - rotate right through carry; old carry into bit 7
    ///
    /// Flags: C, Z, N
    pub(crate) fn ror(&mut self) -> CoreResult<()> {
        let value = self.operation_value as u8;
        let carry_in = u8::from(self.get_flag(flags::CARRY));
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.write_shift_result((value >> 1) | (carry_in << 7))
    }
}
