// Load and store instructions
//
// Loads move the operand into a register and set Z/N from it; stores
// write a register to the effective address and touch no flags.

use super::super::Cpu;
use crate::error::CoreResult;

impl Cpu {
    /// LDA - load the accumulator
    ///
    /// Flags: Z, N
    pub(crate) fn lda(&mut self) {
        self.a = self.operation_value as u8;
        self.update_zero_and_negative_flags(self.a);
    }

    /// LDX - load index X
    ///
    /// Flags: Z, N
    pub(crate) fn ldx(&mut self) {
        self.x = self.operation_value as u8;
        self.update_zero_and_negative_flags(self.x);
    }

    /// LDY - load index Y
    ///
    /// Flags: Z, N
    pub(crate) fn ldy(&mut self) {
        self.y = self.operation_value as u8;
        self.update_zero_and_negative_flags(self.y);
    }

    /// STA - store the accumulator
    pub(crate) fn sta(&mut self) -> CoreResult<()> {
        self.bus.write(self.effective_address, self.a)
    }

    /// STX - store index X
    pub(crate) fn stx(&mut self) -> CoreResult<()> {
        self.bus.write(self.effective_address, self.x)
    }

    /// STY - store index Y
    pub(crate) fn sty(&mut self) -> CoreResult<()> {
        self.bus.write(self.effective_address, self.y)
    }
}
