// Stack instructions
//
// The stack lives in the fixed page $0100-$01FF, indexed by S. Pushes
// write then decrement; pulls increment then read.

use super::super::{flags, Cpu};
use crate::error::CoreResult;

impl Cpu {
    /// PHA - push the accumulator
    pub(crate) fn pha(&mut self) -> CoreResult<()> {
        self.stack_push(self.a)
    }

    /// PHP - push the status register with B forced set
    pub(crate) fn php(&mut self) -> CoreResult<()> {
        self.stack_push(self.status | flags::BREAK)
    }

    /// PLA - pull the accumulator
    ///
    /// Flags: Z, N
    pub(crate) fn pla(&mut self) -> CoreResult<()> {
        self.a = self.stack_pull()?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// PLP - replace the status register from the stack
    pub(crate) fn plp(&mut self) -> CoreResult<()> {
        self.status = self.stack_pull()?;
        Ok(())
    }
}
