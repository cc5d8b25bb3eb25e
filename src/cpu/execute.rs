// Batched execution loop
//
// `clock()` is the CPU's single public tick. Execution is batched: when no
// cycles are owed, the next instruction is fetched, decoded through the
// opcode table, and executed in full; its base cycle count (plus any
// page-cross or branch penalty) becomes the debt that subsequent ticks
// pay down one at a time. The observable effect of an instruction is
// therefore applied on the tick at which it begins.

use log::warn;

use super::opcodes::{Operation, OPCODE_TABLE};
use super::Cpu;
use crate::error::CoreResult;

impl Cpu {
    /// Perform one CPU tick
    ///
    /// # Errors
    /// A CPU fault is always a bus fault surfaced from the fetch,
    /// addressing or operation step. On error the tick loop should stop;
    /// the faulting instruction's effects may be partially applied.
    pub fn clock(&mut self) -> CoreResult<()> {
        if self.remaining_cycles == 0 {
            self.opcode = self.bus.read(self.pc)?;
            self.pc = self.pc.wrapping_add(1);

            let entry = &OPCODE_TABLE[self.opcode as usize];
            if !entry.documented {
                warn!(
                    "undocumented opcode ${:02X} at ${:04X}; executing as NOP",
                    self.opcode,
                    self.pc.wrapping_sub(1)
                );
            }

            self.remaining_cycles += u32::from(entry.cycles);
            self.page_crossed = false;

            self.run_addressing_mode(entry.mode)?;
            if self.page_crossed && entry.page_cycle {
                self.remaining_cycles += 1;
            }

            self.run_operation(entry.operation)?;
        }

        self.remaining_cycles -= 1;
        self.cycle_count += 1;
        Ok(())
    }

    /// Dispatch the decoded operation
    fn run_operation(&mut self, operation: Operation) -> CoreResult<()> {
        match operation {
            // Loads / stores
            Operation::Lda => self.lda(),
            Operation::Ldx => self.ldx(),
            Operation::Ldy => self.ldy(),
            Operation::Sta => self.sta()?,
            Operation::Stx => self.stx()?,
            Operation::Sty => self.sty()?,

            // Transfers
            Operation::Tax => self.tax(),
            Operation::Tay => self.tay(),
            Operation::Txa => self.txa(),
            Operation::Tya => self.tya(),
            Operation::Tsx => self.tsx(),
            Operation::Txs => self.txs(),

            // Stack
            Operation::Pha => self.pha()?,
            Operation::Php => self.php()?,
            Operation::Pla => self.pla()?,
            Operation::Plp => self.plp()?,

            // Arithmetic
            Operation::Adc => self.adc(),
            Operation::Sbc => self.sbc(),

            // Logical
            Operation::And => self.and(),
            Operation::Ora => self.ora(),
            Operation::Eor => self.eor(),

            // Increments / decrements
            Operation::Inc => self.inc()?,
            Operation::Dec => self.dec()?,
            Operation::Inx => self.inx(),
            Operation::Iny => self.iny(),
            Operation::Dex => self.dex(),
            Operation::Dey => self.dey(),

            // Shifts / rotates
            Operation::Asl => self.asl()?,
            Operation::Lsr => self.lsr()?,
            Operation::Rol => self.rol()?,
            Operation::Ror => self.ror()?,

            // Compares
            Operation::Cmp => self.cmp(),
            Operation::Cpx => self.cpx(),
            Operation::Cpy => self.cpy(),

            // Bit test
            Operation::Bit => self.bit(),

            // Branches
            Operation::Bpl => self.bpl(),
            Operation::Bmi => self.bmi(),
            Operation::Bvc => self.bvc(),
            Operation::Bvs => self.bvs(),
            Operation::Bcc => self.bcc(),
            Operation::Bcs => self.bcs(),
            Operation::Bne => self.bne(),
            Operation::Beq => self.beq(),

            // Flag set/clear
            Operation::Clc => self.clc(),
            Operation::Sec => self.sec(),
            Operation::Cli => self.cli(),
            Operation::Sei => self.sei(),
            Operation::Clv => self.clv(),
            Operation::Cld => self.cld(),
            Operation::Sed => self.sed(),

            // Jumps / subroutines
            Operation::Jmp => self.jmp(),
            Operation::Jsr => self.jsr()?,
            Operation::Rts => self.rts()?,
            Operation::Rti => self.rti()?,

            // Interrupt and no-op
            Operation::Brk => self.brk()?,
            Operation::Nop => self.nop(),
        }
        Ok(())
    }

    /// Format a one-line trace of the instruction at pc
    ///
    /// `PC  bytes  MNEMONIC operand  A:.. X:.. Y:.. P:.. SP:.. CYC:..`
    ///
    /// Reads go through the bus's peek path, so tracing never perturbs
    /// PPU register state; operands are shown as written, without
    /// dereferencing memory.
    pub fn trace_line(&self) -> String {
        let opcode = self.bus.peek(self.pc);
        let entry = &OPCODE_TABLE[opcode as usize];

        let byte2 = self.bus.peek(self.pc.wrapping_add(1));
        let byte3 = self.bus.peek(self.pc.wrapping_add(2));

        let hex_bytes = match entry.mode.operand_bytes() {
            0 => format!("{:02X}      ", opcode),
            1 => format!("{:02X} {:02X}   ", opcode, byte2),
            _ => format!("{:02X} {:02X} {:02X}", opcode, byte2, byte3),
        };

        let disassembly = self.disassemble_operand(entry, byte2, byte3);

        format!(
            "{:04X}  {}  {:<14}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.s,
            self.cycle_count
        )
    }

    fn disassemble_operand(
        &self,
        entry: &super::opcodes::OpcodeEntry,
        byte2: u8,
        byte3: u8,
    ) -> String {
        use super::addressing::AddressingMode;

        let mnemonic = entry.mnemonic;
        match entry.mode {
            AddressingMode::Implied => mnemonic.to_string(),
            AddressingMode::Accumulator => format!("{} A", mnemonic),
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => format!("{} ${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPageX => format!("{} ${:02X},X", mnemonic, byte2),
            AddressingMode::ZeroPageY => format!("{} ${:02X},Y", mnemonic, byte2),
            AddressingMode::Relative => {
                let target = self
                    .pc
                    .wrapping_add(2)
                    .wrapping_add(byte2 as i8 as i16 as u16);
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                format!("{} ${:04X}", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::AbsoluteX => {
                format!("{} ${:04X},X", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::AbsoluteY => {
                format!("{} ${:04X},Y", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::Indirect => {
                format!("{} (${:04X})", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::IndexedIndirect => format!("{} (${:02X},X)", mnemonic, byte2),
            AddressingMode::IndirectIndexed => format!("{} (${:02X}),Y", mnemonic, byte2),
        }
    }
}
