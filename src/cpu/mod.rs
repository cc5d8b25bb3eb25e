// CPU module - MOS6502 interpreter core
//
// The NES CPU is a 6502 derivative running at ~1.79 MHz with the decimal
// mode disconnected. Execution here is *batched*: an instruction's full
// effect is applied on the tick at which it begins, and the remaining
// base cycles are idle bookkeeping (see `execute.rs`).

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod opcodes;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bus::CpuBus;
use crate::error::CoreResult;

/// Processor status flags (P register)
///
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// - N: negative (bit 7)
/// - V: overflow (bit 6)
/// - -: unused (bit 5)
/// - B: break command (bit 4)
/// - D: decimal mode (bit 3; settable but arithmetically inert on the NES)
/// - I: interrupt disable (bit 2)
/// - Z: zero (bit 1)
/// - C: carry (bit 0)
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000;
    pub const BREAK: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// Interrupt vector addresses
///
/// Fixed 16-bit little-endian pointers at the top of the address space.
pub mod vectors {
    /// NMI vector ($FFFA-$FFFB); delivery is an external collaborator
    pub const NMI: u16 = 0xFFFA;

    /// RESET vector ($FFFC-$FFFD), read during `Cpu::reset`
    pub const RESET: u16 = 0xFFFC;

    /// IRQ/BRK vector ($FFFE-$FFFF); in this core only BRK reaches it
    pub const IRQ: u16 = 0xFFFE;
}

/// The base of the fixed stack page $0100-$01FF
pub(crate) const STACK_BASE: u16 = 0x0100;

/// The 6502 CPU state
///
/// `new` leaves the registers at power-on defaults with no meaning
/// attached; the CPU is only defined once `reset` has loaded the program
/// counter from the reset vector. Clocking before `reset` is outside the
/// contract.
pub struct Cpu {
    /// Accumulator
    pub a: u8,
    /// Index register X
    pub x: u8,
    /// Index register Y
    pub y: u8,
    /// Stack pointer into the fixed page $0100-$01FF
    pub s: u8,
    /// Program counter
    pub pc: u16,
    /// Processor status flags
    pub status: u8,

    /// Opcode of the instruction currently in flight
    opcode: u8,
    /// Address targeted by the current instruction
    effective_address: u16,
    /// Value the current instruction operates on; wider than 8 bits
    /// because signed relative branch offsets land here
    operation_value: u16,
    /// Whether the addressing step crossed a page boundary
    page_crossed: bool,
    /// Ticks still owed by the instruction in flight
    remaining_cycles: u32,
    /// Total ticks performed; used to synchronize against the PPU
    cycle_count: u64,

    bus: CpuBus,
}

/// Side-effect-free copy of the CPU register state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub pc: u16,
    pub status: u8,
    pub opcode: u8,
    pub effective_address: u16,
    pub operation_value: u16,
    pub remaining_cycles: u32,
    pub cycle_count: u64,
}

impl Cpu {
    /// Connect the bus to a new CPU
    ///
    /// None of the registers carry meaning until `reset` runs.
    pub fn new(bus: CpuBus) -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            s: 0,
            pc: 0,
            status: 0,
            opcode: 0,
            effective_address: 0,
            operation_value: 0,
            page_crossed: false,
            remaining_cycles: 0,
            cycle_count: 0,
            bus,
        }
    }

    /// Perform the power-up/reset sequence
    ///
    /// Clears A/X/Y, points the stack at $FD, sets the interrupt-disable
    /// flag, loads the program counter from the 16-bit reset vector at
    /// $FFFC/$FFFD and charges the 7-tick start sequence.
    ///
    /// # Errors
    /// Surfaces bus faults from the vector reads.
    pub fn reset(&mut self) -> CoreResult<()> {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.s = 0xFD;
        self.status |= flags::INTERRUPT_DISABLE;

        let lo = self.bus.read(vectors::RESET)?;
        let hi = self.bus.read(vectors::RESET + 1)?;
        self.pc = (u16::from(hi) << 8) | u16::from(lo);

        // The reset line holds the core for a 7-cycle start sequence
        self.remaining_cycles += 7;
        self.cycle_count += 7;

        debug!("CPU reset, pc = ${:04X}", self.pc);
        Ok(())
    }

    // ========================================
    // Status flag helpers
    // ========================================

    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    #[inline]
    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    /// Set Z and N from a result byte; the pattern shared by loads,
    /// transfers and arithmetic
    #[inline]
    pub(crate) fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.update_flag(flags::ZERO, value == 0);
        self.update_flag(flags::NEGATIVE, value & 0x80 != 0);
    }

    // ========================================
    // Stack helpers
    // ========================================

    /// Push a byte; the stack grows downward through $0100-$01FF
    pub(crate) fn stack_push(&mut self, data: u8) -> CoreResult<()> {
        self.bus.write(STACK_BASE | u16::from(self.s), data)?;
        self.s = self.s.wrapping_sub(1);
        Ok(())
    }

    /// Pull a byte pushed by `stack_push`
    pub(crate) fn stack_pull(&mut self) -> CoreResult<u8> {
        self.s = self.s.wrapping_add(1);
        self.bus.read(STACK_BASE | u16::from(self.s))
    }

    // ========================================
    // Inspection
    // ========================================

    /// Ticks still owed by the instruction in flight
    pub fn remaining_cycles(&self) -> u32 {
        self.remaining_cycles
    }

    /// Total ticks performed since power-on
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// The opcode currently in flight
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// The CPU-side bus
    pub fn bus(&self) -> &CpuBus {
        &self.bus
    }

    /// Mutable access to the CPU-side bus
    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }

    /// Capture the register state without side effects
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            a: self.a,
            x: self.x,
            y: self.y,
            s: self.s,
            pc: self.pc,
            status: self.status,
            opcode: self.opcode,
            effective_address: self.effective_address,
            operation_value: self.operation_value,
            remaining_cycles: self.remaining_cycles,
            cycle_count: self.cycle_count,
        }
    }

    /// Restore the register state captured by `snapshot`
    pub fn restore(&mut self, snapshot: &CpuSnapshot) {
        self.a = snapshot.a;
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.s = snapshot.s;
        self.pc = snapshot.pc;
        self.status = snapshot.status;
        self.opcode = snapshot.opcode;
        self.effective_address = snapshot.effective_address;
        self.operation_value = snapshot.operation_value;
        self.remaining_cycles = snapshot.remaining_cycles;
        self.cycle_count = snapshot.cycle_count;
    }
}
