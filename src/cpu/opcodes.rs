// Opcode dispatch table
//
// A fixed 256-entry table mapping each opcode byte to its operation,
// addressing mode, base cycle count and page-cross penalty flag. The 151
// documented opcodes are filled in; every hole decodes as a 2-cycle
// NOP-equivalent that consumes only the opcode byte.
//
// https://www.masswerk.at/6502/6502_instruction_set.html

use super::addressing::AddressingMode;

/// The documented 6502 operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // Loads / stores
    Lda, Ldx, Ldy, Sta, Stx, Sty,
    // Transfers
    Tax, Tay, Txa, Tya, Tsx, Txs,
    // Stack
    Pha, Php, Pla, Plp,
    // Arithmetic
    Adc, Sbc,
    // Logical
    And, Ora, Eor,
    // Increments / decrements
    Inc, Dec, Inx, Iny, Dex, Dey,
    // Shifts / rotates
    Asl, Lsr, Rol, Ror,
    // Compares
    Cmp, Cpx, Cpy,
    // Bit test
    Bit,
    // Branches
    Bpl, Bmi, Bvc, Bvs, Bcc, Bcs, Bne, Beq,
    // Flag set/clear
    Clc, Sec, Cli, Sei, Clv, Cld, Sed,
    // Jumps / subroutines
    Jmp, Jsr, Rts, Rti,
    // Interrupt
    Brk,
    // No-op
    Nop,
}

/// One slot of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct OpcodeEntry {
    pub operation: Operation,
    pub mode: AddressingMode,
    /// Base cycle cost charged at fetch time
    pub cycles: u8,
    /// Whether a page-crossing addressing step costs one extra cycle
    pub page_cycle: bool,
    pub mnemonic: &'static str,
    /// False for the NOP-equivalent filling undocumented slots
    pub documented: bool,
}

const fn op(
    operation: Operation,
    mode: AddressingMode,
    cycles: u8,
    page_cycle: bool,
    mnemonic: &'static str,
) -> OpcodeEntry {
    OpcodeEntry {
        operation,
        mode,
        cycles,
        page_cycle,
        mnemonic,
        documented: true,
    }
}

/// Filler for undocumented opcodes: behaves as NOP, costs 2 cycles
const UNDOCUMENTED: OpcodeEntry = OpcodeEntry {
    operation: Operation::Nop,
    mode: AddressingMode::Implied,
    cycles: 2,
    page_cycle: false,
    mnemonic: "???",
    documented: false,
};

/// The fixed 256-entry opcode table
pub static OPCODE_TABLE: [OpcodeEntry; 256] = build_table();

#[rustfmt::skip]
const fn build_table() -> [OpcodeEntry; 256] {
    use AddressingMode::*;
    use Operation::*;

    let mut t = [UNDOCUMENTED; 256];

    // Loads
    t[0xA9] = op(Lda, Immediate,       2, false, "LDA");
    t[0xA5] = op(Lda, ZeroPage,        3, false, "LDA");
    t[0xB5] = op(Lda, ZeroPageX,       4, false, "LDA");
    t[0xAD] = op(Lda, Absolute,        4, false, "LDA");
    t[0xBD] = op(Lda, AbsoluteX,       4, true,  "LDA");
    t[0xB9] = op(Lda, AbsoluteY,       4, true,  "LDA");
    t[0xA1] = op(Lda, IndexedIndirect, 6, false, "LDA");
    t[0xB1] = op(Lda, IndirectIndexed, 5, true,  "LDA");
    t[0xA2] = op(Ldx, Immediate,       2, false, "LDX");
    t[0xA6] = op(Ldx, ZeroPage,        3, false, "LDX");
    t[0xB6] = op(Ldx, ZeroPageY,       4, false, "LDX");
    t[0xAE] = op(Ldx, Absolute,        4, false, "LDX");
    t[0xBE] = op(Ldx, AbsoluteY,       4, true,  "LDX");
    t[0xA0] = op(Ldy, Immediate,       2, false, "LDY");
    t[0xA4] = op(Ldy, ZeroPage,        3, false, "LDY");
    t[0xB4] = op(Ldy, ZeroPageX,       4, false, "LDY");
    t[0xAC] = op(Ldy, Absolute,        4, false, "LDY");
    t[0xBC] = op(Ldy, AbsoluteX,       4, true,  "LDY");

    // Stores
    t[0x85] = op(Sta, ZeroPage,        3, false, "STA");
    t[0x95] = op(Sta, ZeroPageX,       4, false, "STA");
    t[0x8D] = op(Sta, Absolute,        4, false, "STA");
    t[0x9D] = op(Sta, AbsoluteX,       5, false, "STA");
    t[0x99] = op(Sta, AbsoluteY,       5, false, "STA");
    t[0x81] = op(Sta, IndexedIndirect, 6, false, "STA");
    t[0x91] = op(Sta, IndirectIndexed, 6, false, "STA");
    t[0x86] = op(Stx, ZeroPage,        3, false, "STX");
    t[0x96] = op(Stx, ZeroPageY,       4, false, "STX");
    t[0x8E] = op(Stx, Absolute,        4, false, "STX");
    t[0x84] = op(Sty, ZeroPage,        3, false, "STY");
    t[0x94] = op(Sty, ZeroPageX,       4, false, "STY");
    t[0x8C] = op(Sty, Absolute,        4, false, "STY");

    // Transfers
    t[0xAA] = op(Tax, Implied, 2, false, "TAX");
    t[0xA8] = op(Tay, Implied, 2, false, "TAY");
    t[0x8A] = op(Txa, Implied, 2, false, "TXA");
    t[0x98] = op(Tya, Implied, 2, false, "TYA");
    t[0xBA] = op(Tsx, Implied, 2, false, "TSX");
    t[0x9A] = op(Txs, Implied, 2, false, "TXS");

    // Stack
    t[0x48] = op(Pha, Implied, 3, false, "PHA");
    t[0x08] = op(Php, Implied, 3, false, "PHP");
    t[0x68] = op(Pla, Implied, 4, false, "PLA");
    t[0x28] = op(Plp, Implied, 4, false, "PLP");

    // Arithmetic
    t[0x69] = op(Adc, Immediate,       2, false, "ADC");
    t[0x65] = op(Adc, ZeroPage,        3, false, "ADC");
    t[0x75] = op(Adc, ZeroPageX,       4, false, "ADC");
    t[0x6D] = op(Adc, Absolute,        4, false, "ADC");
    t[0x7D] = op(Adc, AbsoluteX,       4, true,  "ADC");
    t[0x79] = op(Adc, AbsoluteY,       4, true,  "ADC");
    t[0x61] = op(Adc, IndexedIndirect, 6, false, "ADC");
    t[0x71] = op(Adc, IndirectIndexed, 5, true,  "ADC");
    t[0xE9] = op(Sbc, Immediate,       2, false, "SBC");
    t[0xE5] = op(Sbc, ZeroPage,        3, false, "SBC");
    t[0xF5] = op(Sbc, ZeroPageX,       4, false, "SBC");
    t[0xED] = op(Sbc, Absolute,        4, false, "SBC");
    t[0xFD] = op(Sbc, AbsoluteX,       4, true,  "SBC");
    t[0xF9] = op(Sbc, AbsoluteY,       4, true,  "SBC");
    t[0xE1] = op(Sbc, IndexedIndirect, 6, false, "SBC");
    t[0xF1] = op(Sbc, IndirectIndexed, 5, true,  "SBC");

    // Logical
    t[0x29] = op(And, Immediate,       2, false, "AND");
    t[0x25] = op(And, ZeroPage,        3, false, "AND");
    t[0x35] = op(And, ZeroPageX,       4, false, "AND");
    t[0x2D] = op(And, Absolute,        4, false, "AND");
    t[0x3D] = op(And, AbsoluteX,       4, true,  "AND");
    t[0x39] = op(And, AbsoluteY,       4, true,  "AND");
    t[0x21] = op(And, IndexedIndirect, 6, false, "AND");
    t[0x31] = op(And, IndirectIndexed, 5, true,  "AND");
    t[0x09] = op(Ora, Immediate,       2, false, "ORA");
    t[0x05] = op(Ora, ZeroPage,        3, false, "ORA");
    t[0x15] = op(Ora, ZeroPageX,       4, false, "ORA");
    t[0x0D] = op(Ora, Absolute,        4, false, "ORA");
    t[0x1D] = op(Ora, AbsoluteX,       4, true,  "ORA");
    t[0x19] = op(Ora, AbsoluteY,       4, true,  "ORA");
    t[0x01] = op(Ora, IndexedIndirect, 6, false, "ORA");
    t[0x11] = op(Ora, IndirectIndexed, 5, true,  "ORA");
    t[0x49] = op(Eor, Immediate,       2, false, "EOR");
    t[0x45] = op(Eor, ZeroPage,        3, false, "EOR");
    t[0x55] = op(Eor, ZeroPageX,       4, false, "EOR");
    t[0x4D] = op(Eor, Absolute,        4, false, "EOR");
    t[0x5D] = op(Eor, AbsoluteX,       4, true,  "EOR");
    t[0x59] = op(Eor, AbsoluteY,       4, true,  "EOR");
    t[0x41] = op(Eor, IndexedIndirect, 6, false, "EOR");
    t[0x51] = op(Eor, IndirectIndexed, 5, true,  "EOR");

    // Increments / decrements
    t[0xE6] = op(Inc, ZeroPage,  5, false, "INC");
    t[0xF6] = op(Inc, ZeroPageX, 6, false, "INC");
    t[0xEE] = op(Inc, Absolute,  6, false, "INC");
    t[0xFE] = op(Inc, AbsoluteX, 7, false, "INC");
    t[0xC6] = op(Dec, ZeroPage,  5, false, "DEC");
    t[0xD6] = op(Dec, ZeroPageX, 6, false, "DEC");
    t[0xCE] = op(Dec, Absolute,  6, false, "DEC");
    t[0xDE] = op(Dec, AbsoluteX, 7, false, "DEC");
    t[0xE8] = op(Inx, Implied, 2, false, "INX");
    t[0xC8] = op(Iny, Implied, 2, false, "INY");
    t[0xCA] = op(Dex, Implied, 2, false, "DEX");
    t[0x88] = op(Dey, Implied, 2, false, "DEY");

    // Shifts / rotates
    t[0x0A] = op(Asl, Accumulator, 2, false, "ASL");
    t[0x06] = op(Asl, ZeroPage,    5, false, "ASL");
    t[0x16] = op(Asl, ZeroPageX,   6, false, "ASL");
    t[0x0E] = op(Asl, Absolute,    6, false, "ASL");
    t[0x1E] = op(Asl, AbsoluteX,   7, false, "ASL");
    t[0x4A] = op(Lsr, Accumulator, 2, false, "LSR");
    t[0x46] = op(Lsr, ZeroPage,    5, false, "LSR");
    t[0x56] = op(Lsr, ZeroPageX,   6, false, "LSR");
    t[0x4E] = op(Lsr, Absolute,    6, false, "LSR");
    t[0x5E] = op(Lsr, AbsoluteX,   7, false, "LSR");
    t[0x2A] = op(Rol, Accumulator, 2, false, "ROL");
    t[0x26] = op(Rol, ZeroPage,    5, false, "ROL");
    t[0x36] = op(Rol, ZeroPageX,   6, false, "ROL");
    t[0x2E] = op(Rol, Absolute,    6, false, "ROL");
    t[0x3E] = op(Rol, AbsoluteX,   7, false, "ROL");
    t[0x6A] = op(Ror, Accumulator, 2, false, "ROR");
    t[0x66] = op(Ror, ZeroPage,    5, false, "ROR");
    t[0x76] = op(Ror, ZeroPageX,   6, false, "ROR");
    t[0x6E] = op(Ror, Absolute,    6, false, "ROR");
    t[0x7E] = op(Ror, AbsoluteX,   7, false, "ROR");

    // Compares
    t[0xC9] = op(Cmp, Immediate,       2, false, "CMP");
    t[0xC5] = op(Cmp, ZeroPage,        3, false, "CMP");
    t[0xD5] = op(Cmp, ZeroPageX,       4, false, "CMP");
    t[0xCD] = op(Cmp, Absolute,        4, false, "CMP");
    t[0xDD] = op(Cmp, AbsoluteX,       4, true,  "CMP");
    t[0xD9] = op(Cmp, AbsoluteY,       4, true,  "CMP");
    t[0xC1] = op(Cmp, IndexedIndirect, 6, false, "CMP");
    t[0xD1] = op(Cmp, IndirectIndexed, 5, true,  "CMP");
    t[0xE0] = op(Cpx, Immediate, 2, false, "CPX");
    t[0xE4] = op(Cpx, ZeroPage,  3, false, "CPX");
    t[0xEC] = op(Cpx, Absolute,  4, false, "CPX");
    t[0xC0] = op(Cpy, Immediate, 2, false, "CPY");
    t[0xC4] = op(Cpy, ZeroPage,  3, false, "CPY");
    t[0xCC] = op(Cpy, Absolute,  4, false, "CPY");

    // Bit test
    t[0x24] = op(Bit, ZeroPage, 3, false, "BIT");
    t[0x2C] = op(Bit, Absolute, 4, false, "BIT");

    // Branches; taken/page-cross penalties are applied by the branch step
    t[0x10] = op(Bpl, Relative, 2, false, "BPL");
    t[0x30] = op(Bmi, Relative, 2, false, "BMI");
    t[0x50] = op(Bvc, Relative, 2, false, "BVC");
    t[0x70] = op(Bvs, Relative, 2, false, "BVS");
    t[0x90] = op(Bcc, Relative, 2, false, "BCC");
    t[0xB0] = op(Bcs, Relative, 2, false, "BCS");
    t[0xD0] = op(Bne, Relative, 2, false, "BNE");
    t[0xF0] = op(Beq, Relative, 2, false, "BEQ");

    // Flag set/clear
    t[0x18] = op(Clc, Implied, 2, false, "CLC");
    t[0x38] = op(Sec, Implied, 2, false, "SEC");
    t[0x58] = op(Cli, Implied, 2, false, "CLI");
    t[0x78] = op(Sei, Implied, 2, false, "SEI");
    t[0xB8] = op(Clv, Implied, 2, false, "CLV");
    t[0xD8] = op(Cld, Implied, 2, false, "CLD");
    t[0xF8] = op(Sed, Implied, 2, false, "SED");

    // Jumps / subroutines
    t[0x4C] = op(Jmp, Absolute, 3, false, "JMP");
    t[0x6C] = op(Jmp, Indirect, 5, false, "JMP");
    t[0x20] = op(Jsr, Absolute, 6, false, "JSR");
    t[0x60] = op(Rts, Implied,  6, false, "RTS");
    t[0x40] = op(Rti, Implied,  6, false, "RTI");

    // Interrupt and no-op
    t[0x00] = op(Brk, Implied, 7, false, "BRK");
    t[0xEA] = op(Nop, Implied, 2, false, "NOP");

    t
}
