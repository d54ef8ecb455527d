use core::fmt;
use std::fmt::Write as _;

use ethernity_core::{utils::decode_hex, Result};
use serde::{Deserialize, Serialize};

use crate::opcode::Opcode;

/// Decoded instruction from bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    /// Push immediate; empty for every other opcode. Shorter than the push
    /// width only when the code ends mid-immediate.
    pub immediate: Vec<u8>,
    /// Program counter of the opcode byte.
    pub offset: usize,
}

impl Instruction {
    pub fn is_op(&self, op: Opcode) -> bool {
        self.opcode == op
    }

    pub fn is_push(&self) -> bool {
        self.opcode.is_push()
    }

    /// True for `PUSH1..=width`, e.g. `is_push_at_most(Opcode::PUSH4)`.
    pub fn is_push_at_most(&self, width: Opcode) -> bool {
        self.is_push() && self.opcode <= width
    }

    pub fn is_log(&self) -> bool {
        self.opcode.is_log()
    }

    pub fn is_halt(&self) -> bool {
        self.opcode.is_halt()
    }

    /// Bytes this instruction occupies in the code stream.
    pub fn size(&self) -> usize {
        1 + self.immediate.len()
    }

    /// Offset of the instruction that follows this one.
    pub fn next_offset(&self) -> usize {
        self.offset + self.size()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}: {}", self.offset, self.opcode)?;
        if !self.immediate.is_empty() {
            write!(f, " 0x{}", hex::encode(&self.immediate))?;
        }
        Ok(())
    }
}

/// Decodes raw bytecode into a list of instructions.
///
/// Never fails: a push whose immediate runs past the end of `code` keeps
/// whatever bytes remain.
pub fn parse_instructions(code: &[u8]) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(code.len());
    let mut i = 0;
    while i < code.len() {
        let opcode = Opcode(code[i]);
        let end = core::cmp::min(i + 1 + opcode.push_size(), code.len());
        let immediate = code[i + 1..end].to_vec();
        instructions.push(Instruction { opcode, immediate, offset: i });
        i = end;
    }
    instructions
}

/// Decodes hex-encoded bytecode (optional `0x` prefix).
pub fn parse_hex(code: &str) -> Result<Vec<Instruction>> {
    let bytes = decode_hex(code)?;
    Ok(parse_instructions(&bytes))
}

/// Renders one instruction per line.
pub fn disassemble(code: &[u8]) -> String {
    let mut out = String::new();
    for ins in parse_instructions(code) {
        let _ = writeln!(out, "{ins}");
    }
    out
}
