//! Selector-dispatch idioms emitted by known compilers.
//!
//! Each idiom inspects a window of exactly [`WINDOW`] instructions and only
//! looks at opcodes; the immediate of the selector push is the sole value
//! read. The three idioms below disagree on the opcode at position 0 or 1,
//! so at most one of them can match a given window.

use ethernity_core::FunctionSelector;

use crate::opcode::Opcode;
use crate::parser::Instruction;

/// Number of instructions every idiom inspects.
pub const WINDOW: usize = 5;

/// A fixed instruction sequence that compares the call selector.
pub trait DispatchIdiom: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the selector if `window` (exactly [`WINDOW`] long) matches.
    fn match_window(&self, window: &[Instruction]) -> Option<FunctionSelector>;
}

/// `DUP1 PUSH<=4 <SELECTOR> EQ PUSHn <OFFSET> JUMPI`
///
/// The dominant solc dispatcher shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolcEqDispatch;

impl DispatchIdiom for SolcEqDispatch {
    fn name(&self) -> &'static str {
        "solc-eq"
    }

    fn match_window(&self, w: &[Instruction]) -> Option<FunctionSelector> {
        if w.len() < WINDOW {
            return None;
        }
        if w[0].is_op(Opcode::DUP1)
            && w[1].is_push_at_most(Opcode::PUSH4)
            && w[2].is_op(Opcode::EQ)
            && w[3].is_push()
            && w[4].is_op(Opcode::JUMPI)
        {
            return selector_from_immediate(&w[1].immediate);
        }
        None
    }
}

/// `PUSH<=4 <SELECTOR> DUP2 XOR PUSHn <OFFSET> JUMPI`
#[derive(Debug, Default, Clone, Copy)]
pub struct VyperXorDispatch;

impl DispatchIdiom for VyperXorDispatch {
    fn name(&self) -> &'static str {
        "vyper-xor"
    }

    fn match_window(&self, w: &[Instruction]) -> Option<FunctionSelector> {
        if w.len() < WINDOW {
            return None;
        }
        if w[0].is_push_at_most(Opcode::PUSH4)
            && w[1].is_op(Opcode::DUP2)
            && w[2].is_op(Opcode::XOR)
            && w[3].is_push()
            && w[4].is_op(Opcode::JUMPI)
        {
            return selector_from_immediate(&w[0].immediate);
        }
        None
    }
}

/// `PUSH<=4 <SELECTOR> PUSH 0 MLOAD EQ ISZERO`
///
/// Older vyper releases load the selector from memory slot zero. The zero
/// may be pushed with `PUSH1 0x00` or `PUSH0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VyperMloadDispatch;

impl DispatchIdiom for VyperMloadDispatch {
    fn name(&self) -> &'static str {
        "vyper-mload"
    }

    fn match_window(&self, w: &[Instruction]) -> Option<FunctionSelector> {
        if w.len() < WINDOW {
            return None;
        }
        if w[0].is_push_at_most(Opcode::PUSH4)
            && (w[1].is_op(Opcode::PUSH1) || w[1].is_op(Opcode::PUSH0))
            && w[2].is_op(Opcode::MLOAD)
            && w[3].is_op(Opcode::EQ)
            && w[4].is_op(Opcode::ISZERO)
        {
            return selector_from_immediate(&w[0].immediate);
        }
        None
    }
}

/// Left-pads a push immediate of at most 4 bytes into a selector.
///
/// `PUSH3 0xfdd58e` is how compilers encode selector `0x00fdd58e`.
pub fn selector_from_immediate(immediate: &[u8]) -> Option<FunctionSelector> {
    if immediate.is_empty() || immediate.len() > 4 {
        return None;
    }
    let mut selector = [0u8; 4];
    selector[4 - immediate.len()..].copy_from_slice(immediate);
    Some(selector)
}
