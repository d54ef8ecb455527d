#![allow(dead_code)]

use ethernity_core::{utils::event_topic, SelectorKind};
use ethernity_signatures::{MemoryStore, Opcode};

/// Tiny bytecode assembler for hand-built fixtures.
#[derive(Default)]
pub struct Asm {
    code: Vec<u8>,
}

impl Asm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, op: Opcode) -> Self {
        self.code.push(op.0);
        self
    }

    /// `PUSHn data` with n = data.len().
    pub fn push(mut self, data: &[u8]) -> Self {
        assert!((1..=32).contains(&data.len()));
        self.code.push(Opcode::PUSH1.0 + data.len() as u8 - 1);
        self.code.extend_from_slice(data);
        self
    }

    /// `DUP1 PUSH4 sel EQ PUSH2 dest JUMPI`
    pub fn solc_dispatch(self, selector: [u8; 4], dest: u16) -> Self {
        self.op(Opcode::DUP1)
            .push(&selector)
            .op(Opcode::EQ)
            .push(&dest.to_be_bytes())
            .op(Opcode::JUMPI)
    }

    /// `PUSH32 topic PUSH1 0x20 PUSH1 0x00 LOGn`
    pub fn emit(self, topic: &[u8; 32], log: Opcode) -> Self {
        self.push(topic).push(&[0x20]).push(&[0x00]).op(log)
    }

    pub fn build(self) -> Vec<u8> {
        self.code
    }
}

pub const ERC20_FUNCTIONS: [&str; 6] = [
    "allowance(address,address)",
    "approve(address,uint256)",
    "balanceOf(address)",
    "totalSupply()",
    "transfer(address,uint256)",
    "transferFrom(address,address,uint256)",
];

pub const TRANSFER_EVENT: &str = "Transfer(address,address,uint256)";

pub fn selector(sig: &str) -> [u8; 4] {
    ethernity_core::utils::function_selector(sig)
}

pub fn topic(sig: &str) -> [u8; 32] {
    event_topic(sig).to_fixed_bytes()
}

/// Runtime code shaped like solc output for a minimal ERC-20.
pub fn erc20_bytecode() -> Vec<u8> {
    let mut asm = Asm::new()
        .push(&[0x80])
        .push(&[0x40])
        .op(Opcode::MSTORE)
        .push(&[0x04])
        .op(Opcode::CALLDATASIZE)
        .op(Opcode::LT)
        .push(&[0x01, 0xf0])
        .op(Opcode::JUMPI)
        .push(&[0x00])
        .op(Opcode::CALLDATALOAD)
        .push(&[0xe0])
        .op(Opcode::SHR);

    for (i, sig) in ERC20_FUNCTIONS.iter().enumerate() {
        asm = asm.solc_dispatch(selector(sig), 0x0100 + 0x10 * i as u16);
    }

    asm.op(Opcode::JUMPDEST)
        .push(&[0x00])
        .op(Opcode::DUP1)
        .op(Opcode::REVERT)
        .op(Opcode::JUMPDEST)
        .op(Opcode::CALLER)
        .emit(&topic(TRANSFER_EVENT), Opcode::LOG3)
        .op(Opcode::STOP)
        .build()
}

pub fn erc20_function_store() -> MemoryStore {
    MemoryStore::from_signatures(SelectorKind::Function, ERC20_FUNCTIONS)
}

pub fn erc20_event_store() -> MemoryStore {
    MemoryStore::from_signatures(SelectorKind::Event, [TRANSFER_EVENT])
}

/// Event entry carrying `indexed` annotations, keyed by the canonical topic.
pub fn annotated_event_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(
        &hex::encode(topic(TRANSFER_EVENT)),
        "Transfer(address indexed,address indexed,uint256)",
    );
    store
}
