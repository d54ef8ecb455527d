//! Ethernity Signatures
//!
//! Recovers function and event signatures from EVM runtime bytecode: the
//! code is decoded into instructions, scanned for compiler dispatch idioms
//! and log topics, and the raw selectors are resolved against signature
//! databases into a typed interface descriptor.

pub mod abi;
pub mod config;
pub mod database;
pub mod opcode;
pub mod parser;
pub mod resolver;
pub mod scanner;

pub use abi::{InterfaceDescriptor, Method, Event, Param, TypeDescriptor, ArrayDimension};
pub use config::{IdiomConfig, ResolverConfig};
pub use database::{JsonFileStore, MemoryStore};
pub use opcode::Opcode;
pub use parser::{parse_instructions, Instruction};
pub use resolver::{resolve, resolve_with_config, AbiResolver, FourByteResolver};
pub use scanner::{find_contract_signatures, ContractSignatures, SignatureScanner};

pub use ethernity_core::{Error, Result, SignatureStore};
