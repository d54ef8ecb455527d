//! Recovers raw function selectors and event topics from decoded bytecode.

mod idioms;

use ethernity_core::{utils::format_h256, Candidate, EventTopic, FunctionSelector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::IdiomConfig;
use crate::opcode::Opcode;
use crate::parser::{parse_instructions, Instruction};

pub use idioms::{
    selector_from_immediate, DispatchIdiom, SolcEqDispatch, VyperMloadDispatch,
    VyperXorDispatch, WINDOW,
};

/// Raw signatures found in a contract, in bytecode order, duplicates kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSignatures {
    pub function_selectors: Vec<FunctionSelector>,
    pub event_topics: Vec<EventTopic>,
}

impl ContractSignatures {
    pub fn is_empty(&self) -> bool {
        self.function_selectors.is_empty() && self.event_topics.is_empty()
    }

    /// Function candidates first, then event candidates, each in scan order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.function_selectors
            .iter()
            .map(|s| Candidate::function(*s))
            .chain(self.event_topics.iter().map(|t| Candidate::event(*t)))
    }

    /// Selectors as `0x`-prefixed hex strings.
    pub fn function_selectors_hex(&self) -> Vec<String> {
        self.function_selectors
            .iter()
            .map(|s| format!("0x{}", hex::encode(s)))
            .collect()
    }

    /// Topics as `0x`-prefixed hex strings.
    pub fn event_topics_hex(&self) -> Vec<String> {
        self.event_topics.iter().map(format_h256).collect()
    }
}

/// Single-pass scanner over an instruction sequence.
pub struct SignatureScanner {
    idioms: Vec<Box<dyn DispatchIdiom>>,
}

impl SignatureScanner {
    /// Builds a scanner with the idioms enabled in `config`, in priority order.
    pub fn new(config: &IdiomConfig) -> Self {
        let mut idioms: Vec<Box<dyn DispatchIdiom>> = Vec::new();
        if config.solc_eq {
            idioms.push(Box::new(SolcEqDispatch));
        }
        if config.vyper_xor {
            idioms.push(Box::new(VyperXorDispatch));
        }
        if config.vyper_mload {
            idioms.push(Box::new(VyperMloadDispatch));
        }
        Self { idioms }
    }

    /// Appends an idiom after the built-in ones.
    pub fn with_idiom(mut self, idiom: Box<dyn DispatchIdiom>) -> Self {
        self.idioms.push(idiom);
        self
    }

    pub fn idiom_names(&self) -> Vec<&'static str> {
        self.idioms.iter().map(|i| i.name()).collect()
    }

    pub fn scan(&self, instructions: &[Instruction]) -> ContractSignatures {
        let mut result = ContractSignatures::default();
        // Not cleared after a LOG: later logs reuse the last pushed topic.
        let mut last_full_push: Option<EventTopic> = None;

        for (i, ins) in instructions.iter().enumerate() {
            if ins.is_op(Opcode::PUSH32) && ins.immediate.len() == 32 {
                last_full_push = Some(EventTopic::from_slice(&ins.immediate));
            }

            if ins.is_log() {
                if let Some(topic) = last_full_push {
                    trace!("{} at {:#x} tagged with {}", ins.opcode, ins.offset, format_h256(&topic));
                    result.event_topics.push(topic);
                }
            }

            if let Some(window) = instructions.get(i..i + WINDOW) {
                if let Some(selector) = self.match_window(window) {
                    result.function_selectors.push(selector);
                }
            }
        }

        debug!(
            "scanned {} instructions: {} selector candidates, {} topic candidates",
            instructions.len(),
            result.function_selectors.len(),
            result.event_topics.len()
        );
        result
    }

    fn match_window(&self, window: &[Instruction]) -> Option<FunctionSelector> {
        self.idioms.iter().find_map(|idiom| {
            let selector = idiom.match_window(window)?;
            trace!(
                "{} matched selector 0x{} at {:#x}",
                idiom.name(),
                hex::encode(selector),
                window[0].offset
            );
            Some(selector)
        })
    }
}

impl Default for SignatureScanner {
    fn default() -> Self {
        Self::new(&IdiomConfig::default())
    }
}

/// Decodes `code` and scans it with every known idiom.
pub fn find_contract_signatures(code: &[u8]) -> ContractSignatures {
    SignatureScanner::default().scan(&parse_instructions(code))
}
