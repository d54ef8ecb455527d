/*!
 * Ethernity Types
 *
 * Tipos comuns usados em toda a workspace Ethernity
 */

use ethereum_types::H256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seletor de função: os 4 primeiros bytes do keccak da assinatura
pub type FunctionSelector = [u8; 4];

/// Tópico de evento: o keccak completo da assinatura
pub type EventTopic = H256;

/// Tipo de seletor recuperado do bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorKind {
    Function,
    Event,
}

impl SelectorKind {
    /// Tamanho do seletor em bytes
    pub fn byte_len(&self) -> usize {
        match self {
            SelectorKind::Function => 4,
            SelectorKind::Event => 32,
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorKind::Function => write!(f, "function"),
            SelectorKind::Event => write!(f, "event"),
        }
    }
}

/// Candidato a seletor encontrado pelo scanner
///
/// Não possui identidade além dos bytes: duplicatas são preservadas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: SelectorKind,
    pub bytes: Vec<u8>,
}

impl Candidate {
    pub fn function(selector: FunctionSelector) -> Self {
        Self { kind: SelectorKind::Function, bytes: selector.to_vec() }
    }

    pub fn event(topic: EventTopic) -> Self {
        Self { kind: SelectorKind::Event, bytes: topic.as_bytes().to_vec() }
    }

    /// Chave hexadecimal minúscula, sem prefixo, usada nas bases de assinaturas
    pub fn key(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0x{}", self.kind, self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_keys_are_lowercase_hex() {
        let c = Candidate::function([0xA9, 0x05, 0x9C, 0xBB]);
        assert_eq!(c.key(), "a9059cbb");
        assert_eq!(c.to_string(), "function 0xa9059cbb");
        assert_eq!(c.bytes.len(), c.kind.byte_len());

        let e = Candidate::event(H256::repeat_byte(0xab));
        assert_eq!(e.key().len(), 64);
        assert_eq!(e.bytes.len(), SelectorKind::Event.byte_len());
    }
}
