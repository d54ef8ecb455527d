/*!
 * Ethernity Utils
 *
 * Utilitários comuns usados em toda a workspace Ethernity
 */

use ethereum_types::H256;
use tiny_keccak::{Hasher, Keccak};

use crate::error::{Error, Result};
use crate::types::FunctionSelector;

/// Formata um H256 para exibição
pub fn format_h256(hash: &H256) -> String {
    format!("0x{:x}", hash)
}

/// Remove o prefixo `0x`/`0X`, se presente
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Normaliza uma chave de seletor: sem prefixo, minúscula e sem espaços
pub fn normalize_selector_key(key: &str) -> String {
    strip_hex_prefix(key.trim()).to_ascii_lowercase()
}

/// Decodifica bytes a partir de texto hexadecimal, com ou sem prefixo
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = strip_hex_prefix(input.trim());
    hex::decode(trimmed).map_err(|e| Error::DecodeError(format!("hex inválido: {e}")))
}

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

/// Calcula o seletor de função de uma assinatura canônica
pub fn function_selector(signature: &str) -> FunctionSelector {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Calcula o tópico de evento de uma assinatura canônica
pub fn event_topic(signature: &str) -> H256 {
    H256::from(keccak256(signature.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_selectors() {
        assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(function_selector("approve(address,uint256)"), [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(function_selector("totalSupply()"), [0x18, 0x16, 0x0d, 0xdd]);
    }

    #[test]
    fn known_event_topic() {
        let topic = event_topic("Transfer(address,address,uint256)");
        assert_eq!(
            format_h256(&topic),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn hex_helpers() {
        assert_eq!(normalize_selector_key(" 0xA9059CBB "), "a9059cbb");
        assert_eq!(decode_hex("0x6001").unwrap(), vec![0x60, 0x01]);
        assert_eq!(decode_hex("6001\n").unwrap(), vec![0x60, 0x01]);
        assert!(matches!(decode_hex("0xzz"), Err(Error::DecodeError(_))));
        assert!(decode_hex("").unwrap().is_empty());
    }
}
