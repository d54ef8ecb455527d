/*!
 * Ethernity Traits
 *
 * Traits comuns usados em toda a workspace Ethernity
 */

use crate::error::Result;

/// Trait para bases de assinaturas (seletor hexadecimal -> assinatura canônica)
///
/// As chaves são o hexadecimal minúsculo, sem prefixo `0x`, dos bytes do
/// seletor. A base é somente leitura durante uma resolução.
pub trait SignatureStore: Send + Sync {
    /// Busca a assinatura canônica associada à chave.
    ///
    /// `Ok(None)` indica ausência; `Err` só deve ser retornado quando a
    /// própria base não pode ser acessada.
    fn lookup(&self, key: &str) -> Result<Option<String>>;

    /// Confirma que a base pode ser consultada.
    ///
    /// Chamado antes de qualquer busca; uma base ausente falha aqui mesmo
    /// que nenhum seletor daquele tipo seja encontrado no bytecode.
    fn check_available(&self) -> Result<()> {
        Ok(())
    }
}

impl<T: SignatureStore + ?Sized> SignatureStore for std::sync::Arc<T> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        (**self).lookup(key)
    }

    fn check_available(&self) -> Result<()> {
        (**self).check_available()
    }
}

impl<T: SignatureStore + ?Sized> SignatureStore for &T {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        (**self).lookup(key)
    }

    fn check_available(&self) -> Result<()> {
        (**self).check_available()
    }
}
