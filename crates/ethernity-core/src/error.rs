use thiserror::Error;

/// Erros comuns da biblioteca Ethernity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Base de assinaturas ausente ou ilegível
    #[error("Base de assinaturas indisponível: {0}")]
    DatabaseUnavailable(String),

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Assinatura canônica malformada
    #[error("Assinatura inválida: {0}")]
    InvalidSignature(String),

    /// Tipo ABI desconhecido ou malformado
    #[error("Tipo inválido: {0}")]
    InvalidType(String),

    /// Seletor com tamanho incompatível
    #[error("Seletor de {expected} bytes esperado, recebido {got}")]
    InvalidSelectorLength { expected: usize, got: usize },

    /// Recurso não encontrado
    #[error("Não encontrado: {0}")]
    NotFound(String),
}

impl Error {
    /// Indica se o erro deve abortar a resolução inteira.
    ///
    /// Apenas a indisponibilidade da base é fatal; os demais erros afetam
    /// somente o candidato em processamento.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DatabaseUnavailable(_))
    }
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
