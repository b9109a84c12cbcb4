//! Tipos de erro para o cliente do feed do xkcd.
//!
//! Define [`XkcdError`] com variantes para respostas de falha e erros de
//! rede. Usa `thiserror` para derivar `Display` e `Error` automaticamente a
//! partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao consultar o feed público do xkcd.
///
/// As variantes cobrem os dois cenários de falha:
/// - [`ApiError`](XkcdError::ApiError): qualquer status HTTP 4xx/5xx (por
///   exemplo, 404 para um quadrinho que não existe)
/// - [`NetworkError`](XkcdError::NetworkError): falha na camada de rede ou
///   corpo que não é o JSON esperado
#[derive(Debug, Error)]
pub enum XkcdError {
    /// O feed respondeu com um status HTTP de falha.
    /// Contém o código de status e o corpo da resposta.
    #[error("xkcd returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout) ou corpo
    /// fora do formato esperado. Encapsula o erro original do `reqwest`.
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
