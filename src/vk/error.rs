//! Tipos de erro para o cliente da API do VK.
//!
//! Define [`VkError`] com variantes para o objeto de erro da API, respostas
//! HTTP de falha, corpos fora do formato esperado e erros de rede ou de
//! leitura do arquivo de imagem. Usa `thiserror` para derivar `Display` e
//! `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com a API do VK ou com o servidor de
/// upload de uso único.
#[derive(Debug, Error)]
pub enum VkError {
    /// A API retornou um objeto de erro no corpo (`error_code`/`error_msg`),
    /// mesmo com status HTTP 200.
    #[error("VK API error {code}: {message}")]
    Api { code: i64, message: String },

    /// O servidor respondeu com status HTTP de falha (4xx/5xx).
    /// Contém o código de status e o corpo da resposta.
    #[error("VK request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// Corpo de resposta fora do formato esperado (ex.: upload sem o trio
    /// `server`/`photo`/`hash`, ou lista de fotos salvas vazia).
    #[error("VK returned an unexpected payload: {0}")]
    Unexpected(String),

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    /// Encapsula o erro original do `reqwest` via `#[from]`.
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Falha ao ler o arquivo de imagem para o upload multipart.
    #[error("could not read the photo file: {0}")]
    Io(#[from] std::io::Error),
}
