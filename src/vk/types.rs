//! Tipos de dados para a API do VK e seu envelope de resposta.
//!
//! As chamadas a `api.vk.com/method/*` respondem `{"response": ...}` em caso
//! de sucesso ou `{"error": {"error_code", "error_msg"}}` em caso de falha;
//! [`VkEnvelope`] decodifica os dois formatos de maneira uniforme. O POST
//! para o servidor de upload é a exceção: o corpo é o trio bruto
//! [`UploadedPhoto`], sem envelope.

use serde::{Deserialize, Serialize};

use super::error::VkError;

/// Envelope de resposta dos métodos da API do VK.
#[derive(Debug, Deserialize)]
pub struct VkEnvelope<T> {
    /// Carga útil, presente em caso de sucesso.
    pub response: Option<T>,
    /// Objeto de erro reportado pela API, presente em caso de falha.
    pub error: Option<VkApiError>,
}

impl<T> VkEnvelope<T> {
    /// Converte o envelope em `Result`, cobrindo também o caso degenerado em
    /// que nem `response` nem `error` estão presentes.
    pub fn into_result(self) -> Result<T, VkError> {
        if let Some(error) = self.error {
            return Err(VkError::Api {
                code: error.error_code,
                message: error.error_msg,
            });
        }
        self.response
            .ok_or_else(|| VkError::Unexpected("response carried no payload".to_string()))
    }
}

/// Objeto de erro retornado dentro do envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkApiError {
    /// Código numérico do erro (ex.: 5 para autorização inválida).
    pub error_code: i64,
    /// Mensagem legível do erro.
    pub error_msg: String,
}

/// Resposta de `photos.getWallUploadServer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadServer {
    /// URL de upload de uso único, com escopo do grupo alvo.
    pub upload_url: String,
}

/// Trio efêmero devolvido pelo servidor de upload.
///
/// Consumido imediatamente por `photos.saveWallPhoto`; nunca persiste nem é
/// reutilizado entre execuções.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedPhoto {
    pub server: i64,
    pub photo: String,
    pub hash: String,
}

/// Foto registrada no álbum da parede do grupo por `photos.saveWallPhoto`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPhoto {
    pub id: i64,
    pub owner_id: i64,
}

impl SavedPhoto {
    /// String de anexo no formato `photo{owner_id}_{id}` esperado por
    /// `wall.post`. Para fotos de grupo o `owner_id` é negativo.
    pub fn attachment(&self) -> String {
        format!("photo{}_{}", self.owner_id, self.id)
    }
}

/// Resposta de `wall.post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallPost {
    pub post_id: i64,
}

/// Resultado consolidado do pipeline de publicação.
#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub media_id: i64,
    pub owner_id: i64,
    pub post_id: i64,
}

impl PublishedPost {
    /// Mesmo formato de anexo de [`SavedPhoto::attachment`], para o resumo
    /// final da execução.
    pub fn attachment(&self) -> String {
        format!("photo{}_{}", self.owner_id, self.media_id)
    }
}
