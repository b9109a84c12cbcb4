//! Tipos de dados para o feed JSON público do xkcd.
//!
//! O endpoint `info.0.json` descreve um quadrinho; a desserialização ignora
//! os campos do feed que o fluxo de publicação não usa.

use serde::{Deserialize, Serialize};

/// Um quadrinho do xkcd, conforme retornado por `info.0.json`.
///
/// Apenas os campos consumidos pelo fluxo de publicação são mantidos:
/// o número sequencial, o título, a URL da imagem e o texto alternativo
/// (que vira a legenda do post).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comic {
    /// Número sequencial do quadrinho (o primeiro publicado é o 1).
    pub num: u32,
    /// Título do quadrinho.
    pub title: String,
    /// URL da imagem hospedada em `imgs.xkcd.com`.
    pub img: String,
    /// Texto alternativo; usado como legenda ao publicar.
    pub alt: String,
}
