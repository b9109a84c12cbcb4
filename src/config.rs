//! Configuração do comicwall carregada a partir de `comicwall.toml`.
//!
//! A struct [`ComicwallConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis. As variáveis
//! de ambiente `VK_ACCESS_TOKEN` e `VK_GROUP_ID` têm precedência sobre o
//! arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::error::ComicwallError;

/// Configuração de nível superior carregada de `comicwall.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComicwallConfig {
    /// Token de acesso da comunidade VK.
    #[serde(default)]
    pub access_token: String,

    /// Identificador numérico do grupo VK (sem o sinal negativo).
    #[serde(default)]
    pub group_id: u64,

    /// Versão da API VK enviada em todas as chamadas.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Diretório onde as imagens ficam entre o download e a publicação.
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

// Valor padrão para a versão da API: "5.131".
fn default_api_version() -> String {
    "5.131".to_string()
}

// Valor padrão para o diretório de imagens: "images".
fn default_images_dir() -> String {
    "images".to_string()
}

impl Default for ComicwallConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            group_id: 0,
            api_version: default_api_version(),
            images_dir: default_images_dir(),
        }
    }
}

impl ComicwallConfig {
    /// Carrega a configuração de `comicwall.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let path = Path::new("comicwall.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<ComicwallConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variáveis de ambiente têm precedência sobre o arquivo de configuração.
        if let Ok(token) = std::env::var("VK_ACCESS_TOKEN")
            && !token.is_empty()
        {
            config.access_token = token;
        }
        if let Ok(group) = std::env::var("VK_GROUP_ID")
            && !group.is_empty()
        {
            config.group_id = group.parse::<u64>().map_err(|_| {
                ComicwallError::Config(format!("VK_GROUP_ID is not a number: {group}"))
            })?;
        }

        Ok(config)
    }

    /// Garante que as credenciais obrigatórias estão presentes antes de
    /// qualquer chamada de rede.
    pub fn validate(&self) -> Result<(), ComicwallError> {
        if self.access_token.is_empty() {
            return Err(ComicwallError::Config(
                "access_token is empty: set it in comicwall.toml or via VK_ACCESS_TOKEN"
                    .to_string(),
            ));
        }
        if self.group_id == 0 {
            return Err(ComicwallError::Config(
                "group_id is missing: set it in comicwall.toml or via VK_GROUP_ID".to_string(),
            ));
        }
        Ok(())
    }
}
