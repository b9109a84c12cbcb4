//! Armazenamento local temporário das imagens baixadas.
//!
//! O [`ImageStore`] baixa a imagem do quadrinho para um diretório local e
//! devolve um [`DownloadedImage`], um guard que apaga o arquivo quando sai
//! de escopo. O arquivo é removido tanto no sucesso quanto na falha da
//! publicação.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ComicwallError;

pub struct ImageStore {
    dir: PathBuf,
    client: Client,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            dir: dir.into(),
            client,
        }
    }

    /// Deriva o nome do arquivo a partir do último segmento não vazio do
    /// caminho da URL, já com percent-encoding decodificado.
    pub fn image_file_name(url: &str) -> Result<String, ComicwallError> {
        if let Ok(parsed) = Url::parse(url)
            && let Some(mut segments) = parsed.path_segments()
            && let Some(last) = segments.next_back()
            && !last.is_empty()
        {
            let decoded = urlencoding::decode(last)
                .map_err(|_| ComicwallError::BadImageUrl(url.to_string()))?;
            // Um separador codificado ("..%2F") não pode sair do diretório.
            if decoded.contains(['/', '\\']) {
                return Err(ComicwallError::BadImageUrl(url.to_string()));
            }
            return Ok(decoded.into_owned());
        }
        Err(ComicwallError::BadImageUrl(url.to_string()))
    }

    /// Baixa a imagem para `dir`, criando o diretório se necessário.
    pub async fn download(&self, url: &str) -> Result<DownloadedImage, ComicwallError> {
        let file_name = Self::image_file_name(url)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ComicwallError::Download {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        // O guard existe antes da escrita: uma gravação interrompida no meio
        // também deixa um arquivo para remover.
        let image = DownloadedImage {
            path: self.dir.join(&file_name),
        };
        tokio::fs::write(&image.path, &bytes).await?;
        Ok(image)
    }
}

/// Guard sobre o arquivo baixado: remove o arquivo no `Drop`, sem reclamar
/// se ele já tiver sumido.
#[derive(Debug)]
pub struct DownloadedImage {
    path: PathBuf,
}

impl DownloadedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DownloadedImage {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
