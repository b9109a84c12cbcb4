//! Interface de terminal do comicwall — spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de progresso e `console` para
//! estilização com cores. O [`PostProgress`] acompanha visualmente as
//! etapas da publicação no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::orchestrator::PostReport;

/// Indicador visual de progresso para uma publicação no terminal.
///
/// Exibe um spinner animado enquanto as etapas avançam e uma mensagem
/// verde de confirmação quando o post entra no mural.
pub struct PostProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Estilo verde para mensagens de sucesso.
    green: Style,
}

impl PostProgress {
    /// Inicia o spinner com a mensagem da primeira etapa.
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
        }
    }

    /// Versão silenciosa para os testes do orquestrador.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
            green: Style::new().green().bold(),
        }
    }

    /// Atualiza a mensagem do spinner para a etapa atual.
    pub fn stage(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finaliza o spinner e exibe a confirmação da publicação.
    pub fn complete(&self, report: &PostReport) {
        self.pb.finish_and_clear();
        println!(
            "  {} Comic #{} posted to the wall (post {})",
            self.green.apply_to("✓"),
            report.comic,
            report.post_id
        );
    }

    /// Imprime o relatório da publicação formatado em JSON.
    pub fn print_report(&self, report: &PostReport) {
        println!();
        println!("{}", self.green.apply_to("─── Post Report ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_default()
        );
    }

    /// Limpa o spinner sem mensagem final. Usado no caminho de erro.
    pub fn abandon(&self) {
        self.pb.finish_and_clear();
    }
}
