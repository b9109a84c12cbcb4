//! Interface de linha de comando do comicwall baseada em clap.
//!
//! Define a struct [`Cli`] com os subcomandos [`Command`] (post, latest).

use clap::{Parser, Subcommand};

/// comicwall — Publica quadrinhos xkcd no mural de um grupo VK.
#[derive(Debug, Parser)]
#[command(name = "comicwall", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Baixa um quadrinho e publica no mural do grupo.
    Post {
        /// Número do quadrinho. Sem ele, um número aleatório é sorteado.
        comic: Option<u32>,
    },

    /// Mostra o quadrinho mais recente sem publicar nada.
    Latest,
}
