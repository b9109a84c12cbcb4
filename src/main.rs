mod cli;
mod config;
mod error;
mod images;
mod orchestrator;
mod ui;
mod vk;
mod xkcd;

use anyhow::Result;
use clap::Parser;
use console::Style;

use cli::{Cli, Command};
use config::ComicwallConfig;
use images::ImageStore;
use orchestrator::Orchestrator;
use ui::PostProgress;
use vk::VkClient;
use xkcd::XkcdClient;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Post { comic } => post(comic).await,
        Command::Latest => latest().await,
    };

    if let Err(err) = result {
        eprintln!("  {} {err}", Style::new().red().bold().apply_to("✗"));
        std::process::exit(1);
    }
}

async fn post(comic: Option<u32>) -> Result<()> {
    let config = ComicwallConfig::load()?;
    config.validate()?;

    let orchestrator = Orchestrator::new(
        XkcdClient::new(),
        VkClient::new(config.access_token, config.api_version),
        ImageStore::new(&config.images_dir),
        config.group_id,
    );

    let progress = PostProgress::start("Fetching the latest comic");
    match orchestrator.run(comic, &progress).await {
        Ok(report) => {
            progress.complete(&report);
            progress.print_report(&report);
            Ok(())
        }
        Err(err) => {
            progress.abandon();
            Err(err.into())
        }
    }
}

async fn latest() -> Result<()> {
    let comic = XkcdClient::new().get(None).await?;
    let bold = Style::new().bold();
    println!("{} #{}", bold.apply_to(&comic.title), comic.num);
    println!("{}", comic.img);
    println!("{}", comic.alt);
    Ok(())
}
