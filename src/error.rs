use thiserror::Error;

use crate::vk::VkError;
use crate::xkcd::XkcdError;

#[derive(Debug, Error)]
pub enum ComicwallError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("There is no comic #{requested}: the latest comic is #{latest}")]
    ComicOutOfRange { requested: u32, latest: u32 },

    #[error("Cannot pick a random comic: the feed reports no published comics")]
    EmptyComicFeed,

    #[error("Comic image URL is not usable: {0}")]
    BadImageUrl(String),

    #[error("Image download failed with status {status}: {message}")]
    Download { status: u16, message: String },

    #[error("xkcd error: {0}")]
    Xkcd(#[from] XkcdError),

    #[error("VK error: {0}")]
    Vk(#[from] VkError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
