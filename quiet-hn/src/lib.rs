pub mod types;
pub mod hn_utils;
pub mod client;
pub mod resolver;
pub mod orchestrator;
pub mod cache;
pub mod refresher;
pub mod handler;
pub mod render;
pub mod config;
pub mod logging;
pub mod server;

pub use types::*;
pub use client::HnClient;
pub use resolver::ItemResolver;
pub use orchestrator::Orchestrator;
pub use cache::{CacheSnapshot, StoryCache};
pub use refresher::StoryRefresher;
pub use handler::{AppState, StorySource};
pub use render::HtmlRenderer;
pub use config::{Cli, Mode};
