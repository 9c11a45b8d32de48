use clap::Parser;
use cli::Cli;
use color_eyre::Result;

use crate::app::App;

mod action;
mod api;
mod app;
mod cli;
mod components;
mod config;
mod constants;
mod errors;
mod logging;
mod movie;
mod state;
mod tui;
mod util;

#[tokio::main]
async fn main() -> Result<()> {
    crate::errors::init()?;
    crate::logging::init()?;

    let args = Cli::parse();
    let mut app = App::new(&args)?;
    app.run().await?;
    Ok(())
}
