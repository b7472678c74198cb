//! This is a command-line front-end for picking and submitting locations via [liblandpass]
use crate::{cli::*, config::*};
use anyhow::{Context, Result};
use clap::Parser;
use liblandpass::{
    api::HttpApi,
    app::{App, UiEvent},
    headless::{HeadlessMap, HeadlessPage},
    page::Field,
    render::Markup,
};
use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

mod cli;
mod config;
mod session;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LANDPASS_LOG"))
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();
    let config_file = match args.config {
        Some(path) => path,
        None => config_file()?,
    };
    let cfg = Config::load_from_file(&config_file).await?;
    let server = args.server.unwrap_or_else(|| cfg.server.clone());
    debug!(?server, "using location server");

    let api = HttpApi::new(&server).with_context(|| format!("Unable to use server '{server}'"))?;
    let markup = match args.html {
        true => Markup::Html,
        false => Markup::Text,
    };
    let mut app = App::new(
        HeadlessMap::new(),
        HeadlessPage::new(),
        api,
        &cfg.client(markup),
    )?;

    match args.command {
        Commands::Submit {
            latitude,
            longitude,
            name,
        } => {
            let events = vec![
                UiEvent::Edit(Field::Latitude, latitude),
                UiEvent::Edit(Field::Longitude, longitude),
                UiEvent::Edit(Field::Name, name.unwrap_or_default()),
                UiEvent::SubmitPressed,
            ];
            let app = session::replay(app, events).await;
            println!("{}", app.page().result());
            print_saved_locations(app.page(), markup);
        }
        Commands::Locations => {
            app.handle(UiEvent::Loaded);
            app.settle().await;
            print_saved_locations(app.page(), markup);
        }
        Commands::Session { script } => {
            let script = match script {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read script '{}'", path.display()))?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };
            let events = session::parse_script(&script)?;
            let app = session::replay(app, events).await;
            println!("{}", app.page());
        }
    }
    Ok(())
}

fn print_saved_locations(page: &HeadlessPage, markup: Markup) {
    match markup {
        Markup::Html => println!("<ul>{}</ul>", page.saved_locations()),
        Markup::Text => println!("{}", page.saved_locations()),
    }
}
