//! This module contains the main entrypoint to the kite cli.

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use url::Url;

#[derive(Parser)]
#[clap(
	about = "Track and compare your machine learning experiments.",
	disable_help_subcommand = true,
	name = "kite",
	version
)]
enum Options {
	#[clap(name = "app")]
	App(AppOptions),
}

#[derive(Parser)]
#[clap(about = "run the app")]
#[clap(long_about = "run the experiment tracking web app")]
struct AppOptions {
	#[clap(long, env = "DATABASE_URL")]
	database_url: Option<Url>,
	#[clap(long, env = "DATABASE_POOL_SIZE")]
	database_max_connections: Option<u32>,
	#[clap(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[clap(long, env = "PORT", default_value = "8080")]
	port: u16,
	#[clap(long = "traces", env = "KITE_TRACES")]
	traces_enabled: bool,
	#[clap(long = "unified-charts", env = "KITE_UNIFIED_CHARTS")]
	unified_charts: bool,
}

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::App(options) => cli_app(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_app(options: AppOptions) -> Result<()> {
	let database_url = match options.database_url {
		Some(database_url) => database_url,
		None => default_database_url()?,
	};
	kite_app::run(kite_app::common::Options {
		database_url,
		database_max_connections: options.database_max_connections,
		host: options.host,
		port: options.port,
		traces_enabled: options.traces_enabled,
		unified_charts: options.unified_charts,
	})
}

fn default_database_url() -> Result<Url> {
	let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("failed to find the data directory"))?;
	let kite_dir = data_dir.join("kite");
	std::fs::create_dir_all(&kite_dir)?;
	let database_path = kite_dir.join("kite.db");
	let url = Url::parse(&format!("sqlite:{}", database_path.display()))?;
	Ok(url)
}
