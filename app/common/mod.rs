use url::Url;

pub mod cookies;
pub mod error;
pub mod experiments;
pub mod metrics;
pub mod runs;
pub mod topbar;
pub mod viewport;

pub struct Options {
	pub database_url: Url,
	pub database_max_connections: Option<u32>,
	pub host: std::net::IpAddr,
	pub port: u16,
	pub traces_enabled: bool,
	pub unified_charts: bool,
}

pub struct Context {
	pub options: Options,
	pub pool: sqlx::AnyPool,
}
