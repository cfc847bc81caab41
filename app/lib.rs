use self::common::{error::Error, Context, Options};
use backtrace::Backtrace;
use futures::FutureExt;
use hyper::{
	service::{make_service_fn, service_fn},
	Body, Method, Request, Response, StatusCode,
};
use std::{
	borrow::Cow, cell::RefCell, collections::BTreeMap, convert::Infallible,
	panic::AssertUnwindSafe, str::FromStr, sync::Arc,
};

mod api;
pub mod common;
mod layouts;
mod migrations;
mod pages;

#[allow(clippy::cognitive_complexity)]
async fn handle(request: Request<Body>, context: Arc<Context>) -> Response<Body> {
	let method = request.method().clone();
	let uri = request.uri().clone();
	let path_and_query = uri.path_and_query().unwrap();
	let path = path_and_query.path();
	let query = path_and_query.query();
	let path_components: Vec<_> = path.split('/').skip(1).collect();
	let search_params: Option<BTreeMap<String, String>> = query.map(|search_params| {
		url::form_urlencoded::parse(search_params.as_bytes())
			.into_owned()
			.collect()
	});
	let result = match (&method, path_components.as_slice()) {
		(&Method::GET, &["health"]) => self::api::health::get(&context, request).await,
		(&Method::POST, &["track"]) => self::api::track::post(&context, request).await,
		(&Method::GET, &[""]) => self::pages::index::get(&context, request).await,
		(&Method::POST, &[""]) => self::pages::index::post(&context, request).await,
		(&Method::GET, &["experiments", experiment_id, ""]) => {
			self::pages::experiments::_experiment_id::index::get(&context, request, experiment_id)
				.await
		}
		(&Method::POST, &["experiments", experiment_id, ""]) => {
			self::pages::experiments::_experiment_id::index::post(&context, request, experiment_id)
				.await
		}
		(&Method::GET, &["experiments", experiment_id, "runs", run_id, ""]) => {
			self::pages::experiments::_experiment_id::runs::_run_id::index::get(
				&context,
				request,
				experiment_id,
				run_id,
				search_params,
			)
			.await
		}
		(&Method::POST, &["experiments", experiment_id, "runs", run_id, ""]) => {
			self::pages::experiments::_experiment_id::runs::_run_id::index::post(
				&context,
				request,
				experiment_id,
				run_id,
			)
			.await
		}
		_ => Err(Error::NotFound.into()),
	};
	let response = match result {
		Ok(response) => response,
		Err(error) => {
			if let Some(error) = error.downcast_ref::<Error>() {
				match error {
					Error::BadRequest => Response::builder()
						.status(StatusCode::BAD_REQUEST)
						.body(Body::from("bad request"))
						.unwrap(),
					Error::NotFound => Response::builder()
						.status(StatusCode::NOT_FOUND)
						.body(Body::from("not found"))
						.unwrap(),
					Error::ServiceUnavailable => Response::builder()
						.status(StatusCode::SERVICE_UNAVAILABLE)
						.body(Body::from("service unavailable"))
						.unwrap(),
				}
			} else {
				eprintln!("{}", error);
				let body: Cow<str> = if cfg!(debug_assertions) {
					format!("{}", error).into()
				} else {
					"internal server error".into()
				};
				Response::builder()
					.status(StatusCode::INTERNAL_SERVER_ERROR)
					.body(Body::from(body))
					.unwrap()
			}
		}
	};
	eprintln!("{} {} {}", method, path, response.status());
	response
}

pub fn run(options: Options) -> anyhow::Result<()> {
	tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()
		.unwrap()
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> anyhow::Result<()> {
	// Configure the database pool.
	let database_url = options.database_url.to_string();
	let (pool_options, pool_max_connections) = if database_url.starts_with("sqlite:") {
		let pool_options = sqlx::any::AnyConnectOptions::from(
			sqlx::sqlite::SqliteConnectOptions::from_str(&database_url)?
				.create_if_missing(true)
				.foreign_keys(true)
				.journal_mode(sqlx::sqlite::SqliteJournalMode::Wal),
		);
		let pool_max_connections = options.database_max_connections.unwrap_or(1);
		(pool_options, pool_max_connections)
	} else if database_url.starts_with("postgres:") {
		let pool_options = sqlx::any::AnyConnectOptions::from(
			sqlx::postgres::PgConnectOptions::from_str(&database_url)?,
		);
		let pool_max_connections = options.database_max_connections.unwrap_or(10);
		(pool_options, pool_max_connections)
	} else {
		return Err(anyhow::anyhow!(
			"DATABASE_URL must be a sqlite or postgres database url"
		));
	};
	let pool = sqlx::any::AnyPoolOptions::new()
		.max_connections(pool_max_connections)
		.connect_with(pool_options)
		.await?;
	// Run any pending migrations.
	migrations::run(&pool).await?;
	// Install a panic hook that records the panic message and backtrace, so a
	// contract violation caught below can be reported with its backtrace.
	tokio::task_local! {
		static PANIC_MESSAGE_AND_BACKTRACE: RefCell<Option<(String, Backtrace)>>;
	}
	let hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(|panic_info| {
		let value = (panic_info.to_string(), Backtrace::new());
		PANIC_MESSAGE_AND_BACKTRACE.with(|panic_message_and_backtrace| {
			panic_message_and_backtrace.borrow_mut().replace(value);
		})
	}));
	let context = Arc::new(Context { options, pool });
	let service = make_service_fn(|_| {
		let context = context.clone();
		async move {
			Ok::<_, Infallible>(service_fn(move |request| {
				let method = request.method().to_owned();
				let path = request.uri().path_and_query().unwrap().path().to_owned();
				let context = context.clone();
				PANIC_MESSAGE_AND_BACKTRACE.scope(RefCell::new(None), async move {
					let response = AssertUnwindSafe(handle(request, context))
						.catch_unwind()
						.await
						.unwrap_or_else(|_| {
							let backtrace =
								PANIC_MESSAGE_AND_BACKTRACE.with(|panic_message_and_backtrace| {
									let panic_message_and_backtrace =
										panic_message_and_backtrace.borrow();
									let (message, backtrace) =
										panic_message_and_backtrace.as_ref().unwrap();
									format!("{}\n{:?}", message, backtrace)
								});
							eprintln!("{} {} 500", method, path);
							Response::builder()
								.status(StatusCode::INTERNAL_SERVER_ERROR)
								.body(Body::from(backtrace))
								.unwrap()
						});
					Ok::<_, Infallible>(response)
				})
			}))
		}
	});
	let addr = std::net::SocketAddr::new(context.options.host, context.options.port);
	let listener = std::net::TcpListener::bind(&addr)?;
	listener.set_nonblocking(true)?;
	eprintln!("serving on port {}", context.options.port);
	hyper::Server::from_tcp(listener)?.serve(service).await?;
	std::panic::set_hook(hook);
	Ok(())
}
