use super::state::{
	fetch_experiment, fetch_run, DisplayMode, FetchFailureKind, PageState, RouteIdentity,
};
use super::{page, props};
use crate::common::{
	viewport::{get_viewport_width, LayoutMode},
	Context,
};
use anyhow::Result;
use hyper::{Body, Request, Response, StatusCode};
use std::collections::BTreeMap;

pub async fn get(
	context: &Context,
	request: Request<Body>,
	experiment_id: &str,
	run_id: &str,
	search_params: Option<BTreeMap<String, String>>,
) -> Result<Response<Body>> {
	let identity = RouteIdentity::new(experiment_id, run_id)?;
	let mut state = PageState::new(identity);
	// The two fetches are issued concurrently and complete independently.
	let (run_outcome, experiment_outcome) = futures::join!(
		fetch_run(&context.pool, identity),
		fetch_experiment(&context.pool, identity),
	);
	state.apply_run(identity, run_outcome);
	state.apply_experiment(identity, experiment_outcome);
	log_fetch_failures(&state);
	let layout_mode = LayoutMode::from_viewport_width(get_viewport_width(&request));
	let status = match state.display_mode() {
		DisplayMode::RunNotFound | DisplayMode::ExperimentNotFound => StatusCode::NOT_FOUND,
		_ => StatusCode::OK,
	};
	let props = props::props(&state, &context.options, layout_mode, &search_params);
	let html = page::render(props);
	let response = Response::builder()
		.status(status)
		.body(Body::from(html))
		.unwrap();
	Ok(response)
}

/// Failures other than not found render blank, so their detail goes to the
/// log instead of the page.
pub(super) fn log_fetch_failures(state: &PageState) {
	for failure in state.failures() {
		if failure.kind == FetchFailureKind::Other {
			eprintln!("run page fetch failed: {}", failure.message);
		}
	}
}
