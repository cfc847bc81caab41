use super::page::{self, Props, RunRow};
use crate::common::{
	error::Error,
	experiments::{experiment_path, get_experiment},
	runs::{list_runs, run_path},
	Context,
};
use anyhow::Result;
use chrono::prelude::*;
use hyper::{Body, Request, Response, StatusCode};
use kite_id::Id;

pub async fn get(
	context: &Context,
	_request: Request<Body>,
	experiment_id: &str,
) -> Result<Response<Body>> {
	let experiment_id: Id = experiment_id.parse().map_err(|_| Error::NotFound)?;
	let experiment = get_experiment(&context.pool, experiment_id)
		.await?
		.ok_or(Error::NotFound)?;
	let runs = list_runs(&context.pool, experiment_id).await?;
	let runs = runs
		.into_iter()
		.map(|run| {
			let created_at: DateTime<Utc> = Utc.timestamp(run.created_at, 0);
			RunRow {
				href: run_path(run.experiment_id, run.id),
				id: run.id.to_string(),
				title: run.title,
				created_at: created_at.to_rfc3339(),
			}
		})
		.collect();
	let props = Props {
		base_path: experiment_path(experiment.id),
		title: experiment.title,
		runs,
	};
	let html = page::render(props);
	let response = Response::builder()
		.status(StatusCode::OK)
		.body(Body::from(html))
		.unwrap();
	Ok(response)
}
