use super::page::{self, ExperimentRow, Props};
use crate::common::{
	experiments::{experiment_path, list_experiments},
	Context,
};
use anyhow::Result;
use chrono::prelude::*;
use hyper::{Body, Request, Response, StatusCode};

pub async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	let experiments = list_experiments(&context.pool).await?;
	let experiments = experiments
		.into_iter()
		.map(|experiment| {
			let created_at: DateTime<Utc> = Utc.timestamp(experiment.created_at, 0);
			ExperimentRow {
				href: experiment_path(experiment.id),
				id: experiment.id.to_string(),
				title: experiment.title,
				created_at: created_at.to_rfc3339(),
			}
		})
		.collect();
	let props = Props { experiments };
	let html = page::render(props);
	let response = Response::builder()
		.status(StatusCode::OK)
		.body(Body::from(html))
		.unwrap();
	Ok(response)
}
