use crate::common::{
	error::{redirect, Error},
	experiments::{create_experiment, experiment_path},
	Context,
};
use anyhow::Result;
use chrono::prelude::*;
use hyper::{Body, Request, Response};
use kite_id::Id;

#[derive(serde::Deserialize)]
#[serde(tag = "action")]
enum Action {
	#[serde(rename = "create_experiment")]
	CreateExperiment(CreateExperimentAction),
}

#[derive(serde::Deserialize)]
struct CreateExperimentAction {
	title: String,
}

pub async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let data = hyper::body::to_bytes(request.body_mut())
		.await
		.map_err(|_| Error::BadRequest)?;
	let action: Action = serde_urlencoded::from_bytes(&data).map_err(|_| Error::BadRequest)?;
	match action {
		Action::CreateExperiment(action) => {
			let title = action.title.trim().to_owned();
			if title.is_empty() {
				return Err(Error::BadRequest.into());
			}
			let mut db = context
				.pool
				.begin()
				.await
				.map_err(|_| Error::ServiceUnavailable)?;
			let experiment_id = Id::new();
			create_experiment(&mut db, experiment_id, &title, Utc::now().timestamp()).await?;
			db.commit().await?;
			Ok(redirect(experiment_path(experiment_id)))
		}
	}
}
