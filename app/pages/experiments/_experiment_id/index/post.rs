use crate::common::{
	error::{redirect, Error},
	experiments::experiment_path,
	runs::delete_run,
	Context,
};
use anyhow::Result;
use hyper::{Body, Request, Response};
use kite_id::Id;
use sqlx::Row;

#[derive(serde::Deserialize)]
#[serde(tag = "action")]
enum Action {
	#[serde(rename = "delete_run")]
	DeleteRun(DeleteRunAction),
}

#[derive(serde::Deserialize)]
struct DeleteRunAction {
	run_id: String,
}

pub async fn post(
	context: &Context,
	mut request: Request<Body>,
	experiment_id: &str,
) -> Result<Response<Body>> {
	let experiment_id: Id = experiment_id.parse().map_err(|_| Error::NotFound)?;
	let data = hyper::body::to_bytes(request.body_mut())
		.await
		.map_err(|_| Error::BadRequest)?;
	let action: Action = serde_urlencoded::from_bytes(&data).map_err(|_| Error::BadRequest)?;
	match action {
		Action::DeleteRun(action) => {
			let run_id: Id = action.run_id.parse().map_err(|_| Error::NotFound)?;
			let mut db = context
				.pool
				.begin()
				.await
				.map_err(|_| Error::ServiceUnavailable)?;
			let row = sqlx::query(
				"
					select count(*) > 0
					from runs
					where runs.id = $1 and runs.experiment_id = $2
				",
			)
			.bind(&run_id.to_string())
			.bind(&experiment_id.to_string())
			.fetch_one(&mut *db)
			.await?;
			let run_exists: bool = row.get(0);
			if !run_exists {
				return Err(Error::NotFound.into());
			}
			delete_run(&mut db, run_id).await?;
			db.commit().await?;
			Ok(redirect(experiment_path(experiment_id)))
		}
	}
}
