use super::get::log_fetch_failures;
use super::state::{fetch_experiment, fetch_run, DisplayMode, PageState, RouteIdentity};
use super::{page, props};
use crate::common::{
	error::{redirect, Error},
	experiments::experiment_path,
	runs::{delete_run, rename_run},
	viewport::{get_viewport_width, LayoutMode},
	Context,
};
use anyhow::Result;
use hyper::{Body, Request, Response, StatusCode};
use sqlx::Row;

#[derive(serde::Deserialize)]
#[serde(tag = "action")]
enum Action {
	#[serde(rename = "rename_run")]
	RenameRun(RenameRunAction),
	#[serde(rename = "delete_run")]
	DeleteRun,
}

#[derive(serde::Deserialize)]
struct RenameRunAction {
	title: String,
}

pub async fn post(
	context: &Context,
	mut request: Request<Body>,
	experiment_id: &str,
	run_id: &str,
) -> Result<Response<Body>> {
	let identity = RouteIdentity::new(experiment_id, run_id)?;
	let data = hyper::body::to_bytes(request.body_mut())
		.await
		.map_err(|_| Error::BadRequest)?;
	let action: Action = serde_urlencoded::from_bytes(&data).map_err(|_| Error::BadRequest)?;
	match action {
		Action::RenameRun(action) => rename(context, &request, identity, action).await,
		Action::DeleteRun => delete(context, identity).await,
	}
}

async fn rename(
	context: &Context,
	request: &Request<Body>,
	identity: RouteIdentity,
	action: RenameRunAction,
) -> Result<Response<Body>> {
	let title = action.title.trim().to_owned();
	if title.is_empty() {
		return Err(Error::BadRequest.into());
	}
	let mut state = PageState::new(identity);
	let (run_outcome, experiment_outcome) = futures::join!(
		fetch_run(&context.pool, identity),
		fetch_experiment(&context.pool, identity),
	);
	state.apply_run(identity, run_outcome);
	state.apply_experiment(identity, experiment_outcome);
	log_fetch_failures(&state);
	match state.display_mode() {
		DisplayMode::Ready => {}
		DisplayMode::RunNotFound | DisplayMode::ExperimentNotFound => {
			return Err(Error::NotFound.into());
		}
		_ => return Err(Error::ServiceUnavailable.into()),
	}
	let mut db = context
		.pool
		.begin()
		.await
		.map_err(|_| Error::ServiceUnavailable)?;
	rename_run(&mut db, identity.run_id, &title).await?;
	db.commit().await?;
	// Renaming re-fetches the run through the same page state and
	// re-renders in place, it does not navigate. The view keeps its
	// previous content while the refetch is in flight, so it never drops
	// back to the skeleton.
	state.begin_run_refetch();
	let run_outcome = fetch_run(&context.pool, identity).await;
	state.apply_run(identity, run_outcome);
	log_fetch_failures(&state);
	let layout_mode = LayoutMode::from_viewport_width(get_viewport_width(request));
	let props = props::props(&state, &context.options, layout_mode, &None);
	let html = page::render(props);
	let response = Response::builder()
		.status(StatusCode::OK)
		.body(Body::from(html))
		.unwrap();
	Ok(response)
}

async fn delete(context: &Context, identity: RouteIdentity) -> Result<Response<Body>> {
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
	.bind(&identity.run_id.to_string())
	.bind(&identity.experiment_id.to_string())
	.fetch_one(&mut *db)
	.await?;
	let run_exists: bool = row.get(0);
	if !run_exists {
		return Err(Error::NotFound.into());
	}
	delete_run(&mut db, identity.run_id).await?;
	db.commit().await?;
	Ok(redirect(delete_redirect_target(identity)))
}

/// A successful delete navigates to the parent experiment page, never back
/// to the deleted run's own page.
fn delete_redirect_target(identity: RouteIdentity) -> String {
	experiment_path(identity.experiment_id)
}

#[cfg(test)]
mod test {
	use super::delete_redirect_target;
	use super::{fetch_experiment, fetch_run, rename_run, DisplayMode, PageState, RouteIdentity};
	use crate::common::{experiments::create_experiment, runs::{create_run, RunInfo}};

	#[test]
	fn test_delete_navigates_to_the_parent_experiment_page() {
		let identity = RouteIdentity {
			experiment_id: "0102030405060708090a0b0c0d0e0f10".parse().unwrap(),
			run_id: "f0e0d0c0b0a090807060504030201000".parse().unwrap(),
		};
		let target = delete_redirect_target(identity);
		assert_eq!(target, "/experiments/0102030405060708090a0b0c0d0e0f10/");
		assert!(!target.contains("runs"));
	}

	#[tokio::test]
	async fn test_rename_refetches_in_place_without_the_skeleton() {
		let pool = sqlx::any::AnyPoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.unwrap();
		crate::migrations::run(&pool).await.unwrap();
		let identity = RouteIdentity {
			experiment_id: "0102030405060708090a0b0c0d0e0f10".parse().unwrap(),
			run_id: "f0e0d0c0b0a090807060504030201000".parse().unwrap(),
		};
		let mut db = pool.begin().await.unwrap();
		create_experiment(&mut db, identity.experiment_id, "mnist", 0)
			.await
			.unwrap();
		create_run(
			&mut db,
			&RunInfo {
				id: identity.run_id,
				experiment_id: identity.experiment_id,
				title: "sunny-owl-1".to_owned(),
				artifact_uri: None,
				created_at: 0,
			},
		)
		.await
		.unwrap();
		db.commit().await.unwrap();
		let mut state = PageState::new(identity);
		let (run_outcome, experiment_outcome) = futures::join!(
			fetch_run(&pool, identity),
			fetch_experiment(&pool, identity),
		);
		state.apply_run(identity, run_outcome);
		state.apply_experiment(identity, experiment_outcome);
		assert_eq!(state.display_mode(), DisplayMode::Ready);
		let mut db = pool.begin().await.unwrap();
		rename_run(&mut db, identity.run_id, "renamed").await.unwrap();
		db.commit().await.unwrap();
		state.begin_run_refetch();
		// The page keeps the previous content while the refetch is in
		// flight.
		assert_eq!(state.display_mode(), DisplayMode::Ready);
		assert_eq!(state.run_payload().unwrap().info.title, "sunny-owl-1");
		let run_outcome = fetch_run(&pool, identity).await;
		state.apply_run(identity, run_outcome);
		assert_eq!(state.display_mode(), DisplayMode::Ready);
		assert_eq!(state.run_payload().unwrap().info.title, "renamed");
	}
}
