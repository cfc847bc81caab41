use crate::common::{
	error::{bad_request, service_unavailable},
	runs::{create_run, RunInfo},
	Context,
};
use anyhow::Result;
use chrono::prelude::*;
use hyper::{Body, Request, Response, StatusCode};
use kite_id::Id;

// The client library posts tracking events here, one or many at a time.

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum TrackEventSet {
	Single(TrackEvent),
	Multiple(Vec<TrackEvent>),
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type")]
enum TrackEvent {
	#[serde(rename = "create_run")]
	CreateRun(CreateRunEvent),
	#[serde(rename = "log_metric")]
	LogMetric(LogMetricEvent),
	#[serde(rename = "log_param")]
	LogParam(LogParamEvent),
	#[serde(rename = "set_tag")]
	SetTag(SetTagEvent),
}

#[derive(Debug, serde::Deserialize)]
struct CreateRunEvent {
	run_id: Id,
	experiment_id: Id,
	title: String,
	artifact_uri: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct LogMetricEvent {
	run_id: Id,
	key: String,
	value: f64,
	step: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
struct LogParamEvent {
	run_id: Id,
	key: String,
	value: String,
}

#[derive(Debug, serde::Deserialize)]
struct SetTagEvent {
	run_id: Id,
	key: String,
	value: String,
}

pub async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let data = match hyper::body::to_bytes(request.body_mut()).await {
		Ok(bytes) => bytes,
		Err(_) => return Ok(bad_request()),
	};
	let events: TrackEventSet = match serde_json::from_slice(&data) {
		Ok(events) => events,
		Err(_) => return Ok(bad_request()),
	};
	let events = match events {
		TrackEventSet::Single(event) => vec![event],
		TrackEventSet::Multiple(events) => events,
	};
	let mut db = match context.pool.begin().await {
		Ok(db) => db,
		Err(_) => return Ok(service_unavailable()),
	};
	for event in events {
		let result = match event {
			TrackEvent::CreateRun(event) => handle_create_run_event(&mut db, event).await,
			TrackEvent::LogMetric(event) => handle_log_metric_event(&mut db, event).await,
			TrackEvent::LogParam(event) => handle_log_param_event(&mut db, event).await,
			TrackEvent::SetTag(event) => handle_set_tag_event(&mut db, event).await,
		};
		if result.is_err() {
			return Ok(bad_request());
		}
	}
	db.commit().await?;
	let response = Response::builder()
		.status(StatusCode::ACCEPTED)
		.body(Body::empty())
		.unwrap();
	Ok(response)
}

async fn handle_create_run_event(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	event: CreateRunEvent,
) -> Result<()> {
	let info = RunInfo {
		id: event.run_id,
		experiment_id: event.experiment_id,
		title: event.title,
		artifact_uri: event.artifact_uri,
		created_at: Utc::now().timestamp(),
	};
	create_run(db, &info).await?;
	Ok(())
}

async fn handle_log_metric_event(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	event: LogMetricEvent,
) -> Result<()> {
	sqlx::query(
		"
			insert into metrics
				(run_id, key, value, step, logged_at)
			values
				($1, $2, $3, $4, $5)
		",
	)
	.bind(&event.run_id.to_string())
	.bind(&event.key)
	.bind(event.value)
	.bind(event.step.unwrap_or(0))
	.bind(Utc::now().timestamp())
	.execute(&mut **db)
	.await?;
	Ok(())
}

async fn handle_log_param_event(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	event: LogParamEvent,
) -> Result<()> {
	sqlx::query(
		"
			insert into params
				(run_id, key, value)
			values
				($1, $2, $3)
		",
	)
	.bind(&event.run_id.to_string())
	.bind(&event.key)
	.bind(&event.value)
	.execute(&mut **db)
	.await?;
	Ok(())
}

async fn handle_set_tag_event(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	event: SetTagEvent,
) -> Result<()> {
	sqlx::query(
		"
			delete from tags
			where tags.run_id = $1 and tags.key = $2
		",
	)
	.bind(&event.run_id.to_string())
	.bind(&event.key)
	.execute(&mut **db)
	.await?;
	sqlx::query(
		"
			insert into tags
				(run_id, key, value)
			values
				($1, $2, $3)
		",
	)
	.bind(&event.run_id.to_string())
	.bind(&event.key)
	.bind(&event.value)
	.execute(&mut **db)
	.await?;
	Ok(())
}
