use crate::common::Context;
use anyhow::Result;
use hyper::{Body, Request, Response, StatusCode};

pub(crate) async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	match context.pool.acquire().await {
		Ok(_) => Ok(Response::builder()
			.status(StatusCode::OK)
			.body(Body::empty())?),
		Err(_) => Ok(Response::builder()
			.status(StatusCode::SERVICE_UNAVAILABLE)
			.body(Body::empty())?),
	}
}
