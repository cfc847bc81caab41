use derive_more::{Display, Error};
use hyper::{header, Body, Response, StatusCode};

#[derive(Display, Debug, Error)]
pub enum Error {
	BadRequest,
	NotFound,
	ServiceUnavailable,
}

pub fn bad_request() -> Response<Body> {
	Response::builder()
		.status(StatusCode::BAD_REQUEST)
		.body(Body::from("bad request"))
		.unwrap()
}

pub fn not_found() -> Response<Body> {
	Response::builder()
		.status(StatusCode::NOT_FOUND)
		.body(Body::from("not found"))
		.unwrap()
}

pub fn service_unavailable() -> Response<Body> {
	Response::builder()
		.status(StatusCode::SERVICE_UNAVAILABLE)
		.body(Body::from("service unavailable"))
		.unwrap()
}

pub fn redirect(location: String) -> Response<Body> {
	Response::builder()
		.status(StatusCode::SEE_OTHER)
		.header(header::LOCATION, location)
		.body(Body::empty())
		.unwrap()
}
