use super::cookies::parse_cookies;
use hyper::{header, Body, Request};

/// Viewport width at and above which the run page uses the full height layout.
pub const FULL_HEIGHT_BREAKPOINT: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
	FullHeight,
	Natural,
}

impl LayoutMode {
	pub fn from_viewport_width(width: Option<u32>) -> LayoutMode {
		match width {
			Some(width) if width >= FULL_HEIGHT_BREAKPOINT => LayoutMode::FullHeight,
			_ => LayoutMode::Natural,
		}
	}
}

/// The document script maintains this cookie from `window.innerWidth`.
pub fn get_viewport_width(request: &Request<Body>) -> Option<u32> {
	request
		.headers()
		.get(header::COOKIE)
		.and_then(|cookie_header_value| cookie_header_value.to_str().ok())
		.and_then(|cookie_header_value| parse_cookies(cookie_header_value).ok())
		.and_then(|cookies| cookies.get("kite-viewport-width").cloned())
		.and_then(|width| width.parse().ok())
}

#[cfg(test)]
mod test {
	use super::{get_viewport_width, LayoutMode};
	use hyper::{header, Body, Request};

	#[test]
	fn test_layout_mode_from_viewport_width() {
		assert_eq!(
			LayoutMode::from_viewport_width(Some(1280)),
			LayoutMode::FullHeight,
		);
		assert_eq!(
			LayoutMode::from_viewport_width(Some(1024)),
			LayoutMode::FullHeight,
		);
		assert_eq!(LayoutMode::from_viewport_width(Some(800)), LayoutMode::Natural);
		assert_eq!(LayoutMode::from_viewport_width(None), LayoutMode::Natural);
	}

	#[test]
	fn test_get_viewport_width() {
		let request = Request::builder()
			.header(header::COOKIE, "kite-viewport-width=1280")
			.body(Body::empty())
			.unwrap();
		assert_eq!(get_viewport_width(&request), Some(1280));
		let request = Request::builder()
			.header(header::COOKIE, "kite-viewport-width=garbage")
			.body(Body::empty())
			.unwrap();
		assert_eq!(get_viewport_width(&request), None);
		let request = Request::builder().body(Body::empty()).unwrap();
		assert_eq!(get_viewport_width(&request), None);
	}
}
