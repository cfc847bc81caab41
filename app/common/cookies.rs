use std::collections::BTreeMap;

pub fn parse_cookies(cookies_str: &str) -> Result<BTreeMap<&str, &str>, ()> {
	cookies_str
		.split("; ")
		.map(|cookie| {
			let mut components = cookie.split('=');
			let key = match components.next() {
				Some(key) => key,
				None => return Err(()),
			};
			let value = match components.next() {
				Some(value) => value,
				None => return Err(()),
			};
			Ok((key, value))
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::parse_cookies;

	#[test]
	fn test_parse_cookies() {
		let cookies = parse_cookies("kite-viewport-width=1280; other=x").unwrap();
		assert_eq!(cookies.get("kite-viewport-width"), Some(&"1280"));
		assert_eq!(cookies.get("other"), Some(&"x"));
		assert!(parse_cookies("garbage").is_err());
	}
}
