use html::{component, html, raw};

#[derive(Clone)]
pub struct PageInfo {
	pub title: Option<String>,
}

#[component]
pub fn Document(page_info: PageInfo) {
	let title = match page_info.title {
		Some(title) => format!("{} - Kite", title),
		None => "Kite".to_owned(),
	};
	html! {
		<html lang="en">
			<head>
				<meta charset="utf-8" />
				<meta content="width=device-width, initial-scale=1" name="viewport" />
				<link href="/favicon.png" rel="icon" type="image/png" />
				<title>{title}</title>
				<link href="/styles.css" rel="stylesheet" />
				<meta content="Experiment Tracking for Machine Learning" name="description" />
			</head>
			<body>
				{children}
				<script>
					{raw!("document.cookie = `kite-viewport-width=${window.innerWidth};path=/;max-age=31536000`; window.addEventListener('resize', () => { document.cookie = `kite-viewport-width=${window.innerWidth};path=/;max-age=31536000` })")}
				</script>
			</body>
		</html>
	}
}
