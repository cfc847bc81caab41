use html::{component, html};

#[derive(Clone)]
pub struct TopbarItem {
	pub href: String,
	pub title: String,
}

#[component]
pub fn Topbar(items: Option<Vec<TopbarItem>>, title: Option<String>) {
	html! {
		<div class="topbar-wrapper">
			<a class="topbar-link" href="/">
				<div class="topbar-brand-wrapper">
					{title.map(|title| html! {
						<div class="topbar-brand-title">{title}</div>
					})}
				</div>
			</a>
			{items.map(|items| html! {
				<nav class="topbar-items-wrapper">
					{items.into_iter().map(|item| html! {
						<a class="topbar-link" href={item.href}>
							{item.title}
						</a>
					}).collect::<Vec<_>>()}
				</nav>
			})}
		</div>
	}
}
