use html::{classes, component, html};

#[component]
pub fn Link(class_name: Option<String>, href: Option<String>, title: Option<String>) {
	let class = classes!("link", class_name);
	html! {
		<a class={class} href={href} title={title}>
			{children}
		</a>
	}
}
