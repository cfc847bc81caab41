use html::{component, html, style};

#[component]
pub fn Token(color: Option<String>) {
	html! {
		<span class="token" style={style! { "background-color" => color }}>
			{children}
		</span>
	}
}
