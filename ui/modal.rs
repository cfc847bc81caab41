use html::{component, html};

#[component]
pub fn Modal(dismiss_href: String, title: Option<String>) {
	html! {
		<div class="modal-overlay">
			<div class="modal-window">
				<div class="modal-topbar">
					{title.map(|title| html! {
						<div class="modal-title">{title}</div>
					})}
					<a class="modal-dismiss" href={dismiss_href}>{"Close"}</a>
				</div>
				<div class="modal-body">{children}</div>
			</div>
		</div>
	}
}
