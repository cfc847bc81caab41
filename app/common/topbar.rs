use html::{component, html};
use kite_ui as ui;

#[component]
pub fn Topbar() {
	html! {
		<ui::Topbar
			items={Some(vec![ui::TopbarItem {
				href: "/".to_owned(),
				title: "Experiments".to_owned(),
			}])}
			title={Some("Kite".to_owned())}
		/>
	}
}
