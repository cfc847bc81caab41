use super::document::{Document, PageInfo};
use crate::common::topbar;
use html::{component, html};

#[component]
pub fn AppLayout(page_info: PageInfo) {
	html! {
		<Document page_info={page_info}>
			<div class="app-layout-topbar-grid">
				<topbar::Topbar />
				<div class="app-layout">{children}</div>
			</div>
		</Document>
	}
}
