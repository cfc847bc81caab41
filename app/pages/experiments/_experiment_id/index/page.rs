use crate::layouts::{app_layout::AppLayout, document::PageInfo};
use html::html;
use kite_ui as ui;

pub struct Props {
	pub base_path: String,
	pub title: String,
	pub runs: Vec<RunRow>,
}

pub struct RunRow {
	pub href: String,
	pub id: String,
	pub title: String,
	pub created_at: String,
}

pub fn render(props: Props) -> String {
	let runs_table = if props.runs.is_empty() {
		html! {
			<ui::Card>
				<ui::P>{"This experiment has no runs."}</ui::P>
			</ui::Card>
		}
	} else {
		let base_path = props.base_path.clone();
		let rows: Vec<html::Node> = props
			.runs
			.iter()
			.map(|run| {
				html! {
					<ui::TableRow>
						<ui::TableCell expand={Some(true)}>
							<ui::Link
								class_name={None}
								href={Some(run.href.clone())}
								title={None}
							>
								{run.title.clone()}
							</ui::Link>
						</ui::TableCell>
						<ui::TableCell expand={None}>{run.id.clone()}</ui::TableCell>
						<ui::TableCell expand={None}>{run.created_at.clone()}</ui::TableCell>
						<ui::TableCell expand={None}>
							<ui::Form action={Some(base_path.clone())} id={None} post={Some(true)}>
								<ui::HiddenField
									name={"action".to_owned()}
									value={"delete_run".to_owned()}
								/>
								<ui::HiddenField
									name={"run_id".to_owned()}
									value={run.id.clone()}
								/>
								<ui::Button
									button_type={ui::ButtonType::Submit}
									color={Some("var(--red)".to_owned())}
									disabled={None}
									href={None}
									id={None}
								>
									{"Delete"}
								</ui::Button>
							</ui::Form>
						</ui::TableCell>
					</ui::TableRow>
				}
			})
			.collect();
		html! {
			<ui::Table width={Some("100%".to_owned())}>
				<ui::TableHeader>
					<ui::TableRow>
						<ui::TableHeaderCell expand={Some(true)} text_align={None}>
							{"Title"}
						</ui::TableHeaderCell>
						<ui::TableHeaderCell expand={None} text_align={None}>
							{"Id"}
						</ui::TableHeaderCell>
						<ui::TableHeaderCell expand={None} text_align={None}>
							{"Created"}
						</ui::TableHeaderCell>
						<ui::TableHeaderCell expand={None} text_align={None}>
						</ui::TableHeaderCell>
					</ui::TableRow>
				</ui::TableHeader>
				<ui::TableBody>{rows}</ui::TableBody>
			</ui::Table>
		}
	};
	let html = html! {
		<AppLayout page_info={PageInfo { title: Some(props.title.clone()) }}>
			<ui::S1>
				<ui::H1 center={None}>{props.title.clone()}</ui::H1>
				<ui::S2>{runs_table}</ui::S2>
			</ui::S1>
		</AppLayout>
	};
	html.render_to_string()
}

#[cfg(test)]
mod test {
	use super::{render, Props, RunRow};

	#[test]
	fn test_render_runs_with_delete_forms() {
		let html = render(Props {
			base_path: "/experiments/0102030405060708090a0b0c0d0e0f10/".to_owned(),
			title: "mnist".to_owned(),
			runs: vec![RunRow {
				href:
					"/experiments/0102030405060708090a0b0c0d0e0f10/runs/f0e0d0c0b0a090807060504030201000/"
						.to_owned(),
				id: "f0e0d0c0b0a090807060504030201000".to_owned(),
				title: "sunny-owl-1".to_owned(),
				created_at: "2023-06-01T00:00:00+00:00".to_owned(),
			}],
		});
		assert!(html.contains("sunny-owl-1"));
		assert!(html.contains(r#"value="delete_run""#));
	}

	#[test]
	fn test_render_empty_state() {
		let html = render(Props {
			base_path: "/experiments/0102030405060708090a0b0c0d0e0f10/".to_owned(),
			title: "mnist".to_owned(),
			runs: Vec::new(),
		});
		assert!(html.contains("This experiment has no runs."));
	}
}
