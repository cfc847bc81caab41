use crate::layouts::{app_layout::AppLayout, document::PageInfo};
use html::html;
use kite_ui as ui;

pub struct Props {
	pub experiments: Vec<ExperimentRow>,
}

pub struct ExperimentRow {
	pub href: String,
	pub id: String,
	pub title: String,
	pub created_at: String,
}

pub fn render(props: Props) -> String {
	let experiments_table = if props.experiments.is_empty() {
		html! {
			<ui::Card>
				<ui::P>{"There are no experiments yet. Create one below."}</ui::P>
			</ui::Card>
		}
	} else {
		let rows: Vec<html::Node> = props
			.experiments
			.iter()
			.map(|experiment| {
				html! {
					<ui::TableRow>
						<ui::TableCell expand={Some(true)}>
							<ui::Link
								class_name={None}
								href={Some(experiment.href.clone())}
								title={None}
							>
								{experiment.title.clone()}
							</ui::Link>
						</ui::TableCell>
						<ui::TableCell expand={None}>{experiment.id.clone()}</ui::TableCell>
						<ui::TableCell expand={None}>{experiment.created_at.clone()}</ui::TableCell>
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
					</ui::TableRow>
				</ui::TableHeader>
				<ui::TableBody>{rows}</ui::TableBody>
			</ui::Table>
		}
	};
	let html = html! {
		<AppLayout page_info={PageInfo { title: Some("Experiments".to_owned()) }}>
			<ui::S1>
				<ui::H1 center={None}>{"Experiments"}</ui::H1>
				<ui::S2>{experiments_table}</ui::S2>
				<ui::S2>
					<ui::H2 center={None}>{"New Experiment"}</ui::H2>
					<ui::Form action={None} id={None} post={Some(true)}>
						<ui::HiddenField
							name={"action".to_owned()}
							value={"create_experiment".to_owned()}
						/>
						<ui::TextField
							label={Some("Title".to_owned())}
							name={Some("title".to_owned())}
							placeholder={Some("My Experiment".to_owned())}
							required={Some(true)}
							value={None}
						/>
						<ui::Button
							button_type={ui::ButtonType::Submit}
							color={None}
							disabled={None}
							href={None}
							id={None}
						>
							{"Create"}
						</ui::Button>
					</ui::Form>
				</ui::S2>
			</ui::S1>
		</AppLayout>
	};
	html.render_to_string()
}
