use super::props::{Inner, Props, ReadyProps, RunNotFoundProps};
use super::tabs::{
	ArtifactsView, ChartRenderer, MetricChartsView, OverviewView, Tab, TabView, TracesView,
};
use crate::common::viewport::LayoutMode;
use crate::layouts::{app_layout::AppLayout, document::PageInfo};
use html::html;
use kite_charts::{
	MetricLineChart, MetricLineChartOptions, UnifiedMetricsChart, UnifiedMetricsChartOptions,
};
use kite_ui as ui;

/// Modal visibility is owned by this composer: the header action links open
/// the modals, dismissal closes them. Nothing else may toggle them.
struct ModalState {
	rename_visible: bool,
	delete_visible: bool,
}

impl ModalState {
	fn from_search_param(param: Option<&str>) -> ModalState {
		ModalState {
			rename_visible: param == Some("rename"),
			delete_visible: param == Some("delete"),
		}
	}
}

pub fn render(props: Props) -> String {
	let page_title = match &props.inner {
		Inner::Ready(inner) => Some(inner.run_title.clone()),
		Inner::RunNotFound(_) | Inner::ExperimentNotFound => Some("Not Found".to_owned()),
		_ => None,
	};
	let content = match props.inner {
		Inner::InitialLoading => initial_loading(),
		Inner::RunNotFound(inner) => run_not_found(inner),
		Inner::ExperimentNotFound => experiment_not_found(),
		Inner::GenericError => generic_error(),
		Inner::Ready(inner) => ready(inner, props.layout_mode),
	};
	let html = html! {
		<AppLayout page_info={PageInfo { title: page_title }}>
			{content}
		</AppLayout>
	};
	html.render_to_string()
}

fn initial_loading() -> html::Node {
	html! {
		<main class="run-page run-page-loading">
			<div class="run-page-skeleton">
				<div class="run-page-skeleton-header"></div>
				<div class="run-page-skeleton-body"></div>
			</div>
		</main>
	}
}

fn run_not_found(props: RunNotFoundProps) -> html::Node {
	html! {
		<main class="run-page">
			<ui::S1>
				<ui::H1 center={Some(true)}>{"Run Not Found"}</ui::H1>
				<ui::P>{format!("No run exists with id {}.", props.run_id)}</ui::P>
			</ui::S1>
		</main>
	}
}

fn experiment_not_found() -> html::Node {
	html! {
		<main class="run-page">
			<ui::S1>
				<ui::H1 center={Some(true)}>{"Not Found"}</ui::H1>
			</ui::S1>
		</main>
	}
}

// A failed fetch renders nothing. The failure was already written to the
// log, and a broken partial view would be worse than a blank one.
fn generic_error() -> html::Node {
	html! {
		<main class="run-page run-page-empty"></main>
	}
}

fn ready(props: ReadyProps, layout_mode: LayoutMode) -> html::Node {
	let modal_state = ModalState::from_search_param(props.modal.as_deref());
	let main_class = match layout_mode {
		LayoutMode::FullHeight => "run-page run-page-full-height",
		LayoutMode::Natural => "run-page",
	};
	let header = header(&props);
	let tab_bar = tab_bar(&props);
	let rename_modal = if modal_state.rename_visible {
		Some(rename_modal(&props))
	} else {
		None
	};
	let delete_modal = if modal_state.delete_visible {
		Some(delete_modal(&props))
	} else {
		None
	};
	let tab_content = tab_content(props.tab_view);
	html! {
		<main class={main_class}>
			<div class="run-page-header">{header}</div>
			{tab_bar}
			<div class="run-page-tab-content">{tab_content}</div>
			{rename_modal}
			{delete_modal}
		</main>
	}
}

fn header(props: &ReadyProps) -> html::Node {
	html! {
		<ui::SpaceBetween>
			<div class="run-page-header-titles">
				<ui::Link
					class_name={None}
					href={Some(props.experiment.href.clone())}
					title={None}
				>
					{props.experiment.title.clone()}
				</ui::Link>
				<ui::H1 center={None}>{props.run_title.clone()}</ui::H1>
				<div class="run-page-header-created">
					{format!("Created {}", props.run_created_at)}
				</div>
			</div>
			<div class="run-page-header-actions">
				<ui::Button
					button_type={ui::ButtonType::Button}
					color={None}
					disabled={None}
					href={Some(format!("{}?modal=rename", props.base_path))}
					id={None}
				>
					{"Rename"}
				</ui::Button>
				<ui::Button
					button_type={ui::ButtonType::Button}
					color={Some("var(--red)".to_owned())}
					disabled={None}
					href={Some(format!("{}?modal=delete", props.base_path))}
					id={None}
				>
					{"Delete"}
				</ui::Button>
			</div>
		</ui::SpaceBetween>
	}
}

fn tab_bar(props: &ReadyProps) -> html::Node {
	let mut tabs = vec![
		(Tab::Overview, "Overview"),
		(Tab::ModelMetricCharts, "Model Metrics"),
		(Tab::SystemMetricCharts, "System Metrics"),
		(Tab::Artifacts, "Artifacts"),
	];
	if props.traces_enabled {
		tabs.push((Tab::Traces, "Traces"));
	}
	let links: Vec<html::Node> = tabs
		.into_iter()
		.map(|(tab, title)| {
			html! {
				<ui::TabLink
					href={format!("{}?tab={}", props.base_path, tab.query_value())}
					selected={Some(tab == props.tab)}
				>
					{title}
				</ui::TabLink>
			}
		})
		.collect();
	html! {
		<ui::TabBar>{links}</ui::TabBar>
	}
}

fn tab_content(view: TabView) -> html::Node {
	match view {
		TabView::Overview(view) => overview_tab(view),
		TabView::MetricCharts(view) => metric_charts_tab(view),
		TabView::Artifacts(view) => artifacts_tab(view),
		TabView::Traces(view) => traces_tab(view),
	}
}

fn overview_tab(view: OverviewView) -> html::Node {
	let details = html! {
		<ui::S2>
			<ui::H2 center={None}>{"Details"}</ui::H2>
			<ui::Form action={Some(view.refresh_href.clone())} id={None} post={Some(true)}>
				<ui::HiddenField name={"action".to_owned()} value={"rename_run".to_owned()} />
				<ui::TextField
					label={Some("Title".to_owned())}
					name={Some("title".to_owned())}
					placeholder={None}
					required={Some(true)}
					value={Some(view.run_title.clone())}
				/>
				<ui::Button
					button_type={ui::ButtonType::Submit}
					color={None}
					disabled={None}
					href={None}
					id={None}
				>
					{"Save"}
				</ui::Button>
			</ui::Form>
		</ui::S2>
	};
	let metrics = if view.latest_metrics.is_empty() {
		html! {
			<ui::Callout level={ui::Level::Info} title={Some("No Metrics".to_owned())}>
				{"No metrics have been logged for this run."}
			</ui::Callout>
		}
	} else {
		let rows: Vec<html::Node> = view
			.latest_metrics
			.iter()
			.map(|metric| {
				html! {
					<ui::TableRow>
						<ui::TableCell expand={Some(true)}>{metric.key.clone()}</ui::TableCell>
						<ui::TableCell expand={None}>
							{ui::format_metric_value(metric.value)}
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
							{"Metric"}
						</ui::TableHeaderCell>
						<ui::TableHeaderCell expand={None} text_align={None}>
							{"Latest Value"}
						</ui::TableHeaderCell>
					</ui::TableRow>
				</ui::TableHeader>
				<ui::TableBody>{rows}</ui::TableBody>
			</ui::Table>
		}
	};
	let params = if view.params.is_empty() {
		html! {
			<ui::Callout level={ui::Level::Info} title={Some("No Params".to_owned())}>
				{"No params have been logged for this run."}
			</ui::Callout>
		}
	} else {
		let rows: Vec<html::Node> = view
			.params
			.iter()
			.map(|param| {
				html! {
					<ui::TableRow>
						<ui::TableCell expand={Some(true)}>{param.key.clone()}</ui::TableCell>
						<ui::TableCell expand={None}>{param.value.clone()}</ui::TableCell>
					</ui::TableRow>
				}
			})
			.collect();
		html! {
			<ui::Table width={Some("100%".to_owned())}>
				<ui::TableHeader>
					<ui::TableRow>
						<ui::TableHeaderCell expand={Some(true)} text_align={None}>
							{"Param"}
						</ui::TableHeaderCell>
						<ui::TableHeaderCell expand={None} text_align={None}>
							{"Value"}
						</ui::TableHeaderCell>
					</ui::TableRow>
				</ui::TableHeader>
				<ui::TableBody>{rows}</ui::TableBody>
			</ui::Table>
		}
	};
	let tags = tags_row(&view.tags);
	html! {
		<ui::S1>
			{details}
			<ui::S2>
				<ui::H2 center={None}>{"Metrics"}</ui::H2>
				{metrics}
			</ui::S2>
			<ui::S2>
				<ui::H2 center={None}>{"Params"}</ui::H2>
				{params}
			</ui::S2>
			<ui::S2>
				<ui::H2 center={None}>{"Tags"}</ui::H2>
				{tags}
			</ui::S2>
		</ui::S1>
	}
}

fn metric_charts_tab(view: MetricChartsView) -> html::Node {
	if view.keys.is_empty() {
		return html! {
			<ui::S1>
				<ui::Callout level={ui::Level::Info} title={Some("No Metrics".to_owned())}>
					{"No metrics have been logged for this run."}
				</ui::Callout>
			</ui::S1>
		};
	}
	let run_id = view.run_id.to_string();
	match view.renderer {
		ChartRenderer::Unified => {
			let options = UnifiedMetricsChartOptions {
				run_id,
				metric_keys: view.keys,
			};
			html! {
				<ui::S1>
					<UnifiedMetricsChart
						id={None}
						options={options}
						title={Some("Metrics".to_owned())}
					/>
				</ui::S1>
			}
		}
		ChartRenderer::Legacy => {
			let charts: Vec<html::Node> = view
				.keys
				.iter()
				.map(|key| {
					let options = MetricLineChartOptions {
						run_id: run_id.clone(),
						metric_key: key.clone(),
					};
					html! {
						<MetricLineChart id={None} options={options} title={Some(key.clone())} />
					}
				})
				.collect();
			html! {
				<ui::S1>
					<div class="run-page-chart-grid">{charts}</div>
				</ui::S1>
			}
		}
	}
}

fn artifacts_tab(view: ArtifactsView) -> html::Node {
	let tags = tags_row(&view.tags);
	let browser = match view.artifact_uri {
		Some(artifact_uri) => html! {
			<div
				class="artifact-browser"
				data-artifact-root={artifact_uri}
				data-run-id={view.run_id.to_string()}
			>
				<noscript>
					<div class="chart-noscript">
						{"Please enable JavaScript to browse artifacts."}
					</div>
				</noscript>
			</div>
		},
		None => html! {
			<ui::Callout level={ui::Level::Info} title={Some("No Artifacts".to_owned())}>
				{"This run has no artifact location."}
			</ui::Callout>
		},
	};
	html! {
		<ui::S1>
			<ui::H2 center={None}>{"Artifacts"}</ui::H2>
			{browser}
			<ui::S2>
				<ui::H2 center={None}>{"Tags"}</ui::H2>
				{tags}
			</ui::S2>
		</ui::S1>
	}
}

fn traces_tab(view: TracesView) -> html::Node {
	html! {
		<ui::S1>
			<ui::H2 center={None}>{"Traces"}</ui::H2>
			<div class="trace-viewer" data-run-id={view.run_id.to_string()}>
				<noscript>
					<div class="chart-noscript">
						{"Please enable JavaScript to view traces."}
					</div>
				</noscript>
			</div>
		</ui::S1>
	}
}

fn tags_row(tags: &[crate::common::runs::RunTag]) -> html::Node {
	if tags.is_empty() {
		return html! {
			<ui::P>{"This run has no tags."}</ui::P>
		};
	}
	let tokens: Vec<html::Node> = tags
		.iter()
		.map(|tag| {
			html! {
				<ui::Token color={None}>{format!("{}: {}", tag.key, tag.value)}</ui::Token>
			}
		})
		.collect();
	html! {
		<div class="run-page-tags">{tokens}</div>
	}
}

fn rename_modal(props: &ReadyProps) -> html::Node {
	html! {
		<ui::Modal dismiss_href={props.base_path.clone()} title={Some("Rename Run".to_owned())}>
			<ui::Form action={Some(props.base_path.clone())} id={None} post={Some(true)}>
				<ui::HiddenField name={"action".to_owned()} value={"rename_run".to_owned()} />
				<ui::TextField
					label={Some("Title".to_owned())}
					name={Some("title".to_owned())}
					placeholder={None}
					required={Some(true)}
					value={Some(props.run_title.clone())}
				/>
				<ui::Button
					button_type={ui::ButtonType::Submit}
					color={None}
					disabled={None}
					href={None}
					id={None}
				>
					{"Rename"}
				</ui::Button>
			</ui::Form>
		</ui::Modal>
	}
}

fn delete_modal(props: &ReadyProps) -> html::Node {
	html! {
		<ui::Modal dismiss_href={props.base_path.clone()} title={Some("Delete Run".to_owned())}>
			<ui::P>
				{format!(
					"Deleting the run {} cannot be undone. Its metrics, params, and tags will be deleted with it.",
					props.run_title,
				)}
			</ui::P>
			<ui::Form action={Some(props.base_path.clone())} id={None} post={Some(true)}>
				<ui::HiddenField name={"action".to_owned()} value={"delete_run".to_owned()} />
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
		</ui::Modal>
	}
}

#[cfg(test)]
mod test {
	use super::super::props::{ExperimentHeader, Inner, Props, ReadyProps, RunNotFoundProps};
	use super::super::tabs::{
		ChartRenderer, MetricChartsView, OverviewView, Tab, TabView,
	};
	use super::render;
	use crate::common::viewport::LayoutMode;

	fn ready_props(tab: Tab, tab_view: TabView) -> ReadyProps {
		ReadyProps {
			experiment: ExperimentHeader {
				title: "mnist".to_owned(),
				href: "/experiments/0102030405060708090a0b0c0d0e0f10/".to_owned(),
			},
			run_id: "f0e0d0c0b0a090807060504030201000".to_owned(),
			run_title: "sunny-owl-1".to_owned(),
			run_created_at: "2023-06-01T00:00:00+00:00".to_owned(),
			tab,
			tab_view,
			traces_enabled: false,
			base_path:
				"/experiments/0102030405060708090a0b0c0d0e0f10/runs/f0e0d0c0b0a090807060504030201000/"
					.to_owned(),
			modal: None,
		}
	}

	fn overview_view() -> TabView {
		TabView::Overview(OverviewView {
			latest_metrics: Vec::new(),
			params: Vec::new(),
			tags: Vec::new(),
			run_title: "sunny-owl-1".to_owned(),
			refresh_href:
				"/experiments/0102030405060708090a0b0c0d0e0f10/runs/f0e0d0c0b0a090807060504030201000/"
					.to_owned(),
		})
	}

	#[test]
	fn test_initial_loading_renders_the_skeleton_only() {
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::InitialLoading,
		});
		assert!(html.contains("run-page-skeleton"));
		assert!(!html.contains("tab-bar"));
		assert!(!html.contains("Rename"));
	}

	#[test]
	fn test_run_not_found_is_keyed_by_the_run_id() {
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::RunNotFound(RunNotFoundProps {
				run_id: "f0e0d0c0b0a090807060504030201000".to_owned(),
			}),
		});
		assert!(html.contains("Run Not Found"));
		assert!(html.contains("f0e0d0c0b0a090807060504030201000"));
		assert!(!html.contains("tab-bar"));
	}

	#[test]
	fn test_generic_error_renders_blank() {
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::GenericError,
		});
		assert!(html.contains("run-page-empty"));
		assert!(!html.contains("tab-bar"));
		assert!(!html.contains("Rename"));
		assert!(!html.contains("modal-overlay"));
	}

	#[test]
	fn test_ready_renders_header_tab_bar_and_content() {
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::Ready(ready_props(Tab::Overview, overview_view())),
		});
		assert!(html.contains("sunny-owl-1"));
		assert!(html.contains("mnist"));
		assert!(html.contains("tab-bar-tab-selected"));
		// Traces stays hidden while the flag is off.
		assert!(!html.contains("?tab=traces"));
		assert!(!html.contains("modal-overlay"));
	}

	#[test]
	fn test_traces_tab_link_appears_when_enabled() {
		let mut props = ready_props(Tab::Overview, overview_view());
		props.traces_enabled = true;
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::Ready(props),
		});
		assert!(html.contains("?tab=traces"));
	}

	#[test]
	fn test_full_height_layout_class() {
		let html = render(Props {
			layout_mode: LayoutMode::FullHeight,
			inner: Inner::Ready(ready_props(Tab::Overview, overview_view())),
		});
		assert!(html.contains("run-page-full-height"));
	}

	#[test]
	fn test_unified_renderer_emits_the_unified_chart_panel() {
		let tab_view = TabView::MetricCharts(MetricChartsView {
			renderer: ChartRenderer::Unified,
			run_id: "f0e0d0c0b0a090807060504030201000".parse().unwrap(),
			keys: vec!["loss".to_owned(), "accuracy".to_owned()],
		});
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::Ready(ready_props(Tab::ModelMetricCharts, tab_view)),
		});
		assert!(html.contains(r#"data-chart-type="metric-unified""#));
		assert!(!html.contains(r#"data-chart-type="metric-line""#));
	}

	#[test]
	fn test_legacy_renderer_emits_one_chart_per_key() {
		let tab_view = TabView::MetricCharts(MetricChartsView {
			renderer: ChartRenderer::Legacy,
			run_id: "f0e0d0c0b0a090807060504030201000".parse().unwrap(),
			keys: vec!["loss".to_owned(), "accuracy".to_owned()],
		});
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::Ready(ready_props(Tab::ModelMetricCharts, tab_view)),
		});
		assert_eq!(html.matches(r#"data-chart-type="metric-line""#).count(), 2);
	}

	#[test]
	fn test_rename_modal_renders_when_requested() {
		let mut props = ready_props(Tab::Overview, overview_view());
		props.modal = Some("rename".to_owned());
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::Ready(props),
		});
		assert!(html.contains("modal-overlay"));
		assert!(html.contains("Rename Run"));
		assert!(html.contains(r#"value="rename_run""#));
	}

	#[test]
	fn test_delete_modal_renders_when_requested() {
		let mut props = ready_props(Tab::Overview, overview_view());
		props.modal = Some("delete".to_owned());
		let html = render(Props {
			layout_mode: LayoutMode::Natural,
			inner: Inner::Ready(props),
		});
		assert!(html.contains("modal-overlay"));
		assert!(html.contains(r#"value="delete_run""#));
	}
}
