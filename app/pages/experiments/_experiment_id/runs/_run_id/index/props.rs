use super::state::{DisplayMode, PageState};
use super::tabs::{select_tab, Tab, TabFlags, TabView};
use crate::common::{
	experiments::experiment_path,
	metrics::partition_metric_keys,
	runs::run_path,
	viewport::LayoutMode,
	Options,
};
use chrono::prelude::*;
use std::collections::BTreeMap;

pub struct Props {
	pub layout_mode: LayoutMode,
	pub inner: Inner,
}

pub enum Inner {
	InitialLoading,
	RunNotFound(RunNotFoundProps),
	ExperimentNotFound,
	GenericError,
	Ready(ReadyProps),
}

pub struct RunNotFoundProps {
	pub run_id: String,
}

pub struct ExperimentHeader {
	pub title: String,
	pub href: String,
}

pub struct ReadyProps {
	pub experiment: ExperimentHeader,
	pub run_id: String,
	pub run_title: String,
	pub run_created_at: String,
	pub tab: Tab,
	pub tab_view: TabView,
	pub traces_enabled: bool,
	pub base_path: String,
	pub modal: Option<String>,
}

pub fn props(
	state: &PageState,
	options: &Options,
	layout_mode: LayoutMode,
	search_params: &Option<BTreeMap<String, String>>,
) -> Props {
	let inner = match state.display_mode() {
		DisplayMode::InitialLoading => Inner::InitialLoading,
		DisplayMode::RunNotFound => Inner::RunNotFound(RunNotFoundProps {
			run_id: state.identity().run_id.to_string(),
		}),
		DisplayMode::ExperimentNotFound => Inner::ExperimentNotFound,
		DisplayMode::GenericError => Inner::GenericError,
		DisplayMode::Ready => ready_inner(state, options, search_params),
	};
	Props { layout_mode, inner }
}

fn ready_inner(
	state: &PageState,
	options: &Options,
	search_params: &Option<BTreeMap<String, String>>,
) -> Inner {
	// Ready before either entity has ever painted only happens while the
	// first fetches are still in flight, so there is nothing to compose
	// yet.
	let (run, experiment) = match (state.run_payload(), state.experiment_payload()) {
		(Some(run), Some(experiment)) => (run, experiment),
		_ => return Inner::InitialLoading,
	};
	let partition = partition_metric_keys(
		run.latest_metrics.iter().map(|metric| metric.key.as_str()),
	);
	let requested = Tab::parse(search_params);
	let (tab, tab_view) = select_tab(
		requested,
		TabFlags::from_options(options),
		&partition,
		run,
	);
	let created_at: DateTime<Utc> = Utc.timestamp(run.info.created_at, 0);
	Inner::Ready(ReadyProps {
		experiment: ExperimentHeader {
			title: experiment.title.clone(),
			href: experiment_path(experiment.id),
		},
		run_id: run.info.id.to_string(),
		run_title: run.info.title.clone(),
		run_created_at: created_at.to_rfc3339(),
		tab,
		tab_view,
		traces_enabled: options.traces_enabled,
		base_path: run_path(run.info.experiment_id, run.info.id),
		modal: search_params
			.as_ref()
			.and_then(|params| params.get("modal"))
			.cloned(),
	})
}
