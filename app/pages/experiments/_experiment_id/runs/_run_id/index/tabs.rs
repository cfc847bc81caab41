use crate::common::{
	metrics::{LatestMetric, MetricKeyPartition},
	runs::{run_path, RunPayload, RunParam, RunTag},
	Options,
};
use kite_id::Id;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
	Overview,
	ModelMetricCharts,
	SystemMetricCharts,
	Artifacts,
	Traces,
}

impl Tab {
	/// The requested tab from the `tab` search param. An absent or
	/// unrecognized value is simply no request; `select_tab` supplies the
	/// fallback.
	pub fn parse(search_params: &Option<BTreeMap<String, String>>) -> Option<Tab> {
		let tab = search_params.as_ref().and_then(|params| params.get("tab"))?;
		match tab.as_str() {
			"overview" => Some(Tab::Overview),
			"model_metrics" => Some(Tab::ModelMetricCharts),
			"system_metrics" => Some(Tab::SystemMetricCharts),
			"artifacts" => Some(Tab::Artifacts),
			"traces" => Some(Tab::Traces),
			_ => None,
		}
	}

	pub fn query_value(self) -> &'static str {
		match self {
			Tab::Overview => "overview",
			Tab::ModelMetricCharts => "model_metrics",
			Tab::SystemMetricCharts => "system_metrics",
			Tab::Artifacts => "artifacts",
			Tab::Traces => "traces",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabFlags {
	pub traces_enabled: bool,
	pub unified_charts: bool,
}

impl TabFlags {
	pub fn from_options(options: &Options) -> TabFlags {
		TabFlags {
			traces_enabled: options.traces_enabled,
			unified_charts: options.unified_charts,
		}
	}
}

/// The single chart renderer role has two interchangeable implementations.
/// Both take the same key set and run context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartRenderer {
	Legacy,
	Unified,
}

/// A render descriptor for the active tab, not a rendered view. The page
/// turns it into markup.
#[derive(Clone, Debug)]
pub enum TabView {
	Overview(OverviewView),
	MetricCharts(MetricChartsView),
	Artifacts(ArtifactsView),
	Traces(TracesView),
}

#[derive(Clone, Debug)]
pub struct OverviewView {
	pub latest_metrics: Vec<LatestMetric>,
	pub params: Vec<RunParam>,
	pub tags: Vec<RunTag>,
	pub run_title: String,
	/// Posting an edit here re-fetches the run and re-renders in place.
	pub refresh_href: String,
}

#[derive(Clone, Debug)]
pub struct MetricChartsView {
	pub renderer: ChartRenderer,
	pub run_id: Id,
	pub keys: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ArtifactsView {
	pub run_id: Id,
	pub tags: Vec<RunTag>,
	/// An absent artifact location is a displayable empty state, not an
	/// error.
	pub artifact_uri: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TracesView {
	pub run_id: Id,
}

/// Map the requested tab to the tab actually rendered. Overview is the
/// documented fallback for an absent request, an unrecognized identifier,
/// and Traces while the flag is off.
pub fn select_tab(
	requested: Option<Tab>,
	flags: TabFlags,
	metric_keys: &MetricKeyPartition,
	run: &RunPayload,
) -> (Tab, TabView) {
	match requested {
		Some(Tab::ModelMetricCharts) => (
			Tab::ModelMetricCharts,
			TabView::MetricCharts(MetricChartsView {
				renderer: chart_renderer(flags),
				run_id: run.info.id,
				keys: metric_keys.model.clone(),
			}),
		),
		Some(Tab::SystemMetricCharts) => (
			Tab::SystemMetricCharts,
			TabView::MetricCharts(MetricChartsView {
				renderer: chart_renderer(flags),
				run_id: run.info.id,
				keys: metric_keys.system.clone(),
			}),
		),
		Some(Tab::Artifacts) => (
			Tab::Artifacts,
			TabView::Artifacts(ArtifactsView {
				run_id: run.info.id,
				tags: run.tags.clone(),
				artifact_uri: run.info.artifact_uri.clone(),
			}),
		),
		Some(Tab::Traces) if flags.traces_enabled => (
			Tab::Traces,
			TabView::Traces(TracesView {
				run_id: run.info.id,
			}),
		),
		_ => (
			Tab::Overview,
			TabView::Overview(OverviewView {
				latest_metrics: run.latest_metrics.clone(),
				params: run.params.clone(),
				tags: run.tags.clone(),
				run_title: run.info.title.clone(),
				refresh_href: run_path(run.info.experiment_id, run.info.id),
			}),
		),
	}
}

fn chart_renderer(flags: TabFlags) -> ChartRenderer {
	if flags.unified_charts {
		ChartRenderer::Unified
	} else {
		ChartRenderer::Legacy
	}
}

#[cfg(test)]
mod test {
	use super::{select_tab, ChartRenderer, Tab, TabFlags, TabView};
	use crate::common::{
		metrics::{partition_metric_keys, LatestMetric},
		runs::{RunInfo, RunPayload},
	};
	use std::collections::BTreeMap;

	fn flags() -> TabFlags {
		TabFlags {
			traces_enabled: false,
			unified_charts: false,
		}
	}

	fn run_payload() -> RunPayload {
		let latest_metrics = vec![
			LatestMetric {
				key: "loss".to_owned(),
				value: 0.1,
			},
			LatestMetric {
				key: "system/cpu_utilization".to_owned(),
				value: 0.5,
			},
			LatestMetric {
				key: "accuracy".to_owned(),
				value: 0.9,
			},
		];
		RunPayload {
			info: RunInfo {
				id: "f0e0d0c0b0a090807060504030201000".parse().unwrap(),
				experiment_id: "0102030405060708090a0b0c0d0e0f10".parse().unwrap(),
				title: "run".to_owned(),
				artifact_uri: None,
				created_at: 0,
			},
			latest_metrics,
			params: Vec::new(),
			tags: Vec::new(),
		}
	}

	#[test]
	fn test_parse_round_trips_known_tabs_and_rejects_unknown_ones() {
		for tab in &[
			Tab::Overview,
			Tab::ModelMetricCharts,
			Tab::SystemMetricCharts,
			Tab::Artifacts,
			Tab::Traces,
		] {
			let mut params = BTreeMap::new();
			params.insert("tab".to_owned(), tab.query_value().to_owned());
			assert_eq!(Tab::parse(&Some(params)), Some(*tab));
		}
		let mut params = BTreeMap::new();
		params.insert("tab".to_owned(), "nonsense".to_owned());
		assert_eq!(Tab::parse(&Some(params)), None);
		assert_eq!(Tab::parse(&None), None);
	}

	#[test]
	fn test_traces_disabled_falls_back_to_overview() {
		let run = run_payload();
		let partition = partition_metric_keys(
			run.latest_metrics.iter().map(|metric| metric.key.as_str()),
		);
		let (tab, view) = select_tab(Some(Tab::Traces), flags(), &partition, &run);
		assert_eq!(tab, Tab::Overview);
		match view {
			TabView::Overview(_) => {}
			_ => panic!("expected the overview fallback"),
		}
	}

	#[test]
	fn test_traces_enabled_renders_traces() {
		let run = run_payload();
		let partition = partition_metric_keys(
			run.latest_metrics.iter().map(|metric| metric.key.as_str()),
		);
		let flags = TabFlags {
			traces_enabled: true,
			unified_charts: false,
		};
		let (tab, view) = select_tab(Some(Tab::Traces), flags, &partition, &run);
		assert_eq!(tab, Tab::Traces);
		match view {
			TabView::Traces(view) => assert_eq!(view.run_id, run.info.id),
			_ => panic!("expected the traces tab"),
		}
	}

	#[test]
	fn test_no_request_falls_back_to_overview() {
		let run = run_payload();
		let partition = partition_metric_keys(
			run.latest_metrics.iter().map(|metric| metric.key.as_str()),
		);
		let (tab, view) = select_tab(None, flags(), &partition, &run);
		assert_eq!(tab, Tab::Overview);
		match view {
			TabView::Overview(view) => {
				assert_eq!(view.refresh_href.as_str(), "/experiments/0102030405060708090a0b0c0d0e0f10/runs/f0e0d0c0b0a090807060504030201000/");
			}
			_ => panic!("expected the overview fallback"),
		}
	}

	#[test]
	fn test_model_metric_charts_use_the_model_partition_and_the_unified_renderer_when_flagged() {
		let run = run_payload();
		let partition = partition_metric_keys(
			run.latest_metrics.iter().map(|metric| metric.key.as_str()),
		);
		let flags = TabFlags {
			traces_enabled: false,
			unified_charts: true,
		};
		let (tab, view) = select_tab(Some(Tab::ModelMetricCharts), flags, &partition, &run);
		assert_eq!(tab, Tab::ModelMetricCharts);
		match view {
			TabView::MetricCharts(view) => {
				assert_eq!(view.renderer, ChartRenderer::Unified);
				assert_eq!(view.keys, vec!["loss", "accuracy"]);
			}
			_ => panic!("expected metric charts"),
		}
	}

	#[test]
	fn test_system_metric_charts_use_the_system_partition() {
		let run = run_payload();
		let partition = partition_metric_keys(
			run.latest_metrics.iter().map(|metric| metric.key.as_str()),
		);
		let (tab, view) = select_tab(Some(Tab::SystemMetricCharts), flags(), &partition, &run);
		assert_eq!(tab, Tab::SystemMetricCharts);
		match view {
			TabView::MetricCharts(view) => {
				assert_eq!(view.renderer, ChartRenderer::Legacy);
				assert_eq!(view.keys, vec!["system/cpu_utilization"]);
			}
			_ => panic!("expected metric charts"),
		}
	}

	#[test]
	fn test_artifacts_without_a_location_is_a_valid_empty_state() {
		let run = run_payload();
		let partition = partition_metric_keys(
			run.latest_metrics.iter().map(|metric| metric.key.as_str()),
		);
		let (tab, view) = select_tab(Some(Tab::Artifacts), flags(), &partition, &run);
		assert_eq!(tab, Tab::Artifacts);
		match view {
			TabView::Artifacts(view) => assert!(view.artifact_uri.is_none()),
			_ => panic!("expected artifacts"),
		}
	}
}
