use html::{component, html, style};

// Chart containers render server side with their options serialized into
// `data-options`. The client chart renderer reads the attributes and draws
// into the container, so the server never computes pixels.

#[derive(serde::Deserialize, serde::Serialize, Clone)]
pub struct MetricLineChartOptions {
	pub run_id: String,
	pub metric_key: String,
}

#[derive(serde::Deserialize, serde::Serialize, Clone)]
pub struct UnifiedMetricsChartOptions {
	pub run_id: String,
	pub metric_keys: Vec<String>,
}

#[component]
pub fn MetricLineChart(id: Option<String>, options: MetricLineChartOptions, title: Option<String>) {
	let container_style = style! {
		"padding-top" => "50%",
		"width" => "100%",
	};
	let options = serde_json::to_string(&options).unwrap();
	html! {
		<div class="chart-wrapper">
			<ChartTitle>{title}</ChartTitle>
			<div
				data-chart-type="metric-line"
				data-options={options}
				id={id}
				style={container_style}
			>
				<noscript>
					<div class="chart-noscript">
						{"Please enable JavaScript to view charts."}
					</div>
				</noscript>
			</div>
		</div>
	}
}

#[component]
pub fn UnifiedMetricsChart(
	id: Option<String>,
	options: UnifiedMetricsChartOptions,
	title: Option<String>,
) {
	let container_style = style! {
		"padding-top" => "50%",
		"width" => "100%",
	};
	let options = serde_json::to_string(&options).unwrap();
	html! {
		<div class="chart-wrapper">
			<ChartTitle>{title}</ChartTitle>
			<div
				data-chart-type="metric-unified"
				data-options={options}
				id={id}
				style={container_style}
			>
				<noscript>
					<div class="chart-noscript">
						{"Please enable JavaScript to view charts."}
					</div>
				</noscript>
			</div>
		</div>
	}
}

#[component]
pub fn ChartTitle() {
	html! {
		<div class="chart-title">{children}</div>
	}
}

#[cfg(test)]
mod test {
	use super::{MetricLineChartOptions, UnifiedMetricsChartOptions};

	#[test]
	fn test_metric_line_chart_options_json() {
		let options = MetricLineChartOptions {
			run_id: "0102030405060708090a0b0c0d0e0f10".to_owned(),
			metric_key: "loss".to_owned(),
		};
		let json = serde_json::to_string(&options).unwrap();
		assert_eq!(
			json,
			r#"{"run_id":"0102030405060708090a0b0c0d0e0f10","metric_key":"loss"}"#,
		);
	}

	#[test]
	fn test_unified_metrics_chart_options_json() {
		let options = UnifiedMetricsChartOptions {
			run_id: "0102030405060708090a0b0c0d0e0f10".to_owned(),
			metric_keys: vec!["loss".to_owned(), "accuracy".to_owned()],
		};
		let options: UnifiedMetricsChartOptions =
			serde_json::from_str(&serde_json::to_string(&options).unwrap()).unwrap();
		assert_eq!(options.metric_keys, vec!["loss", "accuracy"]);
	}
}
