use kite_id::Id;
use sqlx::Row;

/// Keys under this prefix carry infrastructure telemetry logged by the
/// client library rather than user logged model metrics.
pub const SYSTEM_METRIC_PREFIX: &str = "system/";

#[derive(Clone, Debug, PartialEq)]
pub struct LatestMetric {
	pub key: String,
	pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricKeyPartition {
	pub model: Vec<String>,
	pub system: Vec<String>,
}

pub fn is_system_metric_key(key: &str) -> bool {
	key.starts_with(SYSTEM_METRIC_PREFIX)
}

/// Split metric keys into the model and system partitions, preserving the
/// iteration order of the source mapping within each partition.
pub fn partition_metric_keys<'a>(keys: impl Iterator<Item = &'a str>) -> MetricKeyPartition {
	let mut partition = MetricKeyPartition::default();
	for key in keys {
		if is_system_metric_key(key) {
			partition.system.push(key.to_owned());
		} else {
			partition.model.push(key.to_owned());
		}
	}
	partition
}

/// The most recently logged value for each metric key of the run, in key
/// order.
pub async fn get_latest_metrics(
	pool: &sqlx::AnyPool,
	run_id: Id,
) -> anyhow::Result<Vec<LatestMetric>> {
	let rows = sqlx::query(
		"
			select
				metrics.key,
				metrics.value
			from metrics
			where metrics.run_id = $1
			order by metrics.key, metrics.logged_at desc, metrics.step desc
		",
	)
	.bind(&run_id.to_string())
	.fetch_all(pool)
	.await?;
	let mut latest_metrics: Vec<LatestMetric> = Vec::new();
	for row in rows.iter() {
		let key: String = row.get(0);
		let value: f64 = row.get(1);
		if latest_metrics.last().map(|metric| metric.key.as_str()) != Some(key.as_str()) {
			latest_metrics.push(LatestMetric { key, value });
		}
	}
	Ok(latest_metrics)
}

#[cfg(test)]
mod test {
	use super::{is_system_metric_key, partition_metric_keys};

	#[test]
	fn test_partition_is_exhaustive_and_order_stable() {
		let keys = vec![
			"loss",
			"system/cpu_utilization",
			"accuracy",
			"system/gpu_memory",
			"val_loss",
		];
		let partition = partition_metric_keys(keys.iter().copied());
		assert_eq!(partition.model, vec!["loss", "accuracy", "val_loss"]);
		assert_eq!(
			partition.system,
			vec!["system/cpu_utilization", "system/gpu_memory"],
		);
		assert_eq!(
			partition.model.len() + partition.system.len(),
			keys.len(),
		);
	}

	#[test]
	fn test_partition_is_idempotent() {
		let keys = vec!["loss", "system/cpu_utilization"];
		let partition = partition_metric_keys(keys.iter().copied());
		let model_again =
			partition_metric_keys(partition.model.iter().map(|key| key.as_str()));
		let system_again =
			partition_metric_keys(partition.system.iter().map(|key| key.as_str()));
		assert_eq!(model_again.model, partition.model);
		assert!(model_again.system.is_empty());
		assert_eq!(system_again.system, partition.system);
		assert!(system_again.model.is_empty());
	}

	#[test]
	fn test_system_membership_is_decided_by_the_prefix_alone() {
		assert!(is_system_metric_key("system/cpu_utilization"));
		assert!(!is_system_metric_key("systemic_risk"));
		assert!(!is_system_metric_key("loss"));
	}
}
