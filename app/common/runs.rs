use super::metrics::{get_latest_metrics, LatestMetric};
use kite_id::Id;
use sqlx::Row;

#[derive(Clone, Debug)]
pub struct RunInfo {
	pub id: Id,
	pub experiment_id: Id,
	pub title: String,
	pub artifact_uri: Option<String>,
	pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunParam {
	pub key: String,
	pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunTag {
	pub key: String,
	pub value: String,
}

/// Everything the run fetch returns: the run row, the latest value of each
/// metric key, and the run's params and tags.
#[derive(Clone, Debug)]
pub struct RunPayload {
	pub info: RunInfo,
	pub latest_metrics: Vec<LatestMetric>,
	pub params: Vec<RunParam>,
	pub tags: Vec<RunTag>,
}

pub fn run_path(experiment_id: Id, run_id: Id) -> String {
	format!("/experiments/{}/runs/{}/", experiment_id, run_id)
}

pub async fn get_run_payload(
	pool: &sqlx::AnyPool,
	run_id: Id,
) -> anyhow::Result<Option<RunPayload>> {
	let row = sqlx::query(
		"
			select
				runs.id,
				runs.experiment_id,
				runs.title,
				runs.artifact_uri,
				runs.created_at
			from runs
			where runs.id = $1
		",
	)
	.bind(&run_id.to_string())
	.fetch_optional(pool)
	.await?;
	let row = match row {
		Some(row) => row,
		None => return Ok(None),
	};
	let info = run_info_from_row(&row);
	let latest_metrics = get_latest_metrics(pool, run_id).await?;
	let params = get_run_params(pool, run_id).await?;
	let tags = get_run_tags(pool, run_id).await?;
	Ok(Some(RunPayload {
		info,
		latest_metrics,
		params,
		tags,
	}))
}

pub async fn list_runs(pool: &sqlx::AnyPool, experiment_id: Id) -> anyhow::Result<Vec<RunInfo>> {
	let rows = sqlx::query(
		"
			select
				runs.id,
				runs.experiment_id,
				runs.title,
				runs.artifact_uri,
				runs.created_at
			from runs
			where runs.experiment_id = $1
			order by runs.created_at
		",
	)
	.bind(&experiment_id.to_string())
	.fetch_all(pool)
	.await?;
	Ok(rows.iter().map(run_info_from_row).collect())
}

pub async fn create_run(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	info: &RunInfo,
) -> anyhow::Result<()> {
	sqlx::query(
		"
			insert into runs
				(id, experiment_id, title, artifact_uri, created_at)
			values
				($1, $2, $3, $4, $5)
		",
	)
	.bind(&info.id.to_string())
	.bind(&info.experiment_id.to_string())
	.bind(&info.title)
	.bind(&info.artifact_uri)
	.bind(info.created_at)
	.execute(&mut *db)
	.await?;
	Ok(())
}

pub async fn rename_run(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	run_id: Id,
	title: &str,
) -> anyhow::Result<()> {
	sqlx::query(
		"
			update runs
				set title = $1
			where runs.id = $2
		",
	)
	.bind(title)
	.bind(&run_id.to_string())
	.execute(&mut *db)
	.await?;
	Ok(())
}

pub async fn delete_run(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	run_id: Id,
) -> anyhow::Result<()> {
	let run_id = run_id.to_string();
	sqlx::query("delete from metrics where metrics.run_id = $1")
		.bind(&run_id)
		.execute(&mut *db)
		.await?;
	sqlx::query("delete from params where params.run_id = $1")
		.bind(&run_id)
		.execute(&mut *db)
		.await?;
	sqlx::query("delete from tags where tags.run_id = $1")
		.bind(&run_id)
		.execute(&mut *db)
		.await?;
	sqlx::query("delete from runs where runs.id = $1")
		.bind(&run_id)
		.execute(&mut *db)
		.await?;
	Ok(())
}

async fn get_run_params(pool: &sqlx::AnyPool, run_id: Id) -> anyhow::Result<Vec<RunParam>> {
	let rows = sqlx::query(
		"
			select
				params.key,
				params.value
			from params
			where params.run_id = $1
			order by params.key
		",
	)
	.bind(&run_id.to_string())
	.fetch_all(pool)
	.await?;
	Ok(rows
		.iter()
		.map(|row| RunParam {
			key: row.get(0),
			value: row.get(1),
		})
		.collect())
}

async fn get_run_tags(pool: &sqlx::AnyPool, run_id: Id) -> anyhow::Result<Vec<RunTag>> {
	let rows = sqlx::query(
		"
			select
				tags.key,
				tags.value
			from tags
			where tags.run_id = $1
			order by tags.key
		",
	)
	.bind(&run_id.to_string())
	.fetch_all(pool)
	.await?;
	Ok(rows
		.iter()
		.map(|row| RunTag {
			key: row.get(0),
			value: row.get(1),
		})
		.collect())
}

fn run_info_from_row(row: &sqlx::any::AnyRow) -> RunInfo {
	let id: String = row.get(0);
	let id: Id = id.parse().unwrap();
	let experiment_id: String = row.get(1);
	let experiment_id: Id = experiment_id.parse().unwrap();
	let title: String = row.get(2);
	let artifact_uri: Option<String> = row.get(3);
	let created_at: i64 = row.get(4);
	RunInfo {
		id,
		experiment_id,
		title,
		artifact_uri,
		created_at,
	}
}

#[cfg(test)]
mod test {
	use super::run_path;

	#[test]
	fn test_run_path() {
		let experiment_id = "0102030405060708090a0b0c0d0e0f10".parse().unwrap();
		let run_id = "f0e0d0c0b0a090807060504030201000".parse().unwrap();
		assert_eq!(
			run_path(experiment_id, run_id),
			"/experiments/0102030405060708090a0b0c0d0e0f10/runs/f0e0d0c0b0a090807060504030201000/",
		);
	}
}
