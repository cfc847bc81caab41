use kite_id::Id;
use sqlx::Row;

#[derive(Clone, Debug)]
pub struct Experiment {
	pub id: Id,
	pub title: String,
	pub created_at: i64,
}

pub fn experiment_path(experiment_id: Id) -> String {
	format!("/experiments/{}/", experiment_id)
}

pub async fn get_experiment(
	pool: &sqlx::AnyPool,
	experiment_id: Id,
) -> anyhow::Result<Option<Experiment>> {
	let row = sqlx::query(
		"
			select
				experiments.id,
				experiments.title,
				experiments.created_at
			from experiments
			where experiments.id = $1
		",
	)
	.bind(&experiment_id.to_string())
	.fetch_optional(pool)
	.await?;
	let row = match row {
		Some(row) => row,
		None => return Ok(None),
	};
	Ok(Some(experiment_from_row(&row)))
}

pub async fn list_experiments(pool: &sqlx::AnyPool) -> anyhow::Result<Vec<Experiment>> {
	let rows = sqlx::query(
		"
			select
				experiments.id,
				experiments.title,
				experiments.created_at
			from experiments
			order by experiments.created_at
		",
	)
	.fetch_all(pool)
	.await?;
	Ok(rows.iter().map(experiment_from_row).collect())
}

pub async fn create_experiment(
	db: &mut sqlx::Transaction<'_, sqlx::Any>,
	experiment_id: Id,
	title: &str,
	created_at: i64,
) -> anyhow::Result<()> {
	sqlx::query(
		"
			insert into experiments
				(id, title, created_at)
			values
				($1, $2, $3)
		",
	)
	.bind(&experiment_id.to_string())
	.bind(title)
	.bind(created_at)
	.execute(&mut *db)
	.await?;
	Ok(())
}

fn experiment_from_row(row: &sqlx::any::AnyRow) -> Experiment {
	let id: String = row.get(0);
	let id: Id = id.parse().unwrap();
	let title: String = row.get(1);
	let created_at: i64 = row.get(2);
	Experiment {
		id,
		title,
		created_at,
	}
}

#[cfg(test)]
mod test {
	use super::experiment_path;

	#[test]
	fn test_experiment_path() {
		let experiment_id = "0102030405060708090a0b0c0d0e0f10".parse().unwrap();
		assert_eq!(
			experiment_path(experiment_id),
			"/experiments/0102030405060708090a0b0c0d0e0f10/",
		);
	}
}
