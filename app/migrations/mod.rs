use anyhow::Result;
use std::collections::BTreeMap;
use sqlx::Row;

fn migrations() -> BTreeMap<&'static str, &'static str> {
	let mut migrations: BTreeMap<&str, &str> = BTreeMap::new();
	migrations.insert(
		"2023-06-01-000000-init.sql",
		include_str!("./2023-06-01-000000-init.sql"),
	);
	migrations
}

pub async fn run(pool: &sqlx::AnyPool) -> Result<()> {
	let migrations = migrations();
	sqlx::query(
		"
			create table if not exists _migrations (
				name text primary key
			)
		",
	)
	.execute(pool)
	.await?;
	for (name, sql) in migrations.iter() {
		let mut db = pool.begin().await?;
		let row = sqlx::query("select count(*) > 0 from _migrations where name = $1")
			.bind(name)
			.fetch_one(&mut *db)
			.await?;
		let migration_has_run: bool = row.get(0);
		if !migration_has_run {
			for statement in sql.split(';') {
				let statement = statement.trim();
				if !statement.is_empty() {
					sqlx::query(statement).execute(&mut *db).await?;
				}
			}
			sqlx::query("insert into _migrations (name) values ($1)")
				.bind(name)
				.execute(&mut *db)
				.await?;
		}
		db.commit().await?;
	}
	Ok(())
}
