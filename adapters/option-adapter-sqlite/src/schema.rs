//! Database schema initialization
//!
//! One row per option record. `scope` is 'T' for tenant records and 'N' for
//! the network record, which is stored with `tn_id` 0.

use sqlx::SqlitePool;

/// Initialize the database schema
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Options
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS options (
		scope char(1) NOT NULL,
		tn_id integer NOT NULL,
		name text NOT NULL,
		value json NOT NULL,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(scope, tn_id, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use sqlx::Row;

	#[tokio::test]
	async fn test_init_db_is_repeatable() {
		// One connection: every in-memory connection is its own database
		let db = sqlx::sqlite::SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.expect("Failed to open database");
		init_db(&db).await.expect("Failed to init schema");
		init_db(&db).await.expect("Failed to re-init schema");

		let tables: Vec<String> =
			sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
				.fetch_all(&db)
				.await
				.expect("Failed to list tables")
				.iter()
				.map(|row| row.get("name"))
				.collect();
		assert_eq!(tables, vec!["options".to_string()]);
	}
}

// vim: ts=4
