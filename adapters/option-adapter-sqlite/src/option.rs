//! Option record storage
//!
//! Records are stored as one JSON object per row.

use sqlx::{Row, SqlitePool};

use lscache_types::option::OptionSet;
use lscache_types::prelude::*;

fn to_json(options: &OptionSet) -> LsResult<String> {
	serde_json::to_string(options).map_err(|e| Error::Serialization(e.to_string()))
}

/// Read a record, `None` if the scope has none
pub(crate) async fn read(db: &SqlitePool, scope: Scope, name: &str) -> LsResult<Option<OptionSet>> {
	let row = sqlx::query("SELECT value FROM options WHERE scope = ? AND tn_id = ? AND name = ?")
		.bind(scope.tag())
		.bind(scope.tn_id().0)
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let Some(row) = row else {
		return Ok(None);
	};
	let value: String = row
		.try_get("value")
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;
	let options = serde_json::from_str(&value)
		.inspect_err(|err| warn!("corrupt option record {} for {}: {}", name, scope, err))?;

	Ok(Some(options))
}

/// Insert a record unless one exists
///
/// `INSERT OR IGNORE` on the primary key makes the check and the write a
/// single statement, so concurrent activations cannot both succeed.
pub(crate) async fn add(
	db: &SqlitePool,
	scope: Scope,
	name: &str,
	options: &OptionSet,
) -> LsResult<bool> {
	let res =
		sqlx::query("INSERT OR IGNORE INTO options (scope, tn_id, name, value) VALUES (?, ?, ?, ?)")
			.bind(scope.tag())
			.bind(scope.tn_id().0)
			.bind(name)
			.bind(to_json(options)?)
			.execute(db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() == 1)
}

/// Insert or replace a record
pub(crate) async fn update(
	db: &SqlitePool,
	scope: Scope,
	name: &str,
	options: &OptionSet,
) -> LsResult<bool> {
	let res = sqlx::query(
		"INSERT OR REPLACE INTO options (scope, tn_id, name, value, updated_at)
		VALUES (?, ?, ?, ?, unixepoch())",
	)
	.bind(scope.tag())
	.bind(scope.tn_id().0)
	.bind(name)
	.bind(to_json(options)?)
	.execute(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() > 0)
}

/// Delete a record, returns whether one existed
pub(crate) async fn delete(db: &SqlitePool, scope: Scope, name: &str) -> LsResult<bool> {
	let res = sqlx::query("DELETE FROM options WHERE scope = ? AND tn_id = ? AND name = ?")
		.bind(scope.tag())
		.bind(scope.tn_id().0)
		.bind(name)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() > 0)
}

// vim: ts=4
