//! SQLite-backed option store
//!
//! Persists option records in a single `options` table keyed by scope, tenant
//! and record name.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use lscache_types::option::OptionSet;
use lscache_types::option_store::OptionStore;
use lscache_types::prelude::*;

mod option;
mod schema;

use crate::schema::init_db;

#[derive(Debug)]
pub struct OptionAdapterSqlite {
	db: SqlitePool,
}

impl OptionAdapterSqlite {
	/// Opens (or creates) the database file at `path`
	pub async fn new(path: impl AsRef<Path>) -> LsResult<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		debug!("option store opened at {}", path.display());
		Ok(Self { db })
	}

	/// Removes a record; used when a tenant is uninstalled
	pub async fn delete_options(&self, scope: Scope, name: &str) -> LsResult<bool> {
		option::delete(&self.db, scope, name).await
	}
}

#[async_trait]
impl OptionStore for OptionAdapterSqlite {
	async fn read_options(&self, scope: Scope, name: &str) -> LsResult<Option<OptionSet>> {
		option::read(&self.db, scope, name).await
	}

	async fn add_options(&self, scope: Scope, name: &str, options: &OptionSet) -> LsResult<bool> {
		option::add(&self.db, scope, name, options).await
	}

	async fn update_options(&self, scope: Scope, name: &str, options: &OptionSet) -> LsResult<bool> {
		option::update(&self.db, scope, name, options).await
	}
}

// vim: ts=4
