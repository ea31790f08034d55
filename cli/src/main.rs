//! lscache - administrative tool for the cache plugin option store

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use lscache_core::activation::Activation;
use lscache_core::cache_flag::set_external_cache_flag;
use lscache_core::{ConfigResolver, LsCache, LsCacheBuilder};
use lscache_option_adapter_sqlite::OptionAdapterSqlite;
use lscache_types::option::OptionKey;
use lscache_types::prelude::*;
use lscache_types::request::RequestContext;

mod config;
mod scanner;

use crate::config::Config;
use crate::scanner::LoggingRuleScanner;

#[derive(Parser)]
#[command(name = "lscache")]
#[command(about = "Inspect and maintain the cache plugin configuration", version)]
struct Cli {
	/// Tenant to operate on
	#[arg(long, global = true, default_value_t = 1)]
	tn_id: u32,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Provision defaults and rewrite rules as on plugin activation
	Activate,
	/// Print the resolved option set of the tenant
	Show,
	/// Print a single resolved option
	Get {
		/// Option key, e.g. `purge_by_post`
		key: String,
	},
	/// Print the network option record (created on first access)
	Network,
	/// Migrate the stored option record to the current schema
	Migrate,
	/// Evaluate the cache gate for a request carrying LSCACHE_CACHE_MARKER
	Gate,
	/// Set WP_CACHE in a wp-config.php file
	CacheFlag {
		path: PathBuf,
		#[arg(long, conflicts_with = "disable")]
		enable: bool,
		#[arg(long)]
		disable: bool,
	},
}

fn request_context(config: &Config) -> RequestContext {
	match &config.cache_marker {
		Some(marker) => RequestContext::new().with_cache_marker(marker.clone()),
		None => RequestContext::new(),
	}
}

async fn build_app(config: &Config) -> LsResult<LsCache> {
	let store = OptionAdapterSqlite::new(config.db_dir.join("options.db")).await?;
	let scanner = LoggingRuleScanner::new(config.login_cookie.clone());

	LsCacheBuilder::new()
		.deployment(config.deployment)
		.debug_mode(config.debug_mode)
		.store(Arc::new(store))
		.scanner(Arc::new(scanner))
		.build()
}

async fn run(cli: Cli, config: Config) -> LsResult<()> {
	let tn_id = TnId(cli.tn_id);

	if let Commands::CacheFlag { path, enable, disable } = &cli.command {
		if *enable == *disable {
			return Err(Error::ConfigError("one of --enable or --disable is required".into()));
		}
		set_external_cache_flag(path, *enable)?;
		println!("WP_CACHE = {}", enable);
		return Ok(());
	}

	let app = build_app(&config).await?;
	let ctx = request_context(&config);

	match cli.command {
		Commands::Activate => match app.activate(tn_id).await {
			Activation::Skipped { added, reason } => {
				println!("defaults added: {}, provisioning skipped: {:?}", added, reason);
			}
			Activation::Provisioned { added, input, errors, .. } => {
				println!("defaults added: {}, rewrite entries: {}", added, input.len());
				for err in &errors {
					println!("error: {}", err);
				}
			}
		},
		Commands::Show => {
			let resolver = app.resolver(tn_id, &ctx).await;
			println!("{}", serde_json::to_string_pretty(resolver.options())?);
		}
		Commands::Get { key } => {
			let key: OptionKey = key.parse()?;
			let resolver = app.resolver(tn_id, &ctx).await;
			println!("{}", resolver.get(key)?);
		}
		Commands::Network => match app.network_options().await? {
			Some(network) => println!("{}", serde_json::to_string_pretty(&network)?),
			None => println!("not a multi-tenant deployment"),
		},
		Commands::Migrate => {
			let logger = app.logger(&ctx, lscache_core::LogLevel::Debug);
			let deployment = &app.opts.deployment;
			let mut resolver =
				ConfigResolver::load(app.store.as_ref(), deployment, tn_id, logger).await?;
			let migration =
				resolver.migrate(app.store.as_ref(), deployment, app.scanner.as_ref()).await;
			if migration.performed {
				println!("migrated (persisted: {}):{}", migration.persisted, migration.summary());
			} else {
				println!("options are current");
			}
		}
		Commands::Gate => {
			let resolver = app.resolver(tn_id, &ctx).await;
			println!("caching infrastructure active: {}", resolver.caching_infrastructure_active(&ctx));
			println!("plugin enabled: {}", resolver.plugin_enabled(&ctx));
		}
		Commands::CacheFlag { .. } => {}
	}

	Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.init();

	let cli = Cli::parse();
	let config = Config::from_env();

	match run(cli, config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{}", err);
			eprintln!("lscache: {}", err);
			ExitCode::FAILURE
		}
	}
}


// vim: ts=4
