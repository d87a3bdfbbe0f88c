use std::{env, path, sync::Arc};
use tracing::error;

use bmf::prelude::*;
use bmf_blob_adapter_fs::BlobAdapterFs;
use bmf_cache_adapter_lru::CacheAdapterLru;
use bmf_meta_adapter_sqlite::MetaAdapterSqlite;
use bmf_session_adapter_memory::SessionAdapterMemory;

pub struct Config {
	pub listen: String,
	pub data_dir: path::PathBuf,
	pub media_url: String,
	pub debug: bool,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("BMF_LISTEN").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
			data_dir: path::PathBuf::from(env::var("BMF_DATA_DIR").unwrap_or_else(|_| "./data".to_string())),
			media_url: env::var("BMF_MEDIA_URL").unwrap_or_else(|_| "/media/".to_string()),
			debug: env::var("BMF_DEBUG").is_ok_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
		}
	}
}

async fn run(config: Config) -> ClResult<()> {
	// installs the log subscriber
	let mut builder = bmf::AppBuilder::new();
	tokio::fs::create_dir_all(&config.data_dir).await?;

	let meta_adapter = Arc::new(MetaAdapterSqlite::new(config.data_dir.join("meta")).await?);
	let blob_adapter =
		Arc::new(BlobAdapterFs::new(config.data_dir.join("media").into(), config.media_url.as_str()).await?);

	builder
		.listen(config.listen)
		.debug(config.debug)
		.meta_adapter(meta_adapter)
		.session_adapter(Arc::new(SessionAdapterMemory::new()))
		.cache_adapter(Arc::new(CacheAdapterLru::default()))
		.blob_adapter(blob_adapter);
	builder.run().await
}

#[tokio::main]
async fn main() {
	if let Err(err) = run(Config::from_env()).await {
		error!("FATAL: {}", err);
		std::process::exit(1);
	}
}

// vim: ts=4
