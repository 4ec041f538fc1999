use std::{env, path::PathBuf, sync::Arc};

use learnhub::AppBuilder;
use learnhub_blob_adapter_fs::BlobAdapterFs;
use learnhub_meta_adapter_sqlite::MetaAdapterSqlite;

#[tokio::main]
async fn main() {
	let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or("./data".to_string()));
	tokio::fs::create_dir_all(&data_dir).await.expect("FATAL: Cannot create data dir");

	let meta_adapter = MetaAdapterSqlite::new(data_dir.join("meta.db"))
		.await
		.expect("FATAL: Cannot open meta database");
	let blob_adapter = BlobAdapterFs::new(data_dir.join("blobs").into())
		.await
		.expect("FATAL: Cannot open blob store");

	let mut builder = AppBuilder::new();
	builder
		.listen(env::var("LISTEN").unwrap_or("127.0.0.1:8080".to_string()))
		.jwt_secret(env::var("JWT_SECRET").expect("FATAL: JWT_SECRET is not set"))
		.meta_adapter(Arc::new(meta_adapter))
		.blob_adapter(Arc::new(blob_adapter));

	if let Ok(admin_email) = env::var("ADMIN_EMAIL") {
		builder.admin_email(admin_email);
	}
	if let Ok(admin_password) = env::var("ADMIN_PASSWORD") {
		builder.admin_password(admin_password);
	}
	if let Ok(admin_name) = env::var("ADMIN_NAME") {
		builder.admin_name(admin_name);
	}

	builder.run().await.expect("FATAL: Server failed");
}

// vim: ts=4
