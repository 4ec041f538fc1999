//! App state type

use std::sync::Arc;

use crate::core::crypto;
use crate::prelude::*;
use crate::routes;

use learnhub_types::blob_adapter::BlobAdapter;
use learnhub_types::meta_adapter::{CreateUser, MetaAdapter, Profile};
use learnhub_types::pagination::PageConfig;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub meta_adapter: Arc<dyn MetaAdapter>,
	pub blob_adapter: Arc<dyn BlobAdapter>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub meta_adapter: Option<Arc<dyn MetaAdapter>>,
	pub blob_adapter: Option<Arc<dyn BlobAdapter>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	listen: Box<str>,
	pub jwt_secret: Box<str>,
	pub page: PageConfig,
	admin_name: Box<str>,
	admin_email: Option<Box<str>>,
	admin_password: Option<Box<str>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				jwt_secret: "".into(),
				page: PageConfig::default(),
				admin_name: "Admin".into(),
				admin_email: None,
				admin_password: None,
			},
			adapters: Adapters { meta_adapter: None, blob_adapter: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = listen.into(); self }
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self { self.opts.jwt_secret = jwt_secret.into(); self }
	pub fn page(&mut self, page: PageConfig) -> &mut Self { self.opts.page = page; self }
	pub fn admin_name(&mut self, admin_name: impl Into<Box<str>>) -> &mut Self { self.opts.admin_name = admin_name.into(); self }
	pub fn admin_email(&mut self, admin_email: impl Into<Box<str>>) -> &mut Self { self.opts.admin_email = Some(admin_email.into()); self }
	pub fn admin_password(&mut self, admin_password: impl Into<Box<str>>) -> &mut Self { self.opts.admin_password = Some(admin_password.into()); self }

	// Adapters
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self { self.adapters.meta_adapter = Some(meta_adapter); self }
	pub fn blob_adapter(&mut self, blob_adapter: Arc<dyn BlobAdapter>) -> &mut Self { self.adapters.blob_adapter = Some(blob_adapter); self }

	pub async fn run(self) -> LhResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("LearnHub v{}", VERSION);

		if self.opts.jwt_secret.is_empty() {
			panic!("FATAL: No JWT secret configured");
		}
		let app: App = Arc::new(AppState {
			opts: self.opts,
			meta_adapter: self.adapters.meta_adapter.expect("FATAL: No meta adapter"),
			blob_adapter: self.adapters.blob_adapter.expect("FATAL: No blob adapter"),
		});

		bootstrap(&app).await?;

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

/// Creates the initial admin account when the user table is empty.
async fn bootstrap(app: &App) -> LhResult<()> {
	if app.meta_adapter.count_users().await? > 0 {
		return Ok(());
	}

	let (Some(email), Some(password)) =
		(app.opts.admin_email.as_deref(), app.opts.admin_password.as_deref())
	else {
		warn!("No users and no admin credentials configured, skipping bootstrap");
		return Ok(());
	};

	info!("Bootstrapping admin account {}", email);
	let password_hash = crypto::generate_password_hash(password.into()).await?;
	app.meta_adapter
		.create_user(&CreateUser {
			name: app.opts.admin_name.clone(),
			email: email.into(),
			password_hash,
			profile: Profile::Admin,
		})
		.await?;

	Ok(())
}

// vim: ts=4
