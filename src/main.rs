use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use estate_portal::api::ApiClient;
use estate_portal::config::Config;
use estate_portal::context::Scope;
use estate_portal::document::DocumentRoot;
use estate_portal::i18n::{format_template, AdminLanguage, Language, Locale, TableValidator};
use estate_portal::layout::{AdminFrame, AdminLayout, PublicLayout};
use estate_portal::query::{ProjectQueries, QueryCache};
use estate_portal::retry::RetryConfig;
use estate_portal::router::MemoryRouter;
use estate_portal::storage::{FileStore, KeyValueStore};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("estate_portal=info".parse()?),
        )
        .init();

    let route = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/admin/projects".to_string());

    let config = Config::from_env()?;
    check_translation_tables();

    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&config.storage_path)
            .with_context(|| format!("Failed to open client storage at {}", config.storage_path))?,
    );
    let api = ApiClient::from_config(&config)?;
    let cache = QueryCache::new(RetryConfig::query());
    let root = Scope::root().with(Arc::new(cache.clone()));
    let queries = ProjectQueries::from_config(&config, api.clone(), cache.clone());

    // Public site
    let document = DocumentRoot::new();
    let public = PublicLayout::new(&root, Arc::clone(&store), document.clone());
    public.mount();

    let language = public.language();
    let strings = language.strings();
    info!(
        "Public site in {} (lang={}): {}",
        language.language().name(),
        document.lang().unwrap_or_default(),
        strings.hero_title
    );

    let projects = queries.public_projects_state().await;
    match (&projects.data, &projects.error) {
        (Some(list), _) => info!("{} published projects", list.len()),
        (None, Some(error)) => warn!("{}: {}", strings.projects_error, error),
        (None, None) => info!("{}", strings.projects_loading),
    }
    let year = Utc::now().year().to_string();
    info!("{}", format_template(strings.footer_rights, &[("year", year.as_str())]));

    // Admin area
    let router = Arc::new(MemoryRouter::new(route.as_str()));
    let admin = AdminLayout::from_config(
        &root,
        &config,
        Arc::clone(&store),
        Arc::new(api),
        router.clone(),
    );
    admin.mount().await;
    admin.resolve_session().await;

    match admin.render() {
        AdminFrame::Shell(shell) => {
            let labels: Vec<_> = shell.nav.iter().map(|item| item.label).collect();
            info!("Admin shell at {} [{}]", shell.route, labels.join(" | "));

            let admin_queries = queries.clone().with_auth(Arc::clone(admin.auth()));
            let state = admin_queries.admin_projects_state().await;
            match state.data {
                Some(list) => info!("{} projects in admin", list.len()),
                None => warn!(
                    "Admin projects unavailable: {}",
                    state.error.unwrap_or_default()
                ),
            }
        }
        AdminFrame::Redirecting { to } => info!("Not signed in, redirected to {}", to),
        AdminFrame::Login => info!("Login page"),
        AdminFrame::Loading { label } => info!("{}", label),
    }

    admin.unmount().await;

    let report = cache.metrics().report();
    info!(
        "Cache: {} hits, {} misses, {} fetches ({} failed)",
        report.hits, report.misses, report.fetches, report.fetch_failures
    );
    Ok(())
}

fn check_translation_tables() {
    for (language, report) in TableValidator::validate_locale::<Language>() {
        for error in &report.errors {
            warn!("Translation table '{}': {}", language.code(), error);
        }
    }
    for (language, report) in TableValidator::validate_locale::<AdminLanguage>() {
        for error in &report.errors {
            warn!("Admin translation table '{}': {}", language.code(), error);
        }
    }
}
