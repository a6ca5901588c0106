use settings::Settings;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = build_engine(&settings)?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tokio::select! {
        res = server::run_with_listener(engine, listener) => res?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down, in-memory ledger discarded"),
    }

    Ok(())
}

fn build_engine(settings: &Settings) -> Result<engine::Engine, engine::EngineError> {
    let mut builder = engine::Engine::builder();
    for account in &settings.accounts {
        builder = match (&account.password_hash, &account.password) {
            (Some(hash), _) => builder.account_hashed(&account.username, hash),
            (None, Some(password)) => builder.account(&account.username, password),
            (None, None) => {
                tracing::warn!("skipping account \"{}\" without credentials", account.username);
                continue;
            }
        };
        tracing::info!("Provisioned account \"{}\"", account.username);
    }

    builder.build()
}
