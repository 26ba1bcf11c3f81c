use anyhow::Context;
use book_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config)?;

    let pool = create_pool(&config.database)
        .await
        .context("connecting to the database")?;
    run_migrations(&pool).await?;

    let state = AppState::new(config.clone(), PgBookRepository::new(pool.clone()));
    Server::new(config).serve(router(state)).await?;

    pool.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}
