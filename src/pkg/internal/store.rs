use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{conf::settings, prelude::Result};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    tracing::debug!("store pool ready");
    Ok(pool)
}
