pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod show;
pub mod stats;
pub mod status;
pub mod timer;

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database and make sure the schema is current.
/// Mirrors the original service running its migrations on startup.
pub(crate) fn open_pool(database: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
