//! Storage abstraction layer.
//!
//! [`MessageStore`] defines the interface the handlers use to persist and
//! query chat messages.  The default implementation is the SQLite-backed
//! [`SqliteStore`].  To swap to another backend (Postgres, a managed
//! partitioned KV store, …), implement [`MessageStore`] for your new type
//! and change the concrete type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.

pub mod dao;
pub mod message;

pub use dao::MessageRecord;
pub use message::MessageStore;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// SQLite-backed message store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://chatlog.db"` or `"sqlite::memory:"` for tests.
    ///
    /// The migrations path is resolved relative to `CARGO_MANIFEST_DIR` at
    /// compile time, so the directory is embedded into the binary.  The
    /// `sqlx::query` (runtime-verified) form is used throughout so that no
    /// `DATABASE_URL` environment variable is needed at compile time.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A pooled in-memory database would hand every pool connection its
        // own empty database; pin the pool to a single connection there.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}
