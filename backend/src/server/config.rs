//! HTTP server configuration loaded from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::{env, fs, io};

use actix_web::cookie::Key;
use tracing::warn;

use backend::outbound::persistence::{DbPool, PoolConfig};

/// Runtime configuration for the HTTP server.
///
/// Read from environment variables:
/// - `BIND_ADDR` (default `0.0.0.0:8080`)
/// - `DATABASE_URL`: optional; without it the server runs on the
///   volatile in-memory stores.
/// - `SESSION_KEY_FILE` (default `/var/run/secrets/session_key`), with an
///   ephemeral fallback in debug builds or when
///   `SESSION_ALLOW_EPHEMERAL=1`.
/// - `SESSION_COOKIE_SECURE` (`0` disables the Secure cookie attribute)
/// - `BCRYPT_COST` (default: the bcrypt crate default)
/// - `UPLOAD_DIR` (default `uploads`)
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) session_key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bcrypt_cost: u32,
    pub(crate) upload_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from the environment, building the database
    /// pool when a URL is configured.
    pub async fn from_env() -> io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse::<SocketAddr>()
            .map_err(|err| io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let db_pool = match env::var("DATABASE_URL") {
            Ok(url) => Some(
                DbPool::new(PoolConfig::new(url))
                    .await
                    .map_err(|err| io::Error::other(err.to_string()))?,
            ),
            Err(_) => {
                warn!("no DATABASE_URL configured; using volatile in-memory storage");
                None
            }
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|err| io::Error::other(format!("invalid BCRYPT_COST: {err}")))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        Ok(Self {
            bind_addr,
            db_pool,
            session_key: load_session_key()?,
            cookie_secure,
            bcrypt_cost,
            upload_dir,
        })
    }
}

/// Load the session signing key, falling back to an ephemeral key in
/// development.
fn load_session_key() -> io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}
