//! Session middleware configuration.
//!
//! Sessions play the role of the browser's local storage for the cart: a
//! cookie identifies the visitor and the store keeps the serialized cart
//! under a single key. The store is an in-process moka cache, bounded in
//! entries and evicting each session once its expiry date passes, so carts
//! do not survive a server restart.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "rp_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Most sessions kept at once; the least recently used are evicted beyond it.
pub const SESSION_CAPACITY: u64 = 100_000;

/// Create the bounded session store.
#[must_use]
pub fn create_session_store() -> MokaStore {
    MokaStore::new(Some(SESSION_CAPACITY))
}

/// Create the session layer backed by [`create_session_store`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::SessionStore;
    use tower_sessions::cookie::time::{Duration, OffsetDateTime};
    use tower_sessions::session::{Id, Record};

    use super::*;
    use crate::models::session_keys;

    fn cart_record(expiry_date: OffsetDateTime) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::from([(
                session_keys::CART.to_string(),
                serde_json::Value::String(r#"[{"id":"bujia","qty":1}]"#.to_string()),
            )]),
            expiry_date,
        }
    }

    #[tokio::test]
    async fn test_live_session_is_loaded() {
        let store = create_session_store();
        let mut record = cart_record(OffsetDateTime::now_utc() + Duration::days(1));
        store.create(&mut record).await.unwrap();

        let loaded = store.load(&record.id).await.unwrap().unwrap();
        assert!(loaded.data.contains_key(session_keys::CART));
    }

    #[tokio::test]
    async fn test_expired_session_cart_is_not_served() {
        let store = create_session_store();
        let mut record = cart_record(OffsetDateTime::now_utc() - Duration::minutes(1));
        store.create(&mut record).await.unwrap();

        assert!(store.load(&record.id).await.unwrap().is_none());
    }
}
