//! Session-backed cart store.
//!
//! The cart lives in the visitor's session as serialized text under a single
//! key. It is read back on every request, so each rendered view (and every
//! page restored from the browser's history cache that re-fetches its
//! fragments) reflects the last write, whichever tab made it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use repuestos_core::{Cart, CartError, LineChange, NewLine};
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors from reading or writing the session.
pub type CartStoreError = tower_sessions::session::Error;

/// Cart persistence and mutation API.
///
/// Every mutation loads the stored cart, applies the change and saves it back
/// before returning the updated cart for rendering.
#[derive(Clone, Debug)]
pub struct CartStore {
    session: Session,
}

impl CartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Read the stored cart.
    ///
    /// A missing value or text that does not parse yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store itself fails.
    pub async fn load(&self) -> Result<Cart, CartStoreError> {
        let Some(text) = self.session.get::<String>(session_keys::CART).await? else {
            return Ok(Cart::new());
        };

        Ok(Cart::from_persisted(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored cart is unreadable, starting from an empty cart");
            Cart::new()
        }))
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let text = cart.to_persisted()?;
        self.session.insert(session_keys::CART, text).await
    }

    /// Add one unit of a product, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn add_line(&self, line: NewLine) -> Result<Cart, CartStoreError> {
        let mut cart = self.load().await?;
        let index = cart.add_line(line);
        tracing::debug!(index, total = cart.total_quantity(), "Added to cart");
        self.save(&cart).await?;
        Ok(cart)
    }

    /// Add one unit to the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn increment_line(&self, index: usize) -> Result<Cart, CartStoreError> {
        self.mutate(|cart| cart.increment_line(index).map(|_| ()))
            .await
    }

    /// Take one unit off the line at `index`, removing the line at quantity 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn decrement_line(&self, index: usize) -> Result<Cart, CartStoreError> {
        self.mutate(|cart| {
            cart.decrement_line(index).map(|change| {
                if let LineChange::Removed(line) = change {
                    tracing::debug!(product_id = %line.id, "Line removed at quantity 1");
                }
            })
        })
        .await
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn remove_line(&self, index: usize) -> Result<Cart, CartStoreError> {
        self.mutate(|cart| cart.remove_line(index).map(|_| ()))
            .await
    }

    /// Apply an index-addressed mutation.
    ///
    /// A stale index leaves the cart untouched; the caller re-renders from the
    /// returned cart so the page catches up with the stored state.
    async fn mutate(
        &self,
        apply: impl FnOnce(&mut Cart) -> Result<(), CartError>,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self.load().await?;
        match apply(&mut cart) {
            Ok(()) => self.save(&cart).await?,
            Err(e) => tracing::warn!(error = %e, "Ignoring cart mutation for a stale line"),
        }
        Ok(cart)
    }
}

impl<S> FromRequestParts<S> for CartStore
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self::new)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use repuestos_core::ProductId;
    use rust_decimal::Decimal;
    use tower_sessions::Expiry;
    use tower_sessions::cookie::time::{Duration, OffsetDateTime};

    use super::*;
    use crate::middleware::session::create_session_store;

    fn store() -> CartStore {
        CartStore::new(Session::new(None, Arc::new(create_session_store()), None))
    }

    fn spark_plug() -> NewLine {
        NewLine {
            product_id: ProductId::new("bujia"),
            name: "Bujía".to_string(),
            price: Decimal::from(3990),
            image: "/static/images/repuesto.svg".to_string(),
            variation: None,
        }
    }

    #[tokio::test]
    async fn test_empty_session_loads_empty_cart() {
        assert!(store().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_value_loads_empty_cart() {
        let store = store();
        store
            .session
            .insert(session_keys::CART, "{broken")
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let store = store();

        store.add_line(spark_plug()).await.unwrap();
        let cart = store.add_line(spark_plug()).await.unwrap();
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(store.load().await.unwrap(), cart);

        let cart = store.decrement_line(0).await.unwrap();
        assert_eq!(cart.total_quantity(), 1);

        let cart = store.decrement_line(0).await.unwrap();
        assert!(cart.is_empty());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_index_is_ignored() {
        let store = store();
        store.add_line(spark_plug()).await.unwrap();

        let cart = store.remove_line(5).await.unwrap();
        assert_eq!(cart.len(), 1);

        let cart = store.increment_line(0).await.unwrap();
        assert_eq!(cart.total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_value_is_stored_as_text() {
        let store = store();
        store.add_line(spark_plug()).await.unwrap();

        let text: String = store
            .session
            .get(session_keys::CART)
            .await
            .unwrap()
            .unwrap();
        assert!(text.starts_with(r#"[{"id":"bujia""#));
        assert!(text.contains(r#""qty":1"#));
    }

    #[tokio::test]
    async fn test_expired_session_serves_empty_cart() {
        let backend = Arc::new(create_session_store());
        let expired = OffsetDateTime::now_utc() - Duration::minutes(1);
        let session = Session::new(None, backend.clone(), Some(Expiry::AtDateTime(expired)));

        CartStore::new(session.clone())
            .add_line(spark_plug())
            .await
            .unwrap();
        session.save().await.unwrap();

        let reopened = CartStore::new(Session::new(session.id(), backend, None));
        assert!(reopened.load().await.unwrap().is_empty());
    }
}
