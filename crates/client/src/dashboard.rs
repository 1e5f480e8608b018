//! Dashboard view-model: the linked shop, its queue and its status controls.

use tracing::{info, instrument, warn};
use url::Position;

use queuemate_core::{NewShop, QueueEntry, QueueStats, Shop, ShopId, ShopStatus, ShopUpdate};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::poller::QueuePoller;

/// Result of loading the linked shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopLoad {
    Loaded(Shop),
    /// The server no longer knows the linked shop. The link has been
    /// cleared, so the gate now routes to shop setup.
    Stale,
}

/// State behind the dashboard and edit-shop screens.
#[derive(Debug)]
pub struct Dashboard {
    api: ApiClient,
    shop_id: ShopId,
    shop: Option<Shop>,
    queue: Vec<QueueEntry>,
    public_link_host: String,
}

impl Dashboard {
    /// Dashboard for the session's linked shop.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when signed out and
    /// [`ClientError::NoShop`] when no shop is linked.
    pub fn new(api: ApiClient, public_link_host: impl Into<String>) -> Result<Self, ClientError> {
        let session = api.session().current();
        if !session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let shop_id = session.shop_id().cloned().ok_or(ClientError::NoShop)?;

        Ok(Self {
            api,
            shop_id,
            shop: None,
            queue: Vec::new(),
            public_link_host: public_link_host.into(),
        })
    }

    #[must_use]
    pub const fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// The shop as last loaded, with any optimistic status applied.
    #[must_use]
    pub const fn shop(&self) -> Option<&Shop> {
        self.shop.as_ref()
    }

    #[must_use]
    pub fn queue(&self) -> &[QueueEntry] {
        &self.queue
    }

    /// Total, completed and waiting counts for the loaded queue.
    #[must_use]
    pub fn queue_stats(&self) -> QueueStats {
        QueueStats::from_entries(&self.queue)
    }

    /// Load the shop.
    ///
    /// A 404 clears the session's shop link and returns [`ShopLoad::Stale`]
    /// instead of an error, so the caller lands on setup rather than looping
    /// back into this fetch.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` for every other failure.
    #[instrument(skip(self), fields(shop_id = %self.shop_id))]
    pub async fn load_shop(&mut self) -> Result<ShopLoad, ClientError> {
        let result = self.api.get_shop(self.shop_id.as_str()).await;
        self.apply_shop(result).await
    }

    /// Load the queue, replacing the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails; the previous snapshot is
    /// kept.
    pub async fn load_queue(&mut self) -> Result<&[QueueEntry], ClientError> {
        self.queue = self.api.shop_queue(&self.shop_id).await?;
        Ok(&self.queue)
    }

    /// Load shop and queue concurrently.
    ///
    /// A failed queue fetch is logged and the previous snapshot kept; only
    /// the shop outcome is returned.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the shop could not be loaded.
    #[instrument(skip(self), fields(shop_id = %self.shop_id))]
    pub async fn refresh(&mut self) -> Result<ShopLoad, ClientError> {
        let (shop, queue) = tokio::join!(
            self.api.get_shop(self.shop_id.as_str()),
            self.api.shop_queue(&self.shop_id)
        );

        match queue {
            Ok(entries) => self.queue = entries,
            Err(e) => warn!(error = %e, "Queue refresh failed"),
        }

        self.apply_shop(shop).await
    }

    async fn apply_shop(&mut self, result: Result<Shop, ClientError>) -> Result<ShopLoad, ClientError> {
        match result {
            Ok(shop) => {
                self.shop = Some(shop.clone());
                Ok(ShopLoad::Loaded(shop))
            }
            Err(ClientError::NotFound(_)) => {
                warn!("Linked shop no longer exists, clearing link");
                self.shop = None;
                self.queue.clear();
                self.api.session().set_shop_id_locally(None).await;
                Ok(ShopLoad::Stale)
            }
            Err(e) => Err(e),
        }
    }

    /// Change the shop status, showing it immediately.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the update fails; the previous shop state is
    /// restored.
    #[instrument(skip(self), fields(shop_id = %self.shop_id))]
    pub async fn set_status(&mut self, status: ShopStatus) -> Result<&Shop, ClientError> {
        let previous = self.shop.clone();
        if let Some(shop) = self.shop.as_mut() {
            shop.status = Some(status);
        }

        match self.api.set_shop_status(&self.shop_id, status).await {
            Ok(shop) => {
                info!(status = %shop.status(), "Shop status changed");
                Ok(self.shop.insert(shop))
            }
            Err(e) => {
                self.shop = previous;
                Err(e)
            }
        }
    }

    /// Unfreeze a frozen shop (to open); freeze anything else.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_status`].
    pub async fn toggle_freeze(&mut self) -> Result<&Shop, ClientError> {
        let current = self.shop.as_ref().map(Shop::status).unwrap_or_default();
        self.set_status(current.toggled_freeze()).await
    }

    /// Save the edit-shop form. Status is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the update fails.
    #[instrument(skip(self, details), fields(shop_id = %self.shop_id))]
    pub async fn update_details(&mut self, details: NewShop) -> Result<&Shop, ClientError> {
        let shop = self
            .api
            .update_shop(&self.shop_id, &ShopUpdate::from(details))
            .await?;
        info!("Shop details updated");
        Ok(self.shop.insert(shop))
    }

    /// Short public link, e.g. `queuely.app/fade-house`.
    #[must_use]
    pub fn public_link(&self) -> Option<String> {
        self.shop
            .as_ref()
            .map(|shop| format!("{}/{}", self.public_link_host, shop.public_handle()))
    }

    /// Text offered when sharing the queue.
    #[must_use]
    pub fn share_message(&self) -> Option<String> {
        let shop = self.shop.as_ref()?;
        let base = self.api.endpoints().base();
        let host = base[Position::BeforeHost..Position::AfterPath].trim_end_matches('/');
        Some(format!(
            "Join our queue at {}: https://{host}/shops/{}",
            shop.name,
            shop.public_handle()
        ))
    }

    /// Start refreshing this shop's queue every `period`.
    #[must_use]
    pub fn poller(&self, period: std::time::Duration) -> QueuePoller {
        QueuePoller::spawn(self.api.clone(), self.shop_id.clone(), period)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::Endpoints;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    fn dashboard(base: &str, shop: serde_json::Value) -> Dashboard {
        let endpoints = Endpoints::new(url::Url::parse(base).unwrap());
        let session = SessionStore::new(Arc::new(MemoryStore::new()), reqwest::Client::new(), endpoints);
        Dashboard {
            api: ApiClient::new(session),
            shop_id: ShopId::new("s1"),
            shop: Some(serde_json::from_value(shop).unwrap()),
            queue: Vec::new(),
            public_link_host: "queuely.app".to_string(),
        }
    }

    #[test]
    fn test_public_link_prefers_slug() {
        let d = dashboard(
            "https://api.example.com/",
            json!({"_id": "s1", "name": "Fade House", "slug": "fade-house"}),
        );
        assert_eq!(d.public_link().as_deref(), Some("queuely.app/fade-house"));

        let d = dashboard("https://api.example.com/", json!({"_id": "s1", "name": "Fade House"}));
        assert_eq!(d.public_link().as_deref(), Some("queuely.app/s1"));
    }

    #[test]
    fn test_share_message() {
        let d = dashboard(
            "https://api.example.com/v2/",
            json!({"_id": "s1", "name": "Fade House", "slug": "fade-house"}),
        );
        assert_eq!(
            d.share_message().as_deref(),
            Some("Join our queue at Fade House: https://api.example.com/v2/shops/fade-house")
        );
    }

    #[test]
    fn test_new_requires_linked_shop() {
        let endpoints = Endpoints::new(url::Url::parse("https://api.example.com/").unwrap());
        let session = SessionStore::new(Arc::new(MemoryStore::new()), reqwest::Client::new(), endpoints);
        let err = Dashboard::new(ApiClient::new(session), "queuely.app").unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }
}
