//! Shop and queue operations.

use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};

use queuemate_core::{NewShop, QueueEntry, Shop, ShopId, ShopStatus, ShopUpdate};

use super::client::ApiClient;
use crate::error::ClientError;

/// `PUT /api/shops/update/:id` wraps the updated shop.
#[derive(Deserialize)]
struct UpdatedShop {
    shop: Shop,
}

impl ApiClient {
    /// Every shop visible to the principal.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is not a list
    /// of shops.
    #[instrument(skip(self))]
    pub async fn list_shops(&self) -> Result<Vec<Shop>, ClientError> {
        let shops: Vec<Shop> = self.get(self.endpoints().shops()).await?;
        debug!(count = shops.len(), "Listed shops");
        Ok(shops)
    }

    /// Fetch one shop by slug or id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` when no such shop exists.
    #[instrument(skip(self))]
    pub async fn get_shop(&self, slug_or_id: &str) -> Result<Shop, ClientError> {
        self.get(self.endpoints().shop(slug_or_id)).await
    }

    /// Create a shop owned by the principal.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, details), fields(name = %details.name))]
    pub async fn create_shop(&self, details: &NewShop) -> Result<Shop, ClientError> {
        let shop: Shop = self
            .send_json(Method::POST, self.endpoints().shops(), details)
            .await?;
        debug!(shop_id = %shop.id, "Shop created");
        Ok(shop)
    }

    /// Apply a partial update and return the stored shop.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, update), fields(shop_id = %id))]
    pub async fn update_shop(&self, id: &ShopId, update: &ShopUpdate) -> Result<Shop, ClientError> {
        let body: UpdatedShop = self
            .send_json(Method::PUT, self.endpoints().update_shop(id), update)
            .await?;
        Ok(body.shop)
    }

    /// Open, close or freeze the shop's queue.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn set_shop_status(&self, id: &ShopId, status: ShopStatus) -> Result<Shop, ClientError> {
        self.update_shop(id, &ShopUpdate::status(status)).await
    }

    /// Today's queue for a shop. A `null` body counts as empty.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(shop_id = %id))]
    pub async fn shop_queue(&self, id: &ShopId) -> Result<Vec<QueueEntry>, ClientError> {
        let entries: Option<Vec<QueueEntry>> = self.get(self.endpoints().shop_queue(id)).await?;
        Ok(entries.unwrap_or_default())
    }
}
