//! Shop setup flow.
//!
//! A principal without a linked shop may still own one on the server (for
//! example after signing in on a new device). [`verify_existing_shop`] looks
//! it up before asking for setup; [`create_shop`] registers a new shop and
//! links it. Linking moves the navigation gate from `AwaitingShopSetup` to
//! `Authenticated` without a new sign-in.

use tracing::{info, instrument, warn};

use queuemate_core::{NewShop, Shop, ShopId};

use crate::api::ApiClient;
use crate::error::ClientError;

/// Outcome of looking for an existing shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopVerification {
    /// Session restoration has not finished yet.
    Pending,
    /// A shop is linked to the session.
    Linked(ShopId),
    /// The principal owns no shop; show the setup form.
    NeedsSetup,
    /// The credential is gone or was rejected; the session is cleared.
    SessionExpired,
}

/// Link the principal's existing shop, if the server knows one.
///
/// Transient failures fall back to [`ShopVerification::NeedsSetup`] so the
/// form stays usable. A 401 or 403 ends the session.
#[instrument(skip(api))]
pub async fn verify_existing_shop(api: &ApiClient) -> ShopVerification {
    let session = api.session().current();

    if session.is_loading() {
        return ShopVerification::Pending;
    }
    if let Some(shop_id) = session.shop_id() {
        return ShopVerification::Linked(shop_id.clone());
    }
    let Some(user_id) = session.user_id() else {
        return ShopVerification::SessionExpired;
    };

    match api.list_shops().await {
        Ok(shops) => match shops.into_iter().find(|shop| shop.is_owned_by(user_id)) {
            Some(shop) => {
                info!(shop_id = %shop.id, "Found existing shop");
                api.session().set_shop_id_locally(Some(shop.id.clone())).await;
                ShopVerification::Linked(shop.id)
            }
            None => ShopVerification::NeedsSetup,
        },
        Err(e) => {
            if end_rejected_session(api, &e).await {
                ShopVerification::SessionExpired
            } else {
                warn!(error = %e, "Could not verify shop status");
                ShopVerification::NeedsSetup
            }
        }
    }
}

/// Create the principal's shop and link it to the session.
///
/// # Errors
///
/// Returns [`ClientError::SessionExpired`] after a 401 or 403 (the session
/// is cleared), or the underlying error for anything else.
#[instrument(skip(api, details), fields(name = %details.name))]
pub async fn create_shop(api: &ApiClient, details: &NewShop) -> Result<Shop, ClientError> {
    match api.create_shop(details).await {
        Ok(shop) => {
            api.session().set_shop_id_locally(Some(shop.id.clone())).await;
            info!(shop_id = %shop.id, "Shop linked");
            Ok(shop)
        }
        Err(e) => {
            if end_rejected_session(api, &e).await {
                Err(ClientError::SessionExpired)
            } else {
                Err(e)
            }
        }
    }
}

/// Log out on 401/403. Returns whether the session was ended.
async fn end_rejected_session(api: &ApiClient, error: &ClientError) -> bool {
    match error {
        ClientError::Unauthorized | ClientError::NotAuthenticated => true,
        ClientError::Forbidden(_) => {
            warn!("Shop setup forbidden, signing out");
            api.session().logout().await;
            true
        }
        _ => false,
    }
}
