//! Shop setup and dashboard commands.
//!
//! # Usage
//!
//! ```bash
//! queuemate shop setup -n "Fade House" -p 555-0100 -l "12 Main St" --open 09:00 --close 19:00
//! queuemate shop show
//! queuemate shop status open
//! queuemate shop toggle-freeze
//! queuemate shop link
//! ```

use queuemate_client::{
    ClientError, Dashboard, QueueMate, Screen, ShopLoad, ShopVerification, create_shop,
    verify_existing_shop,
};
use queuemate_core::{NewShop, OpeningHours, Shop, ShopStatus};

use super::require;
use crate::error::CliError;
use crate::render;

/// Shop form fields; `None` keeps the current value when editing.
#[derive(Debug, Default)]
pub struct ShopForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
}

impl ShopForm {
    /// Build the request body, filling gaps from `current`.
    fn into_details(self, current: Option<&Shop>) -> Result<NewShop, CliError> {
        let hours = current
            .and_then(Shop::opening_hours)
            .unwrap_or_default();
        let open = match self.open {
            Some(open) => OpeningHours::parse_time(&open)?,
            None => hours.open,
        };
        let close = match self.close {
            Some(close) => OpeningHours::parse_time(&close)?,
            None => hours.close,
        };

        let name = self
            .name
            .or_else(|| current.map(|shop| shop.name.clone()))
            .unwrap_or_default();
        let phone = self
            .phone
            .or_else(|| current.and_then(|shop| shop.phone.clone()))
            .unwrap_or_default();
        let location = self
            .location
            .or_else(|| current.and_then(|shop| shop.location.clone()))
            .unwrap_or_default();

        Ok(NewShop::new(
            &name,
            &phone,
            &location,
            OpeningHours::new(open, close),
        )?)
    }
}

/// Link an existing shop, or create one from the form.
pub async fn setup(app: &QueueMate, form: ShopForm) -> Result<(), CliError> {
    require(app, Screen::ShopSetup).await?;

    match verify_existing_shop(app.api()).await {
        ShopVerification::Linked(shop_id) => {
            render::line(&format!("Your shop {shop_id} is already set up."));
            return Ok(());
        }
        ShopVerification::SessionExpired => return Err(ClientError::SessionExpired.into()),
        ShopVerification::NeedsSetup | ShopVerification::Pending => {}
    }

    let details = form.into_details(None)?;
    let shop = create_shop(app.api(), &details).await?;
    render::line(&format!("Created {} ({}).", shop.name, shop.id));
    Ok(())
}

/// Dashboard with a loaded shop, or the error that explains why not.
async fn open_dashboard(app: &QueueMate, screen: Screen) -> Result<Dashboard, CliError> {
    require(app, screen).await?;
    let mut dashboard = app.dashboard()?;

    match dashboard.refresh().await? {
        ShopLoad::Loaded(_) => Ok(dashboard),
        ShopLoad::Stale => Err(CliError::Invalid(
            "Your shop no longer exists. Run `queuemate shop setup` to create a new one."
                .to_string(),
        )),
    }
}

/// Show the shop, today's counters and the public link.
pub async fn show(app: &QueueMate) -> Result<(), CliError> {
    let dashboard = open_dashboard(app, Screen::Dashboard).await?;
    if let Some(shop) = dashboard.shop() {
        render::shop(shop, dashboard.public_link().as_deref());
    }
    render::stats(dashboard.queue_stats());
    Ok(())
}

/// Update name, phone, location or hours.
pub async fn edit(app: &QueueMate, form: ShopForm) -> Result<(), CliError> {
    let mut dashboard = open_dashboard(app, Screen::EditShop).await?;
    let details = form.into_details(dashboard.shop())?;

    let shop = dashboard
        .update_details(details)
        .await
        .map_err(|e| failed(e, "Failed to update shop."))?;
    render::line("Shop details updated successfully!");
    render::shop(shop, None);
    Ok(())
}

/// Open, close or freeze the queue.
pub async fn set_status(app: &QueueMate, status: ShopStatus) -> Result<(), CliError> {
    let mut dashboard = open_dashboard(app, Screen::Dashboard).await?;
    let shop = dashboard
        .set_status(status)
        .await
        .map_err(|e| failed(e, "Could not update shop status"))?;
    render::line(&format!("{} is now {}.", shop.name, shop.status()));
    Ok(())
}

/// Freeze an open or closed queue; reopen a frozen one.
pub async fn toggle_freeze(app: &QueueMate) -> Result<(), CliError> {
    let mut dashboard = open_dashboard(app, Screen::Dashboard).await?;
    let shop = dashboard
        .toggle_freeze()
        .await
        .map_err(|e| failed(e, "Could not update shop status"))?;
    render::line(&format!("{} is now {}.", shop.name, shop.status()));
    Ok(())
}

/// Print the public link and the share text.
pub async fn link(app: &QueueMate) -> Result<(), CliError> {
    let dashboard = open_dashboard(app, Screen::Dashboard).await?;
    if let Some(link) = dashboard.public_link() {
        render::line(&link);
    }
    if let Some(message) = dashboard.share_message() {
        render::line(&message);
    }
    Ok(())
}

/// Session errors pass through; anything else shows the server's message
/// or `fallback`.
pub fn failed(error: ClientError, fallback: &str) -> CliError {
    if error.is_session_error() {
        return error.into();
    }
    CliError::Invalid(error.message_or(fallback).to_string())
}
