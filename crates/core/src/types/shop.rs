//! Shop wire types.

use serde::{Deserialize, Serialize};

use super::hours::OpeningHours;
use super::id::{ShopId, UserId};
use super::status::ShopStatus;

/// Errors from validating shop details before they are sent.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopFormError {
    /// Name, phone or location is blank.
    #[error("Fill all fields")]
    MissingField(&'static str),
}

/// Owner reference on a shop.
///
/// Depending on the endpoint the backend either returns the owner's id or
/// the populated owner document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShopOwner {
    Id(UserId),
    Populated {
        #[serde(rename = "_id")]
        id: UserId,
    },
}

impl ShopOwner {
    /// The owner's user id, whichever form it arrived in.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        match self {
            Self::Id(id) | Self::Populated { id } => id,
        }
    }
}

/// A shop as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(rename = "_id")]
    pub id: ShopId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ShopStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ShopOwner>,
    /// Older shop documents record the owner here instead of `owner`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
}

impl Shop {
    /// Whether `user_id` owns this shop, via either `owner` or `user`.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.id() == user_id)
            || self.user.as_ref() == Some(user_id)
    }

    /// Current status, treating an unset status as closed.
    #[must_use]
    pub fn status(&self) -> ShopStatus {
        self.status.unwrap_or_default()
    }

    /// Path segment customers use to reach the shop: the slug when set,
    /// otherwise the id.
    #[must_use]
    pub fn public_handle(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Parsed opening hours, if the stored string is in the standard form.
    #[must_use]
    pub fn opening_hours(&self) -> Option<OpeningHours> {
        self.hours.as_deref().and_then(|h| OpeningHours::parse(h).ok())
    }
}

/// Details for creating a shop, or replacing an existing shop's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewShop {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub hours: String,
}

impl NewShop {
    /// Build validated shop details.
    ///
    /// # Errors
    ///
    /// Returns [`ShopFormError::MissingField`] if name, phone or location is
    /// blank.
    pub fn new(
        name: &str,
        phone: &str,
        location: &str,
        hours: OpeningHours,
    ) -> Result<Self, ShopFormError> {
        Ok(Self {
            name: required(name, "name")?,
            phone: required(phone, "phone")?,
            location: required(location, "location")?,
            hours: hours.to_string(),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ShopFormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ShopFormError::MissingField(field));
    }
    Ok(value.to_owned())
}

/// Partial shop update. Unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShopUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShopStatus>,
}

impl ShopUpdate {
    /// An update that only changes the shop's status.
    #[must_use]
    pub fn status(status: ShopStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<NewShop> for ShopUpdate {
    fn from(details: NewShop) -> Self {
        Self {
            name: Some(details.name),
            phone: Some(details.phone),
            location: Some(details.location),
            hours: Some(details.hours),
            status: None,
        }
    }
}
