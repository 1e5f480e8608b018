//! Barber (staff member) wire types and form validation.

use serde::{Deserialize, Serialize};

use super::id::{BarberId, ServiceId};
use super::status::BarberStatus;

/// Duration assumed for a service when none (or zero) is given, in minutes.
pub const DEFAULT_SERVICE_MINUTES: u32 = 30;

/// Errors from validating a barber form before it is sent.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BarberFormError {
    /// Name is blank.
    #[error("Please enter the barber's name")]
    MissingName,
    /// Every service row was blank.
    #[error("Please add at least one service")]
    NoServices,
}

/// A service a barber offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServiceId>,
    pub name: String,
    /// Minutes.
    pub duration: u32,
}

/// A barber as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    #[serde(rename = "_id")]
    pub id: BarberId,
    pub name: String,
    #[serde(default)]
    pub status: BarberStatus,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub avg_duration: u32,
    /// Code the barber uses to sign in to the staff app.
    #[serde(default)]
    pub access_code: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Barber {
    /// Case-insensitive match of `needle` against the name and service names.
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .services
                .iter()
                .any(|service| service.name.to_lowercase().contains(needle))
    }
}

/// One service row as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    pub name: String,
    pub duration: Option<u32>,
}

impl ServiceDraft {
    /// Create a service row.
    #[must_use]
    pub fn new(name: impl Into<String>, duration: Option<u32>) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

impl std::str::FromStr for ServiceDraft {
    type Err = String;

    /// Parse `name` or `name:minutes`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((name, minutes)) => {
                let minutes = minutes
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid duration in service {s:?}"))?;
                Ok(Self::new(name, Some(minutes)))
            }
            None => Ok(Self::new(s, None)),
        }
    }
}

/// Trim rows, drop blank names and default missing durations.
fn clean_services(drafts: Vec<ServiceDraft>) -> Vec<Service> {
    drafts
        .into_iter()
        .filter_map(|draft| {
            let name = draft.name.trim();
            (!name.is_empty()).then(|| Service {
                id: None,
                name: name.to_owned(),
                duration: draft
                    .duration
                    .filter(|d| *d > 0)
                    .unwrap_or(DEFAULT_SERVICE_MINUTES),
            })
        })
        .collect()
}

/// Rounded mean service duration.
fn average_duration(services: &[Service]) -> u32 {
    if services.is_empty() {
        return 0;
    }
    let total: u64 = services.iter().map(|s| u64::from(s.duration)).sum();
    let count = services.len() as u64;
    u32::try_from((total + count / 2) / count).unwrap_or(u32::MAX)
}

/// A barber to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBarber {
    pub name: String,
    pub services: Vec<Service>,
    pub status: BarberStatus,
    pub avg_duration: u32,
}

impl NewBarber {
    /// Build a validated barber from form input.
    ///
    /// # Errors
    ///
    /// Returns [`BarberFormError::MissingName`] for a blank name and
    /// [`BarberFormError::NoServices`] when no service row has a name.
    pub fn build(
        name: &str,
        services: Vec<ServiceDraft>,
        status: BarberStatus,
    ) -> Result<Self, BarberFormError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BarberFormError::MissingName);
        }

        let services = clean_services(services);
        if services.is_empty() {
            return Err(BarberFormError::NoServices);
        }

        Ok(Self {
            name: name.to_owned(),
            avg_duration: average_duration(&services),
            services,
            status,
        })
    }
}

/// Partial barber update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BarberStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration: Option<u32>,
}

impl BarberUpdate {
    /// An update that only changes availability.
    #[must_use]
    pub fn status(status: BarberStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A full edit of name, services and status, validated like a new barber.
    ///
    /// # Errors
    ///
    /// Same as [`NewBarber::build`].
    pub fn edit(
        name: &str,
        services: Vec<ServiceDraft>,
        status: BarberStatus,
    ) -> Result<Self, BarberFormError> {
        let barber = NewBarber::build(name, services, status)?;
        Ok(Self {
            name: Some(barber.name),
            services: Some(barber.services),
            status: Some(barber.status),
            avg_duration: Some(barber.avg_duration),
        })
    }
}
