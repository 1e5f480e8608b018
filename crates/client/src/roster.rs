//! Barber roster view-model: loading, filtering and editing the team.

use std::fmt;
use std::str::FromStr;

use tracing::{info, instrument};

use queuemate_core::{Barber, BarberId, BarberStatus, BarberUpdate, NewBarber, ServiceDraft};

use crate::api::ApiClient;
use crate::error::ClientError;

/// Shown when the edit form is missing its name or every service.
pub const EDIT_INCOMPLETE: &str = "Please fill in all required fields";

/// Status tab on the roster screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BarberStatus),
}

impl StatusFilter {
    /// Every tab, in display order.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Only(BarberStatus::Active),
        Self::Only(BarberStatus::OnBreak),
        Self::Only(BarberStatus::OffToday),
    ];

    #[must_use]
    pub fn accepts(self, barber: &Barber) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => barber.status == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<BarberStatus>().map(Self::Only)
    }
}

/// Status tab plus free-text search over barber and service names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub status: StatusFilter,
    pub search: String,
}

impl RosterFilter {
    /// Barbers passing both the status tab and the search, in input order.
    #[must_use]
    pub fn apply<'a>(&self, barbers: &'a [Barber]) -> Vec<&'a Barber> {
        let needle = self.search.trim().to_lowercase();
        barbers
            .iter()
            .filter(|barber| self.status.accepts(barber))
            .filter(|barber| needle.is_empty() || barber.matches(&needle))
            .collect()
    }
}

/// Number of barbers under a status tab. Search does not affect counts.
#[must_use]
pub fn count(barbers: &[Barber], filter: StatusFilter) -> usize {
    barbers.iter().filter(|barber| filter.accepts(barber)).count()
}

/// The team, as last loaded.
#[derive(Debug)]
pub struct Roster {
    api: ApiClient,
    barbers: Vec<Barber>,
}

impl Roster {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            barbers: Vec::new(),
        }
    }

    #[must_use]
    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    /// Barbers matching `filter`.
    #[must_use]
    pub fn filtered(&self, filter: &RosterFilter) -> Vec<&Barber> {
        filter.apply(&self.barbers)
    }

    /// Count for every status tab, in display order.
    #[must_use]
    pub fn counts(&self) -> Vec<(StatusFilter, usize)> {
        StatusFilter::ALL
            .iter()
            .map(|filter| (*filter, count(&self.barbers, *filter)))
            .collect()
    }

    /// Reload the team from the server.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails; the previous list is kept.
    pub async fn reload(&mut self) -> Result<&[Barber], ClientError> {
        self.barbers = self.api.list_barbers().await?;
        Ok(&self.barbers)
    }

    /// Validate and add a barber, then reload.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for an incomplete form, or the
    /// request error.
    #[instrument(skip(self, services))]
    pub async fn add(
        &mut self,
        name: &str,
        services: Vec<ServiceDraft>,
        status: BarberStatus,
    ) -> Result<(), ClientError> {
        let barber = NewBarber::build(name, services, status)?;
        self.api.create_barber(&barber).await?;
        info!(name = %barber.name, services = barber.services.len(), "Barber added");
        self.reload().await?;
        Ok(())
    }

    /// Replace a barber's name, services and status, then reload.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` with [`EDIT_INCOMPLETE`] for an
    /// incomplete form, or the request error.
    #[instrument(skip(self, services), fields(barber_id = %id))]
    pub async fn edit(
        &mut self,
        id: &BarberId,
        name: &str,
        services: Vec<ServiceDraft>,
        status: BarberStatus,
    ) -> Result<(), ClientError> {
        let update = BarberUpdate::edit(name, services, status)
            .map_err(|_| ClientError::Validation(EDIT_INCOMPLETE.to_string()))?;
        self.api.update_barber(id, &update).await?;
        info!("Barber updated");
        self.reload().await?;
        Ok(())
    }

    /// Change a barber's availability, then reload.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn set_status(&mut self, id: &BarberId, status: BarberStatus) -> Result<(), ClientError> {
        self.api.set_barber_status(id, status).await?;
        self.reload().await?;
        Ok(())
    }

    /// Look up a loaded barber.
    #[must_use]
    pub fn get(&self, id: &BarberId) -> Option<&Barber> {
        self.barbers.iter().find(|barber| &barber.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team() -> Vec<Barber> {
        serde_json::from_value(json!([
            {"_id": "b1", "name": "Sam", "status": "active",
             "services": [{"name": "Skin Fade", "duration": 30}]},
            {"_id": "b2", "name": "Alex", "status": "On Break",
             "services": [{"name": "Beard Trim", "duration": 15}]},
            {"_id": "b3", "name": "Jo", "status": "Off Today", "services": []},
            {"_id": "b4", "name": "Samira", "status": "active", "services": []}
        ]))
        .unwrap()
    }

    fn names(barbers: &[&Barber]) -> Vec<String> {
        barbers.iter().map(|b| b.name.clone()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everyone() {
        let team = team();
        assert_eq!(RosterFilter::default().apply(&team).len(), 4);
    }

    #[test]
    fn test_status_filter() {
        let team = team();
        let filter = RosterFilter {
            status: StatusFilter::Only(BarberStatus::Active),
            search: String::new(),
        };
        assert_eq!(names(&filter.apply(&team)), ["Sam", "Samira"]);
    }

    #[test]
    fn test_search_matches_names_and_services() {
        let team = team();
        let by_service = RosterFilter {
            status: StatusFilter::All,
            search: " FADE ".to_string(),
        };
        assert_eq!(names(&by_service.apply(&team)), ["Sam"]);

        let combined = RosterFilter {
            status: StatusFilter::Only(BarberStatus::Active),
            search: "sam".to_string(),
        };
        assert_eq!(names(&combined.apply(&team)), ["Sam", "Samira"]);

        let nothing = RosterFilter {
            status: StatusFilter::Only(BarberStatus::OnBreak),
            search: "sam".to_string(),
        };
        assert!(nothing.apply(&team).is_empty());
    }

    #[test]
    fn test_counts_ignore_search() {
        let team = team();
        assert_eq!(count(&team, StatusFilter::All), 4);
        assert_eq!(count(&team, StatusFilter::Only(BarberStatus::Active)), 2);
        assert_eq!(count(&team, StatusFilter::Only(BarberStatus::OnBreak)), 1);
        assert_eq!(count(&team, StatusFilter::Only(BarberStatus::OffToday)), 1);
    }

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "on-break".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(BarberStatus::OnBreak)
        );
        assert!("sleeping".parse::<StatusFilter>().is_err());
    }
}
