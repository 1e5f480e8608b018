//! Barber roster operations.

use reqwest::Method;
use tracing::{debug, instrument};

use queuemate_core::{Barber, BarberId, BarberStatus, BarberUpdate, NewBarber};

use super::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// The principal's barbers.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_barbers(&self) -> Result<Vec<Barber>, ClientError> {
        let barbers: Vec<Barber> = self.get(self.endpoints().barbers()).await?;
        debug!(count = barbers.len(), "Listed barbers");
        Ok(barbers)
    }

    /// Add a barber to the roster.
    ///
    /// The response body is not relied on; callers reload the roster.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, barber), fields(name = %barber.name))]
    pub async fn create_barber(&self, barber: &NewBarber) -> Result<(), ClientError> {
        self.send_json_discard(Method::POST, self.endpoints().barbers(), barber)
            .await
    }

    /// Patch a barber.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, update), fields(barber_id = %id))]
    pub async fn update_barber(&self, id: &BarberId, update: &BarberUpdate) -> Result<(), ClientError> {
        self.send_json_discard(Method::PATCH, self.endpoints().barber(id), update)
            .await
    }

    /// Change only the barber's availability.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn set_barber_status(&self, id: &BarberId, status: BarberStatus) -> Result<(), ClientError> {
        self.update_barber(id, &BarberUpdate::status(status)).await
    }

    /// Remove a barber from the roster.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(barber_id = %id))]
    pub async fn delete_barber(&self, id: &BarberId) -> Result<(), ClientError> {
        self.delete(self.endpoints().barber(id)).await
    }
}
