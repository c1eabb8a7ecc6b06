//! Typed clients for the REST endpoints used by the views
//!
//! All of them go through [`AuthClient`](crate::core::http::AuthClient), so
//! they get bearer credentials and the refresh-and-retry behaviour for free.

pub mod dashboard;
pub mod profile;
pub mod reservations;
pub mod resources;

use serde::{Deserialize, Serialize};

use crate::core::error::SessionError;

pub use dashboard::{
    AdminMetrics, DashboardApi, DashboardSummary, NextPendingApproval, NextReservation,
};
pub use profile::{Profile, ProfileApi, ProfileUpdate};
pub use reservations::{
    NewReservation, Reservation, ReservationDecision, ReservationStatus, ReservationsApi,
};
pub use resources::{
    NewResource, PriceUnit, Resource, ResourceFilter, ResourceImage, ResourceKind, ResourceOwner,
    ResourceUpdate, ResourcesApi,
};

/// Default page size of the catalogue
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of a paginated list, as sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    /// Number of the last page; 1 for an empty list
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: 1,
            last_page: 1,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.last_page
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Check page/limit before hitting the backend
pub fn validate_pagination(page: u32, limit: u32) -> Result<(), SessionError> {
    if page == 0 {
        return Err(SessionError::Validation(
            "La page doit être supérieure ou égale à 1.".to_string(),
        ));
    }
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(SessionError::Validation(format!(
            "La taille de page doit être comprise entre 1 et {}.",
            MAX_PAGE_SIZE
        )));
    }
    Ok(())
}
