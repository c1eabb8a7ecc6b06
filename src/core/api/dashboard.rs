//! Dashboards: per-user summary and super-admin platform metrics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reservations::ReservationStatus;
use crate::core::auth::TokenStorage;
use crate::core::error::SessionError;
use crate::core::http::{ApiRequest, AuthClient, HttpTransport};

const SUMMARY_PATH: &str = "/dashboard/summary";
const ADMIN_METRICS_PATH: &str = "/admin/dashboard/metrics";

/// Next reservation made by the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextReservation {
    pub id: String,
    pub resource_name: String,
    pub start_date: DateTime<Utc>,
    pub status: ReservationStatus,
}

/// Oldest request waiting for the current user's answer as an owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPendingApproval {
    pub id: String,
    pub resource_name: String,
    pub start_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub my_resource_count: u64,
    pub pending_approval_count: u64,
    pub my_reservations_count: u64,
    pub next_reservation_made: Option<NextReservation>,
    pub next_pending_approval: Option<NextPendingApproval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// "local", "google" or "github"
    pub provider: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub total: u64,
    pub verified: u64,
    pub local: u64,
    #[serde(default)]
    pub recent: Vec<RecentUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetrics {
    pub total: u64,
    pub recent_last_week: u64,
    #[serde(default)]
    pub types_count: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReservation {
    pub id: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub locataire_email: String,
    pub resource_name: String,
    pub resource_price: f64,
    pub resource_price_unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationMetrics {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    #[serde(default)]
    pub recent: Vec<RecentReservation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceMetrics {
    pub potential_revenue_from_confirmed_reservations: f64,
}

/// Platform-wide metrics, super admins only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminMetrics {
    pub users: UserMetrics,
    pub resources: ResourceMetrics,
    pub reservations: ReservationMetrics,
    pub finance: FinanceMetrics,
}

impl AdminMetrics {
    /// Share of reservations that were confirmed, in percent
    pub fn confirmation_rate(&self) -> Option<f64> {
        if self.reservations.total == 0 {
            return None;
        }
        Some(self.reservations.confirmed as f64 * 100.0 / self.reservations.total as f64)
    }

    /// Resource count of one type ("ROOM", "EQUIPMENT"), 0 when absent
    pub fn resources_of_type(&self, kind: &str) -> u64 {
        self.resources
            .types_count
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.count)
            .sum()
    }
}

/// Dashboard endpoints
pub struct DashboardApi<'a, S, T> {
    client: &'a AuthClient<S, T>,
}

impl<'a, S: TokenStorage, T: HttpTransport> DashboardApi<'a, S, T> {
    pub fn new(client: &'a AuthClient<S, T>) -> Self {
        Self { client }
    }

    /// Summary of the signed-in user's activity
    pub async fn summary(&self) -> Result<DashboardSummary, SessionError> {
        self.client.send_json(ApiRequest::get(SUMMARY_PATH)).await
    }

    /// Platform metrics; the backend rejects non-admins with 403
    pub async fn admin_metrics(&self) -> Result<AdminMetrics, SessionError> {
        self.client
            .send_json(ApiRequest::get(ADMIN_METRICS_PATH))
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::auth::RefreshPolicy;
    use crate::core::http::Method;
    use crate::core::http::testing::test_session;
    use serde_json::json;

    pub(crate) fn metrics_json() -> serde_json::Value {
        json!({
            "users": {
                "total": 40,
                "verified": 31,
                "local": 22,
                "recent": [{
                    "id": "u-9",
                    "email": "nouveau@resa-chap.fr",
                    "createdAt": "2025-10-03T07:12:00.000Z",
                    "provider": "google",
                }],
            },
            "resources": {
                "total": 18,
                "recentLastWeek": 3,
                "typesCount": [
                    { "type": "ROOM", "count": 11 },
                    { "type": "EQUIPMENT", "count": 7 },
                ],
            },
            "reservations": {
                "total": 8,
                "pending": 2,
                "confirmed": 6,
                "recent": [{
                    "id": "resa-4",
                    "status": "CONFIRMED",
                    "createdAt": "2025-10-02T18:00:00.000Z",
                    "locataireEmail": "paul@resa-chap.fr",
                    "resourceName": "Salle Jaurès",
                    "resourcePrice": 25.5,
                    "resourcePriceUnit": "HOUR",
                }],
            },
            "finance": { "potentialRevenueFromConfirmedReservations": 1530.0 },
        })
    }

    // ========================================================================
    // Summary Tests
    // ========================================================================

    #[tokio::test]
    async fn test_summary_with_next_items() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        client.session().transport().respond(
            Method::Get,
            SUMMARY_PATH,
            200,
            json!({
                "myResourceCount": 2,
                "pendingApprovalCount": 1,
                "myReservationsCount": 5,
                "nextReservationMade": {
                    "id": "resa-1",
                    "resourceName": "Salle Jaurès",
                    "startDate": "2026-05-04T08:00:00.000Z",
                    "status": "CONFIRMED",
                },
                "nextPendingApproval": {
                    "id": "resa-2",
                    "resourceName": "Vidéoprojecteur",
                    "startDate": "2026-05-06T14:00:00.000Z",
                },
            }),
        );

        let summary = DashboardApi::new(&client).summary().await.unwrap();

        assert_eq!(summary.my_reservations_count, 5);
        let next = summary.next_reservation_made.unwrap();
        assert_eq!(next.status, ReservationStatus::Confirmed);
        assert_eq!(
            summary.next_pending_approval.map(|p| p.resource_name),
            Some("Vidéoprojecteur".to_string())
        );
    }

    #[tokio::test]
    async fn test_summary_without_next_items() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        client.session().transport().respond(
            Method::Get,
            SUMMARY_PATH,
            200,
            json!({
                "myResourceCount": 0,
                "pendingApprovalCount": 0,
                "myReservationsCount": 0,
                "nextReservationMade": null,
                "nextPendingApproval": null,
            }),
        );

        let summary = DashboardApi::new(&client).summary().await.unwrap();

        assert_eq!(summary, DashboardSummary::default());
    }

    // ========================================================================
    // Admin Metrics Tests
    // ========================================================================

    #[test]
    fn test_decode_admin_metrics() {
        let metrics: AdminMetrics = serde_json::from_value(metrics_json()).unwrap();

        assert_eq!(metrics.users.verified, 31);
        assert_eq!(metrics.users.recent[0].provider, "google");
        assert_eq!(metrics.resources.recent_last_week, 3);
        assert_eq!(metrics.resources_of_type("EQUIPMENT"), 7);
        assert_eq!(metrics.resources_of_type("VEHICLE"), 0);
        assert_eq!(metrics.reservations.recent[0].locataire_email, "paul@resa-chap.fr");
        assert_eq!(
            metrics.finance.potential_revenue_from_confirmed_reservations,
            1530.0
        );
    }

    #[test]
    fn test_confirmation_rate() {
        let mut metrics = AdminMetrics::default();
        assert_eq!(metrics.confirmation_rate(), None);

        metrics.reservations.total = 8;
        metrics.reservations.confirmed = 2;
        assert_eq!(metrics.confirmation_rate(), Some(25.0));
    }

    #[tokio::test]
    async fn test_admin_metrics_endpoint() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        client
            .session()
            .transport()
            .respond(Method::Get, ADMIN_METRICS_PATH, 200, metrics_json());

        let metrics = DashboardApi::new(&client).admin_metrics().await.unwrap();

        assert_eq!(metrics.users.total, 40);
        assert_eq!(metrics.confirmation_rate(), Some(75.0));
    }

    #[tokio::test]
    async fn test_admin_metrics_forbidden() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        client.session().transport().respond(
            Method::Get,
            ADMIN_METRICS_PATH,
            403,
            json!({ "statusCode": 403, "message": "Forbidden resource" }),
        );

        let err = DashboardApi::new(&client).admin_metrics().await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Unexpected {
                status: 403,
                message: Some("Forbidden resource".to_string()),
            }
        );
    }
}
