//! Reservation workflow: tenants request, owners confirm or reject, tenants cancel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resources::{ResourceKind, item_path};
use crate::core::auth::TokenStorage;
use crate::core::error::SessionError;
use crate::core::http::{ApiRequest, AuthClient, HttpTransport};

/// Reservation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Canceled => "CANCELED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "En attente",
            ReservationStatus::Confirmed => "Confirmée",
            ReservationStatus::Rejected => "Refusée",
            ReservationStatus::Canceled => "Annulée",
        }
    }

    /// Pending can go anywhere, confirmed can only be canceled
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Rejected)
                | (ReservationStatus::Pending, ReservationStatus::Canceled)
                | (ReservationStatus::Confirmed, ReservationStatus::Canceled)
        )
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Rejected | ReservationStatus::Canceled
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owner's answer to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationDecision {
    Confirm,
    Reject,
}

impl ReservationDecision {
    pub fn status(&self) -> ReservationStatus {
        match self {
            ReservationDecision::Confirm => ReservationStatus::Confirmed,
            ReservationDecision::Reject => ReservationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationOwner {
    pub email: String,
}

/// Resource summary embedded in a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedResource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Only on reservations made by the current user
    #[serde(default)]
    pub owner: Option<ReservationOwner>,
}

/// Tenant details, only on reservations received by an owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub resource_id: String,
    pub locataire_id: String,
    pub date_debut: DateTime<Utc>,
    pub date_fin: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub resource: ReservedResource,
    #[serde(default)]
    pub locataire: Option<Tenant>,
}

impl Reservation {
    pub fn duration_hours(&self) -> f64 {
        (self.date_fin - self.date_debut).num_minutes().abs() as f64 / 60.0
    }
}

/// Reservation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub resource_id: String,
    pub date_debut: DateTime<Utc>,
    pub date_fin: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewReservation {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.resource_id.trim().is_empty() {
            return Err(SessionError::Validation(
                "Aucune ressource sélectionnée.".to_string(),
            ));
        }
        if self.date_debut >= self.date_fin {
            return Err(SessionError::Validation(
                "La date de début doit précéder la date de fin.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusUpdate {
    status: ReservationStatus,
}

/// Reservation endpoints
pub struct ReservationsApi<'a, S, T> {
    client: &'a AuthClient<S, T>,
}

impl<'a, S: TokenStorage, T: HttpTransport> ReservationsApi<'a, S, T> {
    pub fn new(client: &'a AuthClient<S, T>) -> Self {
        Self { client }
    }

    pub async fn create(&self, reservation: &NewReservation) -> Result<Reservation, SessionError> {
        reservation.validate()?;
        let request = ApiRequest::post("/reservations").json(reservation)?;
        let created: Reservation = self.client.send_json(request).await?;
        tracing::info!(
            "Reservation {} requested for resource {}",
            created.id,
            created.resource_id
        );
        Ok(created)
    }

    /// Reservations made by the current user
    pub async fn made(&self) -> Result<Vec<Reservation>, SessionError> {
        self.client
            .send_json(ApiRequest::get("/reservations/made"))
            .await
    }

    /// Reservations on resources owned by the current user
    pub async fn received(&self) -> Result<Vec<Reservation>, SessionError> {
        self.client
            .send_json(ApiRequest::get("/reservations/received"))
            .await
    }

    /// Tenant-side cancellation
    pub async fn cancel(&self, reservation: &Reservation) -> Result<(), SessionError> {
        check_transition(reservation, ReservationStatus::Canceled)?;
        let request = ApiRequest::delete(item_path("/reservations", &reservation.id)?);
        self.client.send_empty(request).await?;
        tracing::info!("Reservation {} canceled", reservation.id);
        Ok(())
    }

    /// Owner-side confirmation or rejection
    pub async fn decide(
        &self,
        reservation: &Reservation,
        decision: ReservationDecision,
    ) -> Result<Reservation, SessionError> {
        let next = decision.status();
        check_transition(reservation, next)?;

        let path = format!("{}/status", item_path("/reservations", &reservation.id)?);
        let request = ApiRequest::patch(path).json(&StatusUpdate { status: next })?;
        let updated: Reservation = self.client.send_json(request).await?;
        tracing::info!("Reservation {} is now {}", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn confirm(&self, reservation: &Reservation) -> Result<Reservation, SessionError> {
        self.decide(reservation, ReservationDecision::Confirm).await
    }

    pub async fn reject(&self, reservation: &Reservation) -> Result<Reservation, SessionError> {
        self.decide(reservation, ReservationDecision::Reject).await
    }
}

fn check_transition(
    reservation: &Reservation,
    next: ReservationStatus,
) -> Result<(), SessionError> {
    if reservation.status.can_transition_to(next) {
        return Ok(());
    }
    Err(SessionError::Validation(format!(
        "Impossible de passer la réservation de {} à {}.",
        reservation.status.label(),
        next.label()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::RefreshPolicy;
    use crate::core::http::Method;
    use crate::core::http::testing::test_session;
    use chrono::TimeZone;
    use serde_json::json;

    /// Entry of `GET /reservations/made`
    fn made_json(status: &str) -> serde_json::Value {
        json!({
            "id": "resa-1",
            "resourceId": "res-1",
            "locataireId": "u-1",
            "dateDebut": "2026-05-04T08:00:00.000Z",
            "dateFin": "2026-05-04T10:00:00.000Z",
            "notes": "Réunion d'équipe",
            "status": status,
            "resource": {
                "name": "Salle Jaurès",
                "type": "ROOM",
                "owner": { "email": "loueur@resa-chap.fr" },
            },
        })
    }

    /// Entry of `GET /reservations/received`
    fn received_json(status: &str) -> serde_json::Value {
        json!({
            "id": "resa-2",
            "resourceId": "res-1",
            "locataireId": "u-2",
            "dateDebut": "2026-05-06T14:00:00.000Z",
            "dateFin": "2026-05-06T15:30:00.000Z",
            "status": status,
            "resource": { "name": "Salle Jaurès", "type": "ROOM" },
            "locataire": {
                "id": "u-2",
                "email": "paul@resa-chap.fr",
                "username": "paul",
                "contactPhone": "0611223344",
            },
        })
    }

    fn reservation(status: ReservationStatus) -> Reservation {
        let mut reservation: Reservation = serde_json::from_value(made_json("PENDING")).unwrap();
        reservation.status = status;
        reservation
    }

    // ========================================================================
    // Status Tests
    // ========================================================================

    #[test]
    fn test_status_transitions() {
        use ReservationStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Canceled));
        assert!(Confirmed.can_transition_to(Canceled));

        assert!(!Confirmed.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Confirmed));
        assert!(!Canceled.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Canceled).unwrap(),
            r#""CANCELED""#
        );
        assert_eq!(
            serde_json::from_str::<ReservationStatus>(r#""CONFIRMED""#).unwrap(),
            ReservationStatus::Confirmed
        );
        assert!(serde_json::from_str::<ReservationStatus>(r#""APPROVED""#).is_err());
        assert!(ReservationStatus::Rejected.is_final());
        assert!(!ReservationStatus::Confirmed.is_final());
    }

    // ========================================================================
    // Wire Format Tests
    // ========================================================================

    #[test]
    fn test_decode_made_reservation() {
        let reservation: Reservation = serde_json::from_value(made_json("CONFIRMED")).unwrap();

        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.locataire_id, "u-1");
        assert_eq!(reservation.resource.kind, ResourceKind::Room);
        assert_eq!(
            reservation.resource.owner.as_ref().map(|o| o.email.clone()),
            Some("loueur@resa-chap.fr".to_string())
        );
        assert_eq!(reservation.locataire, None);
        assert_eq!(reservation.duration_hours(), 2.0);
    }

    #[test]
    fn test_decode_received_reservation() {
        let reservation: Reservation = serde_json::from_value(received_json("PENDING")).unwrap();

        let tenant = reservation.locataire.as_ref().unwrap();
        assert_eq!(tenant.email, "paul@resa-chap.fr");
        assert_eq!(tenant.contact_phone.as_deref(), Some("0611223344"));
        assert_eq!(reservation.resource.owner, None);
        assert_eq!(reservation.notes, None);
        assert_eq!(reservation.duration_hours(), 1.5);
    }

    #[test]
    fn test_new_reservation_validation() {
        let start = Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap();
        let mut request = NewReservation {
            resource_id: "res-1".to_string(),
            date_debut: start,
            date_fin: end,
            notes: None,
        };
        assert!(request.validate().is_err());

        request.date_fin = start;
        assert!(request.validate().is_err());

        request.date_fin = start + chrono::Duration::hours(1);
        assert!(request.validate().is_ok());
    }

    // ========================================================================
    // Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_create_reservation() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        client
            .session()
            .transport()
            .respond(Method::Post, "/reservations", 201, made_json("PENDING"));

        let request = NewReservation {
            resource_id: "res-1".to_string(),
            date_debut: Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap(),
            date_fin: Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap(),
            notes: Some("Réunion d'équipe".to_string()),
        };
        let created = ReservationsApi::new(&client).create(&request).await.unwrap();

        assert_eq!(created.status, ReservationStatus::Pending);
        let sent = client.session().transport().requests_to("/reservations");
        assert_eq!(
            sent[0].json_body(),
            Some(&json!({
                "resourceId": "res-1",
                "dateDebut": "2026-05-04T08:00:00Z",
                "dateFin": "2026-05-04T10:00:00Z",
                "notes": "Réunion d'équipe",
            }))
        );
    }

    #[tokio::test]
    async fn test_made_and_received_lists() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        let mock = client.session().transport();
        mock.respond(
            Method::Get,
            "/reservations/made",
            200,
            json!([made_json("PENDING"), made_json("CANCELED")]),
        );
        mock.respond(
            Method::Get,
            "/reservations/received",
            200,
            json!([received_json("PENDING")]),
        );
        let api = ReservationsApi::new(&client);

        let made = api.made().await.unwrap();
        let received = api.received().await.unwrap();

        assert_eq!(made.len(), 2);
        assert_eq!(made[1].status, ReservationStatus::Canceled);
        assert_eq!(received[0].id, "resa-2");
    }

    #[tokio::test]
    async fn test_confirm_patches_status() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        let mock = client.session().transport();
        mock.respond(
            Method::Patch,
            "/reservations/resa-1/status",
            200,
            made_json("CONFIRMED"),
        );

        let updated = ReservationsApi::new(&client)
            .confirm(&reservation(ReservationStatus::Pending))
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Confirmed);
        let sent = mock.requests_to("/reservations/resa-1/status");
        assert_eq!(sent[0].json_body(), Some(&json!({ "status": "CONFIRMED" })));
    }

    #[tokio::test]
    async fn test_reject_patches_status() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        let mock = client.session().transport();
        mock.respond(
            Method::Patch,
            "/reservations/resa-1/status",
            200,
            made_json("REJECTED"),
        );

        ReservationsApi::new(&client)
            .reject(&reservation(ReservationStatus::Pending))
            .await
            .unwrap();

        let sent = mock.requests_to("/reservations/resa-1/status");
        assert_eq!(sent[0].json_body(), Some(&json!({ "status": "REJECTED" })));
    }

    #[tokio::test]
    async fn test_cancel_deletes() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        let mock = client.session().transport();
        mock.respond(Method::Delete, "/reservations/resa-1", 200, json!({}));

        ReservationsApi::new(&client)
            .cancel(&reservation(ReservationStatus::Confirmed))
            .await
            .unwrap();

        let sent = mock.requests_to("/reservations/resa-1");
        assert_eq!(sent[0].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_invalid_transition_skips_network() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);

        let result = ReservationsApi::new(&client)
            .reject(&reservation(ReservationStatus::Canceled))
            .await;

        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert!(client.session().transport().requests().is_empty());
    }
}
