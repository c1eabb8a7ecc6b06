//! User dashboard page
//!
//! Authenticated landing: counts of the user's resources and reservations,
//! with the next booking and the next request awaiting an answer.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::api::{DashboardApi, DashboardSummary};
use crate::ui::auth::{UserMenu, use_session_context};
use crate::ui::notifications::ErrorBanner;

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

fn summary_tiles(summary: &DashboardSummary) -> [(&'static str, u64); 3] {
    [
        ("Mes ressources", summary.my_resource_count),
        ("Demandes à traiter", summary.pending_approval_count),
        ("Mes réservations", summary.my_reservations_count),
    ]
}

fn next_reservation_line(summary: &DashboardSummary) -> String {
    match &summary.next_reservation_made {
        Some(next) => format!(
            "{} le {} ({})",
            next.resource_name,
            format_date(&next.start_date),
            next.status.label()
        ),
        None => "Aucune réservation à venir.".to_string(),
    }
}

fn next_approval_line(summary: &DashboardSummary) -> String {
    match &summary.next_pending_approval {
        Some(next) => format!("{} le {}", next.resource_name, format_date(&next.start_date)),
        None => "Aucune demande en attente.".to_string(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session_context();
    let catalogue_path = ctx.routes().after_sign_in.clone();

    let summary = LocalResource::new({
        let client = ctx.client().clone();
        move || {
            let client = client.clone();
            async move { DashboardApi::new(&client).summary().await }
        }
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 flex items-center justify-between h-16">
                    <span class="text-xl font-bold">"Tableau de bord"</span>
                    <div class="flex items-center gap-4">
                        <A href=catalogue_path attr:class="text-sm font-medium text-blue-600">"Catalogue"</A>
                        <UserMenu />
                    </div>
                </div>
            </header>

            <main class="max-w-7xl mx-auto w-full px-4 py-8 space-y-6">
                {move || match summary.get() {
                    None => view! { <p class="text-gray-600">"Chargement..."</p> }.into_any(),
                    Some(Err(err)) => view! { <ErrorBanner message=err.user_message() /> }.into_any(),
                    Some(Ok(summary)) => {
                        view! {
                            <div class="grid gap-4 sm:grid-cols-3">
                                {summary_tiles(&summary).into_iter().map(|(label, value)| {
                                    view! {
                                        <div class="p-4 border border-gray-200 rounded-lg">
                                            <p class="text-sm text-gray-600">{label}</p>
                                            <p class="text-2xl font-bold mt-1">{value}</p>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                            <div class="grid gap-4 sm:grid-cols-2">
                                <div class="p-4 border border-gray-200 rounded-lg">
                                    <p class="text-sm text-gray-600">"Prochaine réservation"</p>
                                    <p class="mt-1">{next_reservation_line(&summary)}</p>
                                </div>
                                <div class="p-4 border border-gray-200 rounded-lg">
                                    <p class="text-sm text-gray-600">"Prochaine demande à valider"</p>
                                    <p class="mt-1">{next_approval_line(&summary)}</p>
                                </div>
                            </div>
                        }.into_any()
                    }
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_lines() {
        let mut summary: DashboardSummary = serde_json::from_value(json!({
            "myResourceCount": 2,
            "pendingApprovalCount": 1,
            "myReservationsCount": 5,
            "nextReservationMade": {
                "id": "resa-1",
                "resourceName": "Salle Jaurès",
                "startDate": "2026-05-04T08:00:00.000Z",
                "status": "PENDING",
            },
            "nextPendingApproval": null,
        }))
        .unwrap();

        assert_eq!(summary_tiles(&summary)[2], ("Mes réservations", 5));
        assert_eq!(
            next_reservation_line(&summary),
            "Salle Jaurès le 04/05/2026 08:00 (En attente)"
        );
        assert_eq!(next_approval_line(&summary), "Aucune demande en attente.");

        summary.next_reservation_made = None;
        assert_eq!(next_reservation_line(&summary), "Aucune réservation à venir.");
    }
}
