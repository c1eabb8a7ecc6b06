//! Admin dashboard page
//!
//! Platform metrics, behind the admin guard.

use leptos::prelude::*;

use crate::core::api::{AdminMetrics, DashboardApi};
use crate::ui::auth::{UserMenu, use_session_context};
use crate::ui::notifications::ErrorBanner;

fn metric_tiles(metrics: &AdminMetrics) -> Vec<(&'static str, String)> {
    let confirmation = metrics
        .confirmation_rate()
        .map(|rate| format!("{:.0} %", rate))
        .unwrap_or_else(|| "-".to_string());

    vec![
        ("Utilisateurs", metrics.users.total.to_string()),
        ("Comptes vérifiés", metrics.users.verified.to_string()),
        ("Ressources", metrics.resources.total.to_string()),
        ("Nouvelles ressources (7 j)", metrics.resources.recent_last_week.to_string()),
        ("Réservations", metrics.reservations.total.to_string()),
        ("En attente", metrics.reservations.pending.to_string()),
        ("Taux de confirmation", confirmation),
        (
            "Revenu potentiel",
            format!(
                "{:.2} €",
                metrics.finance.potential_revenue_from_confirmed_reservations
            ),
        ),
    ]
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let ctx = use_session_context();

    let metrics = LocalResource::new({
        let client = ctx.client().clone();
        move || {
            let client = client.clone();
            async move { DashboardApi::new(&client).admin_metrics().await }
        }
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 flex items-center justify-between h-16">
                    <span class="text-xl font-bold">"Administration"</span>
                    <UserMenu />
                </div>
            </header>

            <main class="max-w-7xl mx-auto w-full px-4 py-8 space-y-8">
                {move || match metrics.get() {
                    None => view! { <p class="text-gray-600">"Chargement..."</p> }.into_any(),
                    Some(Err(err)) => view! { <ErrorBanner message=err.user_message() /> }.into_any(),
                    Some(Ok(metrics)) => {
                        let recent = metrics.reservations.recent.clone();
                        view! {
                            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                                {metric_tiles(&metrics).into_iter().map(|(label, value)| {
                                    view! {
                                        <div class="p-4 border border-gray-200 rounded-lg">
                                            <p class="text-sm text-gray-600">{label}</p>
                                            <p class="text-2xl font-bold mt-1">{value}</p>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>

                            <section>
                                <h2 class="text-lg font-semibold mb-3">"Dernières réservations"</h2>
                                <ul class="divide-y divide-gray-200 border border-gray-200 rounded-lg">
                                    {recent.into_iter().map(|r| {
                                        view! {
                                            <li class="p-3 flex items-center justify-between text-sm">
                                                <span>{r.resource_name}" · "{r.locataire_email}</span>
                                                <span class="text-gray-600">{r.status.label()}</span>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>
                            </section>
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
    use crate::core::api::dashboard::tests::metrics_json;

    #[test]
    fn test_metric_tiles() {
        let metrics: AdminMetrics = serde_json::from_value(metrics_json()).unwrap();

        let tiles = metric_tiles(&metrics);

        assert_eq!(tiles[0], ("Utilisateurs", "40".to_string()));
        assert_eq!(tiles[6].1, "75 %");
        assert_eq!(tiles[7].1, "1530.00 €");
    }

    #[test]
    fn test_metric_tiles_without_reservations() {
        let tiles = metric_tiles(&AdminMetrics::default());
        assert_eq!(tiles[6].1, "-");
    }
}
