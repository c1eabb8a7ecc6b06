//! Catalogue page component
//!
//! Searchable, paginated resource catalogue, where sign-in lands.
//! Calls go through the session's [`AuthClient`](crate::core::http::AuthClient),
//! so an expired access token is refreshed transparently.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::api::{Resource, ResourceFilter, ResourceKind, ResourcesApi};
use crate::ui::auth::{UserMenu, use_session_context};
use crate::ui::notifications::ErrorBanner;

fn parse_kind(value: &str) -> Option<ResourceKind> {
    match value {
        "ROOM" => Some(ResourceKind::Room),
        "EQUIPMENT" => Some(ResourceKind::Equipment),
        _ => None,
    }
}

#[component]
fn ResourceCard(resource: Resource) -> impl IntoView {
    let price = resource.price_label();
    let location = resource.location();
    let kind = resource.kind.label();

    view! {
        <div class="p-4 border border-gray-200 rounded-lg shadow-sm">
            <div class="flex items-start justify-between gap-2">
                <h3 class="font-semibold">{resource.name}</h3>
                <span class="text-xs px-2 py-0.5 rounded bg-gray-100">{kind}</span>
            </div>
            <p class="text-sm text-gray-600 mt-1">{location}</p>
            {resource.description.map(|d| view! { <p class="text-sm mt-2">{d}</p> })}
            <p class="text-sm font-medium mt-3">{price}</p>
        </div>
    }
}

#[component]
pub fn CataloguePage() -> impl IntoView {
    let ctx = use_session_context();
    let dashboard_path = ctx.routes().authenticated_landing.clone();

    let search = RwSignal::new(String::new());
    let kind = RwSignal::new(None::<ResourceKind>);
    let page = RwSignal::new(1u32);

    let resources = LocalResource::new({
        let client = ctx.client().clone();
        move || {
            let client = client.clone();
            let mut filter = ResourceFilter::new().page(page.get());
            let text = search.get();
            if !text.trim().is_empty() {
                filter = filter.search(text.trim());
            }
            if let Some(kind) = kind.get() {
                filter = filter.kind(kind);
            }
            async move { ResourcesApi::new(&client).list(&filter).await }
        }
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 flex items-center justify-between h-16">
                    <span class="text-xl font-bold">"Catalogue"</span>
                    <div class="flex items-center gap-4">
                        <A href=dashboard_path attr:class="text-sm font-medium text-blue-600">"Tableau de bord"</A>
                        <UserMenu />
                    </div>
                </div>
            </header>

            <main class="max-w-7xl mx-auto w-full px-4 py-8 space-y-6">
                <div class="flex gap-3">
                    <input
                        type="search"
                        placeholder="Rechercher une ressource"
                        class="flex-1 px-3 py-2 border border-gray-300 rounded-lg"
                        prop:value=move || search.get()
                        on:change=move |ev| {
                            search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                    <select
                        class="px-3 py-2 border border-gray-300 rounded-lg"
                        on:change=move |ev| {
                            kind.set(parse_kind(&event_target_value(&ev)));
                            page.set(1);
                        }
                    >
                        <option value="">"Tous les types"</option>
                        <option value="ROOM">"Salles"</option>
                        <option value="EQUIPMENT">"Équipements"</option>
                    </select>
                </div>

                {move || match resources.get() {
                    None => view! { <p class="text-gray-600">"Chargement..."</p> }.into_any(),
                    Some(Err(err)) => view! { <ErrorBanner message=err.user_message() /> }.into_any(),
                    Some(Ok(result)) if result.data.is_empty() => {
                        view! { <p class="text-gray-600">"Aucune ressource trouvée."</p> }.into_any()
                    }
                    Some(Ok(result)) => {
                        let has_previous = result.has_previous();
                        let has_next = result.has_next();
                        let summary = format!("Page {} sur {}", result.page, result.total_pages());

                        view! {
                            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                                {result.data.into_iter().map(|resource| {
                                    view! { <ResourceCard resource=resource /> }
                                }).collect_view()}
                            </div>
                            <div class="flex items-center justify-between">
                                <button
                                    class="px-3 py-1.5 border rounded-lg disabled:opacity-50"
                                    disabled=!has_previous
                                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                                >
                                    "Précédent"
                                </button>
                                <span class="text-sm text-gray-600">{summary}</span>
                                <button
                                    class="px-3 py-1.5 border rounded-lg disabled:opacity-50"
                                    disabled=!has_next
                                    on:click=move |_| page.update(|p| *p += 1)
                                >
                                    "Suivant"
                                </button>
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

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("ROOM"), Some(ResourceKind::Room));
        assert_eq!(parse_kind("EQUIPMENT"), Some(ResourceKind::Equipment));
        assert_eq!(parse_kind(""), None);
    }
}
