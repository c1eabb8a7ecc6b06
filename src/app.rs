use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::ui::pages::{
    AdminDashboardPage, CataloguePage, DashboardPage, LandingPage, NotFoundPage,
    OAuthCallbackPage, SignInPage,
};
use crate::ui::{
    AdminRoute, NotificationsContainer, PrivateRoute, PublicRoute, provide_notifications,
    provide_session_context,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Notifications first: the session guards push to them
    provide_notifications();
    let _session = provide_session_context();

    // Paths match RouteConfig::default()
    view! {
        <Title text="Resa Chap"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route
                    path=path!("/")
                    view=|| view! { <PublicRoute><LandingPage/></PublicRoute> }
                />
                <Route path=path!("/auth/login") view=|| view! { <SignInPage/> } />
                <Route path=path!("/auth/signup") view=|| view! { <SignInPage sign_up=true/> } />
                <Route path=path!("/auth/callback") view=OAuthCallbackPage />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <PrivateRoute><DashboardPage/></PrivateRoute> }
                />
                <Route
                    path=path!("/catalogue")
                    view=|| view! { <PrivateRoute><CataloguePage/></PrivateRoute> }
                />
                <Route
                    path=path!("/admin")
                    view=|| view! { <PrivateRoute><AdminRoute><AdminDashboardPage/></AdminRoute></PrivateRoute> }
                />
            </Routes>
            <NotificationsContainer/>
        </Router>
    }
}
