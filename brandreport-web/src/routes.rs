use crate::{
    containers::layout::Layout,
    guards::{RequireAuth, RequireGuest},
    pages::{HomePage, LoginPage, NotFoundPage, SignUpPage},
    session::SessionHandle,
};
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;

/// The main routes
#[derive(Debug, Clone, PartialEq, Eq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Login,
    #[at("/register")]
    Register,
    #[at("/home")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Routes only meaningful to visitors without a session.
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
    pub session: SessionHandle,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let guard_session = props.session.clone();
    let layout_session = props.session.clone();
    let page_session = props.session.clone();

    match props.route {
        MainRoute::Login => html! {
            <RequireGuest session={guard_session}>
                <Layout session={layout_session}>
                    <LoginPage session={page_session} />
                </Layout>
            </RequireGuest>
        },
        MainRoute::Register => html! {
            <RequireGuest session={guard_session}>
                <Layout session={layout_session}>
                    <SignUpPage />
                </Layout>
            </RequireGuest>
        },
        MainRoute::Home => html! {
            <RequireAuth session={guard_session}>
                <Layout session={layout_session}>
                    <HomePage session={page_session} />
                </Layout>
            </RequireAuth>
        },
        MainRoute::NotFound => html! {
            <Layout session={layout_session}>
                <NotFoundPage />
            </Layout>
        },
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute, session: SessionHandle) -> Html {
    tracing::debug!(?route, "switching route");
    html! { <MainRouteView {route} {session} /> }
}
