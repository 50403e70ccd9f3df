use crate::{config::FrontendConfig, routes::MainRoute, session::SessionHandle};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub session: SessionHandle,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let (i18n, ..) = use_translation();
    let config = FrontendConfig::new();
    let home = if props.session.session().is_authenticated() {
        MainRoute::Home
    } else {
        MainRoute::Login
    };

    let logout = {
        let session = props.session.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            session.logout();
        })
    };

    html! {
        <nav class="navbar justify-between bg-base-300 shadow">
            <Link<MainRoute> to={home} classes="btn btn-ghost text-lg">
                { config.app_name() }
            </Link<MainRoute>>
            <div class="flex items-center gap-2">
                {
                    props.session.user().map_or_else(
                        || html! {
                            <Link<MainRoute> to={MainRoute::Register} classes="btn btn-ghost btn-sm">
                                { i18n.t("header.sign_up") }
                            </Link<MainRoute>>
                        },
                        |user| html! {
                            <>
                                <span class="text-sm text-base-content/80 hidden sm:inline">{ user.display_name() }</span>
                                <button class="btn btn-ghost btn-sm" onclick={logout.clone()}>
                                    { i18n.t("header.logout") }
                                </button>
                            </>
                        },
                    )
                }
            </div>
        </nav>
    }
}
