mod api;
mod app;
mod components;
mod config;
mod containers;
mod cookies;
mod guards;
mod language;
mod logging;
mod models;
mod pages;
mod routes;
mod routes_test;
mod session;

use app::{App, AppProps};
use cookies::DocumentCookieStore;
use i18nrs::yew::{I18nProvider, I18nProviderConfig};
use session::SessionManager;
use std::rc::Rc;
use yew::{Html, Renderer, function_component, html};

#[function_component(InternationalApp)]
fn international_app(props: &AppProps) -> Html {
    let config = I18nProviderConfig {
        translations: language::translation_tables(),
        default_language: language::DEFAULT_LANGUAGE.to_string(),
        ..Default::default()
    };

    html! {
        <I18nProvider ..config>
            <App manager={props.manager.clone()} />
        </I18nProvider>
    }
}

fn main() {
    logging::init();
    tracing::info!(app = %config::FrontendConfig::new().app_name, "starting brand report client");

    let manager = Rc::new(SessionManager::new(Rc::new(DocumentCookieStore)));
    let props = AppProps { manager };

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_elements_by_tag_name("body").item(0));
    match root {
        Some(root) => {
            Renderer::<InternationalApp>::with_root_and_props(root, props).render();
        }
        None => tracing::error!("no <body> element to mount into"),
    }
}
