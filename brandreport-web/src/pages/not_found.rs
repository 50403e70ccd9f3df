use crate::routes::MainRoute;
use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_router::prelude::*;

/// Shown for any path that matches no route.
#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-6xl font-bold">{ "404" }</h1>
                    <p class="text-lg">{ i18n.t("not_found.message") }</p>
                    <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary">
                        { i18n.t("not_found.back") }
                    </Link<MainRoute>>
                </div>
            </div>
        </div>
    }
}
