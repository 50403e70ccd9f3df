use crate::{
    api::{ApiError, ReportsClient},
    guards::{ReturnTo, post_login_destination},
    routes::MainRoute,
    session::SessionHandle,
};
use i18nrs::yew::use_translation;
use shared::models::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::*;

/// Banner text for a failed sign-in. `translate` resolves translation keys;
/// server-provided text is shown as sent.
pub(crate) fn login_error_message(err: &ApiError, translate: impl Fn(&str) -> String) -> String {
    if err.is_unauthorized() {
        return translate("login.errors.invalid_credentials");
    }
    if let Some(message) = err.server_message() {
        return message;
    }
    match err {
        ApiError::Network(_) => translate("login.errors.unreachable"),
        ApiError::Status { .. } | ApiError::Decode(_) => translate("login.errors.failed"),
    }
}

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub session: SessionHandle,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let (i18n, ..) = use_translation();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();
    let return_to = use_location().and_then(|location| location.state::<ReturnTo>());

    let onsubmit = {
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        let session = props.session.clone();
        let i18n = i18n.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *loading_handle {
                return;
            }
            let request = LoginRequest {
                email: (*email_handle).clone(),
                password: (*password_handle).clone(),
            };
            let destination = post_login_destination(return_to.as_deref());
            loading_handle.set(true);
            error_handle.set(None);

            let session = session.clone();
            let navigator = navigator.clone();
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let i18n = i18n.clone();
            spawn_local(async move {
                match ReportsClient::shared().login(&request).await {
                    Ok(response) => {
                        if let Err(err) = session.login(response.user, &response.token) {
                            tracing::error!(error = %err, "failed to persist session");
                        }
                        if let Some(navigator) = navigator {
                            navigator.replace(&destination);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "login failed");
                        error_ref.set(Some(login_error_message(&err, |key| i18n.t(key))));
                    }
                }
                loading_ref.set(false);
            });
        })
    };

    let on_email_change = {
        let email = email.clone();
        let error = error.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                email.set(input.value());
                error.set(None);
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        let error = error.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
                error.set(None);
            }
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    let is_busy = *loading;
    let disable_submit = (*email).is_empty() || (*password).is_empty() || is_busy;
    let (password_type, toggle_icon) = if *show_password {
        ("text", IconId::HeroiconsOutlineEyeSlash)
    } else {
        ("password", IconId::HeroiconsOutlineEye)
    };

    html! {
        <div class="flex items-center justify-center min-h-[80vh] p-4">
            <div class="card w-full max-w-md shadow-xl bg-base-100">
                <form class="card-body space-y-2" {onsubmit}>
                    <h2 class="card-title text-2xl">{ i18n.t("login.title") }</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{ message.clone() }</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{ i18n.t("login.email") }</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            required=true
                            placeholder={i18n.t("login.email_placeholder")}
                            value={(*email).clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{ i18n.t("login.password") }</span>
                        </label>
                        <div class="join w-full">
                            <input
                                id="password"
                                class="input input-bordered join-item w-full"
                                type={password_type}
                                required=true
                                placeholder={i18n.t("login.password_placeholder")}
                                value={(*password).clone()}
                                oninput={on_password_change}
                            />
                            <button type="button" class="btn join-item" onclick={toggle_password}>
                                <Icon icon_id={toggle_icon} class="w-5 h-5" />
                            </button>
                        </div>
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            if is_busy {
                                <span class="loading loading-spinner loading-sm"></span>
                                { i18n.t("login.submitting") }
                            } else {
                                { i18n.t("login.submit") }
                            }
                        </button>
                    </div>
                    <p class="text-center text-sm">
                        { i18n.t("login.no_account") }
                        { " " }
                        <Link<MainRoute> to={MainRoute::Register} classes="link link-primary">
                            { i18n.t("login.sign_up") }
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
