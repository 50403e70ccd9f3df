//! Account registration page.

use crate::{
    api::ReportsClient,
    containers::signup_validation::{POSITIONS, SignupField, SignupForm},
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use shared::models::RegisterRequest;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::*;

fn event_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

fn set_field(form: &mut SignupForm, field: SignupField, value: String) {
    match field {
        SignupField::Name => form.name = value,
        SignupField::Email => form.email = value,
        SignupField::Password => form.password = value,
        SignupField::ConfirmPassword => form.confirm_password = value,
        SignupField::Position => form.position = value,
    }
}

/// Input type and toggle icon for a password field.
fn password_visibility(shown: bool) -> (&'static str, IconId) {
    if shown {
        ("text", IconId::HeroiconsOutlineEyeSlash)
    } else {
        ("password", IconId::HeroiconsOutlineEye)
    }
}

#[function_component(SignUpPage)]
pub fn sign_up_page() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(SignupForm::default);
    let errors = use_state(HashMap::<SignupField, &'static str>::new);
    let form_error = use_state(|| None::<String>);
    let is_submitting = use_state(|| false);
    let show_password = use_state(|| false);
    let show_confirm_password = use_state(|| false);
    let navigator = use_navigator();

    let on_change = |field: SignupField| {
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |event: Event| {
            let Some(value) = event_value(&event) else {
                return;
            };
            let mut next = (*form).clone();
            set_field(&mut next, field, value);
            form.set(next);
            if errors.contains_key(&field) {
                let mut remaining = (*errors).clone();
                remaining.remove(&field);
                errors.set(remaining);
            }
        })
    };

    let onsubmit = {
        let form = form.clone();
        let errors = errors.clone();
        let form_error = form_error.clone();
        let is_submitting = is_submitting.clone();
        let i18n = i18n.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *is_submitting {
                return;
            }
            let failures = form.validate();
            if !failures.is_empty() {
                errors.set(
                    failures
                        .into_iter()
                        .map(|(field, err)| (field, err.message_key()))
                        .collect(),
                );
                return;
            }

            let request = RegisterRequest {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                password: form.password.clone(),
                position: form.position.clone(),
            };
            is_submitting.set(true);
            form_error.set(None);

            let navigator = navigator.clone();
            let form_error = form_error.clone();
            let is_submitting = is_submitting.clone();
            let failed = i18n.t("signup.errors.register_failed");
            spawn_local(async move {
                match ReportsClient::shared().register(&request).await {
                    Ok(()) => {
                        tracing::info!(email = %request.email, "account registered");
                        if let Some(navigator) = navigator {
                            navigator.push(&MainRoute::Login);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "registration failed");
                        form_error.set(Some(err.user_message(&failed)));
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let field_error = |field: SignupField| -> Html {
        errors.get(&field).map_or_else(
            || html! {},
            |key| html! { <span class="label-text-alt text-error">{ i18n.t(key) }</span> },
        )
    };
    let input_class = |field: SignupField| {
        classes!(
            "input",
            "input-bordered",
            errors.contains_key(&field).then_some("input-error")
        )
    };

    let password_field = |field: SignupField,
                          shown: &UseStateHandle<bool>,
                          label: &str,
                          placeholder: &str,
                          value: String|
     -> Html {
        let (input_type, icon) = password_visibility(**shown);
        let toggle = {
            let shown = shown.clone();
            Callback::from(move |_: MouseEvent| shown.set(!*shown))
        };
        html! {
            <label class="form-control">
                <span class="label-text">{ i18n.t(label) }</span>
                <div class="join w-full">
                    <input
                        class={classes!(input_class(field), "join-item", "w-full")}
                        type={input_type}
                        placeholder={i18n.t(placeholder)}
                        {value}
                        onchange={on_change(field)}
                    />
                    <button type="button" class="btn join-item" onclick={toggle}>
                        <Icon icon_id={icon} class="w-5 h-5" />
                    </button>
                </div>
                { field_error(field) }
            </label>
        }
    };

    let busy = *is_submitting;

    html! {
        <div class="flex items-center justify-center min-h-[90vh] p-4">
            <div class="card w-full max-w-md shadow-xl bg-base-100">
                <form class="card-body space-y-1" {onsubmit} novalidate=true>
                    <h2 class="card-title text-2xl">{ i18n.t("signup.title") }</h2>
                    if let Some(message) = &*form_error {
                        <div class="alert alert-error"><span>{ message.clone() }</span></div>
                    }

                    <label class="form-control">
                        <span class="label-text">{ i18n.t("signup.name") }</span>
                        <input
                            class={input_class(SignupField::Name)}
                            type="text"
                            placeholder={i18n.t("signup.name_placeholder")}
                            value={form.name.clone()}
                            onchange={on_change(SignupField::Name)}
                        />
                        { field_error(SignupField::Name) }
                    </label>

                    <label class="form-control">
                        <span class="label-text">{ i18n.t("signup.email") }</span>
                        <input
                            class={input_class(SignupField::Email)}
                            type="email"
                            placeholder={i18n.t("signup.email_placeholder")}
                            value={form.email.clone()}
                            onchange={on_change(SignupField::Email)}
                        />
                        { field_error(SignupField::Email) }
                    </label>

                    <label class="form-control">
                        <span class="label-text">{ i18n.t("signup.position") }</span>
                        <select
                            class={classes!("select", "select-bordered", errors.contains_key(&SignupField::Position).then_some("select-error"))}
                            onchange={on_change(SignupField::Position)}
                        >
                            <option value="" selected={form.position.is_empty()}>
                                { i18n.t("signup.position_placeholder") }
                            </option>
                            { for POSITIONS.iter().map(|position| html! {
                                <option value={*position} selected={form.position == *position}>{ *position }</option>
                            }) }
                        </select>
                        { field_error(SignupField::Position) }
                    </label>

                    { password_field(SignupField::Password, &show_password, "signup.password", "signup.password_placeholder", form.password.clone()) }
                    { password_field(SignupField::ConfirmPassword, &show_confirm_password, "signup.confirm_password", "signup.confirm_password_placeholder", form.confirm_password.clone()) }

                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={busy}>
                            if busy {
                                <span class="loading loading-spinner loading-sm"></span>
                                { i18n.t("signup.submitting") }
                            } else {
                                { i18n.t("signup.submit") }
                            }
                        </button>
                    </div>
                    <p class="text-center text-sm">
                        { i18n.t("signup.have_account") }
                        { " " }
                        <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">
                            { i18n.t("signup.sign_in") }
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_toggle_switches_input_type() {
        assert_eq!(password_visibility(false).0, "password");
        assert_eq!(password_visibility(true).0, "text");
    }

    #[test]
    fn set_field_changes_only_the_target() {
        let mut form = SignupForm::default();
        set_field(&mut form, SignupField::Position, "Copywriter".into());
        set_field(&mut form, SignupField::ConfirmPassword, "secret1".into());
        assert_eq!(form.position, "Copywriter");
        assert_eq!(form.confirm_password, "secret1");
        assert!(form.name.is_empty());
        assert!(form.password.is_empty());
    }
}
