//! Route guards.
//!
//! The decision logic is plain functions over [`Session`] so it can be tested
//! without a browser; the components only render or navigate on the result.

use crate::{
    components::loading::LoadingScreen, routes::MainRoute, session::Session,
    session::SessionHandle,
};
use yew::prelude::*;
use yew_router::prelude::*;

/// Route a visitor asked for before being sent to log in.
///
/// Travels as router history state so the login page can send the user back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTo(pub MainRoute);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session bootstrap still running.
    Loading,
    Render,
    Redirect {
        to: MainRoute,
        return_to: Option<ReturnTo>,
    },
}

/// Decision for a route that needs a signed-in user.
pub fn require_auth(session: &Session, requested: &MainRoute) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Loading
    } else if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect {
            to: MainRoute::Login,
            return_to: Some(ReturnTo(requested.clone())),
        }
    }
}

/// Decision for a route only anonymous visitors should see.
pub fn require_guest(session: &Session) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Loading
    } else if session.is_authenticated() {
        GuardDecision::Redirect {
            to: MainRoute::Home,
            return_to: None,
        }
    } else {
        GuardDecision::Render
    }
}

/// Where to go once login succeeds.
pub fn post_login_destination(return_to: Option<&ReturnTo>) -> MainRoute {
    match return_to {
        Some(ReturnTo(route)) if !route.is_guest_only() && *route != MainRoute::NotFound => {
            route.clone()
        }
        _ => MainRoute::Home,
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub session: SessionHandle,
    #[prop_or_default]
    pub children: Children,
}

#[hook]
fn use_guard_redirect(decision: &GuardDecision) {
    let navigator = use_navigator();
    use_effect_with(decision.clone(), move |decision| {
        if let (Some(navigator), GuardDecision::Redirect { to, return_to }) = (navigator, decision) {
            tracing::debug!(?to, ?return_to, "guard redirect");
            match return_to {
                Some(return_to) => navigator.replace_with_state(to, return_to.clone()),
                None => navigator.replace(to),
            }
        }
        || ()
    });
}

fn render_decision(decision: &GuardDecision, children: &Children) -> Html {
    match decision {
        GuardDecision::Loading => html! { <LoadingScreen /> },
        GuardDecision::Render => html! { <>{ children.clone() }</> },
        GuardDecision::Redirect { .. } => html! {},
    }
}

/// Renders children only for signed-in users.
#[function_component(RequireAuth)]
pub fn require_auth_guard(props: &GuardProps) -> Html {
    let route = use_route::<MainRoute>().unwrap_or(MainRoute::Home);
    let decision = require_auth(props.session.session(), &route);
    use_guard_redirect(&decision);
    render_decision(&decision, &props.children)
}

/// Renders children only for anonymous visitors.
#[function_component(RequireGuest)]
pub fn require_guest_guard(props: &GuardProps) -> Html {
    let decision = require_guest(props.session.session());
    use_guard_redirect(&decision);
    render_decision(&decision, &props.children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserProfile;

    fn resolved(user: Option<UserProfile>) -> Session {
        Session {
            user,
            loading: false,
        }
    }

    fn signed_in() -> Session {
        resolved(Some(UserProfile::new(
            "Dana",
            "dana@example.com",
            "employee",
            "Designer",
        )))
    }

    #[test]
    fn both_guards_wait_while_loading() {
        let session = Session::default();
        assert_eq!(require_auth(&session, &MainRoute::Home), GuardDecision::Loading);
        assert_eq!(require_guest(&session), GuardDecision::Loading);
    }

    #[test]
    fn auth_guard_sends_anonymous_visitor_to_login_with_return_to() {
        let decision = require_auth(&resolved(None), &MainRoute::Home);
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: MainRoute::Login,
                return_to: Some(ReturnTo(MainRoute::Home)),
            }
        );

        let GuardDecision::Redirect { return_to, .. } = decision else {
            panic!("expected redirect");
        };
        assert_eq!(post_login_destination(return_to.as_ref()), MainRoute::Home);
    }

    #[test]
    fn auth_guard_renders_for_signed_in_user() {
        assert_eq!(
            require_auth(&signed_in(), &MainRoute::Home),
            GuardDecision::Render
        );
    }

    #[test]
    fn guest_guard_sends_signed_in_user_home() {
        assert_eq!(
            require_guest(&signed_in()),
            GuardDecision::Redirect {
                to: MainRoute::Home,
                return_to: None,
            }
        );
        assert_eq!(require_guest(&resolved(None)), GuardDecision::Render);
    }

    #[test]
    fn destination_defaults_to_home() {
        assert_eq!(post_login_destination(None), MainRoute::Home);
        assert_eq!(
            post_login_destination(Some(&ReturnTo(MainRoute::Register))),
            MainRoute::Home
        );
        assert_eq!(
            post_login_destination(Some(&ReturnTo(MainRoute::NotFound))),
            MainRoute::Home
        );
    }
}
