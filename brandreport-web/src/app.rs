use crate::{
    routes::{MainRoute, switch},
    session::{Session, SessionHandle, SessionManager, remaining_floor},
};
use chrono::Utc;
use gloo_timers::callback::Timeout;
use std::{rc::Rc, time::Duration};
use yew::{Callback, Html, Properties, function_component, html, use_effect_with, use_state};
use yew_router::prelude::*;

#[derive(Properties)]
pub struct AppProps {
    pub manager: Rc<SessionManager>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.manager, &other.manager)
    }
}

/// Milliseconds to wait before leaving the loading state, if any.
pub(crate) fn floor_delay_ms(elapsed: Duration) -> Option<u32> {
    remaining_floor(elapsed).map(|rest| u32::try_from(rest.as_millis()).unwrap_or(u32::MAX))
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let session = use_state(Session::default);

    {
        let manager = props.manager.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            let started = Utc::now();
            manager.bootstrap();
            let finish = move || session.set(manager.finish_loading());

            let elapsed = (Utc::now() - started).to_std().unwrap_or_default();
            let timer = match floor_delay_ms(elapsed) {
                Some(delay) => Some(Timeout::new(delay, finish)),
                None => {
                    finish();
                    None
                }
            };
            // Dropping the timeout cancels a pending transition.
            move || drop(timer)
        });
    }

    let on_change = {
        let session = session.clone();
        Callback::from(move |next: Session| session.set(next))
    };
    let handle = SessionHandle::new(props.manager.clone(), (*session).clone(), on_change);

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={move |route| switch(route, handle.clone())} />
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_bootstrap_waits_out_the_floor() {
        assert_eq!(floor_delay_ms(Duration::ZERO), Some(3000));
        assert_eq!(floor_delay_ms(Duration::from_millis(1200)), Some(1800));
    }

    #[test]
    fn slow_bootstrap_resolves_immediately() {
        assert_eq!(floor_delay_ms(Duration::from_millis(3000)), None);
        assert_eq!(floor_delay_ms(Duration::from_secs(5)), None);
    }
}
