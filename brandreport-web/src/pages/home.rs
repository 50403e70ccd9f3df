//! Signed-in landing page: profile banner plus the caller's reports.

use crate::{
    api::ReportsClient,
    components::{CreateReportModal, ReportsTable},
    session::SessionHandle,
};
use futures::future::{AbortHandle, abortable};
use i18nrs::yew::use_translation;
use shared::models::Report;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

/// State of the reports list.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportsState {
    Loading,
    Failed,
    Loaded(Rc<Vec<Report>>),
}

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub session: SessionHandle,
}

/// Abort any fetch still running and start a new one.
fn load_reports(state: UseStateHandle<ReportsState>, in_flight: Rc<RefCell<Option<AbortHandle>>>) {
    if let Some(previous) = in_flight.borrow_mut().take() {
        previous.abort();
    }
    state.set(ReportsState::Loading);

    let (fetch, handle) = abortable(async { ReportsClient::shared().my_reports().await });
    *in_flight.borrow_mut() = Some(handle);
    spawn_local(async move {
        let Ok(result) = fetch.await else {
            tracing::debug!("report fetch aborted");
            return;
        };
        in_flight.borrow_mut().take();
        match result {
            Ok(reports) => {
                tracing::debug!(count = reports.len(), "loaded reports");
                state.set(ReportsState::Loaded(Rc::new(reports)));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load reports");
                state.set(ReportsState::Failed);
            }
        }
    });
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let (i18n, ..) = use_translation();
    let reports = use_state(|| ReportsState::Loading);
    let in_flight = use_mut_ref(|| None::<AbortHandle>);
    let modal_open = use_state(|| false);

    {
        let reports = reports.clone();
        let in_flight = in_flight.clone();
        use_effect_with((), move |_| {
            load_reports(reports, in_flight.clone());
            move || {
                if let Some(handle) = in_flight.borrow_mut().take() {
                    handle.abort();
                }
            }
        });
    }

    let reload = {
        let reports = reports.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |_: MouseEvent| load_reports(reports.clone(), in_flight.clone()))
    };
    let open_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: MouseEvent| modal_open.set(true))
    };
    let close_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |()| modal_open.set(false))
    };
    let on_report_created = {
        let modal_open = modal_open.clone();
        let reports = reports.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |()| {
            modal_open.set(false);
            load_reports(reports.clone(), in_flight.clone());
        })
    };
    let logout = {
        let session = props.session.clone();
        Callback::from(move |_: MouseEvent| session.logout())
    };

    let user = props.session.user().cloned().unwrap_or_default();

    let content = match &*reports {
        ReportsState::Loading => html! {
            <div class="flex items-center justify-center gap-3 py-12">
                <span class="loading loading-spinner loading-md"></span>
                <span>{ i18n.t("reports.loading") }</span>
            </div>
        },
        ReportsState::Failed => html! {
            <div class="flex flex-col items-center gap-4 py-12 text-center">
                <div class="alert alert-error max-w-md"><span>{ i18n.t("reports.load_failed") }</span></div>
                <button class="btn btn-primary" onclick={reload.clone()}>{ i18n.t("reports.try_again") }</button>
            </div>
        },
        ReportsState::Loaded(list) if list.is_empty() => html! {
            <div class="flex flex-col items-center gap-4 py-12 text-center">
                <Icon icon_id={IconId::HeroiconsOutlineDocumentText} class="w-12 h-12 text-base-content/40" />
                <h3 class="text-lg font-medium">{ i18n.t("reports.empty") }</h3>
                <button class="btn btn-primary" onclick={open_modal.clone()}>{ i18n.t("reports.create_first") }</button>
            </div>
        },
        ReportsState::Loaded(list) => html! { <ReportsTable reports={list.clone()} /> },
    };

    html! {
        <div class="space-y-6">
            <div class="card bg-base-200 shadow">
                <div class="card-body flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                    <div>
                        <h1 class="text-2xl font-bold">
                            { format!("{}, {}!", i18n.t("home.welcome"), user.display_name()) }
                        </h1>
                        <p class="text-sm text-base-content/70">{ format!("{}: {}", i18n.t("home.email"), user.email) }</p>
                        <p class="text-sm text-base-content/70">
                            { format!("{}: {} | {}: {}", i18n.t("home.role"), user.role, i18n.t("home.position"), user.position) }
                        </p>
                    </div>
                    <div class="flex gap-2">
                        <button class="btn btn-primary" onclick={open_modal}>
                            <Icon icon_id={IconId::HeroiconsOutlinePlus} class="w-5 h-5" />
                            { i18n.t("home.create_report") }
                        </button>
                        <button class="btn btn-outline" onclick={logout}>{ i18n.t("home.logout") }</button>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <div>
                            <h2 class="card-title">{ i18n.t("reports.heading") }</h2>
                            <p class="text-sm text-base-content/70">{ i18n.t("reports.subheading") }</p>
                        </div>
                        <button class="btn btn-ghost btn-sm" onclick={reload}>
                            <Icon icon_id={IconId::HeroiconsOutlineArrowPath} class="w-4 h-4" />
                            { i18n.t("reports.refresh") }
                        </button>
                    </div>
                    { content }
                </div>
            </div>

            <CreateReportModal
                is_open={*modal_open}
                on_close={close_modal}
                {on_report_created}
            />
        </div>
    }
}
