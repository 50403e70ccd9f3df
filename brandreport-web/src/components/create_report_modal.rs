//! Modal form for composing and submitting a weekly report.

use crate::{
    api::ReportsClient,
    models::{DeliverableField, DraftField, ReportDraft, TargetField},
};
use futures::future::{AbortHandle, abortable};
use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use shared::models::{DeliverableStatus, TargetPriority};
use std::rc::Rc;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

/// Delay between the success banner and the form reset.
pub const RESET_DELAY_MS: u32 = 1500;

pub enum DraftAction {
    AddDeliverable,
    RemoveDeliverable(usize),
    AddTarget,
    RemoveTarget(usize),
    Update(DraftField, String),
    Reset,
}

impl Reducible for ReportDraft {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut draft = (*self).clone();
        match action {
            DraftAction::AddDeliverable => draft.add_deliverable(),
            DraftAction::RemoveDeliverable(index) => {
                if !draft.remove_deliverable(index) {
                    return self;
                }
            }
            DraftAction::AddTarget => draft.add_target(),
            DraftAction::RemoveTarget(index) => {
                if !draft.remove_target(index) {
                    return self;
                }
            }
            DraftAction::Update(field, value) => draft.update_field(field, &value),
            DraftAction::Reset => draft = ReportDraft::default(),
        }
        Rc::new(draft)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SubmitStatus {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum SubmitPhase {
    #[default]
    Idle,
    InFlight,
    /// Created on the server; the reset timer has not fired yet.
    Created,
}

/// Submission bookkeeping. Closing the modal keeps a running request alive so
/// the parent still hears about a report the server created; unmounting
/// cancels everything.
#[derive(Default)]
struct PendingSubmit {
    phase: SubmitPhase,
    closed: bool,
    request: Option<AbortHandle>,
    reset: Option<Timeout>,
}

impl PendingSubmit {
    fn start(&mut self, handle: AbortHandle) {
        self.phase = SubmitPhase::InFlight;
        self.closed = false;
        self.reset = None;
        self.request = Some(handle);
    }

    /// Returns true when the report was already created and the parent should
    /// refresh now.
    fn close(&mut self) -> bool {
        self.reset = None;
        match self.phase {
            SubmitPhase::Created => {
                self.phase = SubmitPhase::Idle;
                true
            }
            SubmitPhase::InFlight => {
                self.closed = true;
                false
            }
            SubmitPhase::Idle => false,
        }
    }

    /// Records a successful submission. Returns true when the modal was
    /// closed while the request ran.
    fn created(&mut self) -> bool {
        self.request = None;
        if std::mem::take(&mut self.closed) {
            self.phase = SubmitPhase::Idle;
            true
        } else {
            self.phase = SubmitPhase::Created;
            false
        }
    }

    /// Records a failed submission. Returns true when the modal was closed
    /// while the request ran.
    fn failed(&mut self) -> bool {
        self.request = None;
        self.phase = SubmitPhase::Idle;
        std::mem::take(&mut self.closed)
    }

    /// The reset timer fired.
    fn settled(&mut self) {
        self.phase = SubmitPhase::Idle;
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.request.take() {
            handle.abort();
        }
        self.reset = None;
        self.closed = false;
        self.phase = SubmitPhase::Idle;
    }
}

fn event_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

#[derive(Properties, PartialEq)]
pub struct CreateReportModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    /// Fired once the success delay has elapsed.
    pub on_report_created: Callback<()>,
}

#[function_component(CreateReportModal)]
pub fn create_report_modal(props: &CreateReportModalProps) -> Html {
    let (i18n, ..) = use_translation();
    let draft = use_reducer(ReportDraft::default);
    let status = use_state(|| None::<SubmitStatus>);
    let submitting = use_state(|| false);
    let pending = use_mut_ref(PendingSubmit::default);

    {
        let pending = pending.clone();
        use_effect_with((), move |_| move || pending.borrow_mut().teardown());
    }

    let on_input = |field: DraftField| {
        let draft = draft.dispatcher();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = event_value(&event) {
                draft.dispatch(DraftAction::Update(field, value));
            }
        })
    };
    let on_select = |field: DraftField| {
        let draft = draft.dispatcher();
        Callback::from(move |event: Event| {
            if let Some(value) = event_value(&event) {
                draft.dispatch(DraftAction::Update(field, value));
            }
        })
    };
    let dispatch_on_click = |action: fn() -> DraftAction| {
        let draft = draft.dispatcher();
        Callback::from(move |_: MouseEvent| draft.dispatch(action()))
    };

    let on_close = {
        let draft = draft.dispatcher();
        let status = status.clone();
        let pending = pending.clone();
        let on_close = props.on_close.clone();
        let on_report_created = props.on_report_created.clone();
        Callback::from(move |_: MouseEvent| {
            let refresh = pending.borrow_mut().close();
            draft.dispatch(DraftAction::Reset);
            status.set(None);
            on_close.emit(());
            if refresh {
                on_report_created.emit(());
            }
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let status = status.clone();
        let submitting = submitting.clone();
        let pending = pending.clone();
        let on_report_created = props.on_report_created.clone();
        let i18n = i18n.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting || !draft.is_valid() {
                return;
            }
            let request = match draft.to_request() {
                Ok(request) => request,
                Err(err) => {
                    status.set(Some(SubmitStatus::Error(err.to_string())));
                    return;
                }
            };

            submitting.set(true);
            status.set(None);
            let (submission, handle) =
                abortable(async move { ReportsClient::shared().create_report(&request).await });
            pending.borrow_mut().start(handle);

            let dispatcher = draft.dispatcher();
            let status = status.clone();
            let submitting = submitting.clone();
            let pending = pending.clone();
            let on_report_created = on_report_created.clone();
            let i18n = i18n.clone();
            spawn_local(async move {
                let Ok(result) = submission.await else {
                    tracing::debug!("report submission aborted");
                    return;
                };
                match result {
                    Ok(created) => {
                        tracing::info!(report = %created, "report created");
                        if pending.borrow_mut().created() {
                            on_report_created.emit(());
                        } else {
                            status.set(Some(SubmitStatus::Success(
                                i18n.t("report_form.success"),
                            )));
                            let status = status.clone();
                            let settle = pending.clone();
                            let reset = Timeout::new(RESET_DELAY_MS, move || {
                                settle.borrow_mut().settled();
                                dispatcher.dispatch(DraftAction::Reset);
                                status.set(None);
                                on_report_created.emit(());
                            });
                            pending.borrow_mut().reset = Some(reset);
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to create report");
                        if !pending.borrow_mut().failed() {
                            status.set(Some(SubmitStatus::Error(
                                err.user_message(&i18n.t("report_form.failed")),
                            )));
                        }
                    }
                }
                submitting.set(false);
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    let deliverable_count = draft.deliverables.len();
    let deliverables = draft.deliverables.iter().enumerate().map(|(index, row)| {
        let remove = {
            let draft = draft.dispatcher();
            Callback::from(move |_: MouseEvent| draft.dispatch(DraftAction::RemoveDeliverable(index)))
        };
        html! {
            <div key={index} class="card bg-base-200 p-4 space-y-3">
                <div class="flex items-center justify-between">
                    <h4 class="font-medium">{ format!("{} {}", i18n.t("report_form.deliverable"), index + 1) }</h4>
                    if deliverable_count > 1 {
                        <button type="button" class="btn btn-ghost btn-xs text-error" onclick={remove}>
                            { i18n.t("report_form.remove") }
                        </button>
                    }
                </div>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.title") }</span>
                        <input
                            class="input input-bordered"
                            type="text"
                            placeholder={i18n.t("report_form.deliverable_title_placeholder")}
                            value={row.title.clone()}
                            oninput={on_input(DraftField::Deliverable(index, DeliverableField::Title))}
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.status") }</span>
                        <select
                            class="select select-bordered"
                            onchange={on_select(DraftField::Deliverable(index, DeliverableField::Status))}
                        >
                            { for DeliverableStatus::iter().map(|status| html! {
                                <option value={status.as_str()} selected={status == row.status}>
                                    { status.as_str() }
                                </option>
                            }) }
                        </select>
                    </label>
                </div>
                <label class="form-control">
                    <span class="label-text">{ i18n.t("report_form.description") }</span>
                    <textarea
                        class="textarea textarea-bordered"
                        rows="2"
                        placeholder={i18n.t("report_form.deliverable_description_placeholder")}
                        value={row.description.clone()}
                        oninput={on_input(DraftField::Deliverable(index, DeliverableField::Description))}
                    />
                </label>
            </div>
        }
    });

    let target_count = draft.next_week_targets.len();
    let targets = draft.next_week_targets.iter().enumerate().map(|(index, row)| {
        let remove = {
            let draft = draft.dispatcher();
            Callback::from(move |_: MouseEvent| draft.dispatch(DraftAction::RemoveTarget(index)))
        };
        html! {
            <div key={index} class="card bg-base-200 p-4 space-y-3">
                <div class="flex items-center justify-between">
                    <h4 class="font-medium">{ format!("{} {}", i18n.t("report_form.target"), index + 1) }</h4>
                    if target_count > 1 {
                        <button type="button" class="btn btn-ghost btn-xs text-error" onclick={remove}>
                            { i18n.t("report_form.remove") }
                        </button>
                    }
                </div>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.title") }</span>
                        <input
                            class="input input-bordered"
                            type="text"
                            placeholder={i18n.t("report_form.target_title_placeholder")}
                            value={row.title.clone()}
                            oninput={on_input(DraftField::Target(index, TargetField::Title))}
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.due_date") }</span>
                        <input
                            class="input input-bordered"
                            type="datetime-local"
                            value={row.due_date.clone()}
                            oninput={on_input(DraftField::Target(index, TargetField::DueDate))}
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.priority") }</span>
                        <select
                            class="select select-bordered"
                            onchange={on_select(DraftField::Target(index, TargetField::Priority))}
                        >
                            { for TargetPriority::iter().map(|priority| html! {
                                <option value={priority.as_str()} selected={priority == row.priority}>
                                    { priority.as_str() }
                                </option>
                            }) }
                        </select>
                    </label>
                </div>
                <label class="form-control">
                    <span class="label-text">{ i18n.t("report_form.description") }</span>
                    <textarea
                        class="textarea textarea-bordered"
                        rows="2"
                        placeholder={i18n.t("report_form.target_description_placeholder")}
                        value={row.description.clone()}
                        oninput={on_input(DraftField::Target(index, TargetField::Description))}
                    />
                </label>
            </div>
        }
    });

    let busy = *submitting;
    let disable_submit = busy || !draft.is_valid();

    html! {
        <div class="modal modal-open">
            <div class="modal-box w-11/12 max-w-4xl max-h-[90vh] overflow-y-auto">
                <div class="flex items-center justify-between border-b border-base-300 pb-4">
                    <h2 class="text-2xl font-bold">{ i18n.t("report_form.heading") }</h2>
                    <button type="button" class="btn btn-ghost btn-sm btn-circle" onclick={on_close.clone()}>
                        <Icon icon_id={IconId::HeroiconsOutlineXMark} class="w-5 h-5" />
                    </button>
                </div>

                {
                    match &*status {
                        Some(SubmitStatus::Success(message)) => html! {
                            <div class="alert alert-success mt-4"><span>{ message.clone() }</span></div>
                        },
                        Some(SubmitStatus::Error(message)) => html! {
                            <div class="alert alert-error mt-4"><span>{ message.clone() }</span></div>
                        },
                        None => html! {},
                    }
                }

                <form class="space-y-6 pt-4" {onsubmit}>
                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.brand") }</span>
                        <input
                            class="input input-bordered"
                            type="text"
                            required=true
                            placeholder={i18n.t("report_form.brand_placeholder")}
                            value={draft.brand.clone()}
                            oninput={on_input(DraftField::Brand)}
                        />
                    </label>

                    <section class="space-y-3">
                        <div class="flex items-center justify-between">
                            <span class="font-medium">{ i18n.t("report_form.deliverables") }</span>
                            <button type="button" class="btn btn-primary btn-sm" onclick={dispatch_on_click(|| DraftAction::AddDeliverable)}>
                                { i18n.t("report_form.add_deliverable") }
                            </button>
                        </div>
                        { for deliverables }
                    </section>

                    <section class="space-y-3">
                        <div class="flex items-center justify-between">
                            <span class="font-medium">{ i18n.t("report_form.targets") }</span>
                            <button type="button" class="btn btn-primary btn-sm" onclick={dispatch_on_click(|| DraftAction::AddTarget)}>
                                { i18n.t("report_form.add_target") }
                            </button>
                        </div>
                        { for targets }
                    </section>

                    <label class="form-control">
                        <span class="label-text">{ i18n.t("report_form.additional_notes") }</span>
                        <textarea
                            class="textarea textarea-bordered"
                            rows="4"
                            placeholder={i18n.t("report_form.notes_placeholder")}
                            value={draft.additional_notes.clone()}
                            oninput={on_input(DraftField::AdditionalNotes)}
                        />
                    </label>

                    <div class="modal-action border-t border-base-300 pt-4">
                        <button type="button" class="btn btn-ghost" onclick={on_close}>
                            { i18n.t("report_form.cancel") }
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={disable_submit}>
                            if busy {
                                { i18n.t("report_form.submitting") }
                            } else {
                                { i18n.t("report_form.submit") }
                            }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
