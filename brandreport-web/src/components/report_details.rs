use crate::models::report_view::{format_report_date, priority_badge_class, status_badge_class};
use i18nrs::yew::use_translation;
use shared::models::Report;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct ReportDetailsProps {
    pub report: Report,
    pub on_close: Callback<()>,
}

/// Read-only view of one report.
#[function_component(ReportDetails)]
pub fn report_details(props: &ReportDetailsProps) -> Html {
    let (i18n, ..) = use_translation();
    let report = &props.report;
    let close = props.on_close.reform(|_: MouseEvent| ());

    let deliverables = report.deliverables.iter().map(|deliverable| {
        html! {
            <div class="rounded-box border border-base-300 p-3 space-y-1">
                <div class="flex items-center justify-between gap-2">
                    <span class="font-medium">{ &deliverable.title }</span>
                    <span class={status_badge_class(deliverable.status)}>{ deliverable.status.as_str() }</span>
                </div>
                if !deliverable.description.is_empty() {
                    <p class="text-sm text-base-content/70">{ &deliverable.description }</p>
                }
            </div>
        }
    });

    let targets = report.next_week_targets.iter().map(|target| {
        html! {
            <div class="rounded-box border border-base-300 p-3 space-y-1">
                <div class="flex items-center justify-between gap-2">
                    <span class="font-medium">{ &target.title }</span>
                    <span class={priority_badge_class(target.priority)}>{ target.priority.as_str() }</span>
                </div>
                if !target.description.is_empty() {
                    <p class="text-sm text-base-content/70">{ &target.description }</p>
                }
                if target.due_date.is_some() {
                    <p class="text-xs text-base-content/60">
                        { format!("{}: {}", i18n.t("reports.details.due"), format_report_date(target.due_date.as_ref())) }
                    </p>
                }
            </div>
        }
    });

    let notes = report
        .additional_notes
        .as_deref()
        .filter(|notes| !notes.trim().is_empty());

    html! {
        <div class="modal modal-open">
            <div class="modal-box w-11/12 max-w-4xl max-h-[90vh] overflow-y-auto">
                <div class="flex items-center justify-between border-b border-base-300 pb-4">
                    <h3 class="text-xl font-bold">
                        { format!("{} - {}", i18n.t("reports.details.heading"), report.brand) }
                    </h3>
                    <button type="button" class="btn btn-ghost btn-sm btn-circle" onclick={close.clone()}>
                        <Icon icon_id={IconId::HeroiconsOutlineXMark} class="w-5 h-5" />
                    </button>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-6 pt-4">
                    <section class="space-y-3">
                        <h4 class="font-semibold">
                            { format!("{} ({})", i18n.t("reports.columns.deliverables"), report.deliverables.len()) }
                        </h4>
                        { for deliverables }
                    </section>
                    <section class="space-y-3">
                        <h4 class="font-semibold">
                            { format!("{} ({})", i18n.t("reports.columns.targets"), report.next_week_targets.len()) }
                        </h4>
                        { for targets }
                    </section>
                </div>

                if let Some(notes) = notes {
                    <section class="pt-4">
                        <h4 class="font-semibold">{ i18n.t("reports.details.notes") }</h4>
                        <p class="text-sm whitespace-pre-line">{ notes }</p>
                    </section>
                }

                <div class="border-t border-base-300 mt-6 pt-4 grid grid-cols-1 md:grid-cols-3 gap-2 text-sm">
                    <div>
                        <span class="font-medium">{ format!("{}: ", i18n.t("reports.details.created")) }</span>
                        { format_report_date(report.created_at.as_ref()) }
                    </div>
                    if report.updated_at.is_some() {
                        <div>
                            <span class="font-medium">{ format!("{}: ", i18n.t("reports.details.updated")) }</span>
                            { format_report_date(report.updated_at.as_ref()) }
                        </div>
                    }
                    if let Some(author) = report.author_label() {
                        <div>
                            <span class="font-medium">{ format!("{}: ", i18n.t("reports.details.author")) }</span>
                            { author }
                        </div>
                    }
                </div>

                <div class="modal-action">
                    <button type="button" class="btn" onclick={close}>{ i18n.t("reports.details.close") }</button>
                </div>
            </div>
        </div>
    }
}
