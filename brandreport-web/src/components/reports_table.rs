use crate::{
    components::report_details::ReportDetails,
    models::report_view::{format_report_date, priority_badge_class, status_badge_class, summarize},
};
use i18nrs::yew::use_translation;
use shared::models::{Deliverable, Report, Target};
use std::rc::Rc;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct ReportsTableProps {
    pub reports: Rc<Vec<Report>>,
}

fn more_label(remaining: usize, more: &str) -> Html {
    if remaining == 0 {
        return html! {};
    }
    html! { <div class="text-xs text-base-content/60">{ format!("+{remaining} {more}") }</div> }
}

fn deliverable_preview(deliverables: &[Deliverable], more: &str) -> Html {
    let (shown, remaining) = summarize(deliverables);
    html! {
        <div class="space-y-1">
            { for shown.iter().map(|deliverable| html! {
                <div class="flex items-center gap-2">
                    <span class={classes!(status_badge_class(deliverable.status), "badge-sm")}>
                        { deliverable.status.as_str() }
                    </span>
                    <span class="truncate">{ &deliverable.title }</span>
                </div>
            }) }
            { more_label(remaining, more) }
        </div>
    }
}

fn target_preview(targets: &[Target], more: &str) -> Html {
    let (shown, remaining) = summarize(targets);
    html! {
        <div class="space-y-1">
            { for shown.iter().map(|target| html! {
                <div class="flex items-center gap-2">
                    <span class={classes!(priority_badge_class(target.priority), "badge-sm")}>
                        { target.priority.as_str() }
                    </span>
                    <span class="truncate">{ &target.title }</span>
                </div>
            }) }
            { more_label(remaining, more) }
        </div>
    }
}

/// Summary table of submitted reports with a drill-down view.
#[function_component(ReportsTable)]
pub fn reports_table(props: &ReportsTableProps) -> Html {
    let (i18n, ..) = use_translation();
    let selected = use_state(|| None::<usize>);

    let view = |index: usize| {
        let selected = selected.clone();
        Callback::from(move |_: MouseEvent| selected.set(Some(index)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let more = i18n.t("reports.more");
    let rows = props.reports.iter().enumerate().map(|(index, report)| {
        let key = report.id.clone().unwrap_or_else(|| index.to_string());
        html! {
            <tr {key}>
                <td class="font-medium">{ &report.brand }</td>
                <td>
                    <div class="text-sm font-semibold mb-1">
                        { format!("{} {}", report.deliverables.len(), i18n.t("reports.deliverable_count")) }
                    </div>
                    { deliverable_preview(&report.deliverables, &more) }
                </td>
                <td>
                    <div class="text-sm font-semibold mb-1">
                        { format!("{} {}", report.next_week_targets.len(), i18n.t("reports.target_count")) }
                    </div>
                    { target_preview(&report.next_week_targets, &more) }
                </td>
                <td class="whitespace-nowrap">{ format_report_date(report.created_at.as_ref()) }</td>
                <td>
                    <button class="btn btn-ghost btn-sm" onclick={view(index)}>
                        <Icon icon_id={IconId::HeroiconsOutlineEye} class="w-4 h-4" />
                        { i18n.t("reports.view_details") }
                    </button>
                </td>
            </tr>
        }
    });

    let details = (*selected)
        .and_then(|index| props.reports.get(index))
        .map_or_else(
            || html! {},
            |report| html! { <ReportDetails report={report.clone()} on_close={on_close.clone()} /> },
        );

    html! {
        <>
            <div class="overflow-x-auto">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>{ i18n.t("reports.columns.brand") }</th>
                            <th>{ i18n.t("reports.columns.deliverables") }</th>
                            <th>{ i18n.t("reports.columns.targets") }</th>
                            <th>{ i18n.t("reports.columns.created") }</th>
                            <th>{ i18n.t("reports.columns.actions") }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for rows }
                    </tbody>
                </table>
            </div>
            { details }
        </>
    }
}
