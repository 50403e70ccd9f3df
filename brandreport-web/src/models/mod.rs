pub(crate) mod report_draft;
pub(crate) mod report_view;

pub use report_draft::{DeliverableField, DraftField, ReportDraft, TargetField};
