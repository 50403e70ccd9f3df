pub(crate) mod create_report_modal;
pub(crate) mod loading;
pub(crate) mod report_details;
pub(crate) mod reports_table;

pub use create_report_modal::CreateReportModal;
pub use reports_table::ReportsTable;
