pub mod errors;
pub mod report;
pub mod user;

pub use errors::{ApiErrorBody, FieldMessage};
pub use report::{
    CreateReportRequest, Deliverable, DeliverableStatus, Report, ReportListResponse, Target,
    TargetPriority,
};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
