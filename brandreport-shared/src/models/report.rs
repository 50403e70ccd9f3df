use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use strum::{EnumIter, EnumString};

/// Progress state of a deliverable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString,
)]
pub enum DeliverableStatus {
    #[default]
    Completed,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Pending,
    Cancelled,
    /// A status the server knows about and this client does not.
    #[serde(other)]
    #[strum(disabled)]
    Other,
}

impl DeliverableStatus {
    /// Label used on the wire and in the UI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for DeliverableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a next-week target.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString,
)]
pub enum TargetPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    #[serde(other)]
    #[strum(disabled)]
    Other,
}

impl TargetPriority {
    /// Label used on the wire and in the UI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for TargetPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work delivered during the reporting week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deliverable {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: DeliverableStatus,
}

/// Work planned for the following week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "TargetWire")]
pub struct Target {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: TargetPriority,
}

/// Received shape of a target. Both date spellings may be present at once.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetWire {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    priority: TargetPriority,
}

impl From<TargetWire> for Target {
    fn from(wire: TargetWire) -> Self {
        Self {
            title: wire.title,
            description: wire.description,
            due_date: wire.due_date.or(wire.deadline),
            priority: wire.priority,
        }
    }
}

/// A submitted weekly report as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "ReportWire")]
pub struct Report {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    #[serde(default)]
    pub next_week_targets: Vec<Target>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Either a plain name or a populated user document, depending on the server.
    #[serde(default)]
    pub author: Option<Value>,
}

/// Received shape of a report. Servers may send `_id` next to `id` and the
/// snake_case timestamps next to the camelCase ones.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportWire {
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    deliverables: Vec<Deliverable>,
    #[serde(default)]
    next_week_targets: Vec<Target>,
    #[serde(default)]
    additional_notes: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "created_at")]
    created_at_snake: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updated_at")]
    updated_at_snake: Option<DateTime<Utc>>,
    #[serde(default)]
    author: Option<Value>,
}

impl From<ReportWire> for Report {
    fn from(wire: ReportWire) -> Self {
        Self {
            id: wire.object_id.or(wire.id),
            brand: wire.brand,
            deliverables: wire.deliverables,
            next_week_targets: wire.next_week_targets,
            additional_notes: wire.additional_notes,
            created_at: wire.created_at.or(wire.created_at_snake),
            updated_at: wire.updated_at.or(wire.updated_at_snake),
            author: wire.author,
        }
    }
}

impl Report {
    /// Human-readable author, if the server sent one.
    #[must_use]
    pub fn author_label(&self) -> Option<String> {
        match self.author.as_ref()? {
            Value::String(name) if !name.trim().is_empty() => Some(name.clone()),
            Value::Object(fields) => fields
                .get("name")
                .or_else(|| fields.get("email"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Request body for `POST /reports`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub brand: String,
    pub deliverables: Vec<Deliverable>,
    pub next_week_targets: Vec<Target>,
    pub additional_notes: Option<String>,
}

/// Response body for `GET /reports/my-reports`.
///
/// Older server builds return a bare array, newer ones wrap it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReportListResponse {
    Wrapped { reports: Vec<Report> },
    Bare(Vec<Report>),
}

impl ReportListResponse {
    #[must_use]
    pub fn into_reports(self) -> Vec<Report> {
        match self {
            Self::Wrapped { reports } | Self::Bare(reports) => reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    #[test_case("Completed", DeliverableStatus::Completed)]
    #[test_case("In Progress", DeliverableStatus::InProgress)]
    #[test_case("Pending", DeliverableStatus::Pending)]
    #[test_case("Cancelled", DeliverableStatus::Cancelled)]
    fn status_labels_parse(label: &str, expected: DeliverableStatus) {
        assert_eq!(label.parse::<DeliverableStatus>().unwrap(), expected);
        assert_eq!(expected.to_string(), label);
    }

    #[test]
    fn unknown_labels_do_not_parse_from_forms() {
        assert!("On Hold".parse::<DeliverableStatus>().is_err());
        assert!("Other".parse::<TargetPriority>().is_err());
    }

    #[test]
    fn select_options_exclude_other() {
        let statuses: Vec<_> = DeliverableStatus::iter().collect();
        assert_eq!(statuses.len(), 4);
        assert!(!statuses.contains(&DeliverableStatus::Other));

        let priorities: Vec<_> = TargetPriority::iter().map(TargetPriority::as_str).collect();
        assert_eq!(priorities, vec!["Low", "Medium", "High", "Critical"]);
    }

    #[test]
    fn defaults_match_new_form_rows() {
        assert_eq!(Deliverable::default().status, DeliverableStatus::Completed);
        assert_eq!(Target::default().priority, TargetPriority::Medium);
        assert!(Target::default().due_date.is_none());
    }

    #[test]
    fn unknown_received_status_is_tolerated() {
        let json = r#"{"title":"Launch","status":"On Hold"}"#;
        let deliverable: Deliverable = serde_json::from_str(json).unwrap();
        assert_eq!(deliverable.status, DeliverableStatus::Other);
        assert!(deliverable.description.is_empty());
    }

    #[test]
    fn target_accepts_deadline_alias() {
        let json = r#"{"title":"Ship","priority":"High","deadline":"2025-03-01T09:00:00.000Z"}"#;
        let target: Target = serde_json::from_str(json).unwrap();
        assert_eq!(target.priority, TargetPriority::High);
        assert_eq!(
            target.due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn list_response_accepts_both_shapes() {
        let wrapped = r#"{"reports":[{"_id":"r1","brand":"Acme","createdAt":"2025-01-05T14:30:00Z"}]}"#;
        let bare = r#"[{"id":"r2","brand":"Globex","created_at":"2025-01-06T08:00:00Z"}]"#;

        let wrapped: ReportListResponse = serde_json::from_str(wrapped).unwrap();
        let bare: ReportListResponse = serde_json::from_str(bare).unwrap();

        let wrapped = wrapped.into_reports();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].id.as_deref(), Some("r1"));
        assert!(wrapped[0].created_at.is_some());

        let bare = bare.into_reports();
        assert_eq!(bare[0].brand, "Globex");
        assert_eq!(bare[0].id.as_deref(), Some("r2"));
        assert!(bare[0].created_at.is_some());
    }

    #[test]
    fn report_with_both_id_spellings_decodes() {
        let json = r#"{"reports":[{"_id":"r1","id":"r1","brand":"Acme",
            "createdAt":"2025-01-05T14:30:00Z","created_at":"2025-01-05T14:30:00Z",
            "nextWeekTargets":[{"title":"Ship","dueDate":"2025-03-01T09:00:00Z",
                "deadline":"2025-03-01T09:00:00Z"}]}]}"#;
        let reports = serde_json::from_str::<ReportListResponse>(json)
            .unwrap()
            .into_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id.as_deref(), Some("r1"));
        assert_eq!(
            reports[0].created_at,
            Some(Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap())
        );
        assert!(reports[0].next_week_targets[0].due_date.is_some());
    }

    #[test]
    fn report_serializes_camel_case_fields() {
        let report = Report {
            id: Some("r1".into()),
            created_at: Some(Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap()),
            ..Report::default()
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["id"], "r1");
        assert!(value["createdAt"].is_string());
        assert_eq!(serde_json::from_value::<Report>(value).unwrap(), report);
    }

    #[test]
    fn create_request_uses_camel_case_and_null_notes() {
        let request = CreateReportRequest {
            brand: "Acme".into(),
            deliverables: vec![Deliverable {
                title: "Banner".into(),
                description: String::new(),
                status: DeliverableStatus::InProgress,
            }],
            next_week_targets: vec![Target {
                title: "Launch".into(),
                ..Target::default()
            }],
            additional_notes: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["deliverables"][0]["status"], "In Progress");
        assert_eq!(value["nextWeekTargets"][0]["priority"], "Medium");
        assert!(value["nextWeekTargets"][0]["dueDate"].is_null());
        assert!(value["additionalNotes"].is_null());
    }

    #[test]
    fn author_label_handles_strings_and_documents() {
        let mut report = Report {
            author: Some(Value::from("Dana")),
            ..Report::default()
        };
        assert_eq!(report.author_label().as_deref(), Some("Dana"));

        report.author = Some(serde_json::json!({"name": "Sam", "email": "sam@example.com"}));
        assert_eq!(report.author_label().as_deref(), Some("Sam"));

        report.author = Some(Value::from(42));
        assert_eq!(report.author_label(), None);
    }
}
