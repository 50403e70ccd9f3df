//! Editable state behind the "Create Report" modal.
//!
//! The draft keeps at least one deliverable row and one target row at all
//! times. Blank rows are only dropped when the request is built.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use shared::models::{
    CreateReportRequest, Deliverable, DeliverableStatus, Target, TargetPriority,
};
use thiserror::Error;

/// Formats produced by `<input type="datetime-local">`.
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Target {position} has an invalid due date: {value}")]
    InvalidDueDate { position: usize, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliverableDraft {
    pub title: String,
    pub description: String,
    pub status: DeliverableStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDraft {
    pub title: String,
    pub description: String,
    /// Raw `datetime-local` value, empty when unset.
    pub due_date: String,
    pub priority: TargetPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliverableField {
    Title,
    Description,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Title,
    Description,
    DueDate,
    Priority,
}

/// One editable input of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Brand,
    AdditionalNotes,
    Deliverable(usize, DeliverableField),
    Target(usize, TargetField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub brand: String,
    pub deliverables: Vec<DeliverableDraft>,
    pub next_week_targets: Vec<TargetDraft>,
    pub additional_notes: String,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            brand: String::new(),
            deliverables: vec![DeliverableDraft::default()],
            next_week_targets: vec![TargetDraft::default()],
            additional_notes: String::new(),
        }
    }
}

fn has_title(title: &str) -> bool {
    !title.trim().is_empty()
}

impl ReportDraft {
    pub fn add_deliverable(&mut self) {
        self.deliverables.push(DeliverableDraft::default());
    }

    /// Returns whether a row was removed. The last row is never removed.
    pub fn remove_deliverable(&mut self, index: usize) -> bool {
        if self.deliverables.len() <= 1 || index >= self.deliverables.len() {
            return false;
        }
        self.deliverables.remove(index);
        true
    }

    pub fn add_target(&mut self) {
        self.next_week_targets.push(TargetDraft::default());
    }

    /// Returns whether a row was removed. The last row is never removed.
    pub fn remove_target(&mut self, index: usize) -> bool {
        if self.next_week_targets.len() <= 1 || index >= self.next_week_targets.len() {
            return false;
        }
        self.next_week_targets.remove(index);
        true
    }

    /// Apply one input change. Out-of-range rows and unknown select values
    /// are ignored.
    pub fn update_field(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Brand => self.brand = value.to_string(),
            DraftField::AdditionalNotes => self.additional_notes = value.to_string(),
            DraftField::Deliverable(index, field) => {
                let Some(row) = self.deliverables.get_mut(index) else {
                    return;
                };
                match field {
                    DeliverableField::Title => row.title = value.to_string(),
                    DeliverableField::Description => row.description = value.to_string(),
                    DeliverableField::Status => {
                        if let Ok(status) = value.parse() {
                            row.status = status;
                        }
                    }
                }
            }
            DraftField::Target(index, field) => {
                let Some(row) = self.next_week_targets.get_mut(index) else {
                    return;
                };
                match field {
                    TargetField::Title => row.title = value.to_string(),
                    TargetField::Description => row.description = value.to_string(),
                    TargetField::DueDate => row.due_date = value.to_string(),
                    TargetField::Priority => {
                        if let Ok(priority) = value.parse() {
                            row.priority = priority;
                        }
                    }
                }
            }
        }
    }

    /// Whether the draft can be submitted.
    pub fn is_valid(&self) -> bool {
        has_title(&self.brand)
            && self.deliverables.iter().any(|row| has_title(&row.title))
            && self.next_week_targets.iter().any(|row| has_title(&row.title))
    }

    /// Build the request body, reading due dates in the browser's time zone.
    ///
    /// # Errors
    /// Returns [`DraftError::InvalidDueDate`] for a due date that is not a
    /// `datetime-local` value.
    pub fn to_request(&self) -> Result<CreateReportRequest, DraftError> {
        self.to_request_in(&Local)
    }

    /// Build the request body, reading due dates in `tz`.
    ///
    /// # Errors
    /// See [`to_request`](Self::to_request).
    pub fn to_request_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<CreateReportRequest, DraftError> {
        let deliverables = self
            .deliverables
            .iter()
            .filter(|row| has_title(&row.title))
            .map(|row| Deliverable {
                title: row.title.clone(),
                description: row.description.clone(),
                status: row.status,
            })
            .collect();

        let next_week_targets = self
            .next_week_targets
            .iter()
            .enumerate()
            .filter(|(_, row)| has_title(&row.title))
            .map(|(index, row)| {
                let due_date = parse_local_due_date(&row.due_date, tz).ok_or_else(|| {
                    DraftError::InvalidDueDate {
                        position: index + 1,
                        value: row.due_date.clone(),
                    }
                })?;
                Ok(Target {
                    title: row.title.clone(),
                    description: row.description.clone(),
                    due_date,
                    priority: row.priority,
                })
            })
            .collect::<Result<Vec<_>, DraftError>>()?;

        let notes = self.additional_notes.trim();
        Ok(CreateReportRequest {
            brand: self.brand.trim().to_string(),
            deliverables,
            next_week_targets,
            additional_notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// `Some(None)` for an empty input, `Some(Some(ts))` for a valid one and
/// `None` when the text cannot be read as a local date-time.
fn parse_local_due_date<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }
    let naive = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| Some(local.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn filled() -> ReportDraft {
        let mut draft = ReportDraft::default();
        draft.update_field(DraftField::Brand, "Acme");
        draft.update_field(DraftField::Deliverable(0, DeliverableField::Title), "Banner");
        draft.update_field(DraftField::Target(0, TargetField::Title), "Launch");
        draft
    }

    #[test]
    fn new_draft_has_one_default_row_each() {
        let draft = ReportDraft::default();
        assert_eq!(draft.deliverables, vec![DeliverableDraft::default()]);
        assert_eq!(draft.next_week_targets, vec![TargetDraft::default()]);
        assert_eq!(draft.deliverables[0].status, DeliverableStatus::Completed);
        assert_eq!(draft.next_week_targets[0].priority, TargetPriority::Medium);
        assert!(!draft.is_valid());
    }

    #[test]
    fn removing_the_last_row_is_a_no_op() {
        let mut draft = ReportDraft::default();
        assert!(!draft.remove_deliverable(0));
        assert!(!draft.remove_target(0));
        assert_eq!(draft.deliverables.len(), 1);
        assert_eq!(draft.next_week_targets.len(), 1);
    }

    #[test]
    fn add_appends_default_rows_and_remove_keeps_order() {
        let mut draft = ReportDraft::default();
        draft.update_field(DraftField::Deliverable(0, DeliverableField::Title), "first");
        draft.add_deliverable();
        draft.add_deliverable();
        assert_eq!(draft.deliverables.len(), 3);
        assert_eq!(draft.deliverables[2], DeliverableDraft::default());

        draft.update_field(DraftField::Deliverable(1, DeliverableField::Title), "second");
        draft.update_field(DraftField::Deliverable(2, DeliverableField::Title), "third");
        assert!(draft.remove_deliverable(1));
        let titles: Vec<_> = draft.deliverables.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third"]);

        draft.add_target();
        assert!(draft.remove_target(0));
        assert!(!draft.remove_target(0));
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut draft = ReportDraft::default();
        assert!(!draft.remove_deliverable(5));
        draft.update_field(DraftField::Target(3, TargetField::Title), "ghost");
        assert_eq!(draft, ReportDraft::default());
    }

    #[test]
    fn update_touches_only_the_named_field() {
        let mut draft = ReportDraft::default();
        draft.add_target();
        draft.update_field(DraftField::Target(1, TargetField::Title), "Launch");
        draft.update_field(DraftField::Target(1, TargetField::Priority), "Critical");
        draft.update_field(DraftField::Target(1, TargetField::DueDate), "2025-03-01T09:30");

        assert_eq!(draft.next_week_targets[0], TargetDraft::default());
        let row = &draft.next_week_targets[1];
        assert_eq!(row.title, "Launch");
        assert_eq!(row.priority, TargetPriority::Critical);
        assert_eq!(row.due_date, "2025-03-01T09:30");
        assert!(row.description.is_empty());
    }

    #[test]
    fn unknown_select_values_keep_previous_choice() {
        let mut draft = ReportDraft::default();
        draft.update_field(DraftField::Deliverable(0, DeliverableField::Status), "In Progress");
        draft.update_field(DraftField::Deliverable(0, DeliverableField::Status), "Someday");
        draft.update_field(DraftField::Target(0, TargetField::Priority), "Urgent!!");
        assert_eq!(draft.deliverables[0].status, DeliverableStatus::InProgress);
        assert_eq!(draft.next_week_targets[0].priority, TargetPriority::Medium);
    }

    #[test]
    fn validity_requires_brand_and_titled_rows() {
        assert!(filled().is_valid());

        let mut draft = filled();
        draft.update_field(DraftField::Brand, "");
        assert!(!draft.is_valid());

        let mut draft = filled();
        draft.update_field(DraftField::Brand, "   ");
        assert!(!draft.is_valid());

        let mut draft = filled();
        draft.update_field(DraftField::Deliverable(0, DeliverableField::Title), " ");
        assert!(!draft.is_valid());

        let mut draft = filled();
        draft.update_field(DraftField::Target(0, TargetField::Title), "");
        assert!(!draft.is_valid());
    }

    #[test]
    fn request_drops_blank_titled_rows() {
        let mut draft = filled();
        draft.update_field(DraftField::Deliverable(0, DeliverableField::Title), " ");
        draft.add_deliverable();
        draft.update_field(DraftField::Deliverable(1, DeliverableField::Title), "Video");
        draft.add_target();

        let request = draft.to_request_in(&utc()).unwrap();
        let titles: Vec<_> = request.deliverables.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Video"]);
        assert_eq!(request.next_week_targets.len(), 1);
        assert_eq!(request.next_week_targets[0].title, "Launch");
    }

    #[test]
    fn request_trims_brand_and_nulls_empty_notes() {
        let mut draft = filled();
        draft.update_field(DraftField::Brand, "  Acme  ");
        draft.update_field(DraftField::AdditionalNotes, "   ");
        let request = draft.to_request_in(&utc()).unwrap();
        assert_eq!(request.brand, "Acme");
        assert_eq!(request.additional_notes, None);

        draft.update_field(DraftField::AdditionalNotes, " Client asked for a recap ");
        let request = draft.to_request_in(&utc()).unwrap();
        assert_eq!(
            request.additional_notes.as_deref(),
            Some("Client asked for a recap")
        );
    }

    #[test]
    fn due_dates_convert_from_local_time() {
        let mut draft = filled();
        draft.update_field(DraftField::Target(0, TargetField::DueDate), "2025-03-01T09:30");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let request = draft.to_request_in(&plus_two).unwrap();
        assert_eq!(
            request.next_week_targets[0].due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap())
        );
    }

    #[test]
    fn empty_due_date_becomes_null() {
        let request = filled().to_request_in(&utc()).unwrap();
        assert_eq!(request.next_week_targets[0].due_date, None);
    }

    #[test]
    fn garbage_due_date_is_reported_with_its_position() {
        let mut draft = filled();
        draft.add_target();
        draft.update_field(DraftField::Target(1, TargetField::Title), "Report");
        draft.update_field(DraftField::Target(1, TargetField::DueDate), "next friday");

        let err = draft.to_request_in(&utc()).unwrap_err();
        assert_eq!(
            err,
            DraftError::InvalidDueDate {
                position: 2,
                value: "next friday".into(),
            }
        );
    }

    #[test]
    fn blank_rows_with_bad_dates_are_not_checked() {
        let mut draft = filled();
        draft.add_target();
        draft.update_field(DraftField::Target(1, TargetField::DueDate), "garbage");
        assert!(draft.to_request_in(&utc()).is_ok());
    }
}
