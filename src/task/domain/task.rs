//! Task aggregate root and related lifecycle types.

use super::{
    ParseCalendarProviderError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
    TaskId,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Task lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "Not Started")]
    NotStarted,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is finished.
    #[serde(rename = "Completed")]
    Completed,
    /// The assignee is waiting on input.
    #[serde(rename = "Needs Feedback")]
    NeedsFeedback,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::NeedsFeedback => "Needs Feedback",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not started" => Ok(Self::NotStarted),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "needs feedback" => Ok(Self::NeedsFeedback),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// External calendar provider hosting a scheduled event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CalendarProvider {
    /// Google Calendar.
    #[serde(rename = "google")]
    Google,
    /// Microsoft 365 calendar.
    #[serde(rename = "microsoft")]
    Microsoft,
}

impl CalendarProvider {
    /// Returns the provider name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Microsoft => "microsoft",
        }
    }
}

impl TryFrom<&str> for CalendarProvider {
    type Error = ParseCalendarProviderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "google" => Ok(Self::Google),
            "microsoft" => Ok(Self::Microsoft),
            _ => Err(ParseCalendarProviderError(value.to_owned())),
        }
    }
}

impl fmt::Display for CalendarProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider-to-external-event-id mapping persisted with a task.
///
/// Opaque to the rest of the system; only the calendar scheduler
/// interprets the identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarEventRefs(BTreeMap<CalendarProvider, String>);

impl CalendarEventRefs {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records the external event id for a provider.
    pub fn insert(&mut self, provider: CalendarProvider, event_id: impl Into<String>) {
        self.0.insert(provider, event_id.into());
    }

    /// Returns the external event id for a provider, if scheduled.
    #[must_use]
    pub fn get(&self, provider: CalendarProvider) -> Option<&str> {
        self.0.get(&provider).map(String::as_str)
    }

    /// Returns whether no event has been scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over provider/event-id pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarProvider, &str)> {
        self.0.iter().map(|(provider, id)| (*provider, id.as_str()))
    }
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// Short summary, at most 200 characters.
    pub title: String,
    /// Full description.
    pub description: String,
    /// User who opens the task.
    pub creator_id: UserId,
    /// User responsible for execution. May equal the creator.
    pub assignee_id: UserId,
    /// Deadline, strictly in the future at creation.
    pub due_date: DateTime<Utc>,
    /// Urgency, defaulting to [`TaskPriority::Medium`].
    pub priority: Option<TaskPriority>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted creator.
    pub creator_id: UserId,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted deadline.
    pub due_date: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted note, if any.
    pub note: Option<String>,
    /// Persisted calendar references, if scheduled.
    pub calendar_event_refs: Option<CalendarEventRefs>,
    /// Persisted completion timestamp, if ever completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// Tasks are never deleted; only the status changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    creator_id: UserId,
    assignee_id: UserId,
    due_date: DateTime<Utc>,
    status: TaskStatus,
    priority: TaskPriority,
    note: Option<String>,
    #[serde(skip)]
    calendar_event_refs: Option<CalendarEventRefs>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    const TITLE_MAX: usize = 200;

    /// Creates a new task in [`TaskStatus::NotStarted`].
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the title or description is
    /// empty, the title exceeds 200 characters, or the due date is not
    /// strictly after the current clock time.
    pub fn create(spec: TaskSpec, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let timestamp = clock.utc();
        let title = spec.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if title.len() > Self::TITLE_MAX {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::TITLE_MAX,
            });
        }
        let description = spec.description.trim().to_owned();
        if description.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        if spec.due_date <= timestamp {
            return Err(TaskDomainError::DueDateNotFuture);
        }

        Ok(Self {
            id: TaskId::new(),
            title,
            description,
            creator_id: spec.creator_id,
            assignee_id: spec.assignee_id,
            due_date: spec.due_date,
            status: TaskStatus::NotStarted,
            priority: spec.priority.unwrap_or_default(),
            note: spec.note,
            calendar_event_refs: None,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            creator_id: data.creator_id,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
            status: data.status,
            priority: data.priority,
            note: data.note,
            calendar_event_refs: data.calendar_event_refs,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the free-form note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the scheduled calendar references, if any.
    #[must_use]
    pub const fn calendar_event_refs(&self) -> Option<&CalendarEventRefs> {
        self.calendar_event_refs.as_ref()
    }

    /// Returns the completion timestamp, if the task was ever completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task still counts against its participants.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }

    /// Returns whether the user created or is assigned to this task.
    #[must_use]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.creator_id == user_id || self.assignee_id == user_id
    }

    /// Returns whether the task is past due and not completed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.is_open()
    }

    /// Moves the task to a new status.
    ///
    /// Completion stamps `completed_at` with the current clock time every
    /// time, so re-completing refreshes the timestamp.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        if status == TaskStatus::Completed {
            self.completed_at = Some(clock.utc());
        }
        self.touch(clock);
    }

    /// Attaches scheduled calendar references to this task.
    pub fn attach_calendar_refs(&mut self, refs: CalendarEventRefs, clock: &impl Clock) {
        self.calendar_event_refs = Some(refs);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
