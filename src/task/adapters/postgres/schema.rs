//! Diesel schema for task and audit log persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Short summary.
        #[max_length = 200]
        title -> Varchar,
        /// Full description.
        description -> Text,
        /// Creator account.
        creator_id -> Uuid,
        /// Assignee account.
        assignee_id -> Uuid,
        /// Deadline.
        due_date -> Timestamptz,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority level.
        #[max_length = 20]
        priority -> Varchar,
        /// Free-form note.
        note -> Nullable<Text>,
        /// Provider-to-event-id mapping for scheduled calendar events.
        calendar_event_refs -> Nullable<Jsonb>,
        /// Completion timestamp, refreshed on re-completion.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit log entries.
    task_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Acting user.
        user_id -> Uuid,
        /// Status before the change; null only on the creation entry.
        #[max_length = 50]
        previous_status -> Nullable<Varchar>,
        /// Status after the change.
        #[max_length = 50]
        new_status -> Varchar,
        /// Attached comment.
        comment -> Nullable<Text>,
        /// Entry timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, task_logs);
