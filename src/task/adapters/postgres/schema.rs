//! Diesel schema for task persistence.

diesel::table! {
    /// Task rows owned by user accounts.
    tasks (id) {
        /// Server-assigned identifier.
        id -> Uuid,
        /// Owning account identifier.
        user_id -> Uuid,
        /// Optional project the task is filed under.
        project_id -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Priority wire value.
        #[max_length = 20]
        priority -> Varchar,
        /// Status wire value.
        #[max_length = 20]
        status -> Varchar,
        /// Optional difficulty rating.
        difficulty -> Nullable<Int4>,
        /// Optional planned effort in hours.
        estimated_hours -> Nullable<Float8>,
        /// Optional logged effort in hours.
        actual_hours -> Nullable<Float8>,
        /// Optional deadline.
        due_date -> Nullable<Timestamptz>,
        /// Optional tag array.
        tags -> Nullable<Array<Text>>,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
