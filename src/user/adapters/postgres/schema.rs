//! Diesel schema for user directory persistence.

diesel::table! {
    /// Employee account records.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Organizational email address, unique.
        #[max_length = 255]
        email -> Varchar,
        /// Access role.
        #[max_length = 20]
        role -> Varchar,
        /// Active flag; deactivation is the only terminal state.
        is_active -> Bool,
        /// Opaque credential hash.
        #[max_length = 255]
        credential_hash -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
