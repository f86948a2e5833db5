//! Diesel schema for board persistence.

diesel::table! {
    /// User-owned task categories.
    categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Display name, unique per owner.
        #[max_length = 100]
        name -> Varchar,
        /// Color token.
        #[max_length = 32]
        color -> Varchar,
        /// Icon token.
        #[max_length = 64]
        icon -> Varchar,
        /// Owning user.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Board column.
        #[max_length = 20]
        status -> Varchar,
        /// Urgency.
        #[max_length = 10]
        priority -> Varchar,
        /// Optional category reference.
        category_id -> Nullable<Uuid>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Rank within the column.
        position -> Int4,
        /// Owning user.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
