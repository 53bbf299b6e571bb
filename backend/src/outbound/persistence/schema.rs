//! Diesel table definitions for PostgreSQL persistence.
//!
//! Kept in step with `backend/migrations` by hand; regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Purchased canvas regions.
    pixels (id) {
        id -> Int8,
        x -> Int4,
        y -> Int4,
        size -> Int4,
        image -> Text,
        created_at -> Timestamptz,
    }
}
