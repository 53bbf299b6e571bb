//! Internal Diesel row models.
//!
//! These structs mirror the `pixels` table and never leave the persistence
//! adapter.

use diesel::prelude::*;

use super::schema::pixels;

/// Row read back from `pixels`; `created_at` is audit-only and not selected.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pixels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PixelRow {
    pub id: i64,
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub image: String,
}

/// Insertable payload; `id` and `created_at` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pixels)]
pub(crate) struct NewPixelRow<'a> {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub image: &'a str,
}
