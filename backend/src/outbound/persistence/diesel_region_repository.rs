//! PostgreSQL-backed `RegionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegionRepository, RegionRepositoryError};
use crate::domain::{AssetRef, NewRegion, Placement, Region, RegionId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPixelRow, PixelRow};
use super::pool::DbPool;
use super::schema::pixels;

/// Diesel-backed implementation of the region repository port.
#[derive(Clone)]
pub struct DieselRegionRepository {
    pool: DbPool,
}

impl DieselRegionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a validated domain region.
fn row_to_region(row: PixelRow) -> Result<Region, RegionRepositoryError> {
    let PixelRow {
        id,
        x,
        y,
        size,
        image,
    } = row;
    let placement = Placement::new(x, y, size)
        .map_err(|err| RegionRepositoryError::query(format!("row {id}: {err}")))?;
    let image = AssetRef::parse(image)
        .map_err(|err| RegionRepositoryError::query(format!("row {id}: {err}")))?;
    Ok(Region::from_new(
        RegionId::new(id),
        NewRegion { placement, image },
    ))
}

#[async_trait]
impl RegionRepository for DieselRegionRepository {
    async fn create(&self, region: NewRegion) -> Result<Region, RegionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let placement = region.placement;
        let new_row = NewPixelRow {
            x: placement.x(),
            y: placement.y(),
            size: placement.size(),
            image: region.image.as_str(),
        };

        let id: i64 = diesel::insert_into(pixels::table)
            .values(&new_row)
            .returning(pixels::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Region::from_new(RegionId::new(id), region))
    }

    async fn list_all(&self) -> Result<Vec<Region>, RegionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PixelRow> = pixels::table
            .select(PixelRow::as_select())
            .order(pixels::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_region).collect()
    }
}
