//! Purchased canvas regions.
//!
//! A region is a square placement on the shared canvas together with the
//! asset rendered into it. Placement coordinates are deliberately unbounded:
//! the wall accepts overlapping and off-canvas purchases.

use serde::{Deserialize, Serialize};

use super::AssetRef;

/// Smallest accepted edge length, in pixels, for a purchased region.
pub const MIN_REGION_SIZE: i32 = 10;

/// Server-assigned, monotonically increasing region identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(i64);

impl RegionId {
    /// Wrap a raw identifier issued by the record store.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors raised when constructing a [`Placement`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementValidationError {
    /// The edge length is below [`MIN_REGION_SIZE`].
    #[error("size must be at least {min} pixels, got {actual}")]
    SizeTooSmall { min: i32, actual: i32 },
}

/// Top-left corner and edge length of a square region.
///
/// ## Invariants
/// - `size >= MIN_REGION_SIZE`.
/// - `x` and `y` are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    x: i32,
    y: i32,
    size: i32,
}

impl Placement {
    /// Validate and build a placement.
    ///
    /// # Examples
    /// ```
    /// use pixelwall::domain::Placement;
    ///
    /// let placement = Placement::new(-40, 900, 50).expect("size is large enough");
    /// assert_eq!(placement.x(), -40);
    /// assert!(Placement::new(0, 0, 3).is_err());
    /// ```
    pub fn new(x: i32, y: i32, size: i32) -> Result<Self, PlacementValidationError> {
        if size < MIN_REGION_SIZE {
            return Err(PlacementValidationError::SizeTooSmall {
                min: MIN_REGION_SIZE,
                actual: size,
            });
        }
        Ok(Self { x, y, size })
    }

    /// Horizontal offset of the top-left corner.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical offset of the top-left corner.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Edge length in pixels.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }
}

/// A region that has not yet been assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegion {
    pub placement: Placement,
    pub image: AssetRef,
}

/// A persisted region record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: RegionId,
    placement: Placement,
    image: AssetRef,
}

impl Region {
    /// Attach a store-issued identifier to a new region.
    #[must_use]
    pub fn from_new(id: RegionId, region: NewRegion) -> Self {
        let NewRegion { placement, image } = region;
        Self {
            id,
            placement,
            image,
        }
    }

    /// Store-issued identifier.
    #[must_use]
    pub const fn id(&self) -> RegionId {
        self.id
    }

    /// Placement on the canvas.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Asset rendered into the region.
    #[must_use]
    pub fn image(&self) -> &AssetRef {
        &self.image
    }
}
