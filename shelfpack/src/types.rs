use crate::{geometry::Rect, id::IslandId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The width of every sheet, in normalized units.
pub const SHEET_WIDTH: f64 = 1.0;

/// How an island's content is laid onto the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Orientation {
    /// The island is placed as the caller described it.
    Identity,

    /// The island is turned a quarter turn clockwise around `position`, which
    /// becomes its top-left corner on the sheet. See [`Island::footprint`].
    ///
    /// [`Island::footprint`]: struct.Island.html#method.footprint
    Rotated90,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Identity
    }
}

/// A rectangular region to pack, usually the bounding box of one UV chart.
///
/// Islands are owned by the caller. A packer writes `position` and
/// `orientation` into them, and temporarily swaps `size` while it works on
/// rotated islands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Island {
    pub size: (f64, f64),
    pub position: (f64, f64),
    pub orientation: Orientation,
}

impl Island {
    #[inline]
    pub fn new(size: (f64, f64)) -> Self {
        Self {
            size,
            position: (0.0, 0.0),
            orientation: Orientation::Identity,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.1
    }

    /// The region of the sheet this island covers.
    ///
    /// For `Identity` islands this is just `position` and `size`. A
    /// `Rotated90` island keeps its original `size`, but covers a region with
    /// swapped dimensions that hangs below its `position`.
    pub fn footprint(&self) -> Rect {
        match self.orientation {
            Orientation::Identity => Rect::new(self.position, self.size),
            Orientation::Rotated90 => Rect::new(
                (self.position.0, self.position.1 - self.size.0),
                (self.size.1, self.size.0),
            ),
        }
    }
}

/// A closed outline in sheet space, as a list of points.
pub type Polygon = Vec<(f64, f64)>;

/// Supplies reference outlines for islands, for relocators that need to test
/// real chart shapes instead of bounding rectangles.
pub trait ReferenceShapes {
    fn reference_polygons(&self, id: IslandId) -> Vec<Polygon>;
}

/// The constraints for a single packing call.
#[derive(Clone, Copy)]
pub struct PackingContext<'a> {
    pub target_height: f64,
    pub padding: f64,
    pub reference: Option<&'a dyn ReferenceShapes>,
}

impl<'a> PackingContext<'a> {
    pub fn new(target_height: f64) -> Self {
        Self {
            target_height,
            padding: 0.0,
            reference: None,
        }
    }

    pub fn padding(self, padding: f64) -> Self {
        Self { padding, ..self }
    }

    pub fn with_reference(self, reference: &'a dyn ReferenceShapes) -> Self {
        Self {
            reference: Some(reference),
            ..self
        }
    }
}

impl std::fmt::Debug for PackingContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackingContext")
            .field("target_height", &self.target_height)
            .field("padding", &self.padding)
            .field("reference", &self.reference.is_some())
            .finish()
    }
}

/// The outcome reported through the [`Relocator`] interface.
///
/// [`Relocator`]: trait.Relocator.html
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingResult {
    pub success: bool,

    /// Set when every placement is an axis-aligned rectangle move, which lets
    /// consumers copy texels without resampling chart outlines.
    pub is_rectangular_move: bool,

    /// The height consumed by the layout, when packing got far enough to
    /// measure it.
    pub used_height: Option<f64>,
}

/// Details about a successful pack.
#[derive(Debug, Clone, PartialEq)]
pub struct PackOutput {
    pub(crate) used_height: f64,
    pub(crate) shelf_count: usize,
    pub(crate) order: Vec<IslandId>,
}

impl PackOutput {
    /// The vertical extent consumed by all shelves, including the padding
    /// above the last one.
    #[inline]
    pub fn used_height(&self) -> f64 {
        self.used_height
    }

    #[inline]
    pub fn shelf_count(&self) -> usize {
        self.shelf_count
    }

    /// The order islands were placed in, tallest first.
    #[inline]
    pub fn order(&self) -> &[IslandId] {
        &self.order
    }
}

/// Something that can move a set of islands onto a sheet.
///
/// Failed calls may leave islands partially moved. Callers that want to retry
/// should keep their own copy of the original islands.
pub trait Relocator {
    fn relocate(&self, islands: &mut [Island], context: &PackingContext<'_>) -> PackingResult;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_footprint() {
        let mut island = Island::new((0.5, 0.25));
        island.position = (0.125, 0.25);

        assert_eq!(island.footprint(), Rect::new((0.125, 0.25), (0.5, 0.25)));
    }

    #[test]
    fn rotated_footprint_hangs_below_position() {
        let island = Island {
            size: (0.25, 0.5),
            position: (0.125, 0.5),
            orientation: Orientation::Rotated90,
        };

        assert_eq!(island.footprint(), Rect::new((0.125, 0.25), (0.5, 0.25)));
    }

    #[test]
    fn context_builder() {
        let context = PackingContext::new(2.0).padding(0.5);

        assert_eq!(context.target_height, 2.0);
        assert_eq!(context.padding, 0.5);
        assert!(context.reference.is_none());
    }
}
