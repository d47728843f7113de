//! A shelf is a horizontal band of the sheet with a fixed height. Each shelf
//! holds two rows of islands: one packed left to right along the floor, and
//! one packed right to left along the ceiling. Shorter islands from later in
//! the sort order can then fill the space beside a tall island from either
//! side.

use crate::{
    geometry::Rect,
    id::IslandId,
    types::{Island, SHEET_WIDTH},
};

#[derive(Debug, Clone, Copy)]
struct Placed {
    id: IslandId,
    rect: Rect,
}

#[derive(Debug, Clone)]
pub(crate) struct Shelf {
    floor: f64,
    height: f64,
    padding: f64,

    /// Islands along the floor, in placement order. Each one is to the right
    /// of the one before it.
    lower_row: Vec<Placed>,

    /// Islands along the ceiling, in placement order. Each one is to the left
    /// of the one before it.
    upper_row: Vec<Placed>,
}

/// The horizontal room an island needs in a row: its width, a full padding
/// on the side facing away from where the row starts, and `leading` on the
/// side facing it.
#[inline]
fn required_width(width: f64, padding: f64, leading: f64) -> f64 {
    width + padding + leading
}

/// The gap kept between the first island of a row and the sheet edge the row
/// starts from. The neighbouring sheet supplies the rest of the padding.
#[inline]
fn edge_margin(padding: f64) -> f64 {
    padding / 2.0
}

/// Whether an island of this width fits into a shelf that holds nothing else.
pub(crate) fn fits_empty_shelf(width: f64, padding: f64) -> bool {
    SHEET_WIDTH > required_width(width, padding, edge_margin(padding))
}

impl Shelf {
    pub fn new(floor: f64, height: f64, padding: f64) -> Self {
        log::debug!("Opening shelf at {} with height {}", floor, height);

        Self {
            floor,
            height,
            padding,
            lower_row: Vec::new(),
            upper_row: Vec::new(),
        }
    }

    #[inline]
    pub fn floor(&self) -> f64 {
        self.floor
    }

    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.floor + self.height
    }

    pub fn len(&self) -> usize {
        self.lower_row.len() + self.upper_row.len()
    }

    /// Attempts to place the island into this shelf, writing its position if
    /// it fits. The floor row is tried before the ceiling row.
    pub fn try_place(&mut self, id: IslandId, island: &mut Island) -> bool {
        if island.height() > self.height {
            log::trace!(
                "Island {} (height {}) is taller than shelf at {}",
                id,
                island.height(),
                self.floor
            );
            return false;
        }

        let placed = self
            .try_place_lower(id, island.size)
            .or_else(|| self.try_place_upper(id, island.size));

        match placed {
            Some(rect) => {
                island.position = rect.pos;
                true
            }
            None => false,
        }
    }

    fn try_place_lower(&mut self, id: IslandId, size: (f64, f64)) -> Option<Rect> {
        let (width, height) = size;

        let leading = match self.lower_row.last() {
            Some(_) => self.padding,
            None => edge_margin(self.padding),
        };

        let empty_x_min = self
            .lower_row
            .last()
            .map(|last| last.rect.max().0)
            .unwrap_or(0.0);
        let empty_x_max = self.upper_row_limit(self.floor + height);

        if empty_x_max - empty_x_min <= required_width(width, self.padding, leading) {
            return None;
        }

        let rect = Rect::new((empty_x_min + leading, self.floor), size);

        log::trace!(
            "Placed island {} on floor of shelf at {} ({:?})",
            id,
            self.floor,
            rect.pos
        );

        self.lower_row.push(Placed { id, rect });
        Some(rect)
    }

    fn try_place_upper(&mut self, id: IslandId, size: (f64, f64)) -> Option<Rect> {
        let (width, height) = size;
        let y = self.ceiling() - height;

        let trailing = match self.upper_row.last() {
            Some(_) => self.padding,
            None => edge_margin(self.padding),
        };

        let far_edge = self
            .upper_row
            .last()
            .map(|last| last.rect.pos.0)
            .unwrap_or(SHEET_WIDTH);
        let near_edge = self.lower_row_limit(y);

        if far_edge - near_edge <= required_width(width, self.padding, trailing) {
            return None;
        }

        let rect = Rect::new((far_edge - width - trailing, y), size);

        log::trace!(
            "Placed island {} under ceiling of shelf at {} ({:?})",
            id,
            self.floor,
            rect.pos
        );

        self.upper_row.push(Placed { id, rect });
        Some(rect)
    }

    /// The leftmost edge of any ceiling island that hangs down to within
    /// `2 * padding` of `level`, or the sheet's right edge if none do.
    fn upper_row_limit(&self, level: f64) -> f64 {
        let reach = self.ceiling() - level;

        self.upper_row
            .iter()
            .filter(|placed| reach < placed.rect.size.1 + 2.0 * self.padding)
            .map(|placed| placed.rect.pos.0)
            .fold(SHEET_WIDTH, f64::min)
    }

    /// The rightmost edge of any floor island that rises to within
    /// `2 * padding` of `level`, or the sheet's left edge if none do.
    fn lower_row_limit(&self, level: f64) -> f64 {
        let reach = level - self.floor;

        self.lower_row
            .iter()
            .filter(|placed| reach < placed.rect.size.1 + 2.0 * self.padding)
            .map(|placed| placed.rect.max().0)
            .fold(0.0, f64::max)
    }

    /// Every island in this shelf, floor row first.
    pub fn islands(&self) -> impl Iterator<Item = (IslandId, Rect)> + '_ {
        self.lower_row
            .iter()
            .chain(self.upper_row.iter())
            .map(|placed| (placed.id, placed.rect))
    }
}
