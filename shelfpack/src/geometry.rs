#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in normalized sheet units. `pos` is the
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub pos: (f64, f64),
    pub size: (f64, f64),
}

impl Rect {
    #[inline]
    pub fn new(pos: (f64, f64), size: (f64, f64)) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn max(&self) -> (f64, f64) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    /// Grows the rectangle outward by `amount` on every side.
    pub fn expand(&self, amount: f64) -> Rect {
        Rect {
            pos: (self.pos.0 - amount, self.pos.1 - amount),
            size: (self.size.0 + 2.0 * amount, self.size.1 + 2.0 * amount),
        }
    }

    /// Whether the interiors of the two rectangles overlap. Rectangles that
    /// only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let self_max = self.max();
        let other_max = other.max();

        let x_overlap = self.pos.0 < other_max.0 && other.pos.0 < self_max.0;
        let y_overlap = self.pos.1 < other_max.1 && other.pos.1 < self_max.1;

        x_overlap && y_overlap
    }

    /// Whether this rectangle lies inside `outer`, allowing `epsilon` of
    /// floating point slack on each edge.
    pub fn is_within(&self, outer: &Rect, epsilon: f64) -> bool {
        let self_max = self.max();
        let outer_max = outer.max();

        self.pos.0 >= outer.pos.0 - epsilon
            && self.pos.1 >= outer.pos.1 - epsilon
            && self_max.0 <= outer_max.0 + epsilon
            && self_max.1 <= outer_max.1 + epsilon
    }
}
