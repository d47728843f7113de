//! Puts islands into landscape orientation and orders them for shelving.

use std::cmp::Reverse;

use crate::{
    id::IslandId,
    types::{Island, Orientation},
};

/// Heights are compared after scaling by this factor and rounding, so that
/// heights that differ only by float noise sort as equal.
const HEIGHT_KEY_SCALE: f64 = (1u64 << 30) as f64;

/// Rotates an island a quarter turn if it is taller than it is wide.
///
/// Afterwards `island.height() <= island.width()` holds, and `orientation`
/// records whether the size was swapped.
pub fn normalize(island: &mut Island) {
    if island.size.1 > island.size.0 {
        island.size = (island.size.1, island.size.0);
        island.orientation = Orientation::Rotated90;
    } else {
        island.orientation = Orientation::Identity;
    }
}

pub fn normalize_all(islands: &mut [Island]) {
    islands.iter_mut().for_each(normalize);
}

/// Undoes `normalize` for an island that has been placed in its landscape
/// form. The position is moved to the rotation pivot, the top-left corner of
/// the placed rectangle.
pub(crate) fn restore(island: &mut Island) {
    if island.orientation == Orientation::Rotated90 {
        island.size = (island.size.1, island.size.0);
        island.position.1 += island.size.0;
    }
}

fn height_key(island: &Island) -> i64 {
    (island.height() * HEIGHT_KEY_SCALE).round() as i64
}

/// Orders islands from tallest to shortest. Islands of equal height keep the
/// order they were given in, rather than the flipped order that reversing an
/// ascending sort would give them.
pub(crate) fn sort_by_height(islands: &[Island]) -> Vec<IslandId> {
    let mut order: Vec<IslandId> = IslandId::all(islands.len()).collect();
    order.sort_by_key(|id| Reverse(height_key(&islands[id.index()])));

    if cfg!(debug_assertions) {
        validate_descending(islands, &order);
    }

    order
}

/// Reports any adjacent pair in `order` where height goes up. This only
/// catches mistakes in the sort itself; equal heights are fine.
fn validate_descending(islands: &[Island], order: &[IslandId]) -> bool {
    let tolerance = 1.0 / HEIGHT_KEY_SCALE;
    let mut valid = true;

    for pair in order.windows(2) {
        let current = islands[pair[0].index()].height();
        let next = islands[pair[1].index()].height();

        if next - current > tolerance {
            log::warn!(
                "Islands are out of order: {} (height {}) comes before {} (height {})",
                pair[0],
                current,
                pair[1],
                next
            );
            valid = false;
        }
    }

    valid
}
