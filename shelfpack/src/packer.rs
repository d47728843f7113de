use crate::{
    error::PackError,
    id::IslandId,
    orientation,
    shelf::{self, Shelf},
    types::{Island, PackOutput, PackingContext, PackingResult, Relocator},
};

/// Packs islands into shelves stacked up from the bottom of a sheet.
///
/// Islands are turned so that none is taller than it is wide, then placed
/// tallest first. Each island goes into the first shelf with room for it, on
/// either the shelf's floor or its ceiling. If no shelf has room, a new shelf
/// as tall as the island is opened above the last one.
///
/// `ShelfPacker` holds no state between calls, so independent calls can run on
/// separate threads as long as each has its own islands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShelfPacker;

impl ShelfPacker {
    pub fn new() -> Self {
        ShelfPacker
    }

    /// Places every island and reports how much height the layout used.
    ///
    /// On success, each island's `position`, `size`, and `orientation` describe
    /// where it landed, with `size` in the caller's original axis order.
    ///
    /// On failure, islands that got far enough to be normalized or placed are
    /// left that way. Keep a copy of the input if you need to retry.
    pub fn pack(
        &self,
        islands: &mut [Island],
        context: &PackingContext<'_>,
    ) -> Result<PackOutput, PackError> {
        validate(islands, context)?;

        let padding = context.padding;
        log::trace!("Packing {} islands with padding {}", islands.len(), padding);

        orientation::normalize_all(islands);
        let order = orientation::sort_by_height(islands);

        let mut shelves: Vec<Shelf> = Vec::new();

        for &id in &order {
            let island = &mut islands[id.index()];

            if shelves.iter_mut().any(|shelf| shelf.try_place(id, island)) {
                continue;
            }

            let floor = match shelves.last() {
                Some(last) => last.ceiling() + 2.0 * padding,
                None => padding,
            };

            let mut shelf = Shelf::new(floor, island.height(), padding);

            if !shelf.try_place(id, island) {
                log::error!(
                    "Island {} with size {:?} did not fit into an empty shelf",
                    id,
                    island.size
                );

                return Err(PackError::ShelfRejected { id });
            }

            shelves.push(shelf);
        }

        let used_height = shelves.last().map(Shelf::ceiling).unwrap_or(0.0) + padding;

        log::trace!(
            "Finished packing {} islands into {} shelves, using height {}",
            islands.len(),
            shelves.len(),
            used_height
        );

        for shelf in &shelves {
            log::trace!(
                "Shelf at {} holds {} islands: {:?}",
                shelf.floor(),
                shelf.len(),
                shelf.islands().map(|(id, _)| id).collect::<Vec<_>>()
            );
        }

        if used_height > context.target_height {
            return Err(PackError::ExceedsTarget {
                used_height,
                target_height: context.target_height,
            });
        }

        islands.iter_mut().for_each(orientation::restore);

        Ok(PackOutput {
            used_height,
            shelf_count: shelves.len(),
            order,
        })
    }
}

impl Relocator for ShelfPacker {
    fn relocate(&self, islands: &mut [Island], context: &PackingContext<'_>) -> PackingResult {
        match self.pack(islands, context) {
            Ok(output) => PackingResult {
                success: true,
                is_rectangular_move: true,
                used_height: Some(output.used_height),
            },
            Err(err) => {
                log::debug!("Shelf packing failed: {}", err);

                let used_height = match err {
                    PackError::ExceedsTarget { used_height, .. } => Some(used_height),
                    _ => None,
                };

                PackingResult {
                    success: false,
                    is_rectangular_move: true,
                    used_height,
                }
            }
        }
    }
}

fn validate(islands: &[Island], context: &PackingContext<'_>) -> Result<(), PackError> {
    if islands.is_empty() {
        return Err(PackError::NoIslands);
    }

    let target_height = context.target_height;
    if !target_height.is_finite() || target_height <= 0.0 {
        return Err(PackError::InvalidTargetHeight(target_height));
    }

    let padding = context.padding;
    if !padding.is_finite() || padding < 0.0 {
        return Err(PackError::InvalidPadding(padding));
    }

    for (id, island) in IslandId::all(islands.len()).zip(islands) {
        let (width, height) = island.size;

        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PackError::InvalidSize {
                id,
                size: island.size,
            });
        }

        let landscape_width = width.max(height);
        if !shelf::fits_empty_shelf(landscape_width, padding) {
            return Err(PackError::TooWide {
                id,
                width: landscape_width,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;
    use crate::{
        geometry::Rect,
        types::{Orientation, Polygon, ReferenceShapes, SHEET_WIDTH},
    };

    const EPSILON: f64 = 1e-9;

    fn islands(sizes: &[(f64, f64)]) -> Vec<Island> {
        sizes.iter().copied().map(Island::new).collect()
    }

    fn pack(
        islands: &mut [Island],
        target_height: f64,
        padding: f64,
    ) -> Result<PackOutput, PackError> {
        let _ = env_logger::try_init();

        let context = PackingContext::new(target_height).padding(padding);
        ShelfPacker::new().pack(islands, &context)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    /// Checks that every island is on the sheet below `used_height`, and that
    /// islands are at least `padding` apart.
    fn assert_valid_layout(islands: &[Island], padding: f64, used_height: f64) {
        let sheet = Rect::new((0.0, 0.0), (SHEET_WIDTH, used_height));
        let half = padding / 2.0 - EPSILON;

        for (i, island) in islands.iter().enumerate() {
            let footprint = island.footprint();
            assert!(
                footprint.is_within(&sheet, EPSILON),
                "island {} at {:?} is off the sheet",
                i,
                footprint
            );

            for (j, other) in islands.iter().enumerate().skip(i + 1) {
                assert!(
                    !footprint.expand(half).intersects(&other.footprint().expand(half)),
                    "island {} at {:?} is too close to island {} at {:?}",
                    i,
                    footprint,
                    j,
                    other.footprint()
                );
            }
        }
    }

    fn generated_islands(count: usize) -> Vec<Island> {
        (0..count)
            .map(|i| {
                let width = 0.05 + ((i * 37) % 19) as f64 * 0.02;
                let height = 0.03 + ((i * 11) % 13) as f64 * 0.025;
                Island::new((width, height))
            })
            .collect()
    }

    #[test]
    fn single_island() {
        let mut islands = islands(&[(0.5, 0.3)]);
        let output = pack(&mut islands, 1.0, 0.01).unwrap();

        assert_close(islands[0].position.0, 0.005);
        assert_close(islands[0].position.1, 0.01);
        assert_close(output.used_height(), 0.32);
        assert_eq!(output.shelf_count(), 1);
    }

    #[test]
    fn equal_heights_share_floor() {
        let mut islands = islands(&[(0.4, 0.2), (0.3, 0.2)]);
        let output = pack(&mut islands, 1.0, 0.01).unwrap();

        assert_eq!(output.shelf_count(), 1);
        assert_close(islands[0].position.1, islands[1].position.1);

        let gap = islands[1].position.0 - islands[0].footprint().max().0;
        assert!(gap >= 0.01 - EPSILON, "gap was {}", gap);
    }

    #[test]
    fn short_island_hangs_from_tall_shelf() {
        let mut islands = islands(&[(0.5, 0.5), (0.45, 0.2), (0.4, 0.1)]);
        let output = pack(&mut islands, 0.6, 0.01).unwrap();

        assert_eq!(output.shelf_count(), 1);
        assert_close(output.used_height(), 0.5 + 2.0 * 0.01);

        // Hangs from the ceiling above the second island.
        assert_close(islands[2].position.0, 0.595);
        assert_close(islands[2].position.1, 0.41);
        assert_valid_layout(&islands, 0.01, output.used_height());
    }

    #[test]
    fn island_taller_than_target() {
        let mut islands = islands(&[(0.95, 0.9)]);
        let err = pack(&mut islands, 0.9, 0.01).unwrap_err();

        match err {
            PackError::ExceedsTarget {
                used_height,
                target_height,
            } => {
                assert_close(used_height, 0.92);
                assert_close(target_height, 0.9);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn island_larger_than_sheet() {
        let mut islands = islands(&[(0.5, 1.2)]);
        let err = pack(&mut islands, 1.0, 0.01).unwrap_err();

        assert_eq!(
            err,
            PackError::TooWide {
                id: IslandId::from_index(0),
                width: 1.2,
            }
        );
        assert!(err.is_infeasible());
    }

    #[test]
    fn no_islands() {
        let mut islands = Vec::new();

        assert_eq!(pack(&mut islands, 1.0, 0.01), Err(PackError::NoIslands));

        let context = PackingContext::new(1.0);
        let result = ShelfPacker::new().relocate(&mut islands, &context);
        assert!(!result.success);
        assert_eq!(result.used_height, None);
    }

    #[test]
    fn portrait_island_returned_in_caller_axes() {
        let mut islands = islands(&[(0.2, 0.6), (0.3, 0.1)]);
        let output = pack(&mut islands, 1.0, 0.01).unwrap();

        assert_eq!(islands[0].size, (0.2, 0.6));
        assert_eq!(islands[0].orientation, Orientation::Rotated90);
        assert_eq!(islands[1].orientation, Orientation::Identity);

        // Rotated about its top-left corner, so the anchor sits at the top of
        // the region it covers.
        let footprint = islands[0].footprint();
        assert_close(footprint.size.0, 0.6);
        assert_close(footprint.size.1, 0.2);
        assert_close(islands[0].position.1, footprint.max().1);

        assert_valid_layout(&islands, 0.01, output.used_height());
    }

    #[test]
    fn invalid_inputs() {
        let mut good = islands(&[(0.5, 0.3)]);

        assert_eq!(
            pack(&mut good, 0.0, 0.01),
            Err(PackError::InvalidTargetHeight(0.0))
        );
        assert_eq!(
            pack(&mut good, 1.0, -0.01),
            Err(PackError::InvalidPadding(-0.01))
        );

        let mut zero = islands(&[(0.5, 0.3), (0.0, 0.1)]);
        assert_eq!(
            pack(&mut zero, 1.0, 0.01),
            Err(PackError::InvalidSize {
                id: IslandId::from_index(1),
                size: (0.0, 0.1),
            })
        );

        let mut nan = islands(&[(std::f64::NAN, 0.1)]);
        assert!(pack(&mut nan, 1.0, 0.01).unwrap_err().is_invalid_input());
    }

    #[test]
    fn many_islands_stay_apart() {
        let mut islands = generated_islands(60);
        let output = pack(&mut islands, 10.0, 0.01).unwrap();

        assert!(output.shelf_count() > 1);
        assert!(output.used_height() <= 10.0);
        assert_valid_layout(&islands, 0.01, output.used_height());
    }

    #[test]
    fn placement_order_is_tallest_first() {
        let mut islands = generated_islands(30);
        let original = islands.clone();
        let output = pack(&mut islands, 10.0, 0.0).unwrap();

        let landscape_height = |island: &Island| island.size.0.min(island.size.1);
        for pair in output.order().windows(2) {
            let current = landscape_height(&original[pair[0].index()]);
            let next = landscape_height(&original[pair[1].index()]);
            assert!(next <= current + EPSILON);
        }
    }

    #[test]
    fn deterministic() {
        let original = generated_islands(40);

        let mut first = original.clone();
        let mut second = original.clone();
        let first_output = pack(&mut first, 10.0, 0.005).unwrap();
        let second_output = pack(&mut second, 10.0, 0.005).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_output, second_output);
    }

    #[test]
    fn sizes_restored_exactly() {
        let original = generated_islands(25);
        let mut packed = original.clone();
        pack(&mut packed, 10.0, 0.01).unwrap();

        for (before, after) in original.iter().zip(&packed) {
            assert_eq!(before.size, after.size);
        }
    }

    #[test]
    fn relocate_reports_used_height_on_overflow() {
        let mut islands = generated_islands(40);
        let context = PackingContext::new(0.5).padding(0.01);
        let result = ShelfPacker::new().relocate(&mut islands, &context);

        assert!(!result.success);
        assert!(result.is_rectangular_move);
        assert!(result.used_height.unwrap() > 0.5);
    }

    #[test]
    fn reference_shapes_are_not_consulted() {
        struct CountingShapes {
            calls: Cell<usize>,
        }

        impl ReferenceShapes for CountingShapes {
            fn reference_polygons(&self, _id: IslandId) -> Vec<Polygon> {
                self.calls.set(self.calls.get() + 1);
                Vec::new()
            }
        }

        let shapes = CountingShapes {
            calls: Cell::new(0),
        };

        let mut islands = generated_islands(10);
        let context = PackingContext::new(10.0)
            .padding(0.01)
            .with_reference(&shapes);
        let result = ShelfPacker::new().relocate(&mut islands, &context);

        assert!(result.success);
        assert_eq!(shapes.calls.get(), 0);
    }

    #[test]
    fn mixed_layout() {
        let mut islands = islands(&[
            (0.25, 0.5),
            (0.5, 0.375),
            (0.25, 0.125),
            (0.125, 0.0625),
            (0.375, 0.25),
            (0.0625, 0.0625),
        ]);
        let output = pack(&mut islands, 2.0, 0.03125).unwrap();

        let mut layout: Vec<String> = islands
            .iter()
            .enumerate()
            .map(|(index, island)| {
                format!(
                    "{}: pos ({:.6}, {:.6}) size ({:.6}, {:.6}) {:?}",
                    index,
                    island.position.0,
                    island.position.1,
                    island.size.0,
                    island.size.1,
                    island.orientation
                )
            })
            .collect();
        layout.push(format!(
            "used height {:.6} in {} shelves",
            output.used_height(),
            output.shelf_count()
        ));

        insta::assert_snapshot!(layout.join("\n"), @r###"
        0: pos (0.015625, 0.718750) size (0.250000, 0.500000) Rotated90
        1: pos (0.015625, 0.031250) size (0.500000, 0.375000) Identity
        2: pos (0.546875, 0.468750) size (0.250000, 0.125000) Identity
        3: pos (0.859375, 0.343750) size (0.125000, 0.062500) Identity
        4: pos (0.546875, 0.031250) size (0.375000, 0.250000) Identity
        5: pos (0.765625, 0.343750) size (0.062500, 0.062500) Identity
        used height 0.750000 in 2 shelves
        "###);

        assert_valid_layout(&islands, 0.03125, output.used_height());
    }
}
