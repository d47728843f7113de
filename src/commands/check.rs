use std::fmt;

use shelfpack::{Rect, SHEET_WIDTH};

use crate::{
    data::Layout,
    options::{CheckOptions, GlobalOptions},
};

/// Slack allowed when comparing edges, since layouts pass through decimal
/// text on their way to and from disk.
const EPSILON: f64 = 1e-9;

pub fn check(_global: GlobalOptions, options: CheckOptions) -> anyhow::Result<()> {
    let layout = Layout::read_from_file(&options.layout)?;
    let problems = find_problems(&layout);

    if problems.is_empty() {
        println!(
            "{}: {} islands, using height {} of {}",
            options.layout.display(),
            layout.islands.len(),
            layout.used_height,
            layout.target_height
        );

        return Ok(());
    }

    for problem in &problems {
        println!("{}", problem);
    }

    anyhow::bail!(
        "{} has {} problem(s)",
        options.layout.display(),
        problems.len()
    )
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LayoutProblem {
    ExceedsTarget {
        used_height: f64,
        target_height: f64,
    },
    OffSheet {
        name: String,
        footprint: Rect,
    },
    TooClose {
        first: String,
        second: String,
    },
}

impl fmt::Display for LayoutProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutProblem::ExceedsTarget {
                used_height,
                target_height,
            } => write!(
                f,
                "Used height {} is more than the target height {}",
                used_height, target_height
            ),
            LayoutProblem::OffSheet { name, footprint } => {
                let max = footprint.max();
                write!(
                    f,
                    "Island {} covers ({}, {}) to ({}, {}), which is outside the sheet",
                    name, footprint.pos.0, footprint.pos.1, max.0, max.1
                )
            }
            LayoutProblem::TooClose { first, second } => write!(
                f,
                "Islands {} and {} are closer together than the padding allows",
                first, second
            ),
        }
    }
}

/// Finds every island that hangs off the sheet or crowds another island, as
/// well as a used height over the target.
pub(crate) fn find_problems(layout: &Layout) -> Vec<LayoutProblem> {
    let mut problems = Vec::new();

    if layout.used_height > layout.target_height + EPSILON {
        problems.push(LayoutProblem::ExceedsTarget {
            used_height: layout.used_height,
            target_height: layout.target_height,
        });
    }

    let sheet = Rect::new((0.0, 0.0), (SHEET_WIDTH, layout.used_height));
    let half_padding = layout.padding / 2.0 - EPSILON;

    let footprints: Vec<Rect> = layout
        .islands
        .iter()
        .map(|island| island.to_island().footprint())
        .collect();

    for (i, footprint) in footprints.iter().enumerate() {
        let name = &layout.islands[i].name;

        if !footprint.is_within(&sheet, EPSILON) {
            problems.push(LayoutProblem::OffSheet {
                name: name.clone(),
                footprint: *footprint,
            });
        }

        let expanded = footprint.expand(half_padding);

        for (j, other) in footprints.iter().enumerate().skip(i + 1) {
            if expanded.intersects(&other.expand(half_padding)) {
                problems.push(LayoutProblem::TooClose {
                    first: name.clone(),
                    second: layout.islands[j].name.clone(),
                });
            }
        }
    }

    problems
}
