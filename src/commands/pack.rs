use std::env;

use shelfpack::{Island, PackError, PackOutput, PackingContext, ShelfPacker};

use super::preview::write_png;
use crate::{
    data::{Config, IslandList, Layout},
    options::{GlobalOptions, PackOptions},
    preview::{check_width, render_layout},
};

pub fn pack(_global: GlobalOptions, options: PackOptions) -> anyhow::Result<()> {
    let current_dir = env::current_dir()?;
    let config = Config::locate(options.config.as_deref(), &current_dir)?;

    match &config.file_path {
        Some(path) => log::debug!("Using config from {}", path.display()),
        None => log::debug!("Using default config"),
    }

    let target_height = options.target_height.unwrap_or(config.target_height);
    let padding = options.padding.unwrap_or(config.padding);
    let growth = Growth {
        attempts: options.grow_attempts.unwrap_or(config.grow.attempts),
        factor: config.grow.factor,
    };

    if growth.attempts > 0 && !(growth.factor > 1.0) {
        anyhow::bail!(
            "The grow factor must be more than 1, but was {}",
            growth.factor
        );
    }

    if options.preview.is_some() {
        check_width(config.preview.width)?;
    }

    let list = IslandList::read_from_file(&options.input)?;
    log::info!(
        "Packing {} islands from {}",
        list.islands.len(),
        options.input.display()
    );

    let packed = pack_with_growth(&list.to_islands(), target_height, padding, growth)?;

    log::info!(
        "Packed into {} shelves, using height {:.4} of {:.4}",
        packed.output.shelf_count(),
        packed.output.used_height(),
        packed.target_height
    );

    let layout = Layout::from_packed(
        &list.islands,
        &packed.islands,
        packed.target_height,
        padding,
        packed.output.used_height(),
    );
    layout.write_to_file(&options.output)?;

    if let Some(preview_path) = &options.preview {
        let image = render_layout(&layout, config.preview.width)?;
        write_png(&image, preview_path)?;

        log::info!("Wrote preview to {}", preview_path.display());
    }

    Ok(())
}

/// How to retry when islands don't fit within the target height.
#[derive(Debug, Clone, Copy)]
struct Growth {
    attempts: u32,
    factor: f64,
}

#[derive(Debug)]
struct Packed {
    islands: Vec<Island>,
    output: PackOutput,

    /// The target height the islands finally fit into.
    target_height: f64,
}

/// Packs a copy of `original`, growing the target height and starting over
/// from the unpacked islands each time they don't fit.
fn pack_with_growth(
    original: &[Island],
    target_height: f64,
    padding: f64,
    growth: Growth,
) -> Result<Packed, PackError> {
    let packer = ShelfPacker::new();
    let mut target_height = target_height;
    let mut attempt = 0;

    loop {
        let mut islands = original.to_vec();
        let context = PackingContext::new(target_height).padding(padding);

        match packer.pack(&mut islands, &context) {
            Ok(output) => {
                return Ok(Packed {
                    islands,
                    output,
                    target_height,
                })
            }

            Err(PackError::ExceedsTarget { used_height, .. }) if attempt < growth.attempts => {
                attempt += 1;

                let next_target = target_height * growth.factor;
                log::info!(
                    "Islands needed height {:.4}, more than the target of {:.4}. Retrying with {:.4} ({}/{})",
                    used_height,
                    target_height,
                    next_target,
                    attempt,
                    growth.attempts
                );

                target_height = next_target;
            }

            Err(err) => return Err(err),
        }
    }
}
