//! Draws layouts as images so that packing results can be eyeballed.

use thiserror::Error;

use crate::{
    data::Layout,
    image::{Image, Pixel},
};

/// The most pixels a preview may have, about 16384 by 16384.
const MAX_PIXELS: f64 = (1u64 << 28) as f64;

const BACKGROUND: Pixel = Pixel::new(24, 24, 24, 255);

/// Sheet space above the used height that's still within the target.
const UNUSED: Pixel = Pixel::new(56, 56, 64, 255);

/// Used height beyond the target height.
const OVERFLOW: Pixel = Pixel::new(112, 24, 24, 255);

const OUTLINE: Pixel = Pixel::new(0, 0, 0, 255);

const PALETTE: &[Pixel] = &[
    Pixel::new(230, 159, 0, 255),
    Pixel::new(86, 180, 233, 255),
    Pixel::new(0, 158, 115, 255),
    Pixel::new(240, 228, 66, 255),
    Pixel::new(0, 114, 178, 255),
    Pixel::new(213, 94, 0, 255),
    Pixel::new(204, 121, 167, 255),
    Pixel::new(170, 170, 170, 255),
];

#[derive(Debug, Error)]
pub(crate) enum PreviewError {
    #[error("Preview width must be at least one pixel")]
    ZeroWidth,

    #[error(
        "A preview {width} pixels wide of a sheet {sheet_height} tall would have \
         more than {} pixels",
        MAX_PIXELS
    )]
    TooLarge { width: u32, sheet_height: f64 },
}

pub(crate) fn check_width(width: u32) -> Result<(), PreviewError> {
    if width == 0 {
        return Err(PreviewError::ZeroWidth);
    }

    Ok(())
}

/// Renders a layout `width` pixels wide. The image is as tall as it needs to
/// be to keep the sheet's proportions, with the bottom of the sheet at the
/// bottom of the image.
pub(crate) fn render_layout(layout: &Layout, width: u32) -> Result<Image, PreviewError> {
    check_width(width)?;

    let sheet_height = layout.sheet_height();
    let too_large = || PreviewError::TooLarge {
        width,
        sheet_height,
    };

    let height = (width as f64 * sheet_height).ceil().max(1.0);
    if !(width as f64 * height <= MAX_PIXELS) {
        return Err(too_large());
    }
    let height = height as u32;

    let x_scale = width as f64;
    let y_scale = height as f64 / sheet_height;

    let column = |x: f64| (x * x_scale).max(0.0);
    let row = |y: f64| (height as f64 - y * y_scale).max(0.0);

    let mut image =
        Image::new_filled_rgba8((width, height), BACKGROUND).ok_or_else(too_large)?;

    let used_row = row(layout.used_height) as u32;
    image.fill_rect((0, 0), (width, used_row), UNUSED);

    if layout.used_height > layout.target_height {
        let target_row = row(layout.target_height) as u32;
        image.fill_rect((0, used_row), (width, target_row), OVERFLOW);
    }

    for (index, island) in layout.islands.iter().enumerate() {
        let footprint = island.to_island().footprint();
        let max = footprint.max();

        let min_px = (
            column(footprint.pos.0).floor() as u32,
            row(max.1).floor() as u32,
        );
        let max_px = (
            column(max.0).ceil() as u32,
            row(footprint.pos.1).ceil() as u32,
        );

        log::trace!(
            "Drawing island {} at pixels {:?} to {:?}",
            island.name,
            min_px,
            max_px
        );

        image.fill_rect(min_px, max_px, PALETTE[index % PALETTE.len()]);
        image.outline_rect(min_px, max_px, OUTLINE);
    }

    Ok(image)
}
