use std::{
    io::{BufWriter, Write},
    path::Path,
};

use fs_err as fs;

use crate::{
    data::Layout,
    image::Image,
    options::{GlobalOptions, PreviewOptions},
    preview::render_layout,
};

pub fn preview(_global: GlobalOptions, options: PreviewOptions) -> anyhow::Result<()> {
    let layout = Layout::read_from_file(&options.layout)?;
    let image = render_layout(&layout, options.width)?;

    write_png(&image, &options.output)?;
    log::info!("Wrote preview to {}", options.output.display());

    Ok(())
}

pub(crate) fn write_png(image: &Image, path: &Path) -> anyhow::Result<()> {
    let (width, height) = image.size();
    log::debug!("Encoding {}x{} image to {}", width, height, path.display());

    let mut file = BufWriter::new(fs::File::create(path)?);
    image.encode_png(&mut file)?;
    file.flush()?;

    Ok(())
}
