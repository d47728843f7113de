//! Simple container for drawing layout previews.

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Rgba8,
}

impl ImageFormat {
    fn stride(&self) -> u32 {
        match self {
            ImageFormat::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Image {
    size: (u32, u32),
    data: Vec<u8>,
    format: ImageFormat,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();
        let format = ImageFormat::Rgba8;

        assert!(Some(data.len()) == buffer_len(size, format));

        Self { size, data, format }
    }

    /// Creates an image filled with one color, or `None` if the image would be
    /// too large to address in memory.
    pub fn new_filled_rgba8(size: (u32, u32), fill: Pixel) -> Option<Self> {
        let len = buffer_len(size, ImageFormat::Rgba8)?;
        let data = [fill.r, fill.g, fill.b, fill.a]
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect::<Vec<u8>>();

        Some(Self::new_rgba8(size, data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);

        match self.format {
            ImageFormat::Rgba8 => {
                encoder.set_color(png::ColorType::RGBA);
                encoder.set_depth(png::BitDepth::Eight);
            }
        }

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[cfg(test)]
    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    fn offset(&self, pos: (u32, u32)) -> usize {
        let stride = self.format.stride() as usize;
        stride * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }

    /// Fills the pixels from `min` up to but not including `max`. Parts of the
    /// rectangle outside the image are ignored.
    pub fn fill_rect(&mut self, min: (u32, u32), max: (u32, u32), pixel: Pixel) {
        let max = (max.0.min(self.size.0), max.1.min(self.size.1));

        for y in min.1..max.1 {
            for x in min.0..max.0 {
                self.set_pixel((x, y), pixel);
            }
        }
    }

    /// Draws a one pixel border just inside the rectangle from `min` up to but
    /// not including `max`.
    pub fn outline_rect(&mut self, min: (u32, u32), max: (u32, u32), pixel: Pixel) {
        let max = (max.0.min(self.size.0), max.1.min(self.size.1));

        if min.0 >= max.0 || min.1 >= max.1 {
            return;
        }

        self.fill_rect(min, (max.0, min.1 + 1), pixel);
        self.fill_rect((min.0, max.1 - 1), max, pixel);
        self.fill_rect(min, (min.0 + 1, max.1), pixel);
        self.fill_rect((max.0 - 1, min.1), max, pixel);
    }
}

/// The number of bytes an image of `size` needs, if that fits in a `usize`.
fn buffer_len(size: (u32, u32), format: ImageFormat) -> Option<usize> {
    (size.0 as usize)
        .checked_mul(size.1 as usize)?
        .checked_mul(format.stride() as usize)
}

#[cfg(test)]
mod test {
    use super::*;

    const CLEAR: Pixel = Pixel::new(0, 0, 0, 0);

    #[test]
    fn filled() {
        let image = Image::new_filled_rgba8((3, 2), Pixel::new(1, 2, 3, 4)).unwrap();

        assert_eq!(image.size(), (3, 2));
        assert_eq!(image.get_pixel((0, 0)), Pixel::new(1, 2, 3, 4));
        assert_eq!(image.get_pixel((2, 1)), Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn set_pixel() {
        let mut source = Image::new_filled_rgba8((3, 3), CLEAR).unwrap();

        source.set_pixel((0, 0), Pixel::new(1, 2, 3, 4));
        assert_eq!(source.get_pixel((0, 0)), Pixel::new(1, 2, 3, 4));

        source.set_pixel((2, 2), Pixel::new(5, 6, 7, 8));
        assert_eq!(source.get_pixel((2, 2)), Pixel::new(5, 6, 7, 8));

        assert_eq!(&source.data[0..4], &[1, 2, 3, 4]);
        assert_eq!(&source.data[(source.data.len() - 4)..], &[5, 6, 7, 8]);
    }

    #[test]
    fn fill_rect_clipped() {
        let mut image = Image::new_filled_rgba8((4, 4), CLEAR).unwrap();
        let red = Pixel::new(255, 0, 0, 255);

        image.fill_rect((2, 2), (10, 10), red);

        assert_eq!(image.get_pixel((1, 1)), CLEAR);
        assert_eq!(image.get_pixel((2, 2)), red);
        assert_eq!(image.get_pixel((3, 3)), red);
        assert_eq!(image.get_pixel((3, 1)), CLEAR);
    }

    #[test]
    fn outline_leaves_inside_alone() {
        let mut image = Image::new_filled_rgba8((5, 5), CLEAR).unwrap();
        let white = Pixel::new(255, 255, 255, 255);

        image.outline_rect((0, 0), (5, 5), white);

        assert_eq!(image.get_pixel((0, 0)), white);
        assert_eq!(image.get_pixel((4, 2)), white);
        assert_eq!(image.get_pixel((2, 4)), white);
        assert_eq!(image.get_pixel((2, 2)), CLEAR);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn buffer_len_past_u32() {
        // 65536 * 32768 * 4 bytes is 2^33, which doesn't fit in a u32.
        assert_eq!(
            buffer_len((65536, 32768), ImageFormat::Rgba8),
            Some(1usize << 33)
        );
        assert_eq!(buffer_len((u32::MAX, u32::MAX), ImageFormat::Rgba8), None);
    }

    #[test]
    fn encodes_png() {
        let image = Image::new_filled_rgba8((4, 4), Pixel::new(10, 20, 30, 255)).unwrap();
        let mut encoded = Vec::new();

        image.encode_png(&mut encoded).unwrap();

        assert_eq!(&encoded[1..4], b"PNG");
    }
}
