//! Baseline TIFF export with the run parameters embedded as ASCII tags.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tracing::debug;

use mandelzoom_core::Complex;

use crate::buffer::RgbBuffer;
use crate::error::RenderError;

/// Value of the TIFF `Software` tag.
pub const SOFTWARE: &str = "MandelZoom";

/// Parameters of the run that produced an image, written to the
/// `ImageDescription` tag so the view can be reproduced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMetadata {
    pub center: Complex,
    pub radius: f64,
    pub rounds: u32,
    pub seed: u64,
    pub search_iterations: u32,
    pub render_iterations: u32,
}

impl ExportMetadata {
    fn description(&self) -> String {
        format!(
            "Mandelbrot - Center: {}, Radius: {:e}, Rounds: {}, Seed: {}, \
             Search iterations: {}, Render iterations: {}",
            self.center,
            self.radius,
            self.rounds,
            self.seed,
            self.search_iterations,
            self.render_iterations,
        )
    }
}

/// Encode `buffer` as an uncompressed, 8-bit RGB, little-endian TIFF with the
/// whole image in a single strip.
///
/// Uses the `tiff` crate directly to control the strip layout and to add
/// the descriptive tags.
pub fn write_tiff<W: Write + Seek>(
    writer: W,
    buffer: &RgbBuffer,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let expected = buffer.width as usize * buffer.height as usize * 3;
    if buffer.width == 0 || buffer.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }
    if buffer.pixels.len() != expected {
        return Err(RenderError::BufferSizeMismatch {
            width: buffer.width,
            height: buffer.height,
            actual: buffer.pixels.len(),
        });
    }

    let mut encoder = TiffEncoder::new(writer)?;
    let mut image = encoder.new_image::<colortype::RGB8>(buffer.width, buffer.height)?;
    image.rows_per_strip(buffer.height)?;

    let description = metadata.description();
    image.encoder().write_tag(Tag::Software, SOFTWARE)?;
    image
        .encoder()
        .write_tag(Tag::ImageDescription, description.as_str())?;

    image.write_data(&buffer.pixels)?;
    Ok(())
}

/// Write `buffer` to `path` as a TIFF file.
pub fn export_tiff(buffer: &RgbBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_tiff(&mut writer, buffer, metadata)?;
    writer.flush()?;

    debug!(
        "Exported TIFF {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}
