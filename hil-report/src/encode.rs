//! PNG output
//!
//! Writes an RGB pixel buffer as an 8-bit PNG carrying its resolution in a
//! `pHYs` chunk. The image is written to a sibling `.part` file and renamed
//! into place, so the target path only ever holds a complete image.

use crate::types::Result;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Encode `pixels` (RGB, row-major) and write them to `path`
pub fn write_png(
    path: &Path,
    (width, height): (u32, u32),
    pixels: &[u8],
    pixels_per_meter: u32,
) -> Result<()> {
    let partial = partial_path(path);
    log::debug!("Encoding {}x{} PNG into {:?}", width, height, partial);

    if let Err(e) = encode(&partial, (width, height), pixels, pixels_per_meter) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    fs::rename(&partial, path)?;
    Ok(())
}

fn encode(path: &Path, (width, height): (u32, u32), pixels: &[u8], ppm: u32) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels)?;
    writer.finish()?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_png_with_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let pixels = vec![255u8; 4 * 3 * 3];

        write_png(&path, (4, 3), &pixels, 11811).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (4, 3));
        let dims = info.pixel_dims.unwrap();
        assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
        assert_eq!(dims.unit, png::Unit::Meter);
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_failed_encode_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.png");

        // Buffer is too small for the declared size
        let result = write_png(&path, (4, 3), &[0u8; 5], 11811);

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("out/resultados_hil.png")),
            PathBuf::from("out/resultados_hil.png.part")
        );
    }
}
