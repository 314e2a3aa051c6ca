use std::{
    fs,
    path::{Path, PathBuf},
};

use image::RgbImage;

use super::error::{Result, ThumbnailError};

/// Display surface for decoded thumbnails.
pub trait ImageRenderer {
    fn render(&mut self, image: &RgbImage, title: &str) -> Result<()>;
}

/// Decode thumbnail bytes into an auto-contrasted RGB image.
pub fn decode_thumbnail(image_data: &[u8]) -> Result<RgbImage> {
    let mut image = image::load_from_memory(image_data)?.to_rgb8();
    autocontrast(&mut image);
    Ok(image)
}

/// Stretch each channel so that its darkest value maps to 0 and its lightest to 255. Channels
/// holding a single value are left untouched.
pub fn autocontrast(image: &mut RgbImage) {
    let mut low = [u8::MAX; 3];
    let mut high = [u8::MIN; 3];
    for pixel in image.pixels() {
        for channel in 0..3 {
            low[channel] = low[channel].min(pixel[channel]);
            high[channel] = high[channel].max(pixel[channel]);
        }
    }

    let mut lookup = [[0u8; 256]; 3];
    for channel in 0..3 {
        let (low, high) = (low[channel] as u32, high[channel] as u32);
        for (value, mapped) in lookup[channel].iter_mut().enumerate() {
            let value = value as u32;
            *mapped = if high <= low {
                value as u8
            } else {
                ((value.clamp(low, high) - low) * 255 / (high - low)) as u8
            };
        }
    }

    for pixel in image.pixels_mut() {
        for channel in 0..3 {
            pixel[channel] = lookup[channel][pixel[channel] as usize];
        }
    }
}

/// Renders thumbnails to PNG files named after their title. Thumbnails are not georeferenced.
pub struct PngFileRenderer {
    output_dir: PathBuf,
}

impl PngFileRenderer {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn output_filepath(&self, title: &str) -> PathBuf {
        let filename: String = title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.output_dir.join(format!("{}.png", filename))
    }
}

impl ImageRenderer for PngFileRenderer {
    fn render(&mut self, image: &RgbImage, title: &str) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        let output_filepath = self.output_filepath(title);
        image.save(&output_filepath).map_err(|err| {
            ThumbnailError::Render(format!("Writing {:?} failed, {}", output_filepath, err))
        })?;
        log::info!("{} written to {:?}", title, output_filepath);
        Ok(())
    }
}
