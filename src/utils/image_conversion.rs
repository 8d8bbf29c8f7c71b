//! Conversions between decoded images and binary skin masks.

use crate::{constants::MASK_FOREGROUND, Error, Result};
use image::{DynamicImage, GrayImage, Luma};

/// Binarise an image into a skin mask
///
/// # Arguments
/// * `image` - any decoded image; colour input is converted to luma first
/// * `threshold` - pixels strictly brighter than this become foreground
///
/// # Returns
/// * Mask of the same size holding only `0` and `MASK_FOREGROUND`
#[must_use]
pub fn to_binary_mask(image: &DynamicImage, threshold: u8) -> GrayImage {
    let mut mask = image.to_luma8();
    for pixel in mask.pixels_mut() {
        *pixel = if pixel[0] > threshold { Luma([MASK_FOREGROUND]) } else { Luma([0]) };
    }
    mask
}

/// Pixel-wise logical AND of two masks
///
/// # Errors
/// * Returns `InvalidInput` if the masks differ in size
pub fn intersect_masks(a: &GrayImage, b: &GrayImage) -> Result<GrayImage> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::InvalidInput(format!(
            "Mask size mismatch: {:?} vs {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }

    let mut out = GrayImage::new(a.width(), a.height());
    for ((dst, pa), pb) in out.pixels_mut().zip(a.pixels()).zip(b.pixels()) {
        if pa[0] != 0 && pb[0] != 0 {
            *dst = Luma([MASK_FOREGROUND]);
        }
    }
    Ok(out)
}

/// Number of non-zero pixels in a mask
#[must_use]
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_to_binary_mask_thresholds() {
        let gray = GrayImage::from_fn(4, 1, |x, _| Luma([[0, 127, 128, 255][x as usize]]));
        let mask = to_binary_mask(&DynamicImage::ImageLuma8(gray), 127);
        let values: Vec<u8> = mask.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_to_binary_mask_from_colour() {
        let mut rgb = RgbImage::new(3, 3);
        rgb.put_pixel(1, 1, Rgb([255, 255, 255]));
        let mask = to_binary_mask(&DynamicImage::ImageRgb8(rgb), 127);
        assert_eq!(mask.dimensions(), (3, 3));
        assert_eq!(count_foreground(&mask), 1);
        assert_eq!(mask.get_pixel(1, 1)[0], MASK_FOREGROUND);
    }

    #[test]
    fn test_intersect_masks() {
        let a = GrayImage::from_fn(4, 4, |x, _| if x < 2 { Luma([255]) } else { Luma([0]) });
        let b = GrayImage::from_fn(4, 4, |_, y| if y < 2 { Luma([1]) } else { Luma([0]) });
        let c = intersect_masks(&a, &b).unwrap();
        assert_eq!(count_foreground(&c), 4);
        assert_eq!(c.get_pixel(0, 0)[0], MASK_FOREGROUND);
        assert_eq!(c.get_pixel(3, 0)[0], 0);
    }

    #[test]
    fn test_intersect_masks_size_mismatch() {
        let result = intersect_masks(&GrayImage::new(4, 4), &GrayImage::new(4, 5));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
