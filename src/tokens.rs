//! Token and image cost estimation.
//!
//! The image formula reproduces the provider's published high-detail
//! billing: cap at 2048, rescale the short side to 768, then bill per
//! 512x512 tile. Truncation (not rounding) at each step and the step
//! order are load-bearing for cost parity.

use std::path::Path;

use image::ImageReader;
use serde_json::Value;

use crate::providers::TokenEncoder;

/// Images are first scaled to fit within this square.
const MAX_DIMENSION: u32 = 2048;

/// Target length of the shorter side after rescaling.
const SHORT_SIDE: u32 = 768;

/// Billing tile edge in pixels.
const TILE_SIZE: u32 = 512;

/// Token cost per tile.
const TOKENS_PER_TILE: u32 = 170;

/// Fixed token cost per image.
const BASE_TOKENS: u32 = 85;

/// Token cost of an image with the given dimensions, assuming high detail.
///
/// Pure; valid for positive dimensions.
pub fn image_token_cost(width: u32, height: u32) -> u32 {
    let (mut width, mut height) = (width, height);

    // downscale only: fit within 2048x2048, preserving aspect ratio
    let max_dimension = width.max(height);
    if max_dimension > MAX_DIMENSION {
        let scale = f64::from(MAX_DIMENSION) / f64::from(max_dimension);
        width = (f64::from(width) * scale) as u32;
        height = (f64::from(height) * scale) as u32;
    }

    // rescale so the shorter side is exactly 768, up or down
    let min_dimension = width.min(height);
    let scale = f64::from(SHORT_SIDE) / f64::from(min_dimension);
    width = (f64::from(width) * scale) as u32;
    height = (f64::from(height) * scale) as u32;

    let tiles = width.div_ceil(TILE_SIZE) * height.div_ceil(TILE_SIZE);
    tiles * TOKENS_PER_TILE + BASE_TOKENS
}

/// Dimensions of the image at `path`, without decoding pixel data.
pub fn image_size(path: &Path) -> Result<(u32, u32), image::ImageError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.into_dimensions()
}

/// Token cost of attaching the image at `path`.
pub fn token_count_for_image(path: &Path) -> Result<u32, image::ImageError> {
    let (width, height) = image_size(path)?;
    Ok(image_token_cost(width, height))
}

/// Token count of a plain string.
pub fn token_count(encoder: &dyn TokenEncoder, model_name: &str, text: &str) -> usize {
    encoder.encode(model_name, text).len()
}

/// Token count of a message list, serialized to JSON first.
pub fn token_count_messages(
    encoder: &dyn TokenEncoder,
    model_name: &str,
    messages: &[Value],
) -> serde_json::Result<usize> {
    let serialized = serde_json::to_string(messages)?;
    Ok(token_count(encoder, model_name, &serialized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CharChunkTokenizer;

    // =========================================================================
    // Image Cost Formula Tests
    // =========================================================================

    #[test]
    fn test_square_at_cap() {
        // max is 2048, not > 2048, so no downscale; short side 2048 -> 768
        // gives 768x768 = 4 tiles
        assert_eq!(image_token_cost(2048, 2048), 4 * 170 + 85);
        assert_eq!(image_token_cost(2048, 2048), 765);
    }

    #[test]
    fn test_wide_above_cap() {
        // 4096x2048 -> 2048x1024 -> 1536x768 -> 3x2 tiles
        assert_eq!(image_token_cost(4096, 2048), 6 * 170 + 85);
        assert_eq!(image_token_cost(4096, 2048), 1105);
    }

    #[test]
    fn test_small_image_upscaled() {
        // 512x512 -> short side scaled up to 768 -> 768x768 -> 4 tiles
        assert_eq!(image_token_cost(512, 512), 765);
    }

    #[test]
    fn test_single_tile_floor() {
        // the short-side rescale keeps both sides >= 768, so every image
        // spans at least 2x2 tiles
        assert_eq!(image_token_cost(1, 1), 4 * 170 + 85);
    }

    #[test]
    fn test_orientation_symmetric() {
        assert_eq!(image_token_cost(4096, 2048), image_token_cost(2048, 4096));
    }

    #[test]
    fn test_truncated_intermediate_sizes() {
        // 3000x2000 -> (2048, 1365) -> (1152, 768) -> 3x2 tiles
        assert_eq!(image_token_cost(3000, 2000), 6 * 170 + 85);
    }

    #[test]
    fn test_extreme_aspect_ratio() {
        // 4000x500 -> (2048, 256) -> short side 256 -> 768: (6144, 768)
        // -> 12x2 tiles
        assert_eq!(image_token_cost(4000, 500), 24 * 170 + 85);
    }

    // =========================================================================
    // Image File Tests
    // =========================================================================

    #[test]
    fn test_image_size_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("probe.png");
        image::RgbaImage::new(10, 6).save(&path).unwrap();

        assert_eq!(image_size(&path).unwrap(), (10, 6));
    }

    #[test]
    fn test_token_count_for_image_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("probe.png");
        image::RgbaImage::new(512, 512).save(&path).unwrap();

        assert_eq!(token_count_for_image(&path).unwrap(), 765);
    }

    #[test]
    fn test_image_decode_error_propagates() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("not-an-image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(token_count_for_image(&path).is_err());
    }

    #[test]
    fn test_missing_file_propagates() {
        assert!(image_size(Path::new("/nonexistent/image.png")).is_err());
    }

    // =========================================================================
    // Text Token Counting Tests
    // =========================================================================

    #[test]
    fn test_token_count_text() {
        let encoder = CharChunkTokenizer::new();
        assert_eq!(token_count(&encoder, "gpt-4", ""), 0);
        assert_eq!(token_count(&encoder, "gpt-4", "abcd"), 1);
        assert_eq!(token_count(&encoder, "gpt-4", "abcde"), 2);
    }

    #[test]
    fn test_token_count_messages_serializes() {
        let encoder = CharChunkTokenizer::new();
        let messages = vec![serde_json::json!({"role": "user", "content": "hi"})];
        let count = token_count_messages(&encoder, "gpt-4", &messages).unwrap();
        assert!(count > 0);
    }
}
