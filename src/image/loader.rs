use crate::utils::error::RockError;
use crate::Result;
use base64::Engine;
use image::{DynamicImage, GenericImageView, ImageFormat};

/// 上传图像大小上限
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

pub struct ImageLoader;

impl ImageLoader {
    /// 从字节加载图像，只接受JPEG和PNG
    pub fn from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(RockError::FileTooLarge(bytes.len(), MAX_IMAGE_BYTES));
        }

        // 按文件头识别格式，扩展名不可信
        let format = Self::detect_format(bytes)
            .ok_or_else(|| RockError::Decode("Unrecognized image data".to_string()))?;

        if !Self::is_supported_format(format) {
            return Err(RockError::Decode(format!(
                "Unsupported image format {:?}, expected JPEG or PNG",
                format
            )));
        }

        let image = image::load_from_memory_with_format(bytes, format)?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RockError::Decode(format!(
                "Image has empty dimensions: {}x{}",
                width, height
            )));
        }

        tracing::debug!("Decoded {:?} image: {}x{}", format, width, height);
        Ok(image)
    }

    /// 检测图像格式
    pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
        image::guess_format(bytes).ok()
    }

    /// 验证图像格式是否支持
    pub fn is_supported_format(format: ImageFormat) -> bool {
        matches!(format, ImageFormat::Png | ImageFormat::Jpeg)
    }

    /// 生成用于页面预览的data URL
    pub fn to_data_url(bytes: &[u8]) -> Option<String> {
        let format = Self::detect_format(bytes).filter(|f| Self::is_supported_format(*f))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Some(format!("data:{};base64,{}", format.to_mime_type(), encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([10, 20, 30])))
    }

    #[test]
    fn test_loads_png_and_jpeg() {
        for format in [ImageFormat::Png, ImageFormat::Jpeg] {
            let image = ImageLoader::from_bytes(&encode(&sample(), format)).unwrap();
            assert_eq!(image.dimensions(), (40, 30));
        }
    }

    #[test]
    fn test_text_is_decode_error() {
        let err = ImageLoader::from_bytes(b"just some notes about rocks").unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[test]
    fn test_other_formats_rejected() {
        let bmp = encode(&sample(), ImageFormat::Bmp);
        let err = ImageLoader::from_bytes(&bmp).unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[test]
    fn test_truncated_png_is_decode_error() {
        let png = encode(&sample(), ImageFormat::Png);
        let err = ImageLoader::from_bytes(&png[..png.len() / 2]).unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[test]
    fn test_data_url() {
        let png = encode(&sample(), ImageFormat::Png);
        let url = ImageLoader::to_data_url(&png).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(ImageLoader::to_data_url(b"plain text").is_none());
    }
}
