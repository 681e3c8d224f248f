use crate::image::loader::ImageLoader;
use crate::utils::error::RockError;
use crate::Result;
use image::imageops::{self, FilterType};
use image::DynamicImage;
use ndarray::{Array4, ArrayView4};

/// 模型输入边长
pub const INPUT_SIZE: u32 = 128;

/// 模型输入通道数
pub const INPUT_CHANNELS: usize = 3;

/// 模型输入形状 (N, H, W, C)
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, INPUT_CHANNELS];

/// 归一化后的单张图像批次，创建后不可修改
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor(Array4<f32>);

impl ImageTensor {
    pub fn from_array(array: Array4<f32>) -> Result<Self> {
        if array.shape() != INPUT_SHAPE {
            return Err(RockError::InvalidInput(format!(
                "Expected tensor shape {:?}, got {:?}",
                INPUT_SHAPE,
                array.shape()
            )));
        }
        Ok(Self(array))
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.0.view()
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }
}

pub struct ImagePreprocessor;

impl ImagePreprocessor {
    /// 解码并转换为模型输入
    pub fn preprocess_bytes(bytes: &[u8]) -> Result<ImageTensor> {
        let image = ImageLoader::from_bytes(bytes)?;
        Self::to_tensor(&image)
    }

    /// RGB转换 → 128x128最近邻缩放（不保持宽高比）→ 除以255 → 增加batch维度
    pub fn to_tensor(image: &DynamicImage) -> Result<ImageTensor> {
        let rgb = image.to_rgb8();
        let resized = imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Nearest);

        let data: Vec<f32> = resized
            .into_raw()
            .into_iter()
            .map(|value| value as f32 / 255.0)
            .collect();

        let shape = (1, INPUT_SIZE as usize, INPUT_SIZE as usize, INPUT_CHANNELS);
        let array = Array4::from_shape_vec(shape, data)
            .map_err(|e| RockError::Internal(format!("Failed to create tensor: {}", e)))?;

        ImageTensor::from_array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: &DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_output_shape_is_fixed() {
        for (w, h) in [(128, 128), (300, 90), (17, 500), (1, 1)] {
            let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([1, 2, 3])));
            let tensor = ImagePreprocessor::to_tensor(&image).unwrap();
            assert_eq!(tensor.shape(), &INPUT_SHAPE);
        }
    }

    #[test]
    fn test_values_divided_by_255() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([0, 128, 255])));
        let tensor = ImagePreprocessor::to_tensor(&image).unwrap();
        let view = tensor.view();

        assert_eq!(view[[0, 10, 10, 0]], 0.0);
        assert!((view[[0, 10, 10, 1]] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(view[[0, 10, 10, 2]], 1.0);
        assert!(view.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_aspect_ratio_not_preserved() {
        // 左半红右半蓝的宽图，缩放后仍然占满整个128x128，没有填充边
        let mut wide = RgbImage::new(400, 100);
        for (x, _, pixel) in wide.enumerate_pixels_mut() {
            *pixel = if x < 200 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) };
        }
        let tensor = ImagePreprocessor::to_tensor(&DynamicImage::ImageRgb8(wide)).unwrap();
        let view = tensor.view();

        assert_eq!(view[[0, 0, 0, 0]], 1.0);
        assert_eq!(view[[0, 127, 0, 0]], 1.0);
        assert_eq!(view[[0, 0, 127, 2]], 1.0);
        assert_eq!(view[[0, 127, 127, 2]], 1.0);
    }

    #[test]
    fn test_alpha_channel_dropped() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([51, 102, 153, 0])));
        let tensor = ImagePreprocessor::to_tensor(&image).unwrap();
        let view = tensor.view();

        assert_eq!(view.shape()[3], 3);
        assert!((view[[0, 5, 5, 0]] - 0.2).abs() < 1e-6);
        assert!((view[[0, 5, 5, 2]] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_preprocessing_is_deterministic() {
        let mut img = RgbImage::new(97, 61);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 3 % 256) as u8, (y * 7 % 256) as u8, ((x + y) % 256) as u8]);
        }
        let bytes = png_bytes(&DynamicImage::ImageRgb8(img));

        let first = ImagePreprocessor::preprocess_bytes(&bytes).unwrap();
        let second = ImagePreprocessor::preprocess_bytes(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_image_bytes_fail_to_decode() {
        let err = ImagePreprocessor::preprocess_bytes(b"%PDF-1.4 not a rock").unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[test]
    fn test_tensor_shape_checked() {
        let wrong = Array4::<f32>::zeros((1, 3, 128, 128));
        assert!(ImageTensor::from_array(wrong).is_err());
    }
}
