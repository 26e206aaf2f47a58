use super::error::InputError;
use super::geometry::GeometryMapper;
use super::options::{InputSpec, PreprocessOptions, TensorLayout};
use pose_base::{Tensor, Vec2, element_count};

/// Build the model input tensor from a frame.
///
/// Takes an 8-bit frame in HWC layout with 3 (RGB) or 4 (RGBA, alpha ignored)
/// channels; a leading batch dimension of 1 is accepted. The target area is
/// aspect-fill cropped, bilinear-resampled to the model size and emitted as a
/// batch of one in the layout of `spec`.
///
/// Returns the input tensor and the geometry used, for mapping keypoints back.
pub fn preprocess(
    frame: &Tensor<u8>,
    options: &PreprocessOptions,
    spec: &InputSpec,
) -> Result<(Tensor<f32>, GeometryMapper), InputError> {
    let shape = frame.squeezed_shape(3);
    if shape.len() != 3 {
        return Err(InputError::Shape(format!(
            "expected [H, W, C], got {:?}",
            frame.shape
        )));
    }
    let (h, w, c) = (shape[0], shape[1], shape[2]);
    if c != 3 && c != 4 {
        return Err(InputError::UnsupportedFormat { channels: c });
    }
    if element_count(shape).ok() != Some(frame.data.len()) {
        return Err(InputError::Shape(format!(
            "shape {:?} does not match {} bytes",
            frame.shape,
            frame.data.len()
        )));
    }

    let geometry = GeometryMapper::new(
        Vec2::new(w, h),
        &options.crop_area,
        Vec2::new(spec.width, spec.height),
    )?;
    let crop = geometry.crop_rect();

    let out_c = spec.channels();
    let plane = spec.width * spec.height;
    let mut data = vec![0.0f32; plane * out_c];
    let value_scale = if spec.normalize { 1.0 / 255.0 } else { 1.0 };
    let step = crop.size / Vec2::new(spec.width as f32, spec.height as f32);

    let mut rgb = [0.0f32; 3];
    for oy in 0..spec.height {
        // sample at output pixel centers, in frame pixel-center coordinates
        let sy = crop.origin.y + (oy as f32 + 0.5) * step.y - 0.5;
        for ox in 0..spec.width {
            let sx = crop.origin.x + (ox as f32 + 0.5) * step.x - 0.5;
            for (ch, value) in rgb.iter_mut().enumerate() {
                *value = sample_bilinear(&frame.data, w, h, c, sx, sy, ch);
            }

            let pixel = oy * spec.width + ox;
            if spec.grayscale {
                let luma = 0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2];
                data[pixel] = luma * value_scale;
            } else {
                for (ch, value) in rgb.iter().enumerate() {
                    let index = match spec.layout {
                        TensorLayout::Nhwc => pixel * out_c + ch,
                        TensorLayout::Nchw => ch * plane + pixel,
                    };
                    data[index] = value * value_scale;
                }
            }
        }
    }

    let shape = match spec.layout {
        TensorLayout::Nhwc => vec![1, spec.height, spec.width, out_c],
        TensorLayout::Nchw => vec![1, out_c, spec.height, spec.width],
    };
    Ok((Tensor::new(shape, data)?, geometry))
}

/// Bilinear sample of one channel with edge clamping.
fn sample_bilinear(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    x: f32,
    y: f32,
    channel: usize,
) -> f32 {
    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let at = |px: usize, py: usize| data[(py * width + px) * channels + channel] as f32;
    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    top * (1.0 - fy) + bottom * fy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_bilinear_midpoint() {
        // 2x1 single-channel image: 0, 100
        let data = [0u8, 100];
        assert_eq!(sample_bilinear(&data, 2, 1, 1, 0.5, 0.0, 0), 50.0);
    }

    #[test]
    fn test_sample_bilinear_clamps_outside() {
        let data = [10u8, 20, 30, 40];
        assert_eq!(sample_bilinear(&data, 2, 2, 1, -3.0, -3.0, 0), 10.0);
        assert_eq!(sample_bilinear(&data, 2, 2, 1, 9.0, 9.0, 0), 40.0);
    }
}
