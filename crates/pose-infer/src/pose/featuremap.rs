use crate::InferError;
use pose_base::{Tensor, element_count};

/// Borrowed `[H, W, C]` view over a model output, optionally restricted to a
/// contiguous range of channels.
#[derive(Debug, Clone, Copy)]
pub struct FeatureMap<'a> {
    data: &'a [f32],
    height: usize,
    width: usize,
    stride: usize,
    offset: usize,
    channels: usize,
}

impl<'a> FeatureMap<'a> {
    /// View a `[H, W, C]` or `[1, H, W, C]` tensor.
    pub fn from_tensor(tensor: &'a Tensor<f32>) -> Result<Self, InferError> {
        let shape = tensor.squeezed_shape(3);
        let &[height, width, channels] = shape else {
            return Err(InferError::ShapeMismatch {
                expected: "[1, H, W, C]".to_string(),
                got: format!("{:?}", tensor.shape),
            });
        };
        if height == 0 || width == 0 || channels == 0 {
            return Err(InferError::ShapeMismatch {
                expected: "non-empty [1, H, W, C]".to_string(),
                got: format!("{:?}", tensor.shape),
            });
        }
        let expected = element_count(shape).map_err(|_| InferError::ShapeMismatch {
            expected: "[1, H, W, C] within addressable size".to_string(),
            got: format!("{:?}", tensor.shape),
        })?;
        if tensor.data.len() != expected {
            return Err(InferError::ShapeMismatch {
                expected: format!("{expected} elements"),
                got: format!("{} elements", tensor.data.len()),
            });
        }
        Ok(Self {
            data: &tensor.data,
            height,
            width,
            stride: channels,
            offset: 0,
            channels,
        })
    }

    /// Sub-view over `count` channels starting at `start`, or `None` when out of range.
    pub fn channels(&self, start: usize, count: usize) -> Option<FeatureMap<'a>> {
        if start.checked_add(count)? > self.channels {
            return None;
        }
        Some(FeatureMap {
            offset: self.offset + start,
            channels: count,
            ..*self
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channel_count(&self) -> usize {
        self.channels
    }

    /// Activation at `(row, col)` of `channel`. Callers keep indices in range.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> f32 {
        debug_assert!(row < self.height && col < self.width && channel < self.channels);
        self.data[(row * self.width + col) * self.stride + self.offset + channel]
    }
}
