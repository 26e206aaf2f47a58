use super::error::GeometryError;
use super::options::CropArea;
use super::types::Keypoint;
use pose_base::{Rect, Vec2};

/// Maps between frame pixels, the model input and the overlay that shows the target area.
///
/// The target area (whole frame, or an overlay rectangle clipped to the frame)
/// is center-cropped to the model aspect ratio and that crop is scaled
/// uniformly onto the model input, so the model input is completely filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    target: Rect<f32>,
    crop: Rect<f32>,
    model_size: Vec2<f32>,
}

impl GeometryMapper {
    pub fn new(
        frame_size: Vec2<usize>,
        crop_area: &CropArea,
        model_size: Vec2<usize>,
    ) -> Result<Self, GeometryError> {
        if frame_size.x == 0 || frame_size.y == 0 {
            return Err(GeometryError::EmptyFrame {
                width: frame_size.x,
                height: frame_size.y,
            });
        }
        if model_size.x == 0 || model_size.y == 0 {
            return Err(GeometryError::EmptyModelInput {
                width: model_size.x,
                height: model_size.y,
            });
        }

        let frame = Rect::new(Vec2::zero(), frame_size.as_f32());
        let target = match crop_area {
            CropArea::Full => frame,
            CropArea::AspectFill(rect) => {
                if rect.is_degenerate() {
                    return Err(GeometryError::DegenerateTarget);
                }
                frame
                    .intersection(*rect)
                    .ok_or(GeometryError::TargetOutsideFrame)?
            }
        };
        if target.is_degenerate() {
            return Err(GeometryError::DegenerateTarget);
        }

        let model_size = model_size.as_f32();
        Ok(Self {
            target,
            crop: aspect_fill_crop(target, model_size),
            model_size,
        })
    }

    /// Target area in frame pixels, after clipping to the frame.
    pub fn target_rect(&self) -> Rect<f32> {
        self.target
    }

    /// Region of the frame that is scaled onto the model input.
    pub fn crop_rect(&self) -> Rect<f32> {
        self.crop
    }

    /// Model pixels per frame pixel.
    pub fn scale(&self) -> f32 {
        self.model_size.x / self.crop.size.x
    }

    pub fn model_size(&self) -> Vec2<f32> {
        self.model_size
    }

    /// Normalized model position to frame pixels.
    pub fn model_to_frame(&self, normalized: Vec2<f32>) -> Vec2<f32> {
        self.crop.origin + normalized * self.crop.size
    }

    /// Frame pixels to normalized model position (outside [0,1] when not in the crop).
    pub fn frame_to_model(&self, point: Vec2<f32>) -> Vec2<f32> {
        (point - self.crop.origin) / self.crop.size
    }

    /// Normalized model position to overlay coordinates, where the overlay of
    /// size `overlay_size` displays the target area.
    pub fn model_to_overlay(
        &self,
        normalized: Vec2<f32>,
        overlay_size: Vec2<f32>,
    ) -> Result<Vec2<f32>, GeometryError> {
        if Rect::new(Vec2::zero(), overlay_size).is_degenerate() {
            return Err(GeometryError::EmptyOverlay);
        }
        let frame_point = self.model_to_frame(normalized);
        Ok((frame_point - self.target.origin) / self.target.size * overlay_size)
    }

    pub fn keypoint_to_overlay(
        &self,
        keypoint: &Keypoint,
        overlay_size: Vec2<f32>,
    ) -> Result<Keypoint, GeometryError> {
        Ok(Keypoint {
            position: self.model_to_overlay(keypoint.position, overlay_size)?,
            score: keypoint.score,
        })
    }
}

/// Largest rectangle centered in `target` with the aspect ratio of `model_size`.
pub fn aspect_fill_crop(target: Rect<f32>, model_size: Vec2<f32>) -> Rect<f32> {
    let target_aspect = target.size.x / target.size.y;
    let model_aspect = model_size.x / model_size.y;
    let size = if target_aspect > model_aspect {
        Vec2::new(target.size.y * model_aspect, target.size.y)
    } else {
        Vec2::new(target.size.x, target.size.x / model_aspect)
    };
    Rect::new(target.center() - size * 0.5, size)
}
