use pose_base::{Rect, Tensor, Vec2};
use pose_infer::pose::{
    CropArea, GeometryError, InputError, InputSpec, PreprocessOptions, TensorLayout, preprocess,
};

/// `[H, W, 3]` frame where pixel (x, y) is `(10x + y, 100 + y, 200)`.
fn gradient_frame(width: usize, height: usize) -> Tensor<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(10 * x + y) as u8, (100 + y) as u8, 200]);
        }
    }
    Tensor::new(vec![height, width, 3], data).unwrap()
}

fn spec(width: usize, height: usize) -> InputSpec {
    InputSpec {
        width,
        height,
        layout: TensorLayout::Nhwc,
        grayscale: false,
        normalize: false,
    }
}

#[test]
fn test_full_frame_takes_center_square() {
    let frame = gradient_frame(4, 2);
    let (tensor, geometry) = preprocess(&frame, &PreprocessOptions::default(), &spec(2, 2)).unwrap();

    assert_eq!(tensor.shape, vec![1, 2, 2, 3]);
    assert_eq!(geometry.crop_rect().origin, Vec2::new(1.0, 0.0));
    // columns 1 and 2 of the frame, unchanged at unit scale
    assert_eq!(
        tensor.data,
        vec![
            10.0, 100.0, 200.0, 20.0, 100.0, 200.0, //
            11.0, 101.0, 200.0, 21.0, 101.0, 200.0,
        ]
    );
}

#[test]
fn test_downscale_interpolates() {
    let frame = Tensor::new(vec![1, 2, 3], vec![0, 0, 0, 100, 50, 10]).unwrap();
    let (tensor, _) = preprocess(&frame, &PreprocessOptions::default(), &spec(2, 1)).unwrap();
    assert_eq!(tensor.data, vec![0.0, 0.0, 0.0, 100.0, 50.0, 10.0]);

    let frame = Tensor::new(vec![1, 2, 3], vec![0, 0, 0, 100, 50, 10]).unwrap();
    let squashed = spec(1, 1);
    let crop = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0));
    let options = PreprocessOptions {
        crop_area: CropArea::AspectFill(crop),
    };
    let (tensor, geometry) = preprocess(&frame, &options, &squashed).unwrap();
    // the 1x1 crop straddles both pixels
    assert_eq!(geometry.crop_rect().origin, Vec2::new(0.5, 0.0));
    assert_eq!(tensor.data, vec![50.0, 25.0, 5.0]);
}

#[test]
fn test_normalize_scales_to_unit_range() {
    let frame = Tensor::new(vec![1, 1, 3], vec![255, 0, 51]).unwrap();
    let spec = InputSpec {
        normalize: true,
        ..spec(1, 1)
    };
    let (tensor, _) = preprocess(&frame, &PreprocessOptions::default(), &spec).unwrap();
    assert!((tensor.data[0] - 1.0).abs() < 1e-6);
    assert_eq!(tensor.data[1], 0.0);
    assert!((tensor.data[2] - 0.2).abs() < 1e-6);
}

#[test]
fn test_grayscale_emits_one_channel() {
    let frame = Tensor::new(vec![1, 1, 3], vec![100, 100, 100]).unwrap();
    let spec = InputSpec {
        grayscale: true,
        ..spec(1, 1)
    };
    let (tensor, _) = preprocess(&frame, &PreprocessOptions::default(), &spec).unwrap();
    assert_eq!(tensor.shape, vec![1, 1, 1, 1]);
    assert!((tensor.data[0] - 100.0).abs() < 1e-3);
}

#[test]
fn test_nchw_layout_is_planar() {
    let frame = gradient_frame(2, 1);
    let spec = InputSpec {
        layout: TensorLayout::Nchw,
        ..spec(2, 1)
    };
    let (tensor, _) = preprocess(&frame, &PreprocessOptions::default(), &spec).unwrap();
    assert_eq!(tensor.shape, vec![1, 3, 1, 2]);
    assert_eq!(tensor.data, vec![0.0, 10.0, 100.0, 100.0, 200.0, 200.0]);
}

#[test]
fn test_rgba_and_batched_frames_are_accepted() {
    let frame = Tensor::new(vec![1, 1, 1, 4], vec![1, 2, 3, 255]).unwrap();
    let (tensor, _) = preprocess(&frame, &PreprocessOptions::default(), &spec(1, 1)).unwrap();
    assert_eq!(tensor.data, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_unsupported_channel_count() {
    let frame = Tensor::new(vec![2, 2, 2], vec![0; 8]).unwrap();
    let result = preprocess(&frame, &PreprocessOptions::default(), &spec(2, 2));
    assert_eq!(result.err(), Some(InputError::UnsupportedFormat { channels: 2 }));

    let frame = Tensor::new(vec![2, 2, 0], Vec::new()).unwrap();
    let result = preprocess(&frame, &PreprocessOptions::default(), &spec(2, 2));
    assert_eq!(result.err(), Some(InputError::UnsupportedFormat { channels: 0 }));
}

#[test]
fn test_malformed_frames() {
    let flat = Tensor::new(vec![12], vec![0; 12]).unwrap();
    let result = preprocess(&flat, &PreprocessOptions::default(), &spec(2, 2));
    assert!(matches!(result, Err(InputError::Shape(_))));

    let short = Tensor {
        shape: vec![2, 2, 3],
        data: vec![0u8; 5],
    };
    let result = preprocess(&short, &PreprocessOptions::default(), &spec(2, 2));
    assert!(matches!(result, Err(InputError::Shape(_))));
}

#[test]
fn test_overflowing_frame_shape_is_rejected() {
    let huge = Tensor {
        shape: vec![usize::MAX / 2, 3, 3],
        data: vec![0u8; 27],
    };
    let result = preprocess(&huge, &PreprocessOptions::default(), &spec(2, 2));
    assert!(matches!(result, Err(InputError::Shape(_))));
}

#[test]
fn test_tensor_error_is_kept_as_source() {
    use pose_base::TensorError;
    use std::error::Error;

    let err = InputError::from(TensorError::ShapeOverflow);
    assert_eq!(err, InputError::Tensor(TensorError::ShapeOverflow));
    assert_eq!(
        err.source().map(ToString::to_string),
        Some(TensorError::ShapeOverflow.to_string())
    );
}

#[test]
fn test_empty_frame_is_a_geometry_error() {
    let frame = Tensor::new(vec![0, 4, 3], Vec::new()).unwrap();
    let result = preprocess(&frame, &PreprocessOptions::default(), &spec(2, 2));
    assert_eq!(
        result.err(),
        Some(InputError::Geometry(GeometryError::EmptyFrame {
            width: 4,
            height: 0
        }))
    );
}

#[test]
fn test_default_model_specs() {
    assert_eq!((InputSpec::CPM.width, InputSpec::CPM.height), (192, 192));
    assert_eq!(
        (InputSpec::OPENPOSE.width, InputSpec::OPENPOSE.height),
        (368, 368)
    );
    assert_eq!(InputSpec::CPM.channels(), 3);
}
