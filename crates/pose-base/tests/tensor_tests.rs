use pose_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.len(), 6);
    assert_eq!(tensor.ndim(), 2);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch {
            expected: 6,
            got: 3
        }
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<f32>::zeros(vec![2, 3]).unwrap();
    assert_eq!(tensor.data, vec![0.0; 6]);
}

#[test]
fn test_tensor_is_empty() {
    let tensor = Tensor::<f32>::new(vec![0, 4], vec![]).unwrap();
    assert!(tensor.is_empty());
}

#[test]
fn test_squeezed_shape_drops_batch_dims() {
    let tensor = Tensor::<f32>::zeros(vec![1, 1, 4, 5, 3]).unwrap();
    assert_eq!(tensor.squeezed_shape(3), &[4, 5, 3]);
}

#[test]
fn test_squeezed_shape_keeps_min_rank() {
    let tensor = Tensor::<f32>::zeros(vec![1, 1, 3]).unwrap();
    assert_eq!(tensor.squeezed_shape(3), &[1, 1, 3]);
}

#[test]
fn test_map_converts_elements() {
    let tensor = Tensor::new(vec![1, 2], vec![10u8, 255]).unwrap();
    let mapped = tensor.map(|&v| v as f32 / 255.0);
    assert_eq!(mapped.shape, vec![1, 2]);
    assert!((mapped.data[1] - 1.0).abs() < 1e-6);
}

#[test]
fn test_display_error() {
    let err = TensorError::ShapeMismatch {
        expected: 4,
        got: 2,
    };
    assert_eq!(err.to_string(), "shape mismatch: expected 4 elements, got 2");
}

#[test]
fn test_element_count() {
    assert_eq!(pose_base::element_count(&[2, 3, 4]), Ok(24));
    assert_eq!(pose_base::element_count(&[]), Ok(1));
    assert_eq!(
        pose_base::element_count(&[usize::MAX / 2, 3]),
        Err(TensorError::ShapeOverflow)
    );
}
