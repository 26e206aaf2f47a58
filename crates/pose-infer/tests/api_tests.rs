use pose_infer::{Device, InferError, ModelSource};

#[test]
fn test_device_display() {
    assert_eq!(Device::Cpu.to_string(), "CPU");
    assert_eq!(Device::Cuda { device_id: 2 }.to_string(), "CUDA(device_id=2)");
    assert_eq!(
        Device::TensorRt {
            device_id: 1,
            fp16: true
        }
        .to_string(),
        "TensorRT(device_id=1, fp16=true)"
    );
}

#[test]
fn test_device_parse() {
    assert_eq!("cpu".parse::<Device>(), Ok(Device::Cpu));
    assert_eq!(" CPU ".parse::<Device>(), Ok(Device::Cpu));
    assert_eq!("cuda".parse::<Device>(), Ok(Device::Cuda { device_id: 0 }));
    assert_eq!("cuda:3".parse::<Device>(), Ok(Device::Cuda { device_id: 3 }));
    assert_eq!(
        "tensorrt:1:fp16".parse::<Device>(),
        Ok(Device::TensorRt {
            device_id: 1,
            fp16: true
        })
    );
    assert_eq!(
        "trt".parse::<Device>(),
        Ok(Device::TensorRt {
            device_id: 0,
            fp16: false
        })
    );
}

#[test]
fn test_device_parse_rejects_garbage() {
    assert!("tpu".parse::<Device>().is_err());
    assert!("cuda:x".parse::<Device>().is_err());
    assert!("cuda:0:fp16".parse::<Device>().is_err());
    assert!("tensorrt:0:int8".parse::<Device>().is_err());
    assert!("cpu:7".parse::<Device>().is_err());
    assert!("cpu:0".parse::<Device>().is_err());
    assert!("tensorrt:0:fp16:junk".parse::<Device>().is_err());
    assert!("cuda:1:".parse::<Device>().is_err());
}

#[test]
fn test_infer_error_display() {
    let err = InferError::Backend("test error".to_string());
    assert_eq!(err.to_string(), "backend error: test error");

    let err = InferError::UnsupportedDevice(Device::Cpu);
    assert!(err.to_string().contains("unsupported device"));

    let err = InferError::ModelLoad("failed to load".to_string());
    assert_eq!(err.to_string(), "model load error: failed to load");

    let err = InferError::UnsupportedDtype("int64".to_string());
    assert_eq!(err.to_string(), "unsupported dtype: int64");

    let err = InferError::InvalidInput {
        name: "wrong_input".to_string(),
        expected_names: vec!["image".to_string()],
    };
    let msg = err.to_string();
    assert!(msg.contains("wrong_input"));
    assert!(msg.contains("image"));

    let err = InferError::ShapeMismatch {
        expected: "[1, H, W, 14]".to_string(),
        got: "[1, 96, 96, 3]".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "shape mismatch: expected [1, H, W, 14], got [1, 96, 96, 3]"
    );
}

#[test]
fn test_infer_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "model.onnx");
    let err: InferError = io.into();
    assert!(matches!(err, InferError::Io(ref msg) if msg.contains("model.onnx")));
}

#[test]
fn test_model_source_variants() {
    let source = ModelSource::File("model.onnx".into());
    if let ModelSource::File(path) = source {
        assert_eq!(path.to_str().unwrap(), "model.onnx");
    } else {
        panic!("Expected File variant");
    }

    let bytes = vec![1, 2, 3, 4, 5];
    let source = ModelSource::Memory(bytes.clone());
    if let ModelSource::Memory(data) = source {
        assert_eq!(data, bytes);
    } else {
        panic!("Expected Memory variant");
    }
}
