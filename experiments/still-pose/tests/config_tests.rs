use pose_infer::{BodyPart, Device, HumanType};
use std::collections::HashMap;
use std::path::PathBuf;

mod config {
    include!("../src/config.rs");
}

use config::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::from_lookup(Some("frame.png".to_string()), lookup(&[])).unwrap();
    assert_eq!(config.image_path, PathBuf::from("frame.png"));
    assert_eq!(config.model_path, PathBuf::from("models/openpose.onnx"));
    assert_eq!(config.model_kind, ModelKind::OpenPose);
    assert_eq!(config.device, Device::Cpu);
    assert_eq!(config.options.part_threshold, Some(0.1));
    assert!(config.output_path.is_none());
    assert!(config.log_dir.is_none());
}

#[test]
fn test_argument_overrides_env_image() {
    let vars = lookup(&[("POSE_IMAGE_PATH", "env.png")]);
    let config = Config::from_lookup(Some("arg.png".to_string()), vars).unwrap();
    assert_eq!(config.image_path, PathBuf::from("arg.png"));

    let vars = lookup(&[("POSE_IMAGE_PATH", "env.png")]);
    let config = Config::from_lookup(None, vars).unwrap();
    assert_eq!(config.image_path, PathBuf::from("env.png"));
}

#[test]
fn test_missing_image() {
    let err = Config::from_lookup(None, lookup(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingImage));
    let err = Config::from_lookup(Some(String::new()), lookup(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingImage));
}

#[test]
fn test_full_environment() {
    let vars = lookup(&[
        ("POSE_MODEL_PATH", "/models/cpm.onnx"),
        ("POSE_MODEL_KIND", "CPM"),
        ("POSE_DEVICE", "cuda:1"),
        ("POSE_OUTPUT_PATH", "/tmp/overlay.png"),
        ("POSE_LOG_DIR", "/var/log/pose"),
        (
            "POSE_OPTIONS",
            r#"{"part_threshold": 0.3, "body_part": "left_wrist", "human_type": {"multi_person": {"max_human_number": 2}}}"#,
        ),
    ]);
    let config = Config::from_lookup(Some("a.jpg".to_string()), vars).unwrap();
    assert_eq!(config.model_path, PathBuf::from("/models/cpm.onnx"));
    assert_eq!(config.model_kind, ModelKind::Cpm);
    assert_eq!(config.device, Device::Cuda { device_id: 1 });
    assert_eq!(config.output_path, Some(PathBuf::from("/tmp/overlay.png")));
    assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/pose")));
    assert_eq!(config.options.part_threshold, Some(0.3));
    assert_eq!(config.options.body_part, Some(BodyPart::LeftWrist));
    let HumanType::MultiPerson(multi) = config.options.human_type else {
        panic!("expected multi-person options");
    };
    assert_eq!(multi.max_human_number, Some(2));
    assert_eq!(multi.nms_filter_size, 3);
}

#[test]
fn test_invalid_values() {
    let image = || Some("a.png".to_string());

    let err = Config::from_lookup(image(), lookup(&[("POSE_MODEL_KIND", "yolo")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidModelKind(ref kind) if kind == "yolo"));

    let err = Config::from_lookup(image(), lookup(&[("POSE_DEVICE", "tpu")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDevice(_)));

    let err = Config::from_lookup(image(), lookup(&[("POSE_OPTIONS", "{not json")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOptions(_)));
    assert!(err.to_string().starts_with("invalid POSE_OPTIONS"));
    assert!(std::error::Error::source(&err).is_some());
}
