use pose_infer::{Device, PostprocessOptions};
use std::fmt;
use std::path::PathBuf;

const DEFAULT_MODEL_PATH: &str = "models/openpose.onnx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Cpm,
    OpenPose,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingImage,
    InvalidModelKind(String),
    InvalidDevice(String),
    InvalidOptions(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingImage => {
                write!(f, "no image given (pass a path or set POSE_IMAGE_PATH)")
            }
            ConfigError::InvalidModelKind(kind) => {
                write!(f, "unknown model kind '{kind}' (expected cpm or openpose)")
            }
            ConfigError::InvalidDevice(msg) => write!(f, "invalid device: {msg}"),
            ConfigError::InvalidOptions(err) => write!(f, "invalid POSE_OPTIONS: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidOptions(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub image_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub model_path: PathBuf,
    pub model_kind: ModelKind,
    pub device: Device,
    pub options: PostprocessOptions,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the process environment, with the image
    /// path taken from the first command line argument when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let arg = std::env::args().nth(1);
        Self::from_lookup(arg, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        image_arg: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let image_path = image_arg
            .or_else(|| lookup("POSE_IMAGE_PATH"))
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingImage)?;

        let model_kind = match lookup("POSE_MODEL_KIND") {
            None => ModelKind::OpenPose,
            Some(kind) => match kind.trim().to_ascii_lowercase().as_str() {
                "cpm" => ModelKind::Cpm,
                "openpose" => ModelKind::OpenPose,
                _ => return Err(ConfigError::InvalidModelKind(kind)),
            },
        };

        let device = match lookup("POSE_DEVICE") {
            None => Device::Cpu,
            Some(device) => device.parse().map_err(ConfigError::InvalidDevice)?,
        };

        let options = match lookup("POSE_OPTIONS") {
            None => PostprocessOptions::default(),
            Some(json) => serde_json::from_str(&json).map_err(ConfigError::InvalidOptions)?,
        };

        Ok(Self {
            image_path,
            output_path: lookup("POSE_OUTPUT_PATH").map(PathBuf::from),
            model_path: lookup("POSE_MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            model_kind,
            device,
            options,
            log_dir: lookup("POSE_LOG_DIR").map(PathBuf::from),
        })
    }
}
