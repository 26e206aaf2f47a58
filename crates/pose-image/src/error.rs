use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    Io(std::io::Error),
    Tensor(pose_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Io(err) => write!(f, "io error: {err}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Io(err) => Some(err),
            ImageError::Tensor(err) => Some(err),
            ImageError::Decode(_) | ImageError::Encode(_) => None,
        }
    }
}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err)
    }
}

impl From<pose_base::TensorError> for ImageError {
    fn from(err: pose_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
