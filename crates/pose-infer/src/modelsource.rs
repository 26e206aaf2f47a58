use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}
