//! 存储层错误类型
//!
//! 定义统一的存储错误类型，用于封装底层错误：
//! - 标签换算错误
//! - 放置校验错误
//! - 数据一致性错误

use floorplan_geometry::GeometryError;
use floorplan_labels::LabelError;

#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<LabelError> for StorageError {
    fn from(err: LabelError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<Vec<GeometryError>> for StorageError {
    fn from(errors: Vec<GeometryError>) -> Self {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(joined)
    }
}
