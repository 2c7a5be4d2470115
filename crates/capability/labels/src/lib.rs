//! 轴标签能力。
//!
//! - `letters`: 26 进制字母坐标与标签切分工具
//! - `codec`: 八种标签体系的数值编解码
//! - `generator`: 按自定义范围与默认方案生成轴标签序列
//! - `position`: 网格位置与展示标签的双向桥接

pub mod codec;
pub mod error;
pub mod generator;
pub mod letters;
pub mod position;

pub use codec::{LabelFormat, from_numeric, to_numeric};
pub use error::LabelError;
pub use generator::generate_labels;
pub use position::{label_to_position, position_to_label, range_size};
