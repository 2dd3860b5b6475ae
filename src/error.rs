//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("无效的图: {0}")]
    InvalidGraph(String),

    #[error("无效的蚂蚁数量: {0}")]
    InvalidAntCount(String),

    #[error("未找到从起点到终点的路径")]
    NoPathFound,

    #[error("无法为 {ants} 只蚂蚁在 {paths} 条路径中选出可行方案")]
    InfeasibleSelection { ants: usize, paths: usize },

    #[error("路径提取不一致: 最大流为 {flow}，提取出 {paths} 条路径")]
    PathExtractionMismatch { flow: usize, paths: usize },

    #[error("调度停滞: 第 {round} 轮没有任何移动，仍有 {remaining} 只蚂蚁未到达")]
    SchedulerStall { round: usize, remaining: usize },

    #[error("调度超出轮数上限: 已用 {rounds} 轮，上限 {turns} 轮")]
    ScheduleOverrun { rounds: usize, turns: usize },

    #[error("房间不存在: {0}")]
    UnknownRoom(String),

    #[error("房间已存在: {0}")]
    DuplicateRoom(String),

    #[error("解析错误 (第 {line} 行): {message}")]
    ParseError { line: usize, message: String },

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
