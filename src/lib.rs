//! antflow - 蚁群路径规划与调度
//!
//! 在起点与终点之间用有限只蚂蚁走完房间图，任一中间房间同时最多一只蚂蚁：
//! - 拆点流网络 + Edmonds-Karp 最大流求顶点不相交路径
//! - 按蚂蚁数量选择使轮数最少的路径前缀
//! - 逐轮模拟蚂蚁移动，输出 `L<id>-<房间>` 记录
//! - lem-in 文本格式导入与多种输出格式

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod simulation;
pub mod solver;

// 重导出常用类型
pub use algorithm::{EdmondsKarp, FlowNetwork, Path, Selection};
pub use error::{Error, Result};
pub use graph::{Coord, Graph, Room, RoomId};
pub use import::{GraphLoader, Problem};
pub use simulation::{AntId, Move, Round, Schedule, Scheduler};
pub use solver::{Solution, Solver, SolverConfig};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
