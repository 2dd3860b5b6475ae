//! 图算法模块
//!
//! 拆点流网络、最大流、路径提取和路径选择

pub mod flow_network;
mod max_flow;
mod path_extract;
mod path_select;

pub use flow_network::{FlowArc, FlowNetwork, NodeId};
pub use max_flow::{EdmondsKarp, MaxFlow};
pub use path_extract::{extract_paths, Path};
pub use path_select::{evaluate, select_paths, turns_for, Candidate, Selection};
