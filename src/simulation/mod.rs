//! 模拟模块
//!
//! 按离散轮次移动蚂蚁，生成逐轮的移动记录

mod ant;
mod scheduler;

pub use ant::{Ant, AntId, AntState, Move};
pub use scheduler::{assign_ants, Round, Schedule, Scheduler};
