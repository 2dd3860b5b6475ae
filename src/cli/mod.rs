//! 命令行输出

pub mod printer;

pub use printer::{format_paths_table, path_label, OutputConfig, OutputFormat, Printer};
