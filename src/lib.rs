//! Rap Legacy：终端里的回合制说唱 RPG
//!
//! 领域逻辑在子 crate 中（`hero`、`combat`、`overworld`、`save`、`error`），
//! 这里是终端前端：配置、日志、输入映射、界面状态机和渲染。

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod notification;
pub mod render;

pub use app::{App, Screen};
pub use config::Config;
