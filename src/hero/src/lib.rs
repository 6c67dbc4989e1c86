// src/hero/src/lib.rs

// 核心模块
mod bag;
mod core;

// 子模块
pub mod class;

// 重新导出主要类型
pub use self::{
    bag::{Inventory, item_names},
    class::Class,
    core::{Player, PLAYER_SIZE, SPAWN_X, SPAWN_Y},
};
