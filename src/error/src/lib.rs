//! 游戏错误处理模块
//!
//! 处理存档系统、序列化、IO以及背包操作中可能出现的错误。

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 存档 JSON 编解码错误
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 存档名为空
    #[error("Save name is empty")]
    EmptySaveName,

    /// 同名存档已存在
    #[error("A save named '{0}' already exists")]
    DuplicateSave(String),

    /// 存档不存在
    #[error("No save named '{0}'")]
    SaveNotFound(String),

    /// 背包中没有该物品
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// 背包索引越界
    #[error("Invalid inventory slot {0}")]
    InvalidSlot(usize),
}

impl GameError {
    /// Errors the player caused (bad input) rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GameError::EmptySaveName
                | GameError::DuplicateSave(_)
                | GameError::SaveNotFound(_)
                | GameError::ItemNotFound(_)
                | GameError::InvalidSlot(_)
        )
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::EmptySaveName => "Pick a name for your rapper first".to_string(),
        GameError::DuplicateSave(name) => format!("The name '{}' is already taken", name),
        GameError::SaveNotFound(name) => format!("Save '{}' no longer exists", name),
        GameError::SerializationError(_) => "Save data is corrupted".to_string(),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Save file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to access the save file".to_string(),
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_save_message_names_the_save() {
        let msg = handle_error(&GameError::DuplicateSave("MC Solaar".into()));
        assert!(msg.contains("MC Solaar"));
    }

    #[test]
    fn io_not_found_gets_friendly_message() {
        let err = GameError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(handle_error(&err), "Save file not found");
        assert!(!err.is_user_error());
    }

    #[test]
    fn user_errors_are_flagged() {
        assert!(GameError::EmptySaveName.is_user_error());
        assert!(GameError::InvalidSlot(3).is_user_error());
    }
}
