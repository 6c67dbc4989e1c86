// src/combat/src/enemy.rs

use serde::{Deserialize, Serialize};

const BASE_EGO: i32 = 100;

/// 敌方说唱歌手
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub ego: i32,
}

impl Enemy {
    /// 创建新敌人，ego 默认为 100
    pub fn new(x: f64, y: f64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            ego: BASE_EGO,
        }
    }

    pub fn with_ego(mut self, ego: i32) -> Self {
        self.ego = ego;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_creation() {
        let rival = Enemy::new(200.0, 200.0, "Rival Rapper");
        assert_eq!(rival.ego, 100);
        assert_eq!(rival.name, "Rival Rapper");
        assert_eq!((rival.x, rival.y), (200.0, 200.0));
        assert_eq!(rival.with_ego(40).ego, 40);
    }
}
