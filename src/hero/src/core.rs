// src/hero/src/core.rs
use serde::{Deserialize, Serialize};

use crate::class::Class;

/// 出生点坐标
pub const SPAWN_X: f64 = 100.0;
pub const SPAWN_Y: f64 = 150.0;

/// Side length of the player's square hitbox, in map units.
pub const PLAYER_SIZE: f64 = 32.0;

const BASE_EGO: i32 = 100;
const BASE_FLOW: i32 = 10;
const BASE_CHARISMA: i32 = 5;

/// 玩家核心数据结构
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub class: String,

    // 位置
    pub x: f64,
    pub y: f64,

    // 基础属性
    pub ego: i32,
    pub flow: i32,
    pub charisma: i32,

    // 只对下一场战斗生效
    pub bonus_ego: i32,
    pub pending_enemy_ego_debuff: i32,
}

impl Player {
    /// 创建新玩家；坐标为 (0, 0) 时使用出生点
    pub fn new(x: f64, y: f64, class: impl Into<String>) -> Self {
        let (x, y) = if x == 0.0 && y == 0.0 {
            (SPAWN_X, SPAWN_Y)
        } else {
            (x, y)
        };

        Self {
            name: String::new(),
            class: class.into(),
            x,
            y,
            ego: BASE_EGO,
            flow: BASE_FLOW,
            charisma: BASE_CHARISMA,
            bonus_ego: 0,
            pending_enemy_ego_debuff: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 解析职业名称（未知职业返回 None）
    pub fn class_kind(&self) -> Option<Class> {
        Class::from_label(&self.class)
    }

    /// 回到出生点
    pub fn reset_position(&mut self) {
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
    }

    pub fn step(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Extra ego added to the player's pool at the start of the next battle.
    pub fn grant_bonus_ego(&mut self, amount: i32) {
        self.bonus_ego = self.bonus_ego.saturating_add(amount);
        tracing::debug!(amount, total = self.bonus_ego, "bonus ego queued");
    }

    /// Ego removed from the next enemy before the battle starts.
    pub fn queue_enemy_debuff(&mut self, amount: i32) {
        self.pending_enemy_ego_debuff = self.pending_enemy_ego_debuff.saturating_add(amount);
    }

    /// 界面显示用的 ego（不显示负数）
    pub fn display_ego(&self) -> i32 {
        self.ego.max(0)
    }

    pub fn is_defeated(&self) -> bool {
        self.ego <= 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(SPAWN_X, SPAWN_Y, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn origin_falls_back_to_spawn() {
        let player = Player::new(0.0, 0.0, "Lyricistes");
        assert_eq!((player.x, player.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(player.ego, 100);
        assert_eq!(player.flow, 10);
        assert_eq!(player.charisma, 5);
        assert_eq!(player.class_kind(), Some(Class::Lyricist));
    }

    #[test]
    fn explicit_position_is_kept() {
        let player = Player::new(0.0, 42.0, "Hitmakers");
        assert_eq!((player.x, player.y), (0.0, 42.0));
    }

    #[test]
    fn reset_position_returns_to_spawn() {
        let mut player = Player::new(640.0, 480.0, "Performeurs");
        player.step(-2.0, 2.0);
        assert_eq!((player.x, player.y), (638.0, 482.0));
        player.reset_position();
        assert_eq!((player.x, player.y), (SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn battle_modifiers_accumulate() {
        let mut player = Player::default();
        player.grant_bonus_ego(50);
        player.grant_bonus_ego(50);
        player.queue_enemy_debuff(20);
        assert_eq!(player.bonus_ego, 100);
        assert_eq!(player.pending_enemy_ego_debuff, 20);
    }

    #[test]
    fn display_ego_never_negative() {
        let mut player = Player::default();
        player.ego = -15;
        assert_eq!(player.display_ego(), 0);
        assert!(player.is_defeated());
    }
}
