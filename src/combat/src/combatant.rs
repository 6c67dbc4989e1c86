// src/combat/src/combatant.rs

use crate::enemy::Enemy;
use hero::Player;

/// 表示可以参加战斗的说唱歌手
pub trait Combatant {
    /// 获取名称
    fn name(&self) -> &str;

    /// 获取当前 ego
    fn ego(&self) -> i32;

    /// 线性扣除 ego（允许变成负数，由战斗判定结束）
    fn take_damage(&mut self, amount: i32);

    /// 是否已被击败
    fn is_defeated(&self) -> bool {
        self.ego() <= 0
    }

    /// 界面显示用的 ego
    fn display_ego(&self) -> i32 {
        self.ego().max(0)
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn ego(&self) -> i32 {
        self.ego
    }

    fn take_damage(&mut self, amount: i32) {
        self.ego = self.ego.saturating_sub(amount);
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        if self.name.is_empty() { "You" } else { &self.name }
    }

    fn ego(&self) -> i32 {
        self.ego
    }

    fn take_damage(&mut self, amount: i32) {
        self.ego = self.ego.saturating_sub(amount);
    }
}
