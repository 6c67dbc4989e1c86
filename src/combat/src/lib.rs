// src/combat/src/lib.rs
//! 回合制说唱对战
//!
//! 玩家从三种攻击中选择一种，敌人按固定惩罚或 50/30/20 的概率出招，
//! 任一方 ego 降到 0 以下时战斗结束。

pub mod attack;
pub mod battle;
pub mod combatant;
pub mod enemy;
pub mod rng;
pub mod taunt;

pub use crate::attack::Attack;
pub use crate::battle::{
    Battle, BattleCommand, BattlePhase, DEFAULT_ENEMY_DAMAGE, EnemyTactics, Side, TurnOutcome,
    choose_enemy_move,
};
pub use crate::combatant::Combatant;
pub use crate::enemy::Enemy;
pub use crate::rng::BattleRng;
pub use crate::taunt::Taunt;
