//! Turn-based battle between the player and one enemy.
//!
//! The player picks one of three attacks from a menu; the enemy answers
//! either with a flat penalty or with a weighted random move. The battle ends
//! on the first update where either ego pool drops to zero or below.

use hero::Player;
use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::attack::Attack;
use crate::combatant::Combatant;
use crate::enemy::Enemy;
use crate::rng::BattleRng;
use crate::taunt::{self, Taunt};

/// Damage table used by the weighted enemy (Punchline / Flow / Diss Track).
pub const DEFAULT_ENEMY_DAMAGE: [i32; 3] = [10, 5, 30];

const MAX_LOG_LINES: usize = 6;

/// 回合归属
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// How the enemy picks its damage on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTactics {
    /// Same fixed penalty every turn.
    Flat(i32),
    /// 50/30/20 draw over the three attacks, each with fixed damage.
    Weighted([i32; 3]),
}

impl Default for EnemyTactics {
    fn default() -> Self {
        EnemyTactics::Weighted(DEFAULT_ENEMY_DAMAGE)
    }
}

/// Input the battle understands during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleCommand {
    Previous,
    Next,
    Confirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    Running,
    Finished { winner: Side },
}

/// One resolved attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub actor: Side,
    pub attack: Attack,
    pub damage: i32,
    pub taunt: Taunt,
}

/// Draws the enemy's move: 50% Punchline, 30% Flow, 20% Diss Track.
pub fn choose_enemy_move(rng: &mut BattleRng) -> Attack {
    let roll: u32 = rng.random_range(0..100);
    if roll < 50 {
        Attack::Punchline
    } else if roll < 80 {
        Attack::Flow
    } else {
        Attack::DissTrack
    }
}

/// 战斗会话
#[derive(Debug, Clone)]
pub struct Battle {
    player: Player,
    enemy: Enemy,
    tactics: EnemyTactics,
    turn: Side,
    selected: usize,
    phase: BattlePhase,
    exit_requested: bool,
    last_taunt: Option<Taunt>,
    log: Vec<String>,
    rng: BattleRng,
}

impl Battle {
    /// Opens a battle. The player's one-shot modifiers are consumed here:
    /// bonus ego tops up the player's pool, the pending debuff lowers the
    /// enemy's pool (not below zero).
    pub fn start(player: &mut Player, enemy: &Enemy, tactics: EnemyTactics, rng: BattleRng) -> Self {
        let mut fighter = player.clone();
        fighter.ego = player.ego.saturating_add(player.bonus_ego);
        fighter.bonus_ego = 0;
        fighter.pending_enemy_ego_debuff = 0;
        player.bonus_ego = 0;

        let mut opponent = enemy.clone();
        if player.pending_enemy_ego_debuff > 0 {
            opponent.ego = opponent.ego.saturating_sub(player.pending_enemy_ego_debuff).max(0);
            player.pending_enemy_ego_debuff = 0;
        }

        tracing::info!(
            enemy = %opponent.name,
            player_ego = fighter.ego,
            enemy_ego = opponent.ego,
            seed = rng.seed(),
            "battle started"
        );

        Self {
            player: fighter,
            enemy: opponent,
            tactics,
            turn: Side::Player,
            selected: 0,
            phase: BattlePhase::Running,
            exit_requested: false,
            last_taunt: None,
            log: Vec::new(),
            rng,
        }
    }

    /// One frame of battle logic.
    ///
    /// On the player's turn the command moves the menu cursor or launches the
    /// selected attack; on the enemy's turn the enemy acts regardless of the
    /// command. Both pools are checked afterwards.
    pub fn update(&mut self, command: Option<BattleCommand>) -> Option<TurnOutcome> {
        if self.is_over() {
            if command == Some(BattleCommand::Confirm) {
                self.exit_requested = true;
            }
            return None;
        }

        // 开局就可能有一方 ego 为 0（例如减益超过敌人的总量）
        self.check_end(None);
        if self.is_over() {
            return None;
        }

        let outcome = match self.turn {
            Side::Player => match command {
                Some(BattleCommand::Next) => {
                    self.select_next();
                    None
                }
                Some(BattleCommand::Previous) => {
                    self.select_previous();
                    None
                }
                Some(BattleCommand::Confirm) => Some(self.player_attack()),
                None => None,
            },
            Side::Enemy => Some(self.enemy_attack()),
        };

        self.check_end(outcome.as_ref().map(|o| o.actor));
        outcome
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Attack::COUNT;
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(Attack::COUNT - 1);
    }

    /// Applies the selected attack to the enemy and hands the turn over.
    pub fn player_attack(&mut self) -> TurnOutcome {
        let attack = Attack::from_index(self.selected).unwrap_or(Attack::Punchline);
        let flow = self.player.flow;
        let damage = match attack {
            Attack::Punchline => flow,
            Attack::Flow => flow / 2,
            Attack::DissTrack => flow.saturating_mul(2),
        };

        self.enemy.take_damage(damage);
        match attack {
            Attack::Flow => self.player.flow = self.player.flow.saturating_add(1),
            Attack::DissTrack => self.player.charisma = self.player.charisma.saturating_sub(1).max(0),
            Attack::Punchline => {}
        }

        let taunt = taunt::pick(Side::Player, attack, &mut self.rng);
        self.record(Side::Player, attack, damage, taunt)
    }

    /// Lets the enemy act according to its tactics and hands the turn back.
    pub fn enemy_attack(&mut self) -> TurnOutcome {
        let (attack, damage) = match self.tactics {
            EnemyTactics::Flat(penalty) => (Attack::Punchline, penalty),
            EnemyTactics::Weighted(table) => {
                let attack = choose_enemy_move(&mut self.rng);
                (attack, table[attack.index()])
            }
        };

        self.player.take_damage(damage);
        let taunt = taunt::pick(Side::Enemy, attack, &mut self.rng);
        self.record(Side::Enemy, attack, damage, taunt)
    }

    fn record(&mut self, actor: Side, attack: Attack, damage: i32, taunt: Taunt) -> TurnOutcome {
        let who = match actor {
            Side::Player => Combatant::name(&self.player).to_string(),
            Side::Enemy => self.enemy.name.clone(),
        };
        tracing::debug!(%who, %attack, damage, "attack resolved");

        self.log.push(format!("{} uses {} for {} ego!", who, attack, damage));
        if self.log.len() > MAX_LOG_LINES {
            self.log.remove(0);
        }
        self.last_taunt = Some(taunt);
        self.turn = actor.opponent();

        TurnOutcome {
            actor,
            attack,
            damage,
            taunt,
        }
    }

    /// The pool of whoever was just hit is checked first.
    fn check_end(&mut self, last_actor: Option<Side>) {
        let order = match last_actor {
            Some(Side::Enemy) => [Side::Player, Side::Enemy],
            _ => [Side::Enemy, Side::Player],
        };

        for side in order {
            let defeated = match side {
                Side::Player => self.player.is_defeated(),
                Side::Enemy => self.enemy.is_defeated(),
            };
            if defeated {
                let winner = side.opponent();
                self.phase = BattlePhase::Finished { winner };
                self.log.push(match winner {
                    Side::Player => "You're about to go viral!".to_string(),
                    Side::Enemy => "You're getting roasted all over social media!".to_string(),
                });
                tracing::info!(?winner, enemy = %self.enemy.name, "battle finished");
                return;
            }
        }
    }

    /// Carries the stat changes of the battle back to the player. Ego pools
    /// only live for the duration of the battle.
    pub fn settle(&self, player: &mut Player) {
        player.flow = self.player.flow;
        player.charisma = self.player.charisma;
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            BattlePhase::Finished { winner } => Some(winner),
            BattlePhase::Running => None,
        }
    }

    /// Set once the result has been acknowledged after the battle ended.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_attack(&self) -> Attack {
        Attack::from_index(self.selected).unwrap_or(Attack::Punchline)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn tactics(&self) -> EnemyTactics {
        self.tactics
    }

    pub fn last_taunt(&self) -> Option<&Taunt> {
        self.last_taunt.as_ref()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn battle_with(tactics: EnemyTactics) -> (Player, Battle) {
        let mut player = Player::default();
        let enemy = Enemy::new(200.0, 200.0, "Rival Rapper");
        let battle = Battle::start(&mut player, &enemy, tactics, BattleRng::new(42));
        (player, battle)
    }

    #[test]
    fn punchline_deals_flow() {
        let (_, mut battle) = battle_with(EnemyTactics::Flat(5));
        let outcome = battle.update(Some(BattleCommand::Confirm)).unwrap();
        assert_eq!(outcome.attack, Attack::Punchline);
        assert_eq!(outcome.damage, 10);
        assert_eq!(battle.enemy().ego, 90);
        assert_eq!(battle.turn(), Side::Enemy);
    }

    #[test]
    fn flow_halves_damage_and_buffs_flow() {
        let (_, mut battle) = battle_with(EnemyTactics::Flat(5));
        battle.update(Some(BattleCommand::Next));
        assert_eq!(battle.selected_attack(), Attack::Flow);
        battle.update(Some(BattleCommand::Confirm));
        assert_eq!(battle.enemy().ego, 95);
        assert_eq!(battle.player().flow, 11);
    }

    #[test]
    fn diss_track_doubles_damage_and_costs_charisma() {
        let (_, mut battle) = battle_with(EnemyTactics::Flat(5));
        battle.update(Some(BattleCommand::Previous));
        assert_eq!(battle.selected_attack(), Attack::DissTrack);
        battle.update(Some(BattleCommand::Confirm));
        assert_eq!(battle.enemy().ego, 80);
        assert_eq!(battle.player().charisma, 4);
    }

    #[test]
    fn charisma_floors_at_zero() {
        let mut player = Player::default();
        player.charisma = 0;
        let enemy = Enemy::new(0.0, 0.0, "Rival Rapper");
        let mut battle = Battle::start(&mut player, &enemy, EnemyTactics::Flat(0), BattleRng::new(1));
        battle.select_previous();
        battle.player_attack();
        assert_eq!(battle.player().charisma, 0);
    }

    #[test]
    fn enemy_acts_on_its_turn_without_input() {
        let (_, mut battle) = battle_with(EnemyTactics::Flat(5));
        battle.update(Some(BattleCommand::Confirm));
        let outcome = battle.update(None).unwrap();
        assert_eq!(outcome.actor, Side::Enemy);
        assert_eq!(battle.player().ego, 95);
        assert_eq!(battle.turn(), Side::Player);
    }

    #[test]
    fn idle_player_turn_changes_nothing() {
        let (_, mut battle) = battle_with(EnemyTactics::Flat(5));
        assert!(battle.update(None).is_none());
        assert_eq!(battle.turn(), Side::Player);
        assert_eq!(battle.enemy().ego, 100);
    }

    #[test]
    fn weighted_enemy_uses_table_damage() {
        let (_, mut battle) = battle_with(EnemyTactics::default());
        battle.update(Some(BattleCommand::Confirm));
        let outcome = battle.update(None).unwrap();
        assert_eq!(outcome.damage, DEFAULT_ENEMY_DAMAGE[outcome.attack.index()]);
        assert_eq!(battle.player().ego, 100 - outcome.damage);
    }

    #[test]
    fn start_consumes_bonus_and_debuff() {
        let mut player = Player::default();
        player.grant_bonus_ego(50);
        player.queue_enemy_debuff(30);
        let enemy = Enemy::new(0.0, 0.0, "Rival Rapper");
        let battle = Battle::start(&mut player, &enemy, EnemyTactics::default(), BattleRng::new(0));

        assert_eq!(battle.player().ego, 150);
        assert_eq!(battle.enemy().ego, 70);
        assert_eq!(player.bonus_ego, 0);
        assert_eq!(player.pending_enemy_ego_debuff, 0);
        assert_eq!(player.ego, 100);
    }

    #[test]
    fn oversized_debuff_clamps_enemy_and_ends_on_first_cycle() {
        let mut player = Player::default();
        player.queue_enemy_debuff(500);
        let enemy = Enemy::new(0.0, 0.0, "Rival Rapper");
        let mut battle = Battle::start(&mut player, &enemy, EnemyTactics::default(), BattleRng::new(0));
        assert_eq!(battle.enemy().ego, 0);

        assert!(battle.update(None).is_none());
        assert_eq!(battle.winner(), Some(Side::Player));
    }

    #[test]
    fn finished_battle_waits_for_confirm_before_exit() {
        let mut player = Player::default();
        player.flow = 100;
        let enemy = Enemy::new(0.0, 0.0, "Rival Rapper");
        let mut battle = Battle::start(&mut player, &enemy, EnemyTactics::Flat(5), BattleRng::new(9));

        battle.update(Some(BattleCommand::Confirm));
        assert!(battle.is_over());
        assert!(!battle.exit_requested());

        // 结束后不再结算伤害
        assert!(battle.update(None).is_none());
        assert_eq!(battle.player().ego, 100);

        battle.update(Some(BattleCommand::Confirm));
        assert!(battle.exit_requested());
    }

    #[test]
    fn player_loses_when_ego_runs_out() {
        let mut player = Player::default();
        player.ego = 5;
        let enemy = Enemy::new(0.0, 0.0, "Rival Rapper");
        let mut battle = Battle::start(&mut player, &enemy, EnemyTactics::Flat(5), BattleRng::new(2));

        battle.update(Some(BattleCommand::Confirm));
        assert!(!battle.is_over());
        battle.update(None);
        assert_eq!(battle.winner(), Some(Side::Enemy));
        assert_eq!(battle.player().display_ego(), 0);
    }

    #[test]
    fn settle_keeps_stat_changes_but_not_ego() {
        let mut player = Player::default();
        let enemy = Enemy::new(0.0, 0.0, "Rival Rapper");
        let mut battle = Battle::start(&mut player, &enemy, EnemyTactics::Flat(20), BattleRng::new(5));

        battle.select_next();
        battle.player_attack();
        battle.enemy_attack();
        battle.select_next();
        battle.player_attack();

        battle.settle(&mut player);
        assert_eq!(player.flow, 11);
        assert_eq!(player.charisma, 4);
        assert_eq!(player.ego, 100);
    }

    #[test]
    fn log_keeps_only_recent_lines() {
        let (_, mut battle) = battle_with(EnemyTactics::Flat(1));
        for _ in 0..10 {
            battle.select_next();
            battle.select_next();
            battle.select_next();
            battle.player_attack();
            battle.enemy_attack();
        }
        assert!(battle.log().len() <= MAX_LOG_LINES);
        assert!(battle.last_taunt().is_some());
    }
}
