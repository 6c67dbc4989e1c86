//src/overworld/src/lib.rs
//! 大地图：背景范围、战斗触发区域和敌人位置

use combat::Enemy;
use hero::{PLAYER_SIZE, Player};
use serde::{Deserialize, Serialize};

/// 地图尺寸（逻辑坐标）
pub const MAP_WIDTH: f64 = 1920.0;
pub const MAP_HEIGHT: f64 = 1080.0;

/// Axis-aligned rectangle, min inclusive and max exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// 两个矩形是否有重叠（仅接触边界不算）
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// 移动方向
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// The player's hitbox at its current position.
pub fn player_rect(player: &Player) -> Rect {
    Rect::new(player.x, player.y, player.x + PLAYER_SIZE, player.y + PLAYER_SIZE)
}

/// 单张背景地图
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub bounds: Rect,
    pub combat_zone: Rect,
    pub enemies: Vec<Enemy>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    pub fn new() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, MAP_WIDTH, MAP_HEIGHT),
            combat_zone: Rect::new(200.0, 200.0, 300.0, 300.0),
            enemies: vec![
                Enemy::new(200.0, 200.0, "Rival Rapper"),
                Enemy::new(400.0, 300.0, "Boss Rapper"),
            ],
        }
    }

    pub fn in_combat_zone(&self, player: &Player) -> bool {
        self.combat_zone.overlaps(&player_rect(player))
    }

    /// The enemy fought when the combat zone is triggered.
    pub fn encounter_enemy(&self) -> Option<&Enemy> {
        self.enemies.first()
    }

    /// 移动玩家并限制在地图范围内
    pub fn move_player(&self, player: &mut Player, direction: Direction, step: f64) {
        let (dx, dy) = direction.delta();
        player.step(dx * step, dy * step);
        player.x = player
            .x
            .clamp(self.bounds.min_x, (self.bounds.max_x - PLAYER_SIZE).max(self.bounds.min_x));
        player.y = player
            .y
            .clamp(self.bounds.min_y, (self.bounds.max_y - PLAYER_SIZE).max(self.bounds.min_y));
        tracing::trace!(x = player.x, y = player.y, "player moved");
    }
}
