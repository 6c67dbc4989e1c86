// src/combat/src/attack.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// 三种攻击方式（菜单顺序即索引）
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount, Display,
)]
pub enum Attack {
    Punchline,
    Flow,
    #[strum(to_string = "Diss Track")]
    DissTrack,
}

impl Attack {
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn index(self) -> usize {
        match self {
            Attack::Punchline => 0,
            Attack::Flow => 1,
            Attack::DissTrack => 2,
        }
    }

    /// 菜单显示的全部攻击
    pub fn menu() -> Vec<Attack> {
        Self::iter().collect()
    }
}
