// src/hero/src/class.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::bag::item_names;

/// 角色职业（决定初始背包）
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Class {
    #[strum(to_string = "Lyricistes", serialize = "lyriciste")]
    Lyricist,
    #[strum(to_string = "Performeurs", serialize = "performer")]
    Performer,
    #[strum(to_string = "Hitmakers", serialize = "hitmaker")]
    Hitmaker,
}

impl Class {
    /// Parse a stored class label. Unknown labels are allowed in saves and
    /// map to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// 职业在界面和存档中使用的名称
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// 获取职业的初始背包
    pub fn starting_kit(&self) -> Vec<String> {
        let kit: &[&str] = match self {
            Class::Lyricist => &[
                item_names::MICRO,
                item_names::CRISTALLINE_MYSTERIOUS,
                item_names::E_CIGARETTE,
            ],
            Class::Performer => &[
                item_names::MICRO,
                item_names::CRISTALLINE_TONIC,
                item_names::PHONE,
            ],
            Class::Hitmaker => &[
                item_names::MICRO,
                item_names::CRISTALLINE_SUSPICIOUS,
                item_names::PHONE,
            ],
        };
        kit.iter().map(|s| s.to_string()).collect()
    }

    /// Starter kit for any stored label; unknown classes only get a microphone.
    pub fn starting_kit_for(label: &str) -> Vec<String> {
        match Self::from_label(label) {
            Some(class) => class.starting_kit(),
            None => vec![item_names::MICRO.to_string()],
        }
    }
}
