// src/hero/src/bag.rs
use error::GameError;
use serde::{Deserialize, Serialize};

/// Item names as they appear in saves.
pub mod item_names {
    pub const MICRO: &str = "Micro";
    pub const CRISTALLINE: &str = "Cristalline";
    pub const CRISTALLINE_MYSTERIOUS: &str = "Cristalline - mystérieuse";
    pub const CRISTALLINE_TONIC: &str = "Cristalline - tonic";
    pub const CRISTALLINE_SUSPICIOUS: &str = "Cristalline - suspicieuse";
    pub const E_CIGARETTE: &str = "Cigarette électronique";
    pub const PHONE: &str = "Téléphone";
}

/// 物品名到图标字符的对照表
const ICONS: &[(&str, char)] = &[
    (item_names::MICRO, 'M'),
    (item_names::CRISTALLINE, 'c'),
    (item_names::CRISTALLINE_MYSTERIOUS, 'c'),
    (item_names::CRISTALLINE_TONIC, 'c'),
    (item_names::CRISTALLINE_SUSPICIOUS, 'c'),
    (item_names::E_CIGARETTE, 'e'),
    (item_names::PHONE, 't'),
];

const UNKNOWN_ICON: char = '?';

/// 背包：有序的物品名列表
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<String>,
    #[serde(skip)]
    open: bool,
    #[serde(skip)]
    selected: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<String>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    pub fn add_item(&mut self, name: impl Into<String>) {
        self.items.push(name.into());
    }

    /// 按名称精确匹配移除第一个物品
    pub fn remove(&mut self, name: &str) -> Result<String, GameError> {
        let index = self
            .items
            .iter()
            .position(|item| item == name)
            .ok_or_else(|| GameError::ItemNotFound(name.to_string()))?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<String, GameError> {
        if index >= self.items.len() {
            return Err(GameError::InvalidSlot(index));
        }
        let item = self.items.remove(index);
        // 保持选中项在范围内
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        Ok(item)
    }

    /// 物品图标；未知物品显示 '?'
    pub fn icon_for(name: &str) -> char {
        ICONS
            .iter()
            .find(|(item, _)| *item == name)
            .map_or(UNKNOWN_ICON, |(_, icon)| *icon)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.items.len() - 1);
        }
    }
}
