//! Shortcut grid view

use crate::models::shortcut::ShortcutTile;

/// Renders the tile grid into display rows
pub struct ShortcutGridView;

impl ShortcutGridView {
    /// One row per tile: icon, title, then the supporting line
    pub fn rows(tiles: &[ShortcutTile]) -> Vec<String> {
        tiles
            .iter()
            .map(|tile| format!("{} {} · {}", tile.icon, tile.title, tile.desc))
            .collect()
    }
}
