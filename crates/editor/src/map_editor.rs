//! Map editor model: size presets, the two paint layers and the palette.

use tactics::content::creature_ids;
use tactics::saved_map::{Layer, SavedMap, blank_layer};
use tactics::{Pos, Terrain};

/// Palette entry that erases the cell it is painted on.
pub const EMPTY_TILE: &str = "forbidden.png";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl MapSize {
    pub const ALL: [MapSize; 3] = [MapSize::Small, MapSize::Medium, MapSize::Large];

    pub fn side(self) -> usize {
        match self {
            MapSize::Small => 10,
            MapSize::Medium => 25,
            MapSize::Large => 50,
        }
    }

    pub fn label(self) -> String {
        format!("{0} x {0}", self.side())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditLayer {
    #[default]
    Terrain,
    Object,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteTile {
    Erase,
    Template(String),
}

impl PaletteTile {
    pub fn id(&self) -> &str {
        match self {
            PaletteTile::Erase => EMPTY_TILE,
            PaletteTile::Template(id) => id,
        }
    }
}

pub fn palette(layer: EditLayer) -> Vec<PaletteTile> {
    let mut tiles = vec![PaletteTile::Erase];
    match layer {
        EditLayer::Terrain => tiles.extend(
            [Terrain::Mountain, Terrain::River, Terrain::Forest]
                .into_iter()
                .filter_map(Terrain::template_id)
                .map(|id| PaletteTile::Template(id.to_string())),
        ),
        EditLayer::Object => {
            tiles.extend(creature_ids().map(|id| PaletteTile::Template(id.to_string())))
        }
    }
    tiles
}

#[derive(Clone, Debug)]
pub struct MapEditor {
    map: SavedMap,
    size: MapSize,
    layer: EditLayer,
    selected: Option<PaletteTile>,
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEditor {
    pub fn new() -> Self {
        let size = MapSize::default();
        Self { map: SavedMap::blank(size.side(), size.side()), size, layer: EditLayer::default(), selected: None }
    }

    pub fn map(&self) -> &SavedMap {
        &self.map
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn layer(&self) -> EditLayer {
        self.layer
    }

    pub fn selected(&self) -> Option<&PaletteTile> {
        self.selected.as_ref()
    }

    /// Changing size discards everything painted so far.
    pub fn set_size(&mut self, size: MapSize) {
        self.size = size;
        self.map = SavedMap::blank(size.side(), size.side());
    }

    pub fn set_layer(&mut self, layer: EditLayer) {
        if self.layer != layer {
            self.layer = layer;
            self.selected = None;
        }
    }

    pub fn palette(&self) -> Vec<PaletteTile> {
        palette(self.layer)
    }

    /// Selects a palette entry by identifier; identifiers outside the current
    /// layer's palette clear the selection.
    pub fn select(&mut self, id: &str) -> bool {
        self.selected = self.palette().into_iter().find(|tile| tile.id() == id);
        self.selected.is_some()
    }

    /// Writes the selected tile into the current layer. Returns whether the
    /// cell changed.
    pub fn paint(&mut self, pos: Pos) -> bool {
        let Some(selected) = &self.selected else {
            return false;
        };
        let side = self.size.side();
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= side || pos.y as usize >= side {
            return false;
        }
        let value = match selected {
            PaletteTile::Erase => None,
            PaletteTile::Template(id) => Some(id.clone()),
        };
        let cell = &mut self.current_layer_mut()[pos.y as usize][pos.x as usize];
        if *cell == value {
            return false;
        }
        *cell = value;
        true
    }

    pub fn clear(&mut self) {
        let side = self.size.side();
        self.map.layer.terrain = blank_layer(side, side);
        self.map.layer.object = blank_layer(side, side);
    }

    fn current_layer_mut(&mut self) -> &mut Layer {
        match self.layer {
            EditLayer::Terrain => &mut self.map.layer.terrain,
            EditLayer::Object => &mut self.map.layer.object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics::content::keys;

    #[test]
    fn size_presets_match_labels() {
        let labels: Vec<String> = MapSize::ALL.into_iter().map(MapSize::label).collect();
        assert_eq!(labels, vec!["10 x 10", "25 x 25", "50 x 50"]);
    }

    #[test]
    fn painting_without_selection_does_nothing() {
        let mut editor = MapEditor::new();
        assert!(!editor.paint(Pos { y: 0, x: 0 }));
        assert_eq!(editor.map(), &SavedMap::blank(10, 10));
    }

    #[test]
    fn paint_writes_current_layer_and_erase_clears() {
        let mut editor = MapEditor::new();
        assert!(editor.select("river.png"));
        assert!(editor.paint(Pos { y: 2, x: 3 }));
        assert!(!editor.paint(Pos { y: 2, x: 3 }));
        assert_eq!(editor.map().layer.terrain[2][3].as_deref(), Some("river.png"));

        editor.select(EMPTY_TILE);
        assert!(editor.paint(Pos { y: 2, x: 3 }));
        assert_eq!(editor.map().layer.terrain[2][3], None);
    }

    #[test]
    fn out_of_bounds_paint_is_ignored() {
        let mut editor = MapEditor::new();
        editor.select("forest.png");
        assert!(!editor.paint(Pos { y: 10, x: 0 }));
        assert!(!editor.paint(Pos { y: 0, x: -1 }));
    }

    #[test]
    fn switching_layer_swaps_palette_and_drops_selection() {
        let mut editor = MapEditor::new();
        editor.select("forest.png");
        editor.set_layer(EditLayer::Object);

        assert!(editor.selected().is_none());
        assert!(!editor.select("forest.png"));
        assert!(editor.select(keys::HYDRA));
        assert!(editor.paint(Pos { y: 1, x: 1 }));
        assert_eq!(editor.map().layer.object[1][1].as_deref(), Some(keys::HYDRA));
        assert_eq!(editor.map().layer.terrain[1][1], None);
        assert_eq!(editor.palette().len(), 11);
    }

    #[test]
    fn resizing_clears_both_layers() {
        let mut editor = MapEditor::new();
        editor.select("mountain.png");
        editor.paint(Pos { y: 0, x: 0 });

        editor.set_size(MapSize::Medium);

        assert_eq!(editor.map(), &SavedMap::blank(25, 25));
    }
}
