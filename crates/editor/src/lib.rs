pub mod map_editor;
pub mod map_library;

pub use map_editor::{EditLayer, MapEditor, MapSize, PaletteTile};
pub use map_library::{MapLibrary, MapLibraryError};

pub const APP_NAME: &str = "GridTactics";
