use std::{
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use shelfpack::{Island, Orientation};

use super::{DataError, IslandEntry};

/// The result of packing a set of islands, written out for whatever copies
/// chart texels into their new places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Layout {
    pub target_height: f64,
    pub padding: f64,

    /// How much of the sheet's height the islands ended up using. Never more
    /// than `target_height` for layouts produced by `chartpack pack`.
    pub used_height: f64,

    pub islands: Vec<LayoutIsland>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LayoutIsland {
    pub name: String,

    /// For `rotated90` islands, this is the top-left corner of the region the
    /// island covers, which its content is turned around.
    pub position: (f64, f64),

    /// The island's size before any rotation.
    pub size: (f64, f64),

    pub orientation: Orientation,
}

impl LayoutIsland {
    pub fn to_island(&self) -> Island {
        Island {
            size: self.size,
            position: self.position,
            orientation: self.orientation,
        }
    }
}

impl Layout {
    /// Pairs packed islands back up with the entries they were made from.
    pub fn from_packed(
        entries: &[IslandEntry],
        islands: &[Island],
        target_height: f64,
        padding: f64,
        used_height: f64,
    ) -> Self {
        let islands = entries
            .iter()
            .zip(islands)
            .map(|(entry, island)| LayoutIsland {
                name: entry.name.clone(),
                position: island.position,
                size: island.size,
                orientation: island.orientation,
            })
            .collect();

        Self {
            target_height,
            padding,
            used_height,
            islands,
        }
    }

    /// The height of the sheet this layout is drawn on.
    pub fn sheet_height(&self) -> f64 {
        self.target_height.max(self.used_height)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = BufReader::new(fs::File::open(path)?);

        let layout = serde_json::from_reader(file).map_err(|source| DataError::Json {
            path: path.to_owned(),
            source,
        })?;

        Ok(layout)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        let mut file = BufWriter::new(fs::File::create(path)?);

        serde_json::to_writer_pretty(&mut file, self).map_err(|source| DataError::Json {
            path: path.to_owned(),
            source,
        })?;
        file.flush()?;

        log::trace!("Saved layout to {}", path.display());

        Ok(())
    }
}
