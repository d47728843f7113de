use std::{io::BufReader, path::Path};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use shelfpack::Island;

use super::DataError;

/// The islands to pack, as produced by whatever extracted them from a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct IslandList {
    pub islands: Vec<IslandEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct IslandEntry {
    /// A name used to match the packed island back up with its chart.
    pub name: String,

    /// Width and height, in sheet widths.
    pub size: (f64, f64),
}

impl IslandList {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = BufReader::new(fs::File::open(path)?);

        let list = serde_json::from_reader(file).map_err(|source| DataError::Json {
            path: path.to_owned(),
            source,
        })?;

        Ok(list)
    }

    /// Fresh, unplaced islands in the same order as the entries.
    pub fn to_islands(&self) -> Vec<Island> {
        self.islands
            .iter()
            .map(|entry| Island::new(entry.size))
            .collect()
    }
}
