use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Pitch,
    Bat,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Pitch, Category::Bat];

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Pitch => "pit.json",
            Category::Bat => "bat.json",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Category::Pitch => Category::Bat,
            Category::Bat => Category::Pitch,
        }
    }
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Pitch => "Pitch",
        Category::Bat => "Bat",
    }
}

/// String-keyed map that keeps document order. Re-inserting a key replaces
/// the value but keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    // key -> position in `entries`
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 = value;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let pos = *self.index.get(key)?;
        self.entries.get(pos).map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "nameJ", alias = "localName")]
    pub local_name: String,
    #[serde(rename = "nameE", alias = "romanizedName")]
    pub romanized_name: String,
    // Fewer than two ids is allowed here; the image fetch reports it.
    #[serde(rename = "ids", alias = "imageIds", default)]
    pub image_ids: Vec<String>,
}

pub type TeamMap = OrderedMap<Vec<PlayerRecord>>;
pub type LeagueMap = OrderedMap<TeamMap>;

/// Year -> league -> team -> roster, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    years: OrderedMap<LeagueMap>,
}

impl Hierarchy {
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys()
    }

    pub fn year(&self, year: &str) -> Option<&LeagueMap> {
        self.years.get(year)
    }

    pub fn league(&self, year: &str, league: &str) -> Option<&TeamMap> {
        self.year(year)?.get(league)
    }

    pub fn roster(&self, year: &str, league: &str, team: &str) -> Option<&[PlayerRecord]> {
        self.league(year, league)?.get(team).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("data file {} is not in the expected format: {detail}", .path.display())]
    MalformedData { path: PathBuf, detail: String },
    #[error("failed to read data file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn category_path(data_dir: &Path, category: Category) -> PathBuf {
    data_dir.join(category.file_name())
}

pub fn load(data_dir: &Path, category: Category) -> Result<Hierarchy, LoadError> {
    load_from_path(&category_path(data_dir, category))
}

pub fn load_from_path(path: &Path) -> Result<Hierarchy, LoadError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        // read_to_string reports non-UTF-8 content as InvalidData.
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Err(LoadError::MalformedData {
                path: path.to_path_buf(),
                detail: err.to_string(),
            });
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Hierarchy::from_json_str(&raw).map_err(|err| LoadError::MalformedData {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_map_keeps_document_order() {
        let map: OrderedMap<u32> = serde_json::from_str(r#"{"b":1,"a":2,"c":3}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let map: OrderedMap<u32> = serde_json::from_str(r#"{"x":1,"y":2,"x":3}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(map.get("x"), Some(&3));
    }

    #[test]
    fn wide_map_resolves_every_key() {
        let body = (0..2000)
            .map(|i| format!(r#""k{i}":{i}"#))
            .collect::<Vec<_>>()
            .join(",");
        let map: OrderedMap<u32> = serde_json::from_str(&format!("{{{body}}}")).unwrap();
        assert_eq!(map.keys().next(), Some("k0"));
        assert_eq!(map.keys().last(), Some("k1999"));
        assert!((0..2000).all(|i| map.get(&format!("k{i}")) == Some(&i)));
    }

    #[test]
    fn player_record_accepts_both_field_spellings() {
        let a: PlayerRecord =
            serde_json::from_str(r#"{"nameJ":"山田","nameE":"Yamada","ids":["a","b"]}"#).unwrap();
        let b: PlayerRecord = serde_json::from_str(
            r#"{"localName":"山田","romanizedName":"Yamada","imageIds":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn category_toggle_flips() {
        assert_eq!(Category::Pitch.toggle(), Category::Bat);
        assert_eq!(Category::Bat.toggle(), Category::Pitch);
        assert_eq!(
            category_path(Path::new("data"), Category::Bat),
            PathBuf::from("data").join("bat.json")
        );
    }
}
