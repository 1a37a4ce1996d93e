use std::path::{Path, PathBuf};

use log::debug;

use crate::error::CatalogError;
use crate::filter::Filter;
use crate::item::{Category, Echelon, Item};

/// Locations of the three category files.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub consumables: PathBuf,
    pub trinkets: PathBuf,
    pub leveled: PathBuf,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        CatalogPaths {
            consumables: PathBuf::from("Consumables.json"),
            trinkets: PathBuf::from("Trinkets.json"),
            leveled: PathBuf::from("Leveled.json"),
        }
    }
}

/// The merged item catalog, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Load and merge the category files, tagging each record with its
    /// category. A file that does not exist is skipped; a file that exists
    /// but fails to parse is an error.
    pub fn load(paths: &CatalogPaths) -> Result<Catalog, CatalogError> {
        let mut items = Vec::new();
        for (path, category) in [
            (&paths.consumables, Category::Consumable),
            (&paths.trinkets, Category::Trinket),
            (&paths.leveled, Category::Leveled),
        ] {
            if !path.exists() {
                debug!("catalog file {} not found, skipping", path.display());
                continue;
            }
            items.extend(load_file(path, category)?);
        }
        Ok(Catalog { items })
    }

    /// Build a catalog from already-tagged records.
    pub fn from_items(items: Vec<Item>) -> Catalog {
        Catalog { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items passing the filter, in catalog order.
    pub fn filter(&self, filter: &Filter) -> Vec<&Item> {
        self.items.iter().filter(|it| filter.matches(it)).collect()
    }

    /// First item whose name matches, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|it| it.name.eq_ignore_ascii_case(name))
    }

    /// Sorted, deduplicated keyword vocabulary across the whole catalog.
    pub fn keywords(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .items
            .iter()
            .flat_map(|it| it.keywords.iter().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    /// Sorted, deduplicated echelons present in the catalog.
    pub fn echelons(&self) -> Vec<Echelon> {
        let mut all: Vec<Echelon> = self.items.iter().filter_map(|it| it.echelon).collect();
        all.sort();
        all.dedup();
        all
    }
}

fn load_file(path: &Path, category: Category) -> Result<Vec<Item>, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut items: Vec<Item> = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    for item in &mut items {
        item.category = Some(category);
    }
    debug!(
        "loaded {} {} items from {}",
        items.len(),
        category,
        path.display()
    );
    Ok(items)
}
