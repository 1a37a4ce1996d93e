use rand::seq::SliceRandom;

use crate::item::{Category, Echelon, Item};

/// Criteria for narrowing the catalog. Empty fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Case-insensitive substring over name, description, effect, and
    /// project prerequisite.
    pub query: Option<String>,
    pub categories: Vec<Category>,
    pub echelons: Vec<Echelon>,
    /// An item must carry every selected keyword.
    pub keywords: Vec<String>,
}

impl Filter {
    pub fn matches(&self, item: &Item) -> bool {
        if !self.categories.is_empty() {
            let Some(category) = item.category else {
                return false;
            };
            if !self.categories.contains(&category) {
                return false;
            }
        }
        if !self.echelons.is_empty() {
            let Some(echelon) = item.echelon else {
                return false;
            };
            if !self.echelons.contains(&echelon) {
                return false;
            }
        }
        if !has_keywords(item, &self.keywords) {
            return false;
        }
        match &self.query {
            Some(query) => text_match(item, query),
            None => true,
        }
    }
}

fn text_match(item: &Item, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [
        Some(item.name.as_str()),
        item.description.as_deref(),
        item.effect.as_deref(),
        item.project
            .as_ref()
            .and_then(|p| p.prerequisite.as_deref()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn has_keywords(item: &Item, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let carried: Vec<String> = item.keywords.iter().map(|k| k.to_lowercase()).collect();
    wanted
        .iter()
        .all(|kw| carried.contains(&kw.to_lowercase()))
}

/// Uniform random choice over a filtered result set.
pub fn pick_random<'a>(items: &[&'a Item]) -> Option<&'a Item> {
    items.choose(&mut rand::thread_rng()).copied()
}
