//! Wine catalog and the grids that sell from it.
//!
//! The catalog is a read-only data source. Two grids offer "add to cart":
//! the marketplace, which shows every wine, and a vineyard detail page, which
//! shows only that estate's wines. Each grid resolves IDs against what it
//! displays, so an ID outside the grid never reaches the cart store.
//!
//! Vineyard funding projects are listed from the same source. They never
//! touch the cart.

mod sample;

use serde::Deserialize;

use vinea_core::{CatalogItem, CatalogItemId, Project, ProjectId, Vineyard, VineyardId};

use crate::cart::{CartStore, CartUpdate};

/// Filters for the marketplace listing.
///
/// Every field is optional; `None`, an empty string or `"all"` means
/// "no constraint". Matching is case-insensitive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Free text matched against name, description and region.
    pub search: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "type")]
    pub wine_type: Option<String>,
}

impl CatalogQuery {
    fn matches(&self, item: &CatalogItem) -> bool {
        let text_ok = constraint(self.search.as_deref()).is_none_or(|needle| {
            [&item.name, &item.description, &item.region]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });
        let region_ok = constraint(self.region.as_deref())
            .is_none_or(|region| item.region.to_lowercase() == region);
        let type_ok = constraint(self.wine_type.as_deref())
            .is_none_or(|wine_type| item.wine_type.to_lowercase() == wine_type);

        text_ok && region_ok && type_ok
    }
}

/// Filters for the project listing, with the same "empty or `all`" rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    /// Free text matched against title, description and location.
    pub search: Option<String>,
    /// Region key, e.g. `bordeaux` or `italie`.
    pub region: Option<String>,
}

impl ProjectQuery {
    fn matches(&self, project: &Project) -> bool {
        let text_ok = constraint(self.search.as_deref()).is_none_or(|needle| {
            [&project.title, &project.description, &project.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });
        let region_ok = constraint(self.region.as_deref())
            .is_none_or(|region| project.region.to_lowercase() == region);

        text_ok && region_ok
    }
}

fn constraint(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase)
}

/// In-memory wines, vineyards and projects.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    wines: Vec<CatalogItem>,
    vineyards: Vec<Vineyard>,
    projects: Vec<Project>,
}

impl Catalog {
    #[must_use]
    pub const fn new(
        wines: Vec<CatalogItem>,
        vineyards: Vec<Vineyard>,
        projects: Vec<Project>,
    ) -> Self {
        Self {
            wines,
            vineyards,
            projects,
        }
    }

    /// The marketplace sample catalog.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(sample::wines(), sample::vineyards(), sample::projects())
    }

    #[must_use]
    pub fn wines(&self) -> &[CatalogItem] {
        &self.wines
    }

    #[must_use]
    pub fn vineyards(&self) -> &[Vineyard] {
        &self.vineyards
    }

    #[must_use]
    pub fn find(&self, id: &CatalogItemId) -> Option<&CatalogItem> {
        self.wines.iter().find(|wine| &wine.id == id)
    }

    #[must_use]
    pub fn vineyard(&self, id: &VineyardId) -> Option<&Vineyard> {
        self.vineyards.iter().find(|v| &v.id == id)
    }

    /// Wines shown on a vineyard's detail page.
    pub fn wines_for_vineyard<'a>(
        &'a self,
        id: &'a VineyardId,
    ) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.wines.iter().filter(move |wine| &wine.vineyard_id == id)
    }

    /// Marketplace listing filtered by `query`, in catalog order.
    #[must_use]
    pub fn search(&self, query: &CatalogQuery) -> Vec<&CatalogItem> {
        self.wines.iter().filter(|wine| query.matches(wine)).collect()
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Project listing filtered by `query`, in catalog order.
    #[must_use]
    pub fn search_projects(&self, query: &ProjectQuery) -> Vec<&Project> {
        self.projects.iter().filter(|p| query.matches(p)).collect()
    }
}

/// A grid that can add wines to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// The marketplace grid: every wine in the catalog.
    Marketplace,
    /// A vineyard detail grid: only that vineyard's wines.
    Vineyard(VineyardId),
}

impl EntryPoint {
    /// Find `id` among the wines this grid displays.
    #[must_use]
    pub fn resolve<'a>(&self, catalog: &'a Catalog, id: &CatalogItemId) -> Option<&'a CatalogItem> {
        let wine = catalog.find(id)?;
        match self {
            Self::Marketplace => Some(wine),
            Self::Vineyard(vineyard) => (&wine.vineyard_id == vineyard).then_some(wine),
        }
    }

    /// Resolve `id` and forward it to the store.
    ///
    /// Returns `None`, without touching the store, if this grid does not show
    /// `id`.
    pub fn add_to_cart(
        &self,
        store: &CartStore,
        catalog: &Catalog,
        id: &CatalogItemId,
        quantity: u32,
    ) -> Option<(CatalogItem, CartUpdate)> {
        let Some(wine) = self.resolve(catalog, id) else {
            tracing::debug!(wine_id = %id, entry_point = ?self, "add to cart for wine not in grid");
            return None;
        };
        let update = store.add_item(wine, quantity);
        Some((wine.clone(), update))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cart::{DEFAULT_CART_SLOT, MemoryStorage, SlotStorage};

    fn ids(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|w| w.id.to_string()).collect()
    }

    #[test]
    fn test_sample_catalog_shape() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.wines().len(), 8);
        assert_eq!(catalog.vineyards().len(), 4);

        let margaux = catalog.find(&CatalogItemId::new("1")).unwrap();
        assert_eq!(margaux.name, "Château Margaux Grand Cru");
        assert_eq!(margaux.year, 2015);

        for vineyard in catalog.vineyards() {
            let count = catalog.wines_for_vineyard(&vineyard.id).count();
            assert_eq!(u32::try_from(count).unwrap(), vineyard.wine_count);
        }
    }

    #[test]
    fn test_search_free_text() {
        let catalog = Catalog::sample();
        let query = CatalogQuery {
            search: Some("MERLOT".to_string()),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&catalog.search(&query)), ["6", "8"]);
    }

    #[test]
    fn test_search_region_and_type() {
        let catalog = Catalog::sample();
        let query = CatalogQuery {
            search: None,
            region: Some("bordeaux".to_string()),
            wine_type: Some("Blanc".to_string()),
        };
        assert_eq!(ids(&catalog.search(&query)), ["3"]);
    }

    #[test]
    fn test_all_means_unconstrained() {
        let catalog = Catalog::sample();
        let query = CatalogQuery {
            search: Some("  ".to_string()),
            region: Some("all".to_string()),
            wine_type: Some("ALL".to_string()),
        };
        assert_eq!(catalog.search(&query).len(), 8);
    }

    fn project_ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_project_search_matches_location() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.projects().len(), 6);

        let query = ProjectQuery {
            search: Some("france".to_string()),
            region: None,
        };
        assert_eq!(project_ids(&catalog.search_projects(&query)), ["1", "5", "6"]);

        let query = ProjectQuery {
            search: Some("Malbec".to_string()),
            region: Some("all".to_string()),
        };
        assert_eq!(project_ids(&catalog.search_projects(&query)), ["4"]);
    }

    #[test]
    fn test_project_region_filter() {
        let catalog = Catalog::sample();
        let query = ProjectQuery {
            search: None,
            region: Some("Italie".to_string()),
        };
        assert_eq!(project_ids(&catalog.search_projects(&query)), ["2"]);

        let query = ProjectQuery {
            search: Some("bio".to_string()),
            region: Some("bordeaux".to_string()),
        };
        assert!(catalog.search_projects(&query).is_empty());
    }

    #[test]
    fn test_project_lookup() {
        let catalog = Catalog::sample();
        let heritage = catalog.project(&ProjectId::new("1")).unwrap();
        assert_eq!(heritage.funding_percentage(), 65);
        assert_eq!(heritage.rewards.len(), 5);
        assert!(catalog.project(&ProjectId::new("42")).is_none());
    }

    #[test]
    fn test_vineyard_grid_only_resolves_its_wines() {
        let catalog = Catalog::sample();
        let bordeaux = EntryPoint::Vineyard(VineyardId::new("1"));

        assert!(bordeaux.resolve(&catalog, &CatalogItemId::new("8")).is_some());
        assert!(bordeaux.resolve(&catalog, &CatalogItemId::new("2")).is_none());
        assert!(
            EntryPoint::Marketplace
                .resolve(&catalog, &CatalogItemId::new("2"))
                .is_some()
        );
    }

    #[test]
    fn test_unknown_id_never_reaches_store() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::open(Arc::clone(&storage) as Arc<dyn SlotStorage>, DEFAULT_CART_SLOT);
        let catalog = Catalog::sample();

        let added = EntryPoint::Marketplace.add_to_cart(
            &store,
            &catalog,
            &CatalogItemId::new("999"),
            1,
        );
        assert!(added.is_none());
        assert!(storage.get(DEFAULT_CART_SLOT).unwrap().is_none());
    }

    #[test]
    fn test_both_grids_feed_the_same_cart() {
        let store = CartStore::open(Arc::new(MemoryStorage::new()), DEFAULT_CART_SLOT);
        let catalog = Catalog::sample();
        let id = CatalogItemId::new("1");

        let (wine, _) = EntryPoint::Marketplace
            .add_to_cart(&store, &catalog, &id, 1)
            .unwrap();
        assert_eq!(wine.year, 2015);

        let (_, update) = EntryPoint::Vineyard(VineyardId::new("1"))
            .add_to_cart(&store, &catalog, &id, 1)
            .unwrap();
        assert_eq!(update.cart.len(), 1);
        assert_eq!(update.cart.find(&id).unwrap().quantity(), 2);
    }
}
