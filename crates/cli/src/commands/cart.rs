//! Cart commands.
//!
//! Every command opens the store on the configured slot, so it sees what the
//! storefront last persisted there.

use std::fmt::Write as _;
use std::sync::Arc;

use vinea_core::CatalogItemId;
use vinea_storefront::cart::{
    CartPanel, CartStore, CartUpdate, CheckoutResult, FileStorage, InstantCheckout,
};
use vinea_storefront::catalog::{Catalog, EntryPoint};
use vinea_storefront::config::StorefrontConfig;
use vinea_storefront::notice::{Locale, Notice};

use super::CliError;

/// A store and catalog opened for one command.
pub struct CartContext {
    store: CartStore,
    catalog: Catalog,
    locale: Locale,
}

impl CartContext {
    pub fn open(config: &StorefrontConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::with_store(
            CartStore::open(storage, config.cart_slot.clone()),
            config.locale,
        )
    }

    pub fn with_store(store: CartStore, locale: Locale) -> Self {
        Self {
            store,
            catalog: Catalog::sample(),
            locale,
        }
    }

    pub fn show(&self) -> String {
        render(&CartPanel::new(&self.store.load(), self.locale), &[])
    }

    pub fn add(
        &self,
        wine_id: &str,
        quantity: u32,
        vineyard: Option<String>,
    ) -> Result<String, CliError> {
        let entry = vineyard.map_or(EntryPoint::Marketplace, |id| {
            EntryPoint::Vineyard(id.into())
        });
        let id = CatalogItemId::new(wine_id);
        let (wine, update) = entry
            .add_to_cart(&self.store, &self.catalog, &id, quantity)
            .ok_or_else(|| CliError::UnknownWine(wine_id.to_string()))?;
        let notice = Notice::item_added(&wine.name, wine.year, self.locale);
        Ok(self.after(&update, Some(notice)))
    }

    pub fn update(&self, wine_id: &str, delta: i64) -> String {
        let update = self
            .store
            .update_quantity(&CatalogItemId::new(wine_id), delta);
        self.after(&update, None)
    }

    pub fn remove(&self, wine_id: &str) -> String {
        let update = self.store.remove_item(&CatalogItemId::new(wine_id));
        let notice = update.changed.then(|| Notice::item_removed(self.locale));
        self.after(&update, notice)
    }

    pub fn clear(&self) -> String {
        let update = self.store.clear();
        let notice = update.changed.then(|| Notice::cart_cleared(self.locale));
        self.after(&update, notice)
    }

    pub fn checkout(&self) -> Result<String, CliError> {
        match self.store.checkout(&InstantCheckout) {
            CheckoutResult::Placed {
                confirmation,
                write_error,
            } => {
                let mut notices = vec![Notice::order_placed(self.locale)];
                if let Some(e) = write_error {
                    tracing::warn!(error = %e, "order placed but empty cart not saved");
                    notices.push(Notice::save_failed(self.locale));
                }
                let mut out = render_notices(&notices);
                let _ = write!(
                    out,
                    "Order {}: {} bottle(s), {}",
                    confirmation.order_id,
                    confirmation.item_count,
                    confirmation.totals.total
                );
                Ok(out)
            }
            CheckoutResult::Failed(failure) => Err(CliError::Checkout(failure)),
        }
    }

    fn after(&self, update: &CartUpdate, notice: Option<Notice>) -> String {
        let mut notices: Vec<Notice> = notice.into_iter().collect();
        if update.write_error.is_some() {
            notices.push(Notice::save_failed(self.locale));
        }
        render(&CartPanel::new(&update.cart, self.locale), &notices)
    }
}

fn render_notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let _ = writeln!(out, "* {}: {}", notice.title, notice.description);
    }
    out
}

fn render(panel: &CartPanel, notices: &[Notice]) -> String {
    let mut out = render_notices(notices);
    let _ = writeln!(out, "{} - {}", panel.title, panel.description);
    for line in &panel.lines {
        let _ = writeln!(
            out,
            "  {:>3}  {} ({})  {} x {} = {}",
            line.id, line.name, line.year, line.quantity, line.unit_price, line.line_price
        );
    }
    let _ = writeln!(out, "{}: {}", panel.labels.subtotal, panel.subtotal);
    let _ = writeln!(out, "{}: {}", panel.labels.shipping, panel.shipping_fee);
    let _ = write!(out, "{}: {}", panel.labels.total, panel.total);
    out
}
