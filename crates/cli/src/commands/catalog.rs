//! Catalog browsing commands.

use std::fmt::Write as _;

use vinea_core::{CatalogItem, VineyardId};
use vinea_storefront::catalog::{Catalog, CatalogQuery, ProjectQuery};

use super::CliError;

fn wine_row(out: &mut String, wine: &CatalogItem) {
    let _ = writeln!(
        out,
        "{:>3}  {} ({})  {}  {} / {}  stock {}",
        wine.id.as_str(), wine.name, wine.year, wine.price, wine.wine_type, wine.region, wine.stock
    );
}

/// List marketplace wines matching the filters.
pub fn list(search: Option<String>, region: Option<String>, wine_type: Option<String>) -> String {
    let catalog = Catalog::sample();
    let query = CatalogQuery {
        search,
        region,
        wine_type,
    };
    let wines = catalog.search(&query);

    let mut out = String::new();
    for wine in &wines {
        wine_row(&mut out, wine);
    }
    let _ = write!(out, "{} wine(s)", wines.len());
    out
}

/// Show one vineyard and the wines on its page.
pub fn vineyard(id: &str) -> Result<String, CliError> {
    let catalog = Catalog::sample();
    let id = VineyardId::new(id);
    let vineyard = catalog
        .vineyard(&id)
        .ok_or_else(|| CliError::UnknownVineyard(id.to_string()))?;

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", vineyard.name, vineyard.region);
    let _ = writeln!(out, "{}", vineyard.description);
    let _ = writeln!(out);
    for wine in catalog.wines_for_vineyard(&id) {
        wine_row(&mut out, wine);
    }
    Ok(out.trim_end().to_string())
}

/// List investment projects with their funding progress.
pub fn projects(search: Option<String>, region: Option<String>) -> String {
    let catalog = Catalog::sample();
    let projects = catalog.search_projects(&ProjectQuery { search, region });

    let mut out = String::new();
    for project in &projects {
        let _ = writeln!(
            out,
            "{:>3}  {} ({})  {} / {}  {}%  {} days left",
            project.id.as_str(),
            project.title,
            project.location,
            project.current_funding,
            project.funding_goal,
            project.funding_percentage(),
            project.days_left
        );
    }
    let _ = write!(out, "{} project(s)", projects.len());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters() {
        let out = list(None, Some("Champagne".to_string()), None);
        assert!(out.contains("Dom Pérignon Vintage (2012)"));
        assert!(out.ends_with("1 wine(s)"));
    }

    #[test]
    fn test_vineyard_lists_its_wines() {
        let out = vineyard("4").unwrap();
        assert!(out.starts_with("Tenuta Italiana (Piémont, Italie)"));
        assert!(out.contains("Barolo Monfortino"));
        assert!(!out.contains("Pétrus"));
    }

    #[test]
    fn test_projects_show_progress() {
        let out = projects(None, Some("bordeaux".to_string()));
        assert!(out.contains("(Bordeaux, France)"));
        assert!(out.contains("65%"));
        assert!(out.ends_with("1 project(s)"));
    }

    #[test]
    fn test_unknown_vineyard() {
        assert!(matches!(vineyard("99"), Err(CliError::UnknownVineyard(_))));
    }
}
