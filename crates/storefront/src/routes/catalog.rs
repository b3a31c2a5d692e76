//! Marketplace, vineyard and project listings.
//!
//! The marketplace and vineyard grids feed the cart. Their add buttons post
//! to `/cart/add`; the vineyard grid also sends its `vineyard_id`. Projects
//! are read-only here.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use vinea_core::{CatalogItem, Project, ProjectId, Vineyard, VineyardId};

use crate::catalog::{CatalogQuery, ProjectQuery};
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MarketplaceResponse {
    pub count: usize,
    pub wines: Vec<CatalogItem>,
}

#[derive(Debug, Serialize)]
pub struct VineyardResponse {
    pub vineyard: Vineyard,
    pub wines: Vec<CatalogItem>,
}

/// A project with its funding progress.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub funding_percentage: u8,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            funding_percentage: project.funding_percentage(),
            project: project.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub count: usize,
    pub projects: Vec<ProjectView>,
}

/// Marketplace grid, filtered by `search`, `region` and `type`.
#[instrument(skip(state))]
pub async fn marketplace(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<MarketplaceResponse> {
    let wines: Vec<CatalogItem> = state
        .catalog()
        .search(&query)
        .into_iter()
        .cloned()
        .collect();
    Json(MarketplaceResponse {
        count: wines.len(),
        wines,
    })
}

/// Vineyard detail with the wines its grid offers.
#[instrument(skip(state))]
pub async fn vineyard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VineyardResponse>> {
    let id = VineyardId::new(id);
    let catalog = state.catalog();
    let vineyard = catalog
        .vineyard(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("vineyard {id}")))?;
    let wines = catalog.wines_for_vineyard(&id).cloned().collect();
    Ok(Json(VineyardResponse { vineyard, wines }))
}

/// Project listing, filtered by `search` and `region`.
#[instrument(skip(state))]
pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Json<ProjectsResponse> {
    let projects: Vec<ProjectView> = state
        .catalog()
        .search_projects(&query)
        .into_iter()
        .map(ProjectView::from)
        .collect();
    Json(ProjectsResponse {
        count: projects.len(),
        projects,
    })
}

/// Project detail with its reward tiers.
#[instrument(skip(state))]
pub async fn project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectView>> {
    let id = ProjectId::new(id);
    state
        .catalog()
        .project(&id)
        .map(|project| Json(ProjectView::from(project)))
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))
}
