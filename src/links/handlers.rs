//! HTTP handlers for link operations
//!
//! Links are addressed by any of their aliases or by their service name.
//! Modules are addressed by their service name (e.g. "stock_location").

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use indexmap::IndexMap;
use serde::Serialize;

use crate::core::error::{LinkError, LinkModuleError, LinkResult};
use crate::core::link::{LinkName, LinkRow};
use crate::core::module::ModuleName;
use crate::links::compiler::{CascadeRule, CompiledLink, Endpoint, JoinTableSchema, ReverseNavigation};
use crate::links::service::{CascadeReport, LinkRuntime, Navigation};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: LinkRuntime,
}

/// Introspection view of a compiled link
#[derive(Debug, Serialize)]
pub struct LinkSummary<'a> {
    pub service_name: LinkName,
    pub aliases: Vec<&'a str>,
    pub schema: &'a JoinTableSchema,
    pub endpoints: &'a [Endpoint; 2],
    pub cascades: &'a [CascadeRule],
    pub navigations: &'a [ReverseNavigation],
}

impl<'a> From<&'a CompiledLink> for LinkSummary<'a> {
    fn from(compiled: &'a CompiledLink) -> Self {
        Self {
            service_name: compiled.name(),
            aliases: compiled.definition.alias_names().collect(),
            schema: &compiled.schema,
            endpoints: &compiled.endpoints,
            cascades: &compiled.cascades,
            navigations: &compiled.navigations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListRowsResponse {
    pub link: LinkName,
    pub rows: Vec<LinkRow>,
    pub count: usize,
}

fn parse_module(name: &str) -> LinkResult<ModuleName> {
    name.parse().map_err(|_| {
        LinkError::UnknownModule {
            name: name.to_string(),
        }
        .into()
    })
}

/// List every compiled link and the modules registered in this process
///
/// GET /links
pub async fn list_links(State(state): State<AppState>) -> Json<serde_json::Value> {
    let registry = state.runtime.registry();
    let links: Vec<LinkSummary<'_>> = registry.links().map(LinkSummary::from).collect();
    let count = links.len();
    Json(serde_json::json!({
        "links": links,
        "count": count,
        "modules": registry.modules(),
    }))
}

/// Describe one link
///
/// GET /links/{link}
pub async fn get_link(
    State(state): State<AppState>,
    Path(link): Path<String>,
) -> LinkResult<Json<serde_json::Value>> {
    let compiled = state.runtime.link(&link)?;
    let summary = serde_json::to_value(LinkSummary::from(compiled))
        .map_err(|e| LinkModuleError::Internal(e.to_string()))?;
    Ok(Json(summary))
}

/// GET /links/{link}/rows
pub async fn list_rows(
    State(state): State<AppState>,
    Path(link): Path<String>,
) -> LinkResult<Json<ListRowsResponse>> {
    let name = state.runtime.link(&link)?.name();
    let rows = state.runtime.rows(name).await?;
    Ok(Json(ListRowsResponse {
        link: name,
        count: rows.len(),
        rows,
    }))
}

/// Create an association row
///
/// POST /links/{link}/rows with body `{ "<module>": "<entity id>", ... }`
pub async fn create_row(
    State(state): State<AppState>,
    Path(link): Path<String>,
    Json(body): Json<IndexMap<String, String>>,
) -> LinkResult<(StatusCode, Json<LinkRow>)> {
    let mut entities = IndexMap::new();
    for (module, id) in body {
        let module = module.parse::<ModuleName>().map_err(|e| LinkError::InvalidRequest {
            message: e.to_string(),
        })?;
        entities.insert(module, id);
    }

    let row = state.runtime.create(&link, &entities).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /links/{link}/rows/{row_id}
pub async fn get_row(
    State(state): State<AppState>,
    Path((link, row_id)): Path<(String, String)>,
) -> LinkResult<Json<LinkRow>> {
    Ok(Json(state.runtime.get(&link, &row_id).await?))
}

/// DELETE /links/{link}/rows/{row_id}
pub async fn dismiss_row(
    State(state): State<AppState>,
    Path((link, row_id)): Path<(String, String)>,
) -> LinkResult<StatusCode> {
    state.runtime.dismiss(&link, &row_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Notify the runtime that an entity was deleted
///
/// DELETE /modules/{module}/entities/{entity_id}
pub async fn delete_entity(
    State(state): State<AppState>,
    Path((module, entity_id)): Path<(String, String)>,
) -> LinkResult<Json<CascadeReport>> {
    let module = parse_module(&module)?;
    Ok(Json(
        state.runtime.on_entity_deleted(module, &entity_id).await?,
    ))
}

/// GET /modules/{module}/fields
pub async fn list_fields(
    State(state): State<AppState>,
    Path(module): Path<String>,
) -> LinkResult<Json<Vec<ReverseNavigation>>> {
    let module = parse_module(&module)?;
    Ok(Json(
        state
            .runtime
            .registry()
            .navigations_for(module)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

/// GET /modules/{module}/entities/{entity_id}/{field}
pub async fn navigate(
    State(state): State<AppState>,
    Path((module, entity_id, field)): Path<(String, String, String)>,
) -> LinkResult<Json<Navigation>> {
    let module = parse_module(&module)?;
    Ok(Json(
        state.runtime.navigate(module, &entity_id, &field).await?,
    ))
}
