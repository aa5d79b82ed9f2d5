//! API reference pages
//!
//! One page per API area. The route accepts exactly the areas listed in
//! [`Area::ALL`]; any other value is a not-found condition. Rendering is a
//! pure function of the area and the reference configuration.

use crate::config::ReferenceConfig;
use crate::core::error::{LinkModuleError, PageError};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// An API area with its own reference page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Admin,
    Store,
}

impl Area {
    /// Every area, in the order pages are generated
    pub const ALL: [Area; 2] = [Area::Admin, Area::Store];

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Admin => "admin",
            Area::Store => "store",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| PageError::UnknownArea {
                area: s.to_string(),
            })
    }
}

/// Route parameters of one statically generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticParams {
    pub area: Area,
}

/// The parameters of every page to generate: admin, then store
pub fn generate_static_params() -> Vec<StaticParams> {
    Area::ALL.into_iter().map(|area| StaticParams { area }).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_base: Option<String>,
}

/// Page metadata for an area
pub fn generate_metadata(area: Area, config: &ReferenceConfig) -> PageMetadata {
    PageMetadata {
        title: format!("Medusa {} API Reference", capitalize(area.as_str())),
        description: format!(
            "REST API reference for the Medusa {} API. This reference includes code snippets and examples for Medusa JS Client and cURL.",
            area
        ),
        metadata_base: config.base_url.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub area: Area,
    pub metadata: PageMetadata,
    pub markup: String,
}

const ADMIN_CONTENT: &str = r#"<article class="content" data-content="admin">
<p>This API reference includes the admin APIs. Use them to build an admin dashboard or manage the store from a custom integration.</p>
<h3>Authentication</h3>
<p>Admin routes require an authenticated user, either through a cookie session or a bearer token.</p>
</article>"#;

const STORE_CONTENT: &str = r#"<article class="content" data-content="store">
<p>This API reference includes the store APIs. Use them to build a storefront or any customer-facing experience.</p>
<h3>Publishable API Keys</h3>
<p>Store routes require a publishable API key passed in the x-publishable-api-key header.</p>
</article>"#;

const CLIENT_LIBRARIES: &str = r#"<article class="content" data-content="client-libraries">
<h3>Client Libraries</h3>
<pre><code>npm install @medusajs/js-sdk</code></pre>
<p>Every route includes examples for the JS Client and cURL.</p>
</article>"#;

fn main_content(area: Area) -> &'static str {
    match area {
        Area::Admin => ADMIN_CONTENT,
        Area::Store => STORE_CONTENT,
    }
}

/// Render the reference page of an area
pub fn render(area: Area, config: &ReferenceConfig) -> RenderedPage {
    let metadata = generate_metadata(area, config);

    let markup = format!(
        concat!(
            r#"<div class="area-provider" data-area="{area}">"#,
            r#"<h2 class="page-heading block lg:hidden">{title}</h2>"#,
            r#"<div class="divided-layout flex-col-reverse">"#,
            r#"<main class="divided-main"><section>"#,
            r#"<h2 class="page-heading hidden lg:block">{title}</h2>"#,
            "{content}",
            "</section></main>",
            r#"<aside class="divided-code">{code}</aside>"#,
            "</div>",
            r#"<nav class="tags" data-area="{area}"></nav>"#,
            "</div>"
        ),
        area = area,
        title = metadata.title,
        content = main_content(area),
        code = CLIENT_LIBRARIES,
    );

    RenderedPage {
        area,
        metadata,
        markup,
    }
}

/// Render the page for a raw route parameter
pub fn render_param(area: &str, config: &ReferenceConfig) -> Result<RenderedPage, PageError> {
    Ok(render(area.parse()?, config))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn reference_page(
    State(config): State<Arc<ReferenceConfig>>,
    Path(area): Path<String>,
) -> Result<Html<String>, LinkModuleError> {
    let page = render_param(&area, &config)?;
    Ok(Html(format!(
        "<!doctype html><html><head><title>{}</title><meta name=\"description\" content=\"{}\"></head><body>{}</body></html>",
        page.metadata.title, page.metadata.description, page.markup
    )))
}

async fn reference_metadata(
    State(config): State<Arc<ReferenceConfig>>,
    Path(area): Path<String>,
) -> Result<Json<PageMetadata>, LinkModuleError> {
    let area: Area = area.parse()?;
    Ok(Json(generate_metadata(area, &config)))
}

async fn static_params() -> Json<Vec<StaticParams>> {
    Json(generate_static_params())
}

/// Routes for the reference pages
///
/// - GET /api/static-params
/// - GET /api/{area}/v2
/// - GET /api/{area}/v2/metadata
pub fn reference_routes(config: ReferenceConfig) -> Router {
    Router::new()
        .route("/api/static-params", get(static_params))
        .route("/api/{area}/v2", get(reference_page))
        .route("/api/{area}/v2/metadata", get(reference_metadata))
        .with_state(Arc::new(config))
}
