use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use crate::store::RecordStore;

mod check;
mod loaders;
mod probe;
mod schema;

pub use check::{LIBRARY_SDL, SchemaError, check_schema, check_schema_against};
pub use probe::{ProbeSnapshot, ResolutionProbe};

use loaders::{AuthorById, BooksByAuthor};
use schema::{LibraryMutation, LibraryQuery};

pub type LibrarySchema = Schema<LibraryQuery, LibraryMutation, EmptySubscription>;

/// Path the GraphQL endpoint and the GraphiQL UI are served on.
pub const ENDPOINT: &str = "/graphql";

/// Builds the schema over `store`, counting relational resolutions in `probe`.
pub fn make_schema(store: Arc<RecordStore>, probe: Arc<ResolutionProbe>) -> LibrarySchema {
    // Loaders are uncached, each batch reads the store afresh and sees
    // records appended earlier in the same request.
    let books_by_author = DataLoader::new(BooksByAuthor::new(store.clone()), tokio::spawn);
    let author_by_id = DataLoader::new(AuthorById::new(store.clone()), tokio::spawn);

    Schema::build(LibraryQuery, LibraryMutation, EmptySubscription)
        .data(store)
        .data(probe)
        .data(books_by_author)
        .data(author_by_id)
        .finish()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(ENDPOINT).finish())
}

async fn execute(schema: &LibrarySchema, req: async_graphql::Request) -> GraphQLResponse {
    tracing::debug!(operation = ?req.operation_name, "executing request");

    let res = schema.execute(req).await;
    if res.is_err() {
        tracing::debug!(errors = ?res.errors, "request failed");
    }
    res.into()
}

/// Whether a raw query string carries a `query` parameter.
fn has_query_param(raw: &str) -> bool {
    raw.split('&').any(|pair| pair.split('=').next() == Some("query"))
}

/// Executes a GraphQL request sent as query string, or serves GraphiQL to a
/// bare GET.
#[axum::debug_handler]
async fn graphql_get(State(schema): State<LibrarySchema>, RawQuery(raw): RawQuery) -> Response {
    let Some(raw) = raw.filter(|raw| has_query_param(raw)) else {
        return graphiql().await.into_response();
    };
    match async_graphql::http::parse_query_string(&raw) {
        Ok(req) => execute(&schema, req).await.into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

#[axum::debug_handler]
async fn graphql_post(
    State(schema): State<LibrarySchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    execute(&schema, req.into_inner()).await
}

pub fn make_app(schema: LibrarySchema) -> Router {
    Router::new()
        .route(ENDPOINT, get(graphql_get).post(graphql_post))
        .with_state(schema)
}
