use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::movie::Movie;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A call the UI wants made against the catalogue backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchRequest {
    Range { start: usize, end: usize },
    Search { query: String, limit: usize },
    Movie(i64),
    Insert(Movie),
    Update(Movie),
    Delete(i64),
    HealthCheck,
}

/// Outcome of a [`FetchRequest`], with errors flattened to their message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchResponse {
    Range(Result<Vec<Movie>, String>),
    Search(Result<Vec<Movie>, String>),
    Movie(Result<Movie, String>),
    Inserted(Result<(), String>),
    Updated(Movie, Result<(), String>),
    Deleted(i64, Result<(), String>),
    Health(Result<(), String>),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {route} failed: {source}")]
    Transport {
        route: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{route} answered with status {status}")]
    Status { route: String, status: StatusCode },
    #[error("could not decode the answer from {route}: {source}")]
    Decode {
        route: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchRequest {
    pub fn method(&self) -> Method {
        match self {
            FetchRequest::Range { .. }
            | FetchRequest::Search { .. }
            | FetchRequest::Movie(_)
            | FetchRequest::HealthCheck => Method::GET,
            FetchRequest::Insert(_) | FetchRequest::Update(_) | FetchRequest::Delete(_) => {
                Method::POST
            }
        }
    }

    pub fn route(&self) -> String {
        match self {
            FetchRequest::Range { start, end } => format!("/movies/get/range/{start}/{end}"),
            FetchRequest::Search { query, limit } => {
                format!("/movies/search/{}/{limit}", urlencoding::encode(query))
            }
            FetchRequest::Movie(id) => format!("/movies/get/{id}"),
            FetchRequest::Insert(_) => "/movies/ins".to_string(),
            FetchRequest::Update(movie) => format!("/movies/upd/{}", movie.id),
            FetchRequest::Delete(id) => format!("/movies/del/{id}"),
            FetchRequest::HealthCheck => "/health_check".to_string(),
        }
    }

    pub fn loading_message(&self) -> &'static str {
        match self {
            FetchRequest::Range { .. } => "Fetching movies...",
            FetchRequest::Search { .. } => "Searching...",
            FetchRequest::Movie(_) => "Refreshing movie...",
            FetchRequest::Insert(_) => "Adding movie...",
            FetchRequest::Update(_) => "Saving movie...",
            FetchRequest::Delete(_) => "Deleting movie...",
            FetchRequest::HealthCheck => "Contacting backend...",
        }
    }

    pub fn is_mutation(&self) -> bool {
        self.method() == Method::POST
    }
}

/// Thin client over the movie routes. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct MovieApi {
    client: Client,
    base_url: String,
}

impl MovieApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn execute(&self, request: FetchRequest) -> FetchResponse {
        match request {
            FetchRequest::Range { start, end } => {
                FetchResponse::Range(self.fetch_range(start, end).await.map_err(flatten))
            }
            FetchRequest::Search { query, limit } => {
                FetchResponse::Search(self.search(&query, limit).await.map_err(flatten))
            }
            FetchRequest::Movie(id) => FetchResponse::Movie(self.fetch(id).await.map_err(flatten)),
            FetchRequest::Insert(movie) => {
                FetchResponse::Inserted(self.insert(&movie).await.map_err(flatten))
            }
            FetchRequest::Update(movie) => {
                let result = self.update(&movie).await.map_err(flatten);
                FetchResponse::Updated(movie, result)
            }
            FetchRequest::Delete(id) => {
                FetchResponse::Deleted(id, self.delete(id).await.map_err(flatten))
            }
            FetchRequest::HealthCheck => {
                FetchResponse::Health(self.health_check().await.map_err(flatten))
            }
        }
    }

    pub async fn fetch_range(&self, start: usize, end: usize) -> Result<Vec<Movie>, ApiError> {
        let route = FetchRequest::Range { start, end }.route();
        let response = self.send(&route, self.client.get(self.url(&route))).await?;
        decode(&route, response).await
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Movie>, ApiError> {
        let route = FetchRequest::Search {
            query: query.to_string(),
            limit,
        }
        .route();
        let response = self.send(&route, self.client.get(self.url(&route))).await?;
        decode(&route, response).await
    }

    pub async fn fetch(&self, id: i64) -> Result<Movie, ApiError> {
        let route = FetchRequest::Movie(id).route();
        let response = self.send(&route, self.client.get(self.url(&route))).await?;
        decode(&route, response).await
    }

    pub async fn insert(&self, movie: &Movie) -> Result<(), ApiError> {
        let route = "/movies/ins";
        let request = self.client.post(self.url(route)).json(&movie.body());
        self.send(route, request).await.map(drop)
    }

    pub async fn update(&self, movie: &Movie) -> Result<(), ApiError> {
        let route = format!("/movies/upd/{}", movie.id);
        let request = self.client.post(self.url(&route)).json(&movie.body());
        self.send(&route, request).await.map(drop)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let route = FetchRequest::Delete(id).route();
        let request = self.client.post(self.url(&route));
        self.send(&route, request).await.map(drop)
    }

    pub async fn health_check(&self) -> Result<(), ApiError> {
        let route = FetchRequest::HealthCheck.route();
        self.send(&route, self.client.get(self.url(&route)))
            .await
            .map(drop)
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    async fn send(&self, route: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!(route, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            route: route.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                route: route.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    route: &str,
    response: Response,
) -> Result<T, ApiError> {
    response.json().await.map_err(|source| ApiError::Decode {
        route: route.to_string(),
        source,
    })
}

fn flatten(err: ApiError) -> String {
    err.to_string()
}
