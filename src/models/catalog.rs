//! Wire types for the external movie catalog (TMDB).

use serde::{Deserialize, Serialize};

/// A movie as returned inside a catalog result page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage {
    pub page: u32,
    pub results: Vec<CatalogMovie>,
    pub total_pages: u32,
    pub total_results: u32,
}

/// A catalog genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogGenre {
    pub id: i64,
    pub name: String,
}

/// Response shape of the catalog's genre-list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<CatalogGenre>,
}

/// Full detail record for a single movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<CatalogGenre>,
    #[serde(default)]
    pub runtime: Option<i32>,
}
