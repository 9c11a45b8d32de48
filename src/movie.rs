use serde::{Deserialize, Serialize};

/// A movie as served by the catalogue backend.
///
/// `id` is assigned by the backend; records built on the client carry `0`
/// until the backend has stored them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub popularity: f64,
    pub vote_average: f64,
    pub release_date: String,
    pub genres: String,
    pub keywords: String,
    pub budget: i64,
    pub revenue: i64,
    pub vote_count: i64,
    pub overview: String,
}

/// Request body for create and update calls: every field but the id.
#[derive(Debug, Serialize)]
pub struct MovieBody<'a> {
    pub title: &'a str,
    pub popularity: f64,
    pub vote_average: f64,
    pub release_date: &'a str,
    pub genres: &'a str,
    pub keywords: &'a str,
    pub budget: i64,
    pub revenue: i64,
    pub vote_count: i64,
    pub overview: &'a str,
}

impl Movie {
    pub fn body(&self) -> MovieBody<'_> {
        MovieBody {
            title: &self.title,
            popularity: self.popularity,
            vote_average: self.vote_average,
            release_date: &self.release_date,
            genres: &self.genres,
            keywords: &self.keywords,
            budget: self.budget,
            revenue: self.revenue,
            vote_count: self.vote_count,
            overview: &self.overview,
        }
    }

    pub fn same_record(&self, other: &Movie) -> bool {
        self.id == other.id
    }
}

/// Columns of the movie table, in display order.
pub const COLUMNS: [Column; 10] = [
    Column::Title,
    Column::Popularity,
    Column::VoteAverage,
    Column::ReleaseDate,
    Column::Genres,
    Column::Keywords,
    Column::Budget,
    Column::Revenue,
    Column::VoteCount,
    Column::Overview,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Popularity,
    VoteAverage,
    ReleaseDate,
    Genres,
    Keywords,
    Budget,
    Revenue,
    VoteCount,
    Overview,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Popularity => "Popularity",
            Column::VoteAverage => "Vote Average",
            Column::ReleaseDate => "Release Date",
            Column::Genres => "Genres",
            Column::Keywords => "Keywords",
            Column::Budget => "Budget",
            Column::Revenue => "Revenue",
            Column::VoteCount => "Vote Count",
            Column::Overview => "Overview",
        }
    }

    pub fn cell(self, movie: &Movie) -> String {
        match self {
            Column::Title => movie.title.clone(),
            Column::Popularity => format_decimal(movie.popularity),
            Column::VoteAverage => format_decimal(movie.vote_average),
            Column::ReleaseDate => movie.release_date.clone(),
            Column::Genres => movie.genres.clone(),
            Column::Keywords => movie.keywords.clone(),
            Column::Budget => format_thousands(movie.budget),
            Column::Revenue => format_thousands(movie.revenue),
            Column::VoteCount => movie.vote_count.to_string(),
            Column::Overview => movie.overview.clone(),
        }
    }
}

/// Renders a float without a trailing `.0` for whole numbers.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
