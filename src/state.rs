//! State of the main view.
//!
//! [`Deck`] is the only place the page, the search term, the selection and
//! the overlay flags live. Components read it, and the app loop feeds every
//! [`Action`] through [`Deck::apply`], which answers with the backend calls
//! the transition requires.

use std::ops::Range;

use tracing::{debug, error, info, warn};

use crate::{
    action::Action,
    api::{FetchRequest, FetchResponse},
    app::Mode,
    movie::Movie,
};

pub const ENTRY_CHOICES: [usize; 3] = [10, 20, 30];
pub const DEFAULT_ENTRIES: usize = 20;

pub const ADD_FAILED: &str = "Failed to add movie. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update movie. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete movie. Please try again.";

/// Half-open offset range of `page` when showing `entries` rows per page.
pub fn page_range(page: usize, entries: usize) -> Range<usize> {
    let start = page * entries;
    start..start + entries
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Overlays {
    pub edit: bool,
    pub add: bool,
    pub delete: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    #[default]
    Unknown,
    Online,
    Offline,
}

#[derive(Debug)]
pub struct Deck {
    page: usize,
    entries: usize,
    search: String,
    searching: bool,
    movies: Vec<Movie>,
    search_results: Vec<Movie>,
    selected: Option<Movie>,
    detail: Option<Movie>,
    overlays: Overlays,
    submitting: Overlays,
    alert: Option<&'static str>,
    pending: usize,
    loading_message: &'static str,
    health: Health,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES)
    }
}

impl Deck {
    pub fn new(entries: usize) -> Self {
        Self {
            page: 0,
            entries: entries.max(1),
            search: String::new(),
            searching: false,
            movies: Vec::new(),
            search_results: Vec::new(),
            selected: None,
            detail: None,
            overlays: Overlays::default(),
            submitting: Overlays::default(),
            alert: None,
            pending: 0,
            loading_message: "",
            health: Health::Unknown,
        }
    }

    /// Requests issued once when the view comes up.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        let requests = vec![self.fetch_page(), FetchRequest::HealthCheck];
        self.track(&requests);
        requests
    }

    pub fn apply(&mut self, action: &Action) -> Vec<FetchRequest> {
        if let Action::Fetched(_) = action {
            self.pending = self.pending.saturating_sub(1);
        }
        let requests = self.reduce(action);
        self.track(&requests);
        requests
    }

    fn track(&mut self, requests: &[FetchRequest]) {
        self.pending += requests.len();
        if let Some(last) = requests.last() {
            self.loading_message = last.loading_message();
        }
    }

    fn reduce(&mut self, action: &Action) -> Vec<FetchRequest> {
        match action {
            Action::NextPage if !self.is_search_mode() => {
                self.page += 1;
                vec![self.fetch_page()]
            }
            Action::PrevPage if !self.is_search_mode() && self.page > 0 => {
                self.page -= 1;
                vec![self.fetch_page()]
            }
            Action::CycleEntries => {
                let next = ENTRY_CHOICES
                    .iter()
                    .copied()
                    .find(|choice| *choice > self.entries)
                    .unwrap_or(ENTRY_CHOICES[0]);
                self.set_entries(next)
            }
            Action::SetEntries(entries) => self.set_entries(*entries),

            Action::FocusSearch => {
                self.searching = true;
                Vec::new()
            }
            Action::CancelSearch => {
                self.searching = false;
                Vec::new()
            }
            Action::SubmitSearch(query) => {
                if query.trim().is_empty() {
                    return Vec::new();
                }
                self.searching = false;
                self.search = query.clone();
                vec![self.search_request()]
            }
            Action::ClearSearch => {
                self.searching = false;
                self.search.clear();
                Vec::new()
            }

            Action::ToggleMovie(movie) => {
                self.toggle(movie);
                Vec::new()
            }

            Action::OpenAddForm => {
                self.overlays.add = true;
                Vec::new()
            }
            Action::CloseAddForm => {
                self.overlays.add = false;
                Vec::new()
            }
            Action::OpenEditForm => {
                if self.selected.is_some() {
                    self.overlays.edit = true;
                }
                Vec::new()
            }
            Action::CloseEditForm => {
                self.overlays.edit = false;
                Vec::new()
            }
            Action::OpenDeleteDialog => {
                if self.selected.is_some() {
                    self.overlays.delete = true;
                }
                Vec::new()
            }
            Action::CloseDeleteDialog => {
                self.overlays.delete = false;
                Vec::new()
            }
            // One mutation per overlay at a time; repeats are dropped until it answers.
            Action::SubmitAdd(movie) if !self.submitting.add => {
                self.submitting.add = true;
                vec![FetchRequest::Insert(movie.clone())]
            }
            Action::SubmitEdit(movie) if !self.submitting.edit => {
                self.submitting.edit = true;
                vec![FetchRequest::Update(movie.clone())]
            }
            Action::ConfirmDelete if !self.submitting.delete => {
                let requests: Vec<_> = self
                    .selected
                    .as_ref()
                    .map(|movie| FetchRequest::Delete(movie.id))
                    .into_iter()
                    .collect();
                self.submitting.delete = !requests.is_empty();
                requests
            }
            Action::SubmitAdd(_) | Action::SubmitEdit(_) | Action::ConfirmDelete => {
                debug!("ignoring {action} while the previous one is in flight");
                Vec::new()
            }
            Action::DismissAlert => {
                self.alert = None;
                Vec::new()
            }

            Action::ShowDetail(movie) => {
                self.detail = Some(movie.clone());
                vec![FetchRequest::Movie(movie.id)]
            }
            Action::CloseDetail => {
                self.detail = None;
                Vec::new()
            }

            Action::Fetched(response) => self.receive(response),
            _ => Vec::new(),
        }
    }

    fn receive(&mut self, response: &FetchResponse) -> Vec<FetchRequest> {
        match response {
            FetchResponse::Inserted(_) => self.submitting.add = false,
            FetchResponse::Updated(..) => self.submitting.edit = false,
            FetchResponse::Deleted(..) => self.submitting.delete = false,
            _ => {}
        }
        match response {
            FetchResponse::Range(Ok(movies)) => {
                if movies.is_empty() {
                    if self.page > 0 {
                        self.page -= 1;
                        info!(page = self.page, "empty page, stepping back");
                    } else {
                        warn!("the catalogue returned no movies");
                    }
                } else {
                    self.movies = movies.clone();
                }
                Vec::new()
            }
            FetchResponse::Range(Err(err)) => {
                error!("failed to fetch movies: {err}");
                Vec::new()
            }
            FetchResponse::Search(Ok(movies)) => {
                self.search_results = movies.clone();
                Vec::new()
            }
            FetchResponse::Search(Err(err)) => {
                error!("failed to search movies: {err}");
                Vec::new()
            }
            FetchResponse::Movie(Ok(movie)) => {
                if let Some(detail) = self.detail.as_mut().filter(|d| d.same_record(movie)) {
                    *detail = movie.clone();
                }
                Vec::new()
            }
            FetchResponse::Movie(Err(err)) => {
                error!("failed to refresh movie: {err}");
                Vec::new()
            }
            FetchResponse::Inserted(Ok(())) => {
                self.overlays.add = false;
                vec![self.fetch_page()]
            }
            FetchResponse::Updated(movie, Ok(())) => {
                if let Some(selected) = self.selected.as_mut().filter(|s| s.same_record(movie)) {
                    *selected = movie.clone();
                }
                self.overlays.edit = false;
                vec![self.fetch_page()]
            }
            FetchResponse::Deleted(id, Ok(())) => {
                if self.selected.as_ref().is_some_and(|s| s.id == *id) {
                    self.selected = None;
                }
                self.overlays.delete = false;
                vec![self.fetch_page()]
            }
            FetchResponse::Inserted(Err(err)) => self.fail(ADD_FAILED, err),
            FetchResponse::Updated(_, Err(err)) => self.fail(UPDATE_FAILED, err),
            FetchResponse::Deleted(_, Err(err)) => self.fail(DELETE_FAILED, err),
            FetchResponse::Health(result) => {
                self.health = match result {
                    Ok(()) => Health::Online,
                    Err(err) => {
                        error!("backend health check failed: {err}");
                        Health::Offline
                    }
                };
                Vec::new()
            }
        }
    }

    fn fail(&mut self, message: &'static str, err: &str) -> Vec<FetchRequest> {
        error!("{message} ({err})");
        self.alert = Some(message);
        Vec::new()
    }

    fn set_entries(&mut self, entries: usize) -> Vec<FetchRequest> {
        if entries == 0 {
            return Vec::new();
        }
        self.entries = entries;
        let mut requests = vec![self.fetch_page()];
        if self.is_search_mode() {
            requests.push(self.search_request());
        }
        requests
    }

    fn toggle(&mut self, movie: &Movie) {
        match &self.selected {
            Some(selected) if selected.same_record(movie) => self.selected = None,
            _ => self.selected = Some(movie.clone()),
        }
    }

    fn fetch_page(&self) -> FetchRequest {
        let range = page_range(self.page, self.entries);
        FetchRequest::Range {
            start: range.start,
            end: range.end,
        }
    }

    fn search_request(&self) -> FetchRequest {
        FetchRequest::Search {
            query: self.search.clone(),
            limit: self.entries,
        }
    }

    /// Rows the table shows: search results in search mode, the page otherwise.
    pub fn rows(&self) -> &[Movie] {
        if self.is_search_mode() {
            &self.search_results
        } else {
            &self.movies
        }
    }

    pub fn is_search_mode(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn mode(&self) -> Mode {
        if self.alert.is_some() {
            Mode::Alert
        } else if self.overlays.delete {
            Mode::DeleteDialog
        } else if self.overlays.add {
            Mode::AddForm
        } else if self.overlays.edit {
            Mode::EditForm
        } else if self.detail.is_some() {
            Mode::Detail
        } else if self.searching {
            Mode::Search
        } else {
            Mode::Table
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, movie: &Movie) -> bool {
        self.selected.as_ref().is_some_and(|s| s.same_record(movie))
    }

    pub fn detail(&self) -> Option<&Movie> {
        self.detail.as_ref()
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn loading_message(&self) -> &'static str {
        self.loading_message
    }

    pub fn health(&self) -> Health {
        self.health
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            ..Movie::default()
        }
    }

    fn loaded(movies: Vec<Movie>) -> Deck {
        let mut deck = Deck::new(20);
        deck.start();
        deck.apply(&Action::Fetched(FetchResponse::Range(Ok(movies))));
        deck
    }

    fn dune() -> Movie {
        Movie {
            id: 0,
            title: "Dune".into(),
            popularity: 50.0,
            vote_average: 8.0,
            release_date: "2021-10-22".into(),
            genres: "Sci-Fi".into(),
            keywords: "desert".into(),
            budget: 165_000_000,
            revenue: 400_000_000,
            vote_count: 10_000,
            overview: "...".into(),
        }
    }

    #[test]
    fn page_range_is_half_open() {
        for page in 0..5 {
            for entries in [1, 10, 20, 30] {
                let range = page_range(page, entries);
                assert_eq!(range.start, page * entries);
                assert_eq!(range.end, page * entries + entries);
            }
        }
    }

    #[test]
    fn start_fetches_first_page_and_checks_health() {
        let mut deck = Deck::new(20);

        assert_eq!(
            deck.start(),
            vec![
                FetchRequest::Range { start: 0, end: 20 },
                FetchRequest::HealthCheck
            ]
        );
        assert_eq!(deck.pending(), 2);
    }

    #[test]
    fn paging_fetches_the_new_range() {
        let mut deck = loaded(vec![movie(1, "Heat")]);

        assert_eq!(
            deck.apply(&Action::NextPage),
            vec![FetchRequest::Range { start: 20, end: 40 }]
        );
        assert_eq!(deck.page(), 1);
        assert_eq!(
            deck.apply(&Action::PrevPage),
            vec![FetchRequest::Range { start: 0, end: 20 }]
        );
        assert_eq!(deck.page(), 0);
    }

    #[test]
    fn prev_on_first_page_is_ignored() {
        let mut deck = loaded(vec![movie(1, "Heat")]);

        assert!(deck.apply(&Action::PrevPage).is_empty());
        assert_eq!(deck.page(), 0);
    }

    #[test]
    fn empty_page_steps_back_without_fetching() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::NextPage);
        deck.apply(&Action::NextPage);

        let requests = deck.apply(&Action::Fetched(FetchResponse::Range(Ok(Vec::new()))));

        assert!(requests.is_empty());
        assert_eq!(deck.page(), 1);
        assert_eq!(deck.rows(), &[movie(1, "Heat")]);
    }

    #[test]
    fn empty_first_page_stays_on_first_page() {
        let deck = loaded(Vec::new());

        assert_eq!(deck.page(), 0);
        assert!(deck.rows().is_empty());
    }

    #[test]
    fn read_failures_keep_stale_rows_without_alert() {
        let mut deck = loaded(vec![movie(1, "Heat")]);

        deck.apply(&Action::NextPage);
        deck.apply(&Action::Fetched(FetchResponse::Range(Err("boom".into()))));

        assert_eq!(deck.rows(), &[movie(1, "Heat")]);
        assert_eq!(deck.alert(), None);
        assert_eq!(deck.mode(), Mode::Table);
    }

    #[test]
    fn entries_change_refetches_page_and_active_search() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        assert_eq!(
            deck.apply(&Action::SetEntries(10)),
            vec![FetchRequest::Range { start: 0, end: 10 }]
        );

        deck.apply(&Action::SubmitSearch("heat".into()));
        assert_eq!(
            deck.apply(&Action::CycleEntries),
            vec![
                FetchRequest::Range { start: 0, end: 20 },
                FetchRequest::Search {
                    query: "heat".into(),
                    limit: 20
                }
            ]
        );
        assert_eq!(deck.entries(), 20);
    }

    #[test]
    fn cycling_entries_wraps_around() {
        let mut deck = Deck::new(30);

        deck.apply(&Action::CycleEntries);

        assert_eq!(deck.entries(), 10);
    }

    #[test]
    fn rows_follow_the_search_term() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::FocusSearch);
        assert_eq!(deck.mode(), Mode::Search);

        let requests = deck.apply(&Action::SubmitSearch("alien".into()));
        assert_eq!(
            requests,
            vec![FetchRequest::Search {
                query: "alien".into(),
                limit: 20
            }]
        );
        assert_eq!(deck.mode(), Mode::Table);
        assert!(deck.rows().is_empty());

        deck.apply(&Action::Fetched(FetchResponse::Search(Ok(vec![movie(
            2, "Alien",
        )]))));
        assert_eq!(deck.rows(), &[movie(2, "Alien")]);

        deck.apply(&Action::ClearSearch);
        assert_eq!(deck.rows(), &[movie(1, "Heat")]);
        assert_eq!(deck.search(), "");
    }

    #[test]
    fn blank_search_is_ignored() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::FocusSearch);

        assert!(deck.apply(&Action::SubmitSearch("   ".into())).is_empty());
        assert!(!deck.is_search_mode());
        assert_eq!(deck.mode(), Mode::Search);
    }

    #[test]
    fn paging_is_disabled_in_search_mode() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::SubmitSearch("heat".into()));

        assert!(deck.apply(&Action::NextPage).is_empty());
        assert_eq!(deck.page(), 0);
    }

    #[test]
    fn selection_toggles_and_replaces() {
        let mut deck = loaded(vec![movie(1, "Heat"), movie(2, "Alien")]);

        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        assert_eq!(deck.selected(), Some(&movie(1, "Heat")));

        deck.apply(&Action::ToggleMovie(movie(2, "Alien")));
        assert_eq!(deck.selected(), Some(&movie(2, "Alien")));

        deck.apply(&Action::ToggleMovie(movie(2, "Alien")));
        assert_eq!(deck.selected(), None);
    }

    #[test]
    fn edit_and_delete_need_a_selection() {
        let mut deck = loaded(vec![movie(1, "Heat")]);

        deck.apply(&Action::OpenEditForm);
        deck.apply(&Action::OpenDeleteDialog);
        assert_eq!(deck.overlays(), Overlays::default());

        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        deck.apply(&Action::OpenEditForm);
        deck.apply(&Action::OpenDeleteDialog);
        assert!(deck.overlays().edit);
        assert!(deck.overlays().delete);
        assert_eq!(deck.mode(), Mode::DeleteDialog);
    }

    #[test]
    fn overlays_are_independent() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));

        deck.apply(&Action::OpenEditForm);
        deck.apply(&Action::OpenAddForm);
        assert_eq!(
            deck.overlays(),
            Overlays {
                edit: true,
                add: true,
                delete: false
            }
        );
        assert_eq!(deck.mode(), Mode::AddForm);

        deck.apply(&Action::CloseAddForm);
        assert!(deck.overlays().edit);
        assert_eq!(deck.mode(), Mode::EditForm);
    }

    #[test]
    fn adding_posts_once_then_refetches_and_closes() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::NextPage);
        deck.apply(&Action::Fetched(FetchResponse::Range(Ok(vec![movie(
            21, "Ran",
        )]))));
        deck.apply(&Action::OpenAddForm);

        let requests = deck.apply(&Action::SubmitAdd(dune()));

        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.route(), "/movies/ins");
        let FetchRequest::Insert(movie) = request else {
            panic!("expected an insert, got {request:?}");
        };
        assert_eq!(
            serde_json::to_value(movie.body()).unwrap(),
            json!({
                "title": "Dune",
                "popularity": 50.0,
                "vote_average": 8.0,
                "release_date": "2021-10-22",
                "genres": "Sci-Fi",
                "keywords": "desert",
                "budget": 165000000,
                "revenue": 400000000,
                "vote_count": 10000,
                "overview": "..."
            })
        );
        assert!(deck.overlays().add);

        let requests = deck.apply(&Action::Fetched(FetchResponse::Inserted(Ok(()))));

        assert_eq!(requests, vec![FetchRequest::Range { start: 20, end: 40 }]);
        assert!(!deck.overlays().add);
    }

    #[test]
    fn failed_mutation_alerts_and_keeps_state() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::OpenAddForm);
        deck.apply(&Action::SubmitAdd(dune()));

        let requests = deck.apply(&Action::Fetched(FetchResponse::Inserted(Err(
            "connection refused".into(),
        ))));

        assert!(requests.is_empty());
        assert_eq!(deck.alert(), Some(ADD_FAILED));
        assert_eq!(deck.mode(), Mode::Alert);
        assert!(deck.overlays().add);
        assert_eq!(deck.rows(), &[movie(1, "Heat")]);

        deck.apply(&Action::DismissAlert);
        assert_eq!(deck.mode(), Mode::AddForm);
    }

    #[test]
    fn deleting_without_selection_sends_nothing() {
        let mut deck = loaded(vec![movie(1, "Heat")]);

        assert!(deck.apply(&Action::ConfirmDelete).is_empty());
    }

    #[test]
    fn delete_clears_the_selection_and_refetches() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        deck.apply(&Action::OpenDeleteDialog);

        assert_eq!(
            deck.apply(&Action::ConfirmDelete),
            vec![FetchRequest::Delete(1)]
        );
        let requests = deck.apply(&Action::Fetched(FetchResponse::Deleted(1, Ok(()))));

        assert_eq!(requests, vec![FetchRequest::Range { start: 0, end: 20 }]);
        assert_eq!(deck.selected(), None);
        assert!(!deck.overlays().delete);
    }

    #[test]
    fn delete_failure_alerts() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        deck.apply(&Action::OpenDeleteDialog);
        deck.apply(&Action::ConfirmDelete);

        deck.apply(&Action::Fetched(FetchResponse::Deleted(
            1,
            Err("500".into()),
        )));

        assert_eq!(deck.alert(), Some(DELETE_FAILED));
        assert!(deck.overlays().delete);
        assert!(deck.selected().is_some());
    }

    #[test]
    fn update_refreshes_the_selection() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        deck.apply(&Action::OpenEditForm);
        let edited = movie(1, "Heat (1995)");

        assert_eq!(
            deck.apply(&Action::SubmitEdit(edited.clone())),
            vec![FetchRequest::Update(edited.clone())]
        );
        let requests = deck.apply(&Action::Fetched(FetchResponse::Updated(
            edited.clone(),
            Ok(()),
        )));

        assert_eq!(requests, vec![FetchRequest::Range { start: 0, end: 20 }]);
        assert_eq!(deck.selected(), Some(&edited));
        assert!(!deck.overlays().edit);
    }

    #[test]
    fn update_failure_alerts_and_keeps_edit_open() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        deck.apply(&Action::OpenEditForm);
        let edited = movie(1, "Heat (1995)");
        deck.apply(&Action::SubmitEdit(edited.clone()));

        let requests = deck.apply(&Action::Fetched(FetchResponse::Updated(
            edited,
            Err("500".into()),
        )));

        assert!(requests.is_empty());
        assert_eq!(deck.alert(), Some(UPDATE_FAILED));
        assert!(deck.overlays().edit);
        assert_eq!(deck.selected(), Some(&movie(1, "Heat")));

        deck.apply(&Action::DismissAlert);
        assert_eq!(deck.mode(), Mode::EditForm);
    }

    #[test]
    fn repeated_submits_wait_for_the_first_answer() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::OpenAddForm);

        assert_eq!(
            deck.apply(&Action::SubmitAdd(dune())),
            vec![FetchRequest::Insert(dune())]
        );
        assert!(deck.apply(&Action::SubmitAdd(dune())).is_empty());

        deck.apply(&Action::Fetched(FetchResponse::Inserted(Err(
            "connection refused".into(),
        ))));
        deck.apply(&Action::DismissAlert);

        assert_eq!(
            deck.apply(&Action::SubmitAdd(dune())),
            vec![FetchRequest::Insert(dune())]
        );
    }

    #[test]
    fn repeated_edit_and_delete_wait_for_the_first_answer() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ToggleMovie(movie(1, "Heat")));
        let edited = movie(1, "Heat (1995)");

        deck.apply(&Action::OpenEditForm);
        assert_eq!(deck.apply(&Action::SubmitEdit(edited.clone())).len(), 1);
        assert!(deck.apply(&Action::SubmitEdit(edited.clone())).is_empty());
        deck.apply(&Action::Fetched(FetchResponse::Updated(edited, Ok(()))));

        deck.apply(&Action::OpenDeleteDialog);
        assert_eq!(
            deck.apply(&Action::ConfirmDelete),
            vec![FetchRequest::Delete(1)]
        );
        assert!(deck.apply(&Action::ConfirmDelete).is_empty());

        deck.apply(&Action::Fetched(FetchResponse::Deleted(
            1,
            Err("500".into()),
        )));
        deck.apply(&Action::DismissAlert);
        assert_eq!(
            deck.apply(&Action::ConfirmDelete),
            vec![FetchRequest::Delete(1)]
        );
    }

    #[test]
    fn failed_detail_refresh_keeps_row_copy() {
        let mut deck = loaded(vec![movie(1, "Heat")]);
        deck.apply(&Action::ShowDetail(movie(1, "Heat")));

        let requests = deck.apply(&Action::Fetched(FetchResponse::Movie(Err(
            "404 Not Found".into(),
        ))));

        assert!(requests.is_empty());
        assert_eq!(deck.detail(), Some(&movie(1, "Heat")));
        assert_eq!(deck.alert(), None);
        assert_eq!(deck.mode(), Mode::Detail);
    }

    #[test]
    fn failed_health_check_marks_offline() {
        let mut deck = Deck::new(10);
        deck.start();

        deck.apply(&Action::Fetched(FetchResponse::Health(Err(
            "connection refused".into(),
        ))));

        assert_eq!(deck.health(), Health::Offline);
        assert_eq!(deck.alert(), None);
        assert_eq!(deck.mode(), Mode::Table);
    }

    #[test]
    fn detail_is_refreshed_from_the_backend() {
        let mut deck = loaded(vec![movie(1, "Heat")]);

        assert_eq!(
            deck.apply(&Action::ShowDetail(movie(1, "Heat"))),
            vec![FetchRequest::Movie(1)]
        );
        assert_eq!(deck.mode(), Mode::Detail);

        deck.apply(&Action::Fetched(FetchResponse::Movie(Ok(movie(
            1,
            "Heat (1995)",
        )))));
        assert_eq!(deck.detail(), Some(&movie(1, "Heat (1995)")));

        deck.apply(&Action::CloseDetail);
        assert_eq!(deck.mode(), Mode::Table);
    }

    #[test]
    fn pending_tracks_in_flight_requests() {
        let mut deck = Deck::new(10);
        deck.start();

        deck.apply(&Action::Fetched(FetchResponse::Health(Ok(()))));
        assert_eq!(deck.pending(), 1);
        assert_eq!(deck.health(), Health::Online);

        deck.apply(&Action::Fetched(FetchResponse::Range(Ok(Vec::new()))));
        assert_eq!(deck.pending(), 0);
    }
}
