//! Search, sort and pagination state for a rendered schedule table.
//!
//! `QueryState` holds the schedule rows plus the user's current view
//! settings. Every command mutates the state in place and hands back the
//! freshly computed `VisiblePage`, so a binding layer can redraw from the
//! return value alone. No command fails: out-of-range pages are clamped and
//! unknown sort keys fall back to the year column.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::amortization::YearlyEntry;
use crate::types::Money;

use super::pagination;
use super::search;

/// Rows per page before the user picks another size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Sort settings
// ---------------------------------------------------------------------------

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortKey {
    #[default]
    Year,
    Principal,
    Interest,
    Balance,
    Cumulative,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Year,
        SortKey::Principal,
        SortKey::Interest,
        SortKey::Balance,
        SortKey::Cumulative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Year => "year",
            SortKey::Principal => "principal",
            SortKey::Interest => "interest",
            SortKey::Balance => "balance",
            SortKey::Cumulative => "cumulative",
        }
    }

    /// Parse a column name, falling back to `Year` for anything unrecognised.
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    fn compare(&self, a: &YearlyEntry, b: &YearlyEntry) -> Ordering {
        match self {
            SortKey::Year => a.year.cmp(&b.year),
            _ => self.amount(a).cmp(&self.amount(b)),
        }
    }

    fn amount(&self, entry: &YearlyEntry) -> Money {
        match self {
            SortKey::Year => Money::from(entry.year),
            SortKey::Principal => entry.principal_paid,
            SortKey::Interest => entry.interest_paid,
            SortKey::Balance => entry.remaining_balance,
            SortKey::Cumulative => entry.cumulative_interest,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(SortKey::Year),
            "principal" => Ok(SortKey::Principal),
            "interest" => Ok(SortKey::Interest),
            "balance" => Ok(SortKey::Balance),
            "cumulative" => Ok(SortKey::Cumulative),
            other => Err(format!("unknown sort column '{other}'")),
        }
    }
}

impl From<String> for SortKey {
    fn from(name: String) -> Self {
        SortKey::parse_lossy(&name)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// View and commands
// ---------------------------------------------------------------------------

/// Everything a table renderer needs for one draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisiblePage {
    pub rows: Vec<YearlyEntry>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_matching: usize,
    pub range_start: usize,
    pub range_end: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_numbers: Vec<usize>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

/// A single user action against the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum QueryCommand {
    SetSource(Vec<YearlyEntry>),
    SetSearchTerm(String),
    SetSort(SortKey),
    SortBy(SortKey, SortDirection),
    SetPageSize(usize),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    Reset,
}

// ---------------------------------------------------------------------------
// Query state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    source_rows: Vec<YearlyEntry>,
    search_term: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    page_size: usize,
    current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            source_rows: Vec::new(),
            search_term: String::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl QueryState {
    /// Empty table with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh table over a newly computed schedule: page 1, year ascending,
    /// no search.
    pub fn from_schedule(rows: Vec<YearlyEntry>) -> Self {
        Self {
            source_rows: rows,
            ..Self::default()
        }
    }

    pub fn source_rows(&self) -> &[YearlyEntry] {
        &self.source_rows
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Stored page number; `visible_page` clamps it against the filtered rows.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Swap in new rows, keeping search and sort settings.
    pub fn set_source(&mut self, rows: Vec<YearlyEntry>) -> VisiblePage {
        self.source_rows = rows;
        self.current_page = 1;
        self.visible_page()
    }

    pub fn set_search_term(&mut self, term: &str) -> VisiblePage {
        self.search_term = search::normalize_term(term);
        self.current_page = 1;
        self.visible_page()
    }

    /// Clicking the active column flips its direction; another column starts
    /// ascending. The page number is left alone.
    pub fn set_sort(&mut self, key: SortKey) -> VisiblePage {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Asc;
        }
        self.visible_page()
    }

    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) -> VisiblePage {
        self.sort_key = key;
        self.sort_direction = direction;
        self.visible_page()
    }

    /// A size of zero is treated as one row per page.
    pub fn set_page_size(&mut self, size: usize) -> VisiblePage {
        self.page_size = size.max(1);
        self.current_page = 1;
        self.visible_page()
    }

    pub fn go_to_page(&mut self, page: usize) -> VisiblePage {
        self.navigate(|_| page)
    }

    pub fn next_page(&mut self) -> VisiblePage {
        self.navigate(|current| current.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> VisiblePage {
        self.navigate(|current| current.saturating_sub(1))
    }

    /// Back to an empty table with default settings.
    pub fn reset(&mut self) -> VisiblePage {
        *self = Self::default();
        self.visible_page()
    }

    pub fn apply(&mut self, command: QueryCommand) -> VisiblePage {
        match command {
            QueryCommand::SetSource(rows) => self.set_source(rows),
            QueryCommand::SetSearchTerm(term) => self.set_search_term(&term),
            QueryCommand::SetSort(key) => self.set_sort(key),
            QueryCommand::SortBy(key, direction) => self.sort_by(key, direction),
            QueryCommand::SetPageSize(size) => self.set_page_size(size),
            QueryCommand::GoToPage(page) => self.go_to_page(page),
            QueryCommand::NextPage => self.next_page(),
            QueryCommand::PreviousPage => self.previous_page(),
            QueryCommand::Reset => self.reset(),
        }
    }

    /// Rows matching the search term, in the current sort order.
    pub fn filtered_rows(&self) -> Vec<YearlyEntry> {
        let mut rows: Vec<YearlyEntry> = self
            .source_rows
            .iter()
            .filter(|entry| search::row_matches(entry, &self.search_term))
            .cloned()
            .collect();

        let key = self.sort_key;
        match self.sort_direction {
            SortDirection::Asc => rows.sort_by(|a, b| key.compare(a, b)),
            SortDirection::Desc => rows.sort_by(|a, b| key.compare(b, a)),
        }
        rows
    }

    pub fn total_pages(&self) -> usize {
        let matching = self
            .source_rows
            .iter()
            .filter(|entry| search::row_matches(entry, &self.search_term))
            .count();
        pagination::total_pages(matching, self.page_size)
    }

    /// Filter, sort and slice the current page.
    pub fn visible_page(&self) -> VisiblePage {
        self.page_of(self.filtered_rows())
    }

    /// Move to `target(current)`, clamped, filtering the rows only once.
    fn navigate(&mut self, target: impl FnOnce(usize) -> usize) -> VisiblePage {
        let filtered = self.filtered_rows();
        let total_pages = pagination::total_pages(filtered.len(), self.page_size);
        let current = pagination::clamp_page(self.current_page, total_pages);
        self.current_page = pagination::clamp_page(target(current), total_pages);
        self.page_of(filtered)
    }

    fn page_of(&self, filtered: Vec<YearlyEntry>) -> VisiblePage {
        let total_matching = filtered.len();
        let total_pages = pagination::total_pages(total_matching, self.page_size);
        let current_page = pagination::clamp_page(self.current_page, total_pages);

        let (start, end) = pagination::page_bounds(current_page, self.page_size, total_matching);
        let (range_start, range_end) = pagination::display_range(start, end);

        VisiblePage {
            rows: filtered[start..end].to_vec(),
            current_page,
            total_pages,
            total_matching,
            range_start,
            range_end,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
            page_numbers: pagination::page_window(current_page, total_pages),
            sort_key: self.sort_key,
            sort_direction: self.sort_direction,
        }
    }
}
