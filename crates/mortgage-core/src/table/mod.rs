//! Searchable, sortable, paginated view over an amortization schedule.

pub mod pagination;
pub mod query;
pub mod search;

pub use query::{
    QueryCommand, QueryState, SortDirection, SortKey, VisiblePage, DEFAULT_PAGE_SIZE,
};
