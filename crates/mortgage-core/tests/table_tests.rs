use mortgage_core::amortization::calculate_mortgage;
use mortgage_core::table::{QueryCommand, QueryState, SortDirection, SortKey, VisiblePage};
use mortgage_core::{LoanParameters, YearlyEntry};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn reference_schedule() -> Vec<YearlyEntry> {
    calculate_mortgage(&LoanParameters::default())
        .unwrap()
        .result
        .schedule
}

fn years(rows: &[YearlyEntry]) -> Vec<u32> {
    rows.iter().map(|r| r.year).collect()
}

fn all_pages(state: &mut QueryState) -> Vec<VisiblePage> {
    let total = state.go_to_page(1).total_pages;
    (1..=total).map(|page| state.go_to_page(page)).collect()
}

// ===========================================================================
// Pagination
// ===========================================================================

#[test]
fn test_third_page_of_thirty_year_loan() {
    let mut state = QueryState::from_schedule(reference_schedule());
    let page = state.go_to_page(3);

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.range_start, 21);
    assert_eq!(page.range_end, 30);
    assert_eq!(years(&page.rows), (21..=30u32).collect::<Vec<_>>());
}

#[test]
fn test_pages_cover_filtered_rows_once() {
    for size in [1, 3, 7, 10, 30, 50] {
        let mut state = QueryState::from_schedule(reference_schedule());
        state.set_sort(SortKey::Interest);
        state.set_page_size(size);

        let expected = state.filtered_rows();
        let stitched: Vec<YearlyEntry> = all_pages(&mut state)
            .into_iter()
            .flat_map(|page| page.rows)
            .collect();

        assert_eq!(stitched, expected, "page size {size}");
    }
}

#[test]
fn test_pages_cover_search_results_once() {
    let mut state = QueryState::from_schedule(reference_schedule());
    state.set_search_term("1");
    state.set_page_size(4);

    let expected = state.filtered_rows();
    assert!(!expected.is_empty());

    let pages = all_pages(&mut state);
    let stitched: Vec<YearlyEntry> = pages.iter().flat_map(|p| p.rows.clone()).collect();
    assert_eq!(stitched, expected);
    assert_eq!(pages.last().unwrap().range_end, expected.len());
}

#[test]
fn test_page_size_change_clamps_stale_page() {
    let mut state = QueryState::from_schedule(reference_schedule());
    state.set_page_size(5);
    state.go_to_page(6);

    let page = state.set_page_size(15);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 2);
    assert_eq!(state.go_to_page(6).current_page, 2);
}

// ===========================================================================
// Sorting
// ===========================================================================

#[test]
fn test_descending_is_reverse_of_ascending() {
    for key in SortKey::ALL {
        let mut state = QueryState::from_schedule(reference_schedule());
        state.set_page_size(100);

        let asc = state.sort_by(key, SortDirection::Asc).rows;
        let desc = state.sort_by(key, SortDirection::Desc).rows;

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed, "sort key {key}");
    }
}

#[test]
fn test_sort_by_balance_descending_via_toggle() {
    let mut state = QueryState::from_schedule(reference_schedule());
    state.set_sort(SortKey::Balance);
    let page = state.set_sort(SortKey::Balance);

    assert_eq!(page.sort_direction, SortDirection::Desc);
    // Largest balance is after year 1
    assert_eq!(page.rows[0].year, 1);
    assert!(page.rows[0].remaining_balance > page.rows[1].remaining_balance);
}

#[test]
fn test_sort_by_principal_matches_year_order() {
    // Principal portion grows every year on a level-payment loan
    let mut state = QueryState::from_schedule(reference_schedule());
    let by_year = state.filtered_rows();
    state.set_sort(SortKey::Principal);
    assert_eq!(state.filtered_rows(), by_year);
}

// ===========================================================================
// Search
// ===========================================================================

#[test]
fn test_search_by_currency_text() {
    let mut state = QueryState::from_schedule(reference_schedule());
    // Interest $13,401 / $13,179 in years 1-2; principal $13,001 / $13,598 in years 23-24
    let page = state.set_search_term("$13,");

    assert_eq!(years(&page.rows), vec![1, 2, 23, 24]);
    assert_eq!(page.total_matching, 4);
    assert_eq!((page.range_start, page.range_end), (1, 4));
}

#[test]
fn test_search_by_year_text() {
    let mut state = QueryState::from_schedule(reference_schedule());
    let page = state.set_search_term("30");
    assert!(page.rows.iter().any(|r| r.year == 30));
}

#[test]
fn test_search_miss_leaves_source_untouched() {
    let source = reference_schedule();
    let mut state = QueryState::from_schedule(source.clone());
    let page = state.set_search_term("zzz");

    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_matching, 0);
    assert_eq!((page.range_start, page.range_end), (0, 0));
    assert_eq!(state.source_rows(), source.as_slice());

    let page = state.set_search_term("");
    assert_eq!(page.total_matching, 30);
}

// ===========================================================================
// Lifecycle
// ===========================================================================

#[test]
fn test_new_schedule_replaces_state_wholesale() {
    let mut state = QueryState::from_schedule(reference_schedule());
    state.set_search_term("2");
    state.set_sort(SortKey::Cumulative);
    state.go_to_page(2);

    let shorter = calculate_mortgage(&LoanParameters::new(dec!(90000), dec!(5), 10))
        .unwrap()
        .result
        .schedule;
    state = QueryState::from_schedule(shorter);

    let page = state.visible_page();
    assert_eq!(page.total_matching, 10);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.sort_key, SortKey::Year);
    assert_eq!(page.sort_direction, SortDirection::Asc);
    assert_eq!(state.search_term(), "");
}

#[test]
fn test_command_script_from_json() {
    let script = r#"[
        {"command": "set_page_size", "value": 5},
        {"command": "set_sort", "value": "year"},
        {"command": "go_to_page", "value": 2},
        {"command": "previous_page"}
    ]"#;
    let commands: Vec<QueryCommand> = serde_json::from_str(script).unwrap();

    let mut state = QueryState::from_schedule(reference_schedule());
    let mut page = state.visible_page();
    for command in commands {
        page = state.apply(command);
    }

    assert_eq!(page.current_page, 1);
    assert_eq!(page.sort_direction, SortDirection::Desc);
    assert_eq!(years(&page.rows), vec![30, 29, 28, 27, 26]);
    assert_eq!(page.page_numbers, vec![1, 2, 3, 4, 5]);
}
