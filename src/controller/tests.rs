use super::*;
use crate::config::ListConfig;
use crate::pagination::PageSlot;
use crate::sort::{compare_values, SortDirection, SortKey, SortState, SortValue};
use crate::source::{FetchError, InMemorySource, ResultSet, Searchable};

#[derive(Debug, Clone, PartialEq)]
struct Post {
    id: u64,
    title: String,
    views: u64,
}

impl SortKey for Post {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => self.id.into(),
            "views" => self.views.into(),
            "title" => self.title.as_str().into(),
            _ => SortValue::Missing,
        }
    }
}

impl Searchable for Post {
    fn matches_query(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
    }
}

fn posts(n: u64) -> Vec<Post> {
    (1..=n)
        .map(|id| Post {
            id,
            title: format!("Post {}", id),
            views: (id * 37) % 100,
        })
        .collect()
}

fn controller(base_size: usize) -> ListStateController<Post> {
    ListStateController::new(ListConfig::new().with_base_size(base_size))
}

/// Runs one fetch against `source` and applies it.
fn fetch(list: &mut ListStateController<Post>, source: &InMemorySource<Post>) -> FetchOutcome {
    let ticket = list.begin_fetch();
    let result = source.query(ticket.params());
    list.complete_fetch(&ticket, Ok(result))
}

#[test]
fn test_initial_state() {
    let list = controller(10);
    assert_eq!(list.page(), 1);
    assert_eq!(list.extra(), 0);
    assert_eq!(list.sort(), &SortState::Unsorted);
    assert_eq!(list.total_pages(), 1);
    assert_eq!(list.page_window(), vec![1]);
    assert!(!list.is_loading());
    assert!(!list.is_error());
    assert!(!list.has_result());
}

#[test]
fn test_zero_sizes_are_raised() {
    let list: ListStateController<Post> = ListStateController::new(ListConfig {
        base_size: 0,
        window_size: 0,
        gapped_window: false,
    });
    assert_eq!(list.base_size(), 1);
    assert_eq!(list.config().window_size, 1);
}

#[test]
fn test_end_to_end_47_items() {
    let source = InMemorySource::new(posts(47));
    let mut list = controller(10);

    assert_eq!(fetch(&mut list, &source), FetchOutcome::Applied { page_clamped: false });
    assert_eq!(list.total(), 47);
    assert_eq!(list.total_pages(), 5);
    assert_eq!(list.items().len(), 10);

    assert!(list.go_to_page(5));
    let params = list.derive_fetch_params();
    assert_eq!(params.skip, 40);
    assert_eq!(params.limit, 10);

    fetch(&mut list, &source);
    assert_eq!(list.items().len(), 7);
    assert_eq!(list.items()[0].id, 41);
    assert_eq!(list.page_window(), vec![3, 4, 5]);
    assert!(!list.can_show_more());
    assert!(!list.show_more());
}

#[test]
fn test_go_to_page_clamps() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);

    assert!(!list.go_to_page(0)); // clamped to 1, already there
    assert_eq!(list.page(), 1);

    assert!(list.go_to_page(99));
    assert_eq!(list.page(), 5);
    assert!(!list.go_to_page(5));
}

#[test]
fn test_prev_next_respect_bounds() {
    let mut list = controller(10);
    list.recompute_page_bounds(25);

    assert!(!list.prev_page());
    assert!(list.next_page());
    assert!(list.next_page());
    assert!(list.on_last_page());
    assert!(!list.next_page());
    assert_eq!(list.page(), 3);
    assert!(list.prev_page());
    assert_eq!(list.page(), 2);
}

#[test]
fn test_show_more_is_one_shot() {
    let mut list = controller(10);
    list.recompute_page_bounds(25);

    assert!(list.show_more());
    assert_eq!(list.extra(), 10);
    assert_eq!(list.effective_limit(), 20);

    assert!(!list.show_more());
    assert_eq!(list.extra(), 10);
}

#[test]
fn test_show_more_capped_by_remaining() {
    let mut list = controller(10);
    list.recompute_page_bounds(14);

    assert!(list.show_more());
    assert_eq!(list.extra(), 4);
    assert_eq!(list.derive_fetch_params().limit, 14);
}

#[test]
fn test_show_more_keeps_skip() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);
    list.go_to_page(2);
    list.show_more();

    let params = list.derive_fetch_params();
    assert_eq!(params.skip, 10);
    assert_eq!(params.limit, 20);
}

#[test]
fn test_page_change_drops_extra() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);
    list.show_more();

    list.next_page();
    assert_eq!(list.extra(), 0);
    assert!(list.can_show_more());
}

#[test]
fn test_search_resets_page_and_extra() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);
    list.go_to_page(3);
    list.show_more();

    assert!(list.set_search_text("abc"));
    assert_eq!(list.page(), 1);
    assert_eq!(list.extra(), 0);
    assert_eq!(list.derive_fetch_params().query.as_deref(), Some("abc"));

    assert!(!list.set_search_text("abc"));

    list.set_search_text("");
    assert_eq!(list.derive_fetch_params().query, None);
    list.set_search_text("  \t ");
    assert_eq!(list.derive_fetch_params().query, None);
    list.set_search_text("  post ");
    assert_eq!(list.derive_fetch_params().query.as_deref(), Some("post"));
}

#[test]
fn test_sort_cycle_three_toggles() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);
    list.go_to_page(4);

    assert!(list.toggle_sort("views"));
    assert_eq!(list.sort(), &SortState::sorted("views", SortDirection::Desc));
    assert_eq!(list.page(), 1);

    list.toggle_sort("views");
    assert_eq!(list.sort(), &SortState::sorted("views", SortDirection::Asc));

    list.toggle_sort("views");
    assert!(list.sort().is_randomized());
    assert_ne!(list.sort().seed(), Some(0));

    // A fourth toggle goes back to descending.
    list.toggle_sort("views");
    assert_eq!(list.sort().direction_for("views"), Some(SortDirection::Desc));
}

#[test]
fn test_sort_other_field_restarts_desc() {
    let mut list = controller(10);
    list.toggle_sort("views");
    list.toggle_sort("views");
    list.toggle_sort("likes");
    assert_eq!(list.sort(), &SortState::sorted("likes", SortDirection::Desc));
}

#[test]
fn test_zero_seed_is_bumped() {
    let mut list = controller(10);
    list.toggle_sort("views");
    list.toggle_sort("views");
    list.toggle_sort_with("views", || 0);
    assert_eq!(list.sort().seed(), Some(1));
}

#[test]
fn test_sort_is_sent_shuffle_is_not() {
    let mut list = controller(10);

    list.toggle_sort("views");
    let params = list.derive_fetch_params();
    assert_eq!(params.sort_by.as_deref(), Some("views"));
    assert_eq!(params.order, Some(SortDirection::Desc));

    list.toggle_sort("views");
    list.toggle_sort_with("views", || 42);
    let params = list.derive_fetch_params();
    assert_eq!(params.sort_by, None);
    assert_eq!(params.order, None);
}

#[test]
fn test_shuffle_is_stable_for_a_seed() {
    let source = InMemorySource::new(posts(5));
    let mut list = controller(10);
    list.toggle_sort("views");
    list.toggle_sort("views");
    list.toggle_sort_with("views", || 42);
    fetch(&mut list, &source);

    let first: Vec<u64> = list.effective_items().iter().map(|p| p.id).collect();
    let second: Vec<u64> = list.effective_items().iter().map(|p| p.id).collect();
    assert_eq!(first, vec![1, 5, 3, 2, 4]);
    assert_eq!(first, second);

    // Raw items stay in source order.
    let raw: Vec<u64> = list.items().iter().map(|p| p.id).collect();
    assert_eq!(raw, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_client_ordering_sorts_window() {
    let mut list = controller(10);
    list.toggle_sort("views");
    list.toggle_sort("views"); // asc

    let ordered = list.apply_client_ordering(&posts(5));
    let views: Vec<u64> = ordered.iter().map(|p| p.views).collect();
    assert_eq!(views, vec![11, 37, 48, 74, 85]);
}

#[test]
fn test_unsorted_keeps_order() {
    let list = controller(10);
    let items = posts(4);
    assert_eq!(list.apply_client_ordering(&items), items);
}

#[test]
fn test_stale_ticket_is_discarded() {
    let mut list = controller(10);

    let old = list.begin_fetch();
    list.set_search_text("post 1");
    let new = list.begin_fetch();
    assert!(!list.is_current(&old));
    assert!(list.is_current(&new));

    let fresh = ResultSet {
        items: posts(2),
        total: 2,
    };
    assert_eq!(
        list.complete_fetch(&new, Ok(fresh)),
        FetchOutcome::Applied { page_clamped: false }
    );

    let late = ResultSet {
        items: posts(10),
        total: 100,
    };
    assert_eq!(list.complete_fetch(&old, Ok(late)), FetchOutcome::Stale);
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.total(), 2);
}

#[test]
fn test_stale_error_is_discarded() {
    let mut list = controller(10);
    let old = list.begin_fetch();
    let new = list.begin_fetch();

    assert_eq!(
        list.complete_fetch(&old, Err(FetchError::Cancelled)),
        FetchOutcome::Stale
    );
    assert!(!list.is_error());
    assert!(list.is_loading());

    list.complete_fetch(&new, Ok(ResultSet::default()));
    assert!(!list.is_loading());
}

#[test]
fn test_detached_completion_changes_nothing() {
    let mut list = controller(10);
    let ticket = list.begin_fetch();
    list.detach();

    let result = ResultSet {
        items: posts(3),
        total: 3,
    };
    assert_eq!(list.complete_fetch(&ticket, Ok(result)), FetchOutcome::Detached);
    assert!(list.items().is_empty());
    assert!(!list.has_result());
    assert!(!list.is_loading());
    assert!(!list.is_current(&ticket));
}

#[test]
fn test_error_keeps_last_good_items() {
    let source = InMemorySource::new(posts(15));
    let mut list = controller(10);
    fetch(&mut list, &source);

    let ticket = list.begin_fetch();
    assert!(list.is_loading());
    let outcome = list.complete_fetch(&ticket, Err(FetchError::Http { status: 500 }));
    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(list.is_error());
    assert!(!list.is_loading());
    assert_eq!(list.last_error(), Some(&FetchError::Http { status: 500 }));
    assert_eq!(list.items().len(), 10);
    assert_eq!(list.total(), 15);

    // Navigation does not clear the flag; only a success does.
    list.next_page();
    assert!(list.is_error());
    fetch(&mut list, &source);
    assert!(!list.is_error());
    assert_eq!(list.items().len(), 5);
}

#[test]
fn test_total_kept_while_loading() {
    let source = InMemorySource::new(posts(47));
    let mut list = controller(10);
    fetch(&mut list, &source);

    list.next_page();
    let _ticket = list.begin_fetch();
    assert!(list.is_loading());
    assert_eq!(list.total_pages(), 5);
    assert_eq!(list.page_window(), vec![1, 2, 3]);
}

#[test]
fn test_smaller_total_clamps_page() {
    let source = InMemorySource::new(posts(47));
    let mut list = controller(10);
    fetch(&mut list, &source);
    list.go_to_page(5);
    list.show_more();

    // The next result reports only 12 matches.
    let ticket = list.begin_fetch();
    let outcome = list.complete_fetch(
        &ticket,
        Ok(ResultSet {
            items: Vec::new(),
            total: 12,
        }),
    );
    assert_eq!(outcome, FetchOutcome::Applied { page_clamped: true });
    assert!(outcome.needs_refetch());
    assert_eq!(list.page(), 2);
    assert_eq!(list.extra(), 0);
    assert_eq!(list.total_pages(), 2);
}

#[test]
fn test_empty_total_is_one_page() {
    let mut list = controller(10);
    list.recompute_page_bounds(0);
    assert_eq!(list.total_pages(), 1);
    assert_eq!(list.page(), 1);
    assert!(!list.can_show_more());
}

#[test]
fn test_skip_is_multiple_of_base_size() {
    let mut list = controller(7);
    list.recompute_page_bounds(100);
    for page in [1, 3, 9, 15, 40] {
        list.go_to_page(page);
        list.show_more();
        assert_eq!(list.skip() % 7, 0);
        assert!(list.page() <= list.total_pages());
    }
}

#[test]
fn test_refresh_keeps_state() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);
    list.go_to_page(3);
    list.set_search_text("x");
    list.toggle_sort("id");

    let before = list.derive_fetch_params();
    let first = list.begin_fetch();
    let refreshed = list.refresh();
    assert_eq!(refreshed.params(), &before);
    assert!(refreshed.seq() > first.seq());
}

#[test]
fn test_gapped_slots() {
    let mut list: ListStateController<Post> = ListStateController::new(
        ListConfig::new().with_base_size(10).with_gapped_window(true),
    );
    list.recompute_page_bounds(200);
    list.go_to_page(10);

    let slots = list.page_slots();
    assert_eq!(slots.first(), Some(&PageSlot::Page(1)));
    assert_eq!(slots.last(), Some(&PageSlot::Page(20)));
    assert!(slots.contains(&PageSlot::Gap));
    assert!(slots.contains(&PageSlot::Page(10)));
}

#[test]
fn test_snapshot_reflects_state() {
    let source = InMemorySource::new(posts(25));
    let mut list = controller(10);
    list.set_search_text("post");
    fetch(&mut list, &source);

    let snap = list.snapshot();
    assert_eq!(snap.search_text, "post");
    assert_eq!(snap.page, 1);
    assert_eq!(snap.total_pages, 3);
    assert_eq!(snap.page_window, vec![1, 2, 3]);
    assert_eq!(snap.items.len(), 10);
    assert!(!snap.is_loading);
    assert!(!snap.is_error);
    assert!(snap.can_show_more);
    assert_eq!(snap.sort, SortState::Unsorted);
}

#[tokio::test]
async fn test_fetch_from_follows_clamp() {
    let mut list = controller(10);
    list.recompute_page_bounds(47);
    list.go_to_page(5);

    let source = InMemorySource::new(posts(12));
    let outcome = list.fetch_from(&source).await;
    assert_eq!(outcome, FetchOutcome::Applied { page_clamped: false });
    assert_eq!(list.page(), 2);
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.items()[0].id, 11);
}

#[derive(Debug, Clone)]
struct Loose {
    id: usize,
    reactions: SortValue,
}

impl SortKey for Loose {
    fn sort_value(&self, _field: &str) -> SortValue {
        self.reactions.clone()
    }
}

#[test]
fn test_client_ordering_with_mixed_shapes() {
    // Reaction counts arrive as numbers, numeric strings, NaN or not at all.
    let items: Vec<Loose> = (0..80)
        .map(|id| Loose {
            id,
            reactions: match id % 4 {
                0 => SortValue::Number((id % 13) as f64),
                1 => SortValue::Text(((id * 7) % 11).to_string()),
                2 => SortValue::Missing,
                _ => SortValue::Number(f64::NAN),
            },
        })
        .collect();

    let mut list: ListStateController<Loose> = ListStateController::default();
    list.toggle_sort("reactions");
    list.toggle_sort("reactions"); // asc

    let ordered = list.apply_client_ordering(&items);
    assert_eq!(ordered.len(), 80);
    assert!(ordered
        .windows(2)
        .all(|w| compare_values(&w[0].reactions, &w[1].reactions) != std::cmp::Ordering::Greater));
    assert!(matches!(ordered.last().map(|l| &l.reactions), Some(SortValue::Text(_))));

    let mut ids: Vec<usize> = ordered.iter().map(|l| l.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..80).collect::<Vec<_>>());
}
