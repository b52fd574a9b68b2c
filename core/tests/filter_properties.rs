//! Property tests for filtering and request-ordering behavior of the views.

use proptest::prelude::*;
use todo_core::{apply_filter, Filter, HttpResponse, Todo, TodoClient, TodoDetailView, TodoListView};

fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
    prop::collection::vec((any::<i64>(), "[a-z ]{0,12}", any::<bool>()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (user_id, title, completed))| Todo {
                id: i as u64 + 1,
                user_id,
                title,
                completed,
            })
            .collect()
    })
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    prop::sample::select(Filter::MODES.to_vec())
}

fn loaded_list(todos: &[Todo]) -> TodoListView {
    let mut view = TodoListView::new(TodoClient::new("http://test"));
    let pending = view.mount().expect("first mount issues a request");
    let body = serde_json::to_string(todos).unwrap();
    assert!(view.resolve(pending.ticket, Ok(HttpResponse::new(200, body))));
    view
}

fn detail_body(id: u64) -> HttpResponse {
    HttpResponse::new(
        200,
        format!(r#"{{"id":{id},"userId":1,"title":"t{id}","completed":false}}"#),
    )
}

proptest! {
    #[test]
    fn filtered_subset_is_exactly_the_matching_items(todos in arb_todos(), filter in arb_filter()) {
        let subset = apply_filter(&todos, filter);
        let expected: Vec<&Todo> = todos.iter().filter(|t| match filter {
            Filter::All => true,
            Filter::Open => !t.completed,
            Filter::Completed => t.completed,
        }).collect();
        prop_assert_eq!(subset, expected);
    }

    #[test]
    fn all_is_identity(todos in arb_todos()) {
        let subset: Vec<Todo> = apply_filter(&todos, Filter::All).into_iter().cloned().collect();
        prop_assert_eq!(subset, todos);
    }

    #[test]
    fn open_and_completed_partition_the_collection(todos in arb_todos()) {
        let open = apply_filter(&todos, Filter::Open).len();
        let completed = apply_filter(&todos, Filter::Completed).len();
        prop_assert_eq!(open + completed, todos.len());
    }

    #[test]
    fn filter_sequences_issue_one_request(
        todos in arb_todos(),
        filters in prop::collection::vec(arb_filter(), 0..20),
    ) {
        let mut view = loaded_list(&todos);
        for filter in &filters {
            view.set_filter(*filter);
            prop_assert!(view.mount().is_none());
            let visible: Vec<Todo> = view.visible().unwrap().into_iter().cloned().collect();
            let expected: Vec<Todo> = apply_filter(&todos, *filter).into_iter().cloned().collect();
            prop_assert_eq!(visible, expected);
        }
        prop_assert_eq!(view.requests_issued(), 1);
    }

    #[test]
    fn last_identifier_wins_in_any_arrival_order(
        ids in prop::collection::vec(1u64..50, 1..8),
        order in any::<u64>(),
    ) {
        let mut view = TodoDetailView::new(TodoClient::new("http://test"));
        let mut pending: Vec<_> = ids.iter().map(|&id| view.mount(id)).collect();

        // Deterministic shuffle of arrival order seeded by `order`.
        let mut seed = order;
        for i in (1..pending.len()).rev() {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (seed % (i as u64 + 1)) as usize;
            pending.swap(i, j);
        }

        for request in pending {
            let id = request.ticket.target.unwrap();
            view.resolve(request.ticket, Ok(detail_body(id)));
            if view.state().is_settled() {
                prop_assert_eq!(view.render().record().map(|t| t.id), ids.last().copied());
            }
        }
        prop_assert_eq!(view.render().record().map(|t| t.id), ids.last().copied());
    }
}
