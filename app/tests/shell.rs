//! The shell driven over real HTTP against the mock server.

use std::time::Duration;

use mock_server::Todo;
use todo_app::shell::Command;
use todo_app::{Shell, UreqTransport, View};
use todo_core::{DetailScreen, Filter, ListScreen, TodoClient};

fn start_server(todos: Vec<Todo>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, todos).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn shell(base_url: &str) -> Shell<UreqTransport> {
    Shell::new(TodoClient::new(base_url), UreqTransport::new(Duration::from_secs(5)))
}

#[test]
fn browse_list_and_detail() {
    let base_url = start_server(vec![
        Todo::new(1, 1, "a", false),
        Todo::new(2, 1, "b", true),
    ]);
    let mut shell = shell(&base_url);

    // Step 1: list under `All`.
    shell.start();
    let ids: Vec<u64> = shell.list_screen().rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);

    // Step 2: filters.
    shell.handle(Command::Filter(Filter::Completed));
    let ids: Vec<u64> = shell.list_screen().rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2]);
    shell.handle(Command::Filter(Filter::Open));
    let ids: Vec<u64> = shell.list_screen().rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(shell.list().requests_issued(), 1);

    // Step 3: select an item.
    shell.handle(Command::Select(1));
    assert_eq!(shell.view(), View::Detail(1));
    let record = shell.detail_screen().record().cloned().unwrap();
    assert_eq!(record.title, "a");
    assert!(!record.completed);

    // Step 4: jump straight to an id the service does not have.
    shell.handle(Command::Select(5));
    assert!(matches!(shell.detail_screen(), DetailScreen::Error { .. }));
    assert!(shell.has_error());

    // Step 5: back to the list without refetching it.
    shell.handle(Command::Back);
    assert_eq!(shell.view(), View::List);
    assert_eq!(shell.list().filter(), Filter::Open);
    assert_eq!(shell.list().requests_issued(), 1);
}

#[test]
fn empty_service_shows_no_items() {
    let base_url = start_server(Vec::new());
    let mut shell = shell(&base_url);
    shell.start();
    assert!(matches!(
        shell.list_screen(),
        ListScreen::Loaded {
            body: todo_core::ListBody::Empty,
            ..
        }
    ));
    assert!(shell.render().contains("No items."));
}

#[test]
fn unreachable_service_reports_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut shell = shell(&format!("http://{addr}"));
    shell.start();
    assert!(shell.has_error());
    assert!(shell.render().starts_with("Error: network error:"));
}
