//! HTTP client and flow integration tests against a stub library service

use std::sync::Arc;

use library_desk::{
    api::{HttpLibraryApi, LibraryApi},
    config::ServiceConfig,
    models::{AccessionNumber, Book, BookStatus},
    services::{
        catalog::SubmitOutcome,
        reservations::SharedReservations,
        search::{SearchOutcome, SEARCH_FAILED_MESSAGE},
        Services,
    },
    ClientError,
};
use mockito::{Matcher, Server};
use serde_json::json;

fn services_for(url: &str) -> Services {
    let api = HttpLibraryApi::new(&ServiceConfig {
        base_url: url.to_string(),
        timeout_seconds: Some(5),
    })
    .expect("Failed to build client");
    Services::new(Arc::new(api), SharedReservations::new())
}

fn catalog_body() -> String {
    json!({
        "status": true,
        "data": [
            {
                "accession_number": "A1",
                "title": "Dune",
                "author": "Frank Herbert",
                "publisher": "Chilton",
                "isbn_issn": "978-0-441-17271-9",
                "category": "Fiction",
                "book_status": "available"
            },
            {
                "accession_number": 2,
                "title": "Emma",
                "author": "Jane Austen",
                "publisher": "John Murray",
                "isbn_issn": "978-0-14-143958-7",
                "category": "Classics",
                "book_status": "borrowed"
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_list_books() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/book/data")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(catalog_body())
        .create_async()
        .await;

    let services = services_for(&server.url());
    let response = services.api.list_books().await.expect("Failed to list books");

    mock.assert_async().await;
    assert!(response.status);
    let books = response.data.expect("No data in response");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].accession_number, Some(AccessionNumber::Text("A1".into())));
    assert_eq!(books[1].accession_number, Some(AccessionNumber::Number(2)));
    assert_eq!(books[1].book_status, BookStatus::Borrowed);
    assert_eq!(books[0].isbn, "978-0-441-17271-9");
    assert!(books[0].extra.is_empty());
}

#[tokio::test]
async fn test_search_request_shape() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search/book")
        .match_body(Matcher::Json(json!({
            "conditions": [
                { "field": "Title", "expression": "dune" },
                { "field": "Author", "expression": "herbert" }
            ],
            "operator": "AND"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(catalog_body())
        .create_async()
        .await;

    let services = services_for(&server.url());
    let mut form = services.search();
    for (name, value) in [
        ("option1", "0"),
        ("expression1", "dune"),
        ("option2", "1"),
        ("expression2", "herbert"),
        ("operator", "0"),
    ] {
        form.handle_change(name, value).expect("Invalid input");
    }

    assert_eq!(form.submit().await, SearchOutcome::Matched(2));
    mock.assert_async().await;

    form.reserve(0).expect("Failed to reserve available book");
    assert!(matches!(form.reserve(1), Err(ClientError::NotReservable(_))));
    let reserved = services.reservations.reserved_books();
    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0].title, "Dune");
}

#[tokio::test]
async fn test_search_rejection_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search/book")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":false,"message":"No books match the query"}"#)
        .create_async()
        .await;

    let services = services_for(&server.url());
    let mut form = services.search();
    form.set_first(Some("title".parse().unwrap()), "x");
    form.set_second(Some("category".parse().unwrap()), "y");
    form.set_operator(Some("or".parse().unwrap()));

    assert_eq!(
        form.submit().await,
        SearchOutcome::Rejected("No books match the query".into())
    );
    assert!(form.results().is_empty());
}

#[tokio::test]
async fn test_server_error_without_envelope_is_transport_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search/book")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let services = services_for(&server.url());
    let mut form = services.search();
    form.set_first(Some("title".parse().unwrap()), "x");
    form.set_second(Some("author".parse().unwrap()), "y");
    form.set_operator(Some("not".parse().unwrap()));

    assert_eq!(form.submit().await, SearchOutcome::Failed);
    assert_eq!(form.error(), SEARCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_rejection_with_error_status_keeps_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/add/book")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":false,"message":"Duplicate ISBN"}"#)
        .create_async()
        .await;

    let services = services_for(&server.url());
    let ack = services
        .api
        .create_book(&Book::default())
        .await
        .expect("Envelope should decode");

    assert!(!ack.status);
    assert_eq!(ack.message.as_deref(), Some("Duplicate ISBN"));
}

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on port 9 (discard) in the test environment
    let services = services_for("http://127.0.0.1:9");
    let err = services.api.list_books().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_catalog_update_then_refetch() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/book/data")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(catalog_body())
        .expect(2)
        .create_async()
        .await;
    let edit = server
        .mock("POST", "/edit/books")
        .match_body(Matcher::PartialJson(json!({
            "accession_number": "A1",
            "title": "Dune Messiah"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":true}"#)
        .create_async()
        .await;
    let add = server
        .mock("POST", "/add/book")
        .expect(0)
        .create_async()
        .await;

    let services = services_for(&server.url());
    let mut catalog = services.catalog().await;
    assert_eq!(catalog.books().len(), 2);

    catalog.select_by_accession("A1").expect("A1 should be listed");
    let mut draft = catalog.form();
    draft.title = "Dune Messiah".into();

    let outcome = catalog.submit_draft(draft).await.expect("Draft should validate");

    assert_eq!(outcome, SubmitOutcome::Updated);
    assert!(catalog.selected().is_none());
    edit.assert_async().await;
    list.assert_async().await;
    add.assert_async().await;
    // the stub still serves the old title, and the refetch wins
    assert_eq!(catalog.books()[0].title, "Dune");
}
