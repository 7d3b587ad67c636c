//! htmx pages acting as the guest user

mod support;

use axum::http::{Method, StatusCode};
use support::TestApp;

#[tokio::test(flavor = "multi_thread")]
async fn test_index_page_wires_htmx() {
    let app = TestApp::new().await;

    let (status, page) = app.get_page("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("VibeKeeper"));
    assert!(page.contains(r#"hx-post="/add_occasion""#));
    assert!(page.contains(r#"name="occasion_text""#));
    assert!(page.contains(r#"hx-post="/search""#));
    assert!(page.contains(r#"id="occasions-list""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_occasion_renders_card() {
    let app = TestApp::new().await;

    let (status, card) =
        app.form("/add_occasion", "occasion_text=Bahar%27s+birthday+is+04%2F04%2F2030").await;

    assert_eq!(status, StatusCode::OK);
    assert!(card.contains("Bahar's Birthday"), "{card}");
    assert!(card.contains("Date: April 04, 2030"));
    assert!(card.contains("Added: "));
    assert!(card.contains("Original: &quot;Bahar&#x27;s birthday is 04/04/2030&quot;"));

    let (_, list) = app.get_page("/occasions").await;
    assert!(list.contains("Bahar's Birthday"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_occasion_messages() {
    let app = TestApp::new().await;

    let (status, body) = app.form("/add_occasion", "occasion_text=++").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter some text"));

    let (_, body) = app.form("/add_occasion", "").await;
    assert!(body.contains("Please enter some text"));

    let (status, body) = app.form("/add_occasion", "occasion_text=buy+milk").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("couldn&#x27;t extract occasion information"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_text_is_escaped() {
    let app = TestApp::new().await;

    let (_, card) = app
        .form(
            "/add_occasion",
            "occasion_text=Eve%27s+birthday+is+01%2F01%2F2031+%3Cscript%3Ealert(1)%3C%2Fscript%3E",
        )
        .await;

    assert!(!card.contains("<script>"));
    assert!(card.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_and_list_are_newest_first() {
    let app = TestApp::new().await;
    app.form("/add_occasion", "occasion_text=Ann%27s+birthday+is+03%2F03%2F2030").await;
    app.form("/add_occasion", "occasion_text=Bob%27s+wedding+is+04%2F04%2F2030").await;

    let (_, list) = app.get_page("/occasions").await;
    let bob = list.find("Bob's Wedding").expect("Bob listed");
    let ann = list.find("Ann's Birthday").expect("Ann listed");
    assert!(bob < ann);

    let (status, found) = app.form("/search", "search=wedd").await;
    assert_eq!(status, StatusCode::OK);
    assert!(found.contains("Bob's Wedding"));
    assert!(!found.contains("Ann's Birthday"));

    let (_, everything) = app.form("/search", "search=").await;
    assert!(everything.contains("Ann's Birthday") && everything.contains("Bob's Wedding"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_web_occasions_belong_to_guest_user() {
    let app = TestApp::new().await;
    app.form("/add_occasion", "occasion_text=Ann%27s+birthday+is+03%2F03%2F2030").await;

    let token = app.login("someone@example.com").await;
    let (_, listed) = app.json(Method::GET, "/api/occasions", Some(&token), None).await;
    assert_eq!(listed, serde_json::json!([]));

    let guest = app.ctx.web_user.id;
    let occasions = app.ctx.occasions.list(guest, Default::default()).await.unwrap();
    assert_eq!(occasions.len(), 1);
}
