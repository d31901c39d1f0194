mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use blog_creator_api::database::BlogStore;
use common::{sample_blog, TestServer};

#[tokio::test]
async fn other_users_records_look_missing() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.login("alice@example.com").await?;
    let bob = server.login("bob@example.com").await?;

    let created = server.create_blog(&alice, "Private").await?;
    let id = created["id"].as_i64().unwrap();
    let path = format!("/blogs/{}", id);
    let before = server.blogs.get(id).await?;

    // what bob sees for a record that does not exist at all
    let missing: Value = server
        .client
        .get(server.url("/blogs/99999"))
        .bearer_auth(&bob)
        .send()
        .await?
        .json()
        .await?;

    let requests = vec![
        server.client.get(server.url(&path)),
        server.client.put(server.url(&path)).json(&sample_blog("hijacked")),
        server.client.patch(server.url(&path)).json(&json!({ "title": "hijacked" })),
        server.client.delete(server.url(&path)),
    ];

    for request in requests {
        let res = request.bearer_auth(&bob).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = res.json().await?;
        assert_eq!(body, missing);
    }

    assert_eq!(server.blogs.get(id).await?, before);
    Ok(())
}

#[tokio::test]
async fn invalid_payload_from_non_owner_is_still_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.login("alice@example.com").await?;
    let bob = server.login("bob@example.com").await?;
    let created = server.create_blog(&alice, "Private").await?;

    let res = server
        .client
        .put(server.url(&format!("/blogs/{}", created["id"])))
        .bearer_auth(&bob)
        .json(&json!({ "title": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn owner_keeps_access_after_others_try() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.login("alice@example.com").await?;
    let bob = server.login("bob@example.com").await?;
    let created = server.create_blog(&alice, "Private").await?;
    let path = format!("/blogs/{}", created["id"]);

    server.client.delete(server.url(&path)).bearer_auth(&bob).send().await?;

    let res = server.client.get(server.url(&path)).bearer_auth(&alice).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let list: Vec<Value> = server.client.get(server.url("/blogs")).bearer_auth(&bob).send().await?.json().await?;
    assert!(list.is_empty());
    Ok(())
}
