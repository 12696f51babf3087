/// Global bulk-delete integration test
///
/// `DELETE /api/projects` wipes every project and every task, so this
/// lives in its own test binary: cargo runs test binaries one at a time,
/// which keeps the wipe from racing the rest of the suite.

mod common;

use axum::http::StatusCode;
use common::TestContext;

#[tokio::test]
async fn test_delete_all_projects_and_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let (_, cookie) = ctx.register("delete-all").await.unwrap();

    // Two projects, each with tasks
    let first = ctx.create_project(&cookie, "First").await.unwrap();
    let second = ctx.create_project(&cookie, "Second").await.unwrap();
    let task_ids = vec![
        ctx.create_task(&cookie, first, "a", None).await.unwrap(),
        ctx.create_task(&cookie, first, "b", Some("in progress"))
            .await
            .unwrap(),
        ctx.create_task(&cookie, second, "c", Some("done"))
            .await
            .unwrap(),
    ];

    let (status, body, _) = ctx.send("DELETE", "/api/projects", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("All projects"));

    // The whole collection is empty
    let (status, body, _) = ctx.send("GET", "/api/projects", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"].as_array().unwrap().len(), 0);

    // No task survived
    for task_id in task_ids {
        let (status, _, _) = ctx
            .send("GET", &format!("/api/tasks/{}", task_id), None, Some(&cookie))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    for project_id in [first, second] {
        let (status, _, _) = ctx
            .send(
                "GET",
                &format!("/api/projects/{}", project_id),
                None,
                Some(&cookie),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // Empty collections are a valid end state: deleting again succeeds
    let (status, _, _) = ctx.send("DELETE", "/api/projects", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    // Requires a session like every other tracker route
    let (status, _, _) = ctx.send("DELETE", "/api/projects", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}
