mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    apply_request, create_job, job_payload, json_request, multipart_empty, multipart_resume,
    pdf_bytes, send, signup, signup_with_role, try_setup, unique_email,
};

const FUTURE_DEADLINE: &str = "2031-06-01T00:00:00Z";

#[tokio::test]
async fn apply_lifecycle_end_to_end() {
    let Some((app, state)) = try_setup().await else {
        return;
    };
    let (_, manager_token) = signup_with_role(
        &app,
        &state,
        "Mgr",
        &unique_email("mgr"),
        "secret1",
        "HIRING_MANAGER",
    )
    .await;
    let (_, candidate_token) = signup(&app, "Cand", &unique_email("cand"), "secret1").await;

    let job_id = create_job(&app, &manager_token, job_payload("AppCo", FUTURE_DEADLINE)).await;

    // Missing resume field.
    let (ct, body) = multipart_empty();
    let (status, _) = send(&app, apply_request(job_id, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-PDF upload never creates a record.
    let (ct, body) = multipart_resume("resume.docx", b"PK\x03\x04 word doc");
    let (status, _) = send(&app, apply_request(job_id, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listing) = send(
        &app,
        json_request("GET", "/api/applications", Some(&candidate_token), None),
    )
    .await;
    assert_eq!(listing.as_array().unwrap().len(), 0);

    // A real application.
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, created) = send(&app, apply_request(job_id, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::CREATED, "apply failed: {}", created);
    assert_eq!(created["application"]["status"], "PENDING");
    let application_id = created["application"]["id"].as_str().unwrap().to_string();

    // Same candidate, same job: conflict.
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, _) = send(&app, apply_request(job_id, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The listing joins job data.
    let (_, listing) = send(
        &app,
        json_request("GET", "/api/applications", Some(&candidate_token), None),
    )
    .await;
    let mine = listing.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["job_title"], "Backend Engineer");
    assert_eq!(mine[0]["company_name"], "AppCo");

    // Download the stored artifact.
    let resp = {
        use tower::ServiceExt;
        app.clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/applications/{}/resume", application_id),
                Some(&candidate_token),
                None,
            ))
            .await
            .unwrap()
    };
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let bytes = axum::body::to_bytes(resp.into_body(), 8 * 1024 * 1024)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // Withdraw; the record and artifact both disappear.
    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/applications/{}", application_id),
            Some(&candidate_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/applications/{}/resume", application_id),
            Some(&candidate_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // After withdrawal the candidate may apply again.
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, _) = send(&app, apply_request(job_id, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn apply_respects_job_state() {
    let Some((app, state)) = try_setup().await else {
        return;
    };
    let (_, manager_token) = signup_with_role(
        &app,
        &state,
        "Mgr",
        &unique_email("mgr"),
        "secret1",
        "HIRING_MANAGER",
    )
    .await;
    let (_, candidate_token) = signup(&app, "Cand", &unique_email("cand"), "secret1").await;

    // Unknown job.
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, _) = send(
        &app,
        apply_request(uuid::Uuid::new_v4(), &candidate_token, &ct, body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deadline in the past.
    let expired =
        create_job(&app, &manager_token, job_payload("GoneCo", "2001-01-01T00:00:00Z")).await;
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, _) = send(&app, apply_request(expired, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::GONE);

    // Closed before the deadline.
    let closed = create_job(&app, &manager_token, job_payload("GoneCo", FUTURE_DEADLINE)).await;
    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/jobs/{}", closed),
            Some(&manager_token),
            Some(json!({ "status": "CLOSED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, _) = send(&app, apply_request(closed, &candidate_token, &ct, body)).await;
    assert_eq!(status, StatusCode::GONE);

    // Hiring managers cannot apply at all.
    let open = create_job(&app, &manager_token, job_payload("GoneCo", FUTURE_DEADLINE)).await;
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (status, _) = send(&app, apply_request(open, &manager_token, &ct, body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// Force the row insert to fail (unknown candidate violates the FK) after
// the artifact is written and check the store is left empty.
#[tokio::test]
async fn insert_failure_leaves_no_orphaned_artifact() {
    let Some((app, state)) = try_setup().await else {
        return;
    };
    let (_, manager_token) = signup_with_role(
        &app,
        &state,
        "Mgr",
        &unique_email("mgr"),
        "secret1",
        "HIRING_MANAGER",
    )
    .await;
    let job_id = create_job(&app, &manager_token, job_payload("OrphCo", FUTURE_DEADLINE)).await;

    let scratch = std::env::temp_dir().join(format!("jobboard-orphan-{}", uuid::Uuid::new_v4()));
    let store = jobboard_backend::services::resume_store::ResumeStore::new(scratch.clone());
    let service = jobboard_backend::services::application_service::ApplicationService::new(
        state.pool.clone(),
        store,
    );

    let result = service
        .apply(
            uuid::Uuid::new_v4(),
            job_id,
            "resume.pdf",
            &bytes::Bytes::from(pdf_bytes()),
        )
        .await;
    assert!(result.is_err(), "insert against a missing candidate must fail");

    let mut entries = tokio::fs::read_dir(&scratch).await.expect("store dir exists");
    assert!(
        entries.next_entry().await.unwrap().is_none(),
        "a failed insert must not leave a stored resume behind"
    );
}

#[tokio::test]
async fn applications_are_owner_scoped() {
    let Some((app, state)) = try_setup().await else {
        return;
    };
    let (_, manager_token) = signup_with_role(
        &app,
        &state,
        "Mgr",
        &unique_email("mgr"),
        "secret1",
        "HIRING_MANAGER",
    )
    .await;
    let (_, owner_token) = signup(&app, "Owner", &unique_email("own"), "secret1").await;
    let (_, other_token) = signup(&app, "Other", &unique_email("oth"), "secret1").await;

    let job_id = create_job(&app, &manager_token, job_payload("ScopeCo", FUTURE_DEADLINE)).await;
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (_, created) = send(&app, apply_request(job_id, &owner_token, &ct, body)).await;
    let application_id = created["application"]["id"].as_str().unwrap().to_string();

    // Another candidate can neither download nor delete it.
    let (status, _) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/applications/{}/resume", application_id),
            Some(&other_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/applications/{}", application_id),
            Some(&other_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/applications/{}", uuid::Uuid::new_v4()),
            Some(&owner_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_review_is_role_gated_not_ownership_gated() {
    let Some((app, state)) = try_setup().await else {
        return;
    };
    let (_, owner_mgr_token) = signup_with_role(
        &app,
        &state,
        "Owner Mgr",
        &unique_email("omgr"),
        "secret1",
        "HIRING_MANAGER",
    )
    .await;
    let (_, other_mgr_token) = signup_with_role(
        &app,
        &state,
        "Other Mgr",
        &unique_email("xmgr"),
        "secret1",
        "HIRING_MANAGER",
    )
    .await;
    let (_, admin_token) = signup_with_role(
        &app,
        &state,
        "Admin",
        &unique_email("adm"),
        "secret1",
        "ADMIN",
    )
    .await;
    let (_, candidate_token) = signup(&app, "Cand", &unique_email("cand"), "secret1").await;

    let job_id = create_job(&app, &owner_mgr_token, job_payload("RevCo", FUTURE_DEADLINE)).await;
    let (ct, body) = multipart_resume("resume.pdf", &pdf_bytes());
    let (_, created) = send(&app, apply_request(job_id, &candidate_token, &ct, body)).await;
    let application_id = created["application"]["id"].as_str().unwrap().to_string();
    let status_uri = format!("/api/applications/{}/status", application_id);

    // Candidates cannot review.
    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &status_uri,
            Some(&candidate_token),
            Some(json!({ "status": "REVIEWED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A manager unrelated to the job can: shared review pool.
    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &status_uri,
            Some(&other_mgr_token),
            Some(json!({ "status": "REVIEWED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REVIEWED");

    // Out-of-set values are rejected.
    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &status_uri,
            Some(&admin_token),
            Some(json!({ "status": "APPROVED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &status_uri,
            Some(&admin_token),
            Some(json!({ "status": "REJECTED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REJECTED");

    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/applications/{}/status", uuid::Uuid::new_v4()),
            Some(&admin_token),
            Some(json!({ "status": "REVIEWED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
