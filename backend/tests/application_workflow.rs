//! End-to-end behaviour of submissions and status updates over the HTTP
//! surface: uniqueness, role gating, ownership and the notification
//! produced by every status change.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};

use hiring_backend::domain::{
    ApplicationId, ApplicationStatus, DUPLICATE_APPLICATION, NotificationKind,
};
use support::{ADMIN, ALI, FATIMA, MOUSSA, World, json_body, login_request, session_cookie};

fn application_id(body: &Value) -> ApplicationId {
    body.pointer("/data/id")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
        .expect("application id in response")
}

fn submit(world: &World) -> TestRequest {
    TestRequest::post().uri(&format!("/api/v1/jobs/{}/applications", world.job))
}

fn status_update(id: ApplicationId, body: Value) -> TestRequest {
    TestRequest::patch()
        .uri(&format!("/api/v1/applications/{id}/status"))
        .set_json(body)
}

#[rstest]
#[actix_web::test]
async fn second_submission_conflicts_without_a_new_row() {
    let world = World::seed();
    let app = test::init_service(world.app()).await;
    let ali =
        session_cookie(&test::call_service(&app, login_request(ALI).to_request()).await);

    let res = test::call_service(&app, submit(&world).cookie(ali.clone()).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body.pointer("/data/status"), Some(&json!("PENDING")));

    let res = test::call_service(&app, submit(&world).cookie(ali).to_request()).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(
        json_body(res).await,
        json!({"success": false, "error": DUPLICATE_APPLICATION})
    );
    assert_eq!(world.store.application_count(), 1);
}

#[rstest]
#[actix_web::test]
async fn ali_gets_an_interview_and_another_company_cannot_touch_it() {
    let world = World::seed();
    let app = test::init_service(world.app()).await;
    let ali =
        session_cookie(&test::call_service(&app, login_request(ALI).to_request()).await);
    let moussa =
        session_cookie(&test::call_service(&app, login_request(MOUSSA).to_request()).await);
    let fatima =
        session_cookie(&test::call_service(&app, login_request(FATIMA).to_request()).await);

    let res = test::call_service(&app, submit(&world).cookie(ali).to_request()).await;
    let id = application_id(&json_body(res).await);

    let res = test::call_service(
        &app,
        status_update(id, json!({"status": "INTERVIEW", "interviewDate": "2024-06-01T10:00:00Z"}))
            .cookie(moussa)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body.pointer("/data/status"), Some(&json!("INTERVIEW")));
    assert_eq!(
        body.pointer("/data/interviewDate"),
        Some(&json!("2024-06-01T10:00:00Z"))
    );

    let notifications = world.store.notifications();
    assert_eq!(notifications.len(), 1);
    let note = notifications.first().expect("one notification");
    assert_eq!(note.user_id, world.ali);
    assert_eq!(note.kind, NotificationKind::InterviewScheduled);
    assert!(note.message.contains("Développeur Fullstack"));
    assert!(note.message.contains("01/06/2024 10:00:00"));

    let res = test::call_service(
        &app,
        status_update(id, json!({"status": "REJECTED"}))
            .cookie(fatima)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        json_body(res).await,
        json!({"success": false, "error": "Unauthorized access"})
    );
    let stored = world.store.application(&id).expect("application");
    assert_eq!(stored.status, ApplicationStatus::Interview);
    assert_eq!(world.store.notifications().len(), 1);
}

#[rstest]
#[case(ALI)]
#[case(ADMIN)]
#[actix_web::test]
async fn only_recruiters_may_update_status(#[case] caller: &str) {
    let world = World::seed();
    let app = test::init_service(world.app()).await;
    let ali =
        session_cookie(&test::call_service(&app, login_request(ALI).to_request()).await);
    let res = test::call_service(&app, submit(&world).cookie(ali).to_request()).await;
    let id = application_id(&json_body(res).await);

    let cookie =
        session_cookie(&test::call_service(&app, login_request(caller).to_request()).await);
    let res = test::call_service(
        &app,
        status_update(id, json!({"status": "ACCEPTED"}))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        world.store.application(&id).map(|a| a.status),
        Some(ApplicationStatus::Pending)
    );
    assert!(world.store.notifications().is_empty());
}

#[rstest]
#[actix_web::test]
async fn repeating_a_status_notifies_every_time() {
    let world = World::seed();
    let app = test::init_service(world.app()).await;
    let ali =
        session_cookie(&test::call_service(&app, login_request(ALI).to_request()).await);
    let moussa =
        session_cookie(&test::call_service(&app, login_request(MOUSSA).to_request()).await);
    let res = test::call_service(&app, submit(&world).cookie(ali).to_request()).await;
    let id = application_id(&json_body(res).await);

    for _ in 0..3 {
        world.clock.advance_minutes(5);
        let res = test::call_service(
            &app,
            status_update(id, json!({"status": "ACCEPTED"}))
                .cookie(moussa.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let notifications = world.store.notifications();
    assert_eq!(notifications.len(), 3);
    assert!(
        notifications
            .iter()
            .all(|n| n.kind == NotificationKind::ApplicationUpdate && n.user_id == world.ali)
    );
}

#[rstest]
#[actix_web::test]
async fn interview_date_is_ignored_for_other_statuses() {
    let world = World::seed();
    let app = test::init_service(world.app()).await;
    let ali =
        session_cookie(&test::call_service(&app, login_request(ALI).to_request()).await);
    let moussa =
        session_cookie(&test::call_service(&app, login_request(MOUSSA).to_request()).await);
    let res = test::call_service(&app, submit(&world).cookie(ali).to_request()).await;
    let id = application_id(&json_body(res).await);

    let res = test::call_service(
        &app,
        status_update(id, json!({"status": "ACCEPTED", "interviewDate": "2024-06-01T10:00:00Z"}))
            .cookie(moussa)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let stored = world.store.application(&id).expect("application");
    assert_eq!(stored.status, ApplicationStatus::Accepted);
    assert!(stored.interview_date.is_none());
    let kinds: Vec<NotificationKind> =
        world.store.notifications().into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::ApplicationUpdate]);
}

#[rstest]
#[actix_web::test]
async fn recruiter_board_and_candidate_list_show_the_application() {
    let world = World::seed();
    let app = test::init_service(world.app()).await;
    let ali =
        session_cookie(&test::call_service(&app, login_request(ALI).to_request()).await);
    let moussa =
        session_cookie(&test::call_service(&app, login_request(MOUSSA).to_request()).await);
    test::call_service(&app, submit(&world).cookie(ali.clone()).to_request()).await;

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/v1/recruiter/board")
            .cookie(moussa.clone())
            .to_request(),
    )
    .await;
    let board = json_body(res).await;
    assert_eq!(board.pointer("/data/0/candidate/initials"), Some(&json!("AS")));
    assert_eq!(board.pointer("/data/0/jobTitle"), Some(&json!("Développeur Fullstack")));

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/v1/recruiter/overview")
            .cookie(moussa)
            .to_request(),
    )
    .await;
    assert_eq!(
        json_body(res).await.get("data"),
        Some(&json!({"activeJobs": 1, "applications": 1, "interviews": 0, "newToday": 1}))
    );

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/v1/users/me/applications")
            .cookie(ali)
            .to_request(),
    )
    .await;
    let mine = json_body(res).await;
    assert_eq!(mine.pointer("/data/0/companyName"), Some(&json!("Comores Telecom")));
}
