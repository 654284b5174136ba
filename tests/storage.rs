use std::sync::Arc;

use chrono::{Duration, Utc};

use rust_lms_server::config::DatabaseConfig;
use rust_lms_server::models::activities::entities::ActivityStatus;
use rust_lms_server::models::files::entities::NewStoredFile;
use rust_lms_server::models::materials::entities::{Material, MaterialKind};
use rust_lms_server::models::materials::requests::{
    MaterialChanges, MaterialListQuery, NewMaterial,
};
use rust_lms_server::models::submissions::entities::{Submission, SubmissionState};
use rust_lms_server::models::submissions::requests::{
    NewSubmission, SubmissionGrade, SubmissionListQuery,
};
use rust_lms_server::models::users::entities::{User, UserRole, UserStatus};
use rust_lms_server::models::users::requests::{NewUser, UserChanges, UserListQuery};
use rust_lms_server::runtime::lifetime::startup::seed_admin;
use rust_lms_server::services::activities::assemble;
use rust_lms_server::services::submissions::create::new_submission;
use rust_lms_server::storage::Storage;
use rust_lms_server::storage::sea_orm_storage::SeaOrmStorage;

async fn storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(SeaOrmStorage::connect(&config).await.unwrap())
}

async fn user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role,
            display_name: None,
        })
        .await
        .unwrap()
}

async fn material(
    storage: &Arc<dyn Storage>,
    title: &str,
    created_by: i64,
    deadline: Option<chrono::DateTime<Utc>>,
    late_accepted: bool,
) -> Material {
    storage
        .create_material(NewMaterial {
            title: title.to_string(),
            description: None,
            kind: MaterialKind::Link,
            reference: "https://example.com/brief".to_string(),
            deadline,
            max_score: Some(100.0),
            late_accepted,
            created_by,
        })
        .await
        .unwrap()
}

async fn submit(
    storage: &Arc<dyn Storage>,
    owner: &User,
    material: &Material,
    code: &str,
    submitted_at: chrono::DateTime<Utc>,
) -> Submission {
    let file_ref = format!("2024/01/{code}.pdf");
    storage
        .create_file(NewStoredFile {
            file_ref: file_ref.clone(),
            original_name: format!("{code}.pdf"),
            file_size: 1024,
            content_type: "application/pdf".to_string(),
            user_id: owner.id,
        })
        .await
        .unwrap();

    storage
        .create_submission(NewSubmission {
            task_code: code.to_string(),
            ..new_submission(owner.id, material, file_ref, None, submitted_at)
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_seed_admin_runs_once() {
    let storage = storage().await;

    let admin = seed_admin(&storage, Some("Adm1nPassw0rd".to_string()))
        .await
        .unwrap()
        .expect("admin should be created on an empty database");
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(storage.count_users().await.unwrap(), 1);

    assert!(seed_admin(&storage, None).await.unwrap().is_none());
    assert_eq!(storage.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_user_lookup_update_and_search() {
    let storage = storage().await;
    let alice = user(&storage, "alice", UserRole::Student).await;
    user(&storage, "bob_100%", UserRole::Staff).await;

    let found = storage
        .get_user_by_username_or_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);

    // 通配符按字面量匹配
    let page = storage
        .list_users_with_pagination(UserListQuery {
            page: None,
            size: None,
            role: None,
            status: None,
            search: Some("%".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].username, "bob_100%");

    let updated = storage
        .update_user(
            alice.id,
            UserChanges {
                status: Some(UserStatus::Suspended),
                display_name: Some("Alice".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_active());
    assert_eq!(updated.display_name.as_deref(), Some("Alice"));

    assert!(storage.update_user(9999, UserChanges::default()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_material_update_clears_optional_fields() {
    let storage = storage().await;
    let staff = user(&storage, "staff", UserRole::Staff).await;
    let deadline = Utc::now() + Duration::days(7);
    let created = material(&storage, "Essay", staff.id, Some(deadline), false).await;
    assert_eq!(created.deadline.map(|d| d.timestamp()), Some(deadline.timestamp()));

    let updated = storage
        .update_material(
            created.id,
            MaterialChanges {
                deadline: Some(None),
                max_score: Some(None),
                late_accepted: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(updated.deadline.is_none());
    assert!(updated.max_score.is_none());
    assert!(updated.late_accepted);
    assert_eq!(updated.title, "Essay");

    let page = storage
        .list_materials_with_pagination(MaterialListQuery {
            search: Some("ess".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test]
async fn test_activities_from_storage() {
    let storage = storage().await;
    let staff = user(&storage, "staff", UserRole::Staff).await;
    let student = user(&storage, "student", UserRole::Student).await;
    let other = user(&storage, "other", UserRole::Student).await;

    let now = Utc::now();
    let past = now - Duration::days(2);
    let missed = material(&storage, "Quiz", staff.id, Some(past), true).await;
    let late = material(&storage, "Lab", staff.id, Some(past), true).await;
    let open = material(&storage, "Essay", staff.id, None, false).await;

    let late_submission = submit(&storage, &student, &late, "TSK-LATE0001", now).await;
    assert_eq!(late_submission.state, SubmissionState::Late);
    submit(&storage, &other, &missed, "TSK-OTHER001", past - Duration::days(1)).await;

    let materials = storage.list_all_materials().await.unwrap();
    let submissions = storage.list_user_submissions(student.id).await.unwrap();
    let activities = assemble(student.id, materials, submissions, now);

    // 同一秒内创建时按 id 倒序
    let ids: Vec<i64> = activities.iter().map(|a| a.material.id).collect();
    assert_eq!(ids, vec![open.id, late.id, missed.id]);

    let statuses: Vec<ActivityStatus> = activities.iter().map(|a| a.status.status).collect();
    assert_eq!(
        statuses,
        vec![
            ActivityStatus::Pending,
            ActivityStatus::SubmittedLate,
            ActivityStatus::Missed
        ]
    );
}

#[tokio::test]
async fn test_subsecond_submission_state_matches_activity_status() {
    let storage = storage().await;
    let staff = user(&storage, "staff", UserRole::Staff).await;
    let student = user(&storage, "student", UserRole::Student).await;

    let now = Utc::now();
    let deadline = chrono::DateTime::from_timestamp(now.timestamp() - 3600, 0).unwrap();
    let edge = material(&storage, "Edge", staff.id, Some(deadline), true).await;
    let after = material(&storage, "After", staff.id, Some(deadline), true).await;

    let on_edge = submit(
        &storage,
        &student,
        &edge,
        "TSK-EDGE0001",
        deadline + Duration::milliseconds(300),
    )
    .await;
    assert_eq!(on_edge.submitted_at, deadline);
    assert_eq!(on_edge.state, SubmissionState::OnTime);

    let past_edge = submit(
        &storage,
        &student,
        &after,
        "TSK-EDGE0002",
        deadline + Duration::milliseconds(1_300),
    )
    .await;
    assert_eq!(past_edge.state, SubmissionState::Late);

    let materials = storage.list_all_materials().await.unwrap();
    let submissions = storage.list_user_submissions(student.id).await.unwrap();
    let activities = assemble(student.id, materials, submissions, now);

    for activity in &activities {
        let stored = activity.submission.as_ref().unwrap();
        let expected = match stored.state {
            SubmissionState::Late => ActivityStatus::SubmittedLate,
            _ => ActivityStatus::Submitted,
        };
        assert_eq!(activity.status.status, expected);
    }
    assert_eq!(activities.len(), 2);
}

#[tokio::test]
async fn test_deleting_material_keeps_submissions() {
    let storage = storage().await;
    let staff = user(&storage, "staff", UserRole::Staff).await;
    let student = user(&storage, "student", UserRole::Student).await;
    let doomed = material(&storage, "Draft", staff.id, None, false).await;
    let submission = submit(&storage, &student, &doomed, "TSK-KEEP0001", Utc::now()).await;

    assert!(storage.delete_material(doomed.id).await.unwrap());
    assert!(!storage.delete_material(doomed.id).await.unwrap());

    let kept = storage
        .get_submission_by_id(submission.task_id)
        .await
        .unwrap()
        .unwrap();
    assert!(kept.material_id.is_none());
    assert_eq!(kept.task_name, "Draft");

    // 资料已删除的提交不会出现在活动列表中
    let activities = assemble(
        student.id,
        storage.list_all_materials().await.unwrap(),
        storage.list_user_submissions(student.id).await.unwrap(),
        Utc::now(),
    );
    assert!(activities.is_empty());
}

#[tokio::test]
async fn test_grade_and_filter_submissions() {
    let storage = storage().await;
    let staff = user(&storage, "staff", UserRole::Staff).await;
    let student = user(&storage, "student", UserRole::Student).await;
    let essay = material(&storage, "Essay", staff.id, None, false).await;
    let first = submit(&storage, &student, &essay, "TSK-GRADE001", Utc::now()).await;
    submit(&storage, &student, &essay, "TSK-GRADE002", Utc::now()).await;

    let graded = storage
        .grade_submission(
            first.task_id,
            SubmissionGrade {
                remark: 92.5,
                remark_comment: Some("Clear argument".to_string()),
                graded_by: staff.id,
                graded_at: Utc::now(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(!first.is_graded());
    assert!(graded.is_graded());
    assert_eq!(graded.remark, Some(92.5));
    assert_eq!(graded.graded_by, Some(staff.id));

    let page = storage
        .list_submissions_with_pagination(SubmissionListQuery {
            material_id: Some(essay.id),
            state: Some(SubmissionState::OnTime),
            size: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 2);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.items.len(), 1);

    let mine = storage.list_user_submissions(student.id).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].task_id > mine[1].task_id);

    assert!(storage.delete_submission(first.task_id).await.unwrap());
    assert!(storage.delete_file(&first.file_ref).await.unwrap());
    assert!(storage.get_file_by_ref(&first.file_ref).await.unwrap().is_none());
}
