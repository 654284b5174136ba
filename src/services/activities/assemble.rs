use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::status::{Attempt, DeadlinePolicy, evaluate};
use crate::models::activities::entities::{Activity, StatusView};
use crate::models::materials::entities::Material;
use crate::models::submissions::entities::Submission;

/// 将全部资料与某位用户的提交配对，并计算每份资料的完成状态
///
/// 资料按上传时间倒序（同一时间按 id 倒序）；同一资料存在多次提交时取最近一次。
/// 资料已删除的提交以及不属于该用户的提交会被忽略。
pub fn assemble(
    user_id: i64,
    mut materials: Vec<Material>,
    submissions: Vec<Submission>,
    now: DateTime<Utc>,
) -> Vec<Activity> {
    let mut latest: HashMap<i64, Submission> = HashMap::new();
    for submission in submissions {
        if submission.owner_id != user_id {
            continue;
        }
        let Some(material_id) = submission.material_id else {
            continue;
        };
        match latest.get(&material_id) {
            Some(current)
                if (current.submitted_at, current.task_id)
                    >= (submission.submitted_at, submission.task_id) => {}
            _ => {
                latest.insert(material_id, submission);
            }
        }
    }

    materials.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    materials
        .into_iter()
        .map(|material| {
            let submission = latest.remove(&material.id);
            let status = evaluate(
                &DeadlinePolicy::of(&material),
                now,
                Attempt::of(submission.as_ref()),
            );
            Activity {
                material,
                submission,
                status: StatusView::from(status),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::ActivityStatus;
    use crate::models::materials::entities::MaterialKind;
    use crate::models::submissions::entities::SubmissionState;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn material(id: i64, uploaded_day: u32, deadline: Option<DateTime<Utc>>) -> Material {
        Material {
            id,
            title: format!("Lab {id}"),
            description: None,
            kind: MaterialKind::Link,
            reference: "https://example.com/lab".into(),
            deadline,
            max_score: None,
            late_accepted: true,
            created_by: 1,
            uploaded_at: at(uploaded_day),
            updated_at: at(uploaded_day),
        }
    }

    fn submission(task_id: i64, owner_id: i64, material_id: i64, day: u32) -> Submission {
        Submission {
            task_id,
            task_code: format!("TSK-{task_id:08}"),
            owner_id,
            material_id: Some(material_id),
            task_name: format!("Lab {material_id}"),
            file_ref: format!("2024/01/{task_id}.pdf"),
            comment: None,
            remark: None,
            remark_comment: None,
            state: SubmissionState::OnTime,
            submitted_at: at(day),
            graded_by: None,
            graded_at: None,
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(assemble(7, vec![], vec![], at(1)).is_empty());
    }

    #[test]
    fn test_one_activity_per_material_newest_first() {
        let materials = vec![
            material(1, 1, None),
            material(2, 3, None),
            material(3, 3, None),
            material(4, 2, None),
        ];
        let activities = assemble(7, materials, vec![], at(5));
        let ids: Vec<i64> = activities.iter().map(|a| a.material.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
        assert!(
            activities
                .iter()
                .all(|a| a.status.status == ActivityStatus::Pending)
        );
    }

    #[test]
    fn test_pairs_latest_submission_by_material_id() {
        let materials = vec![material(1, 1, Some(at(10))), material(2, 1, Some(at(10)))];
        let submissions = vec![
            submission(10, 7, 1, 5),
            submission(12, 7, 1, 8),
            submission(11, 7, 1, 8),
            submission(13, 8, 2, 6),
        ];
        let activities = assemble(7, materials, submissions, at(12));

        let first = activities.iter().find(|a| a.material.id == 1).unwrap();
        assert_eq!(first.submission.as_ref().unwrap().task_id, 12);
        assert_eq!(first.status.status, ActivityStatus::Submitted);

        // 其他用户的提交不参与配对
        let second = activities.iter().find(|a| a.material.id == 2).unwrap();
        assert!(second.submission.is_none());
        assert_eq!(second.status.status, ActivityStatus::Missed);
    }

    #[test]
    fn test_same_title_does_not_cross_match() {
        let mut a = material(1, 1, None);
        let mut b = material(2, 2, None);
        a.title = "Essay".into();
        b.title = "Essay".into();
        let activities = assemble(7, vec![a, b], vec![submission(20, 7, 1, 3)], at(4));
        assert!(activities[0].submission.is_none());
        assert_eq!(activities[1].submission.as_ref().unwrap().task_id, 20);
    }

    #[test]
    fn test_late_pairing_and_orphans() {
        let mut orphan = submission(30, 7, 1, 11);
        orphan.material_id = None;
        let activities = assemble(
            7,
            vec![material(1, 1, Some(at(10)))],
            vec![orphan, submission(31, 7, 1, 11)],
            at(12),
        );
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].submission.as_ref().unwrap().task_id, 31);
        assert_eq!(activities[0].status.status, ActivityStatus::SubmittedLate);
        assert_eq!(activities[0].status.label, "Submitted Late");
    }
}
