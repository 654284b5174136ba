//! 完成状态判定
//!
//! 读路径（活动列表）与写路径（提交时的初始状态）共用同一个判定函数，
//! 两者不会出现分歧。

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::models::activities::entities::ActivityStatus;
use crate::models::materials::entities::Material;
use crate::models::submissions::entities::{Submission, SubmissionState};
use crate::utils::timestamp::parse_optional;

/// 资料的截止策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    pub deadline: Option<DateTime<Utc>>,
    pub late_accepted: bool,
}

impl DeadlinePolicy {
    pub fn new(deadline: Option<DateTime<Utc>>, late_accepted: bool) -> Self {
        Self {
            deadline,
            late_accepted,
        }
    }

    pub fn of(material: &Material) -> Self {
        Self::new(material.deadline, material.late_accepted)
    }

    /// 由 RFC 3339 文本构造，无法解析时返回 InvalidTimestamp
    pub fn parse(deadline: Option<&str>, late_accepted: bool) -> Result<Self> {
        Ok(Self::new(parse_optional(deadline)?, late_accepted))
    }

    fn is_past(&self, at: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| at > deadline)
    }
}

/// 用户对资料的作答情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Missing,
    /// 已提交，时间可能缺失
    Made(Option<DateTime<Utc>>),
}

impl Attempt {
    pub fn of(submission: Option<&Submission>) -> Self {
        match submission {
            Some(submission) => Attempt::Made(Some(submission.submitted_at)),
            None => Attempt::Missing,
        }
    }

    /// 给出提交时间即视为已提交
    pub fn parse(submitted: bool, submitted_at: Option<&str>) -> Result<Self> {
        let at = parse_optional(submitted_at)?;
        Ok(if submitted || at.is_some() {
            Attempt::Made(at)
        } else {
            Attempt::Missing
        })
    }
}

/// 在参考时间 `now` 下判定完成状态
pub fn evaluate(policy: &DeadlinePolicy, now: DateTime<Utc>, attempt: Attempt) -> ActivityStatus {
    match attempt {
        Attempt::Missing if policy.is_past(now) => ActivityStatus::Missed,
        Attempt::Missing => ActivityStatus::Pending,
        Attempt::Made(Some(at)) if policy.late_accepted && policy.is_past(at) => {
            ActivityStatus::SubmittedLate
        }
        Attempt::Made(_) => ActivityStatus::Submitted,
    }
}

/// 此刻提交时写入的初始状态
///
/// 截止后且不接受迟交的提交仍按 on_time 记录。
pub fn initial_state(policy: &DeadlinePolicy, now: DateTime<Utc>) -> SubmissionState {
    match evaluate(policy, now, Attempt::Made(Some(now))) {
        ActivityStatus::SubmittedLate => SubmissionState::Late,
        _ => SubmissionState::OnTime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn deadline() -> DateTime<Utc> {
        at(10, 0)
    }

    // 覆盖截止前后以及恰好截止的时间点
    fn sample_times() -> Vec<DateTime<Utc>> {
        let d = deadline();
        vec![
            d - Duration::days(3),
            d - Duration::seconds(1),
            d,
            d + Duration::seconds(1),
            d + Duration::days(5),
        ]
    }

    #[test]
    fn test_missed_when_nothing_submitted_after_deadline() {
        let policy = DeadlinePolicy::new(Some(deadline()), true);
        assert_eq!(
            evaluate(&policy, at(11, 0), Attempt::Missing),
            ActivityStatus::Missed
        );
    }

    #[test]
    fn test_late_submission_accepted() {
        let policy = DeadlinePolicy::new(Some(deadline()), true);
        assert_eq!(
            evaluate(&policy, at(12, 0), Attempt::Made(Some(at(11, 0)))),
            ActivityStatus::SubmittedLate
        );
    }

    #[test]
    fn test_late_submission_not_accepted_is_plain_submitted() {
        let policy = DeadlinePolicy::new(Some(deadline()), false);
        assert_eq!(
            evaluate(&policy, at(12, 0), Attempt::Made(Some(at(11, 0)))),
            ActivityStatus::Submitted
        );
    }

    #[test]
    fn test_no_deadline_no_submission_is_pending() {
        let policy = DeadlinePolicy::new(None, false);
        assert_eq!(
            evaluate(&policy, at(30, 0), Attempt::Missing),
            ActivityStatus::Pending
        );
    }

    #[test]
    fn test_without_deadline_never_missed_or_late() {
        for late_accepted in [true, false] {
            let policy = DeadlinePolicy::new(None, late_accepted);
            for now in sample_times() {
                for attempt in [Attempt::Missing, Attempt::Made(None), Attempt::Made(Some(now))] {
                    let status = evaluate(&policy, now, attempt);
                    assert_ne!(status, ActivityStatus::Missed);
                    assert_ne!(status, ActivityStatus::SubmittedLate);
                }
            }
        }
    }

    #[test]
    fn test_on_time_submission_is_submitted() {
        for late_accepted in [true, false] {
            let policy = DeadlinePolicy::new(Some(deadline()), late_accepted);
            for submitted_at in sample_times().into_iter().filter(|t| *t <= deadline()) {
                for now in sample_times() {
                    assert_eq!(
                        evaluate(&policy, now, Attempt::Made(Some(submitted_at))),
                        ActivityStatus::Submitted
                    );
                }
            }
        }
    }

    #[test]
    fn test_missing_attempt_depends_only_on_deadline() {
        for late_accepted in [true, false] {
            let policy = DeadlinePolicy::new(Some(deadline()), late_accepted);
            for now in sample_times() {
                let expected = if now > deadline() {
                    ActivityStatus::Missed
                } else {
                    ActivityStatus::Pending
                };
                assert_eq!(evaluate(&policy, now, Attempt::Missing), expected);
            }
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let policy = DeadlinePolicy::new(Some(deadline()), true);
        let attempt = Attempt::Made(Some(at(11, 0)));
        let first = evaluate(&policy, at(12, 0), attempt);
        for _ in 0..10 {
            assert_eq!(evaluate(&policy, at(12, 0), attempt), first);
        }
    }

    #[test]
    fn test_submission_without_timestamp_is_submitted() {
        let policy = DeadlinePolicy::new(Some(deadline()), true);
        assert_eq!(
            evaluate(&policy, at(20, 0), Attempt::Made(None)),
            ActivityStatus::Submitted
        );
    }

    #[test]
    fn test_initial_state_matches_evaluator() {
        for d in [None, Some(deadline())] {
            for late_accepted in [true, false] {
                let policy = DeadlinePolicy::new(d, late_accepted);
                for now in sample_times() {
                    let state = initial_state(&policy, now);
                    let status = evaluate(&policy, now, Attempt::Made(Some(now)));
                    match status {
                        ActivityStatus::SubmittedLate => assert_eq!(state, SubmissionState::Late),
                        _ => assert_eq!(state, SubmissionState::OnTime),
                    }
                }
            }
        }
    }

    #[test]
    fn test_initial_state_rules() {
        let accepted = DeadlinePolicy::new(Some(deadline()), true);
        let strict = DeadlinePolicy::new(Some(deadline()), false);
        assert_eq!(initial_state(&accepted, deadline()), SubmissionState::OnTime);
        assert_eq!(initial_state(&accepted, at(11, 0)), SubmissionState::Late);
        assert_eq!(initial_state(&strict, at(11, 0)), SubmissionState::OnTime);
        assert_eq!(
            initial_state(&DeadlinePolicy::new(None, true), at(11, 0)),
            SubmissionState::OnTime
        );
    }

    #[test]
    fn test_parse_rejects_malformed_deadline() {
        let err = DeadlinePolicy::parse(Some("next tuesday"), true).unwrap_err();
        assert_eq!(err.code(), "E008");
        let policy = DeadlinePolicy::parse(Some("2024-01-10T00:00:00Z"), false).unwrap();
        assert_eq!(policy.deadline, Some(deadline()));
        assert!(DeadlinePolicy::parse(None, false).unwrap().deadline.is_none());
    }

    #[test]
    fn test_attempt_parse() {
        assert_eq!(Attempt::parse(false, None).unwrap(), Attempt::Missing);
        assert_eq!(Attempt::parse(true, None).unwrap(), Attempt::Made(None));
        assert_eq!(
            Attempt::parse(false, Some("2024-01-11T00:00:00Z")).unwrap(),
            Attempt::Made(Some(at(11, 0)))
        );
        assert!(Attempt::parse(true, Some("")).is_err());
    }
}
