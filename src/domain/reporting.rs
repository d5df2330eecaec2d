//! Read-only reporting views built from typed pipeline stages.
//!
//! Each view is a fixed sequence of small steps over rows already loaded from
//! the stores. Stage order matters: filters run after the joins they depend on.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use utoipa::ToSchema;

use super::{Class, EnrolledClass, Enrollment, User, UserRole};

/// Instructor ranked by enrollment summed over all of their classes.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRanking {
    pub instructor: User,
    pub total_enrolled: i64,
}

/// Summed enrollment for one instructor email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentGroup {
    pub instructor_email: String,
    pub total_enrolled: i64,
}

/// Dashboard counters for administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub approved_classes: u64,
    pub pending_classes: u64,
    pub instructors: u64,
    pub total_classes: u64,
    pub total_enrolled: u64,
}

// =============================================================================
// Popular instructors: group -> join -> filter -> project -> sort -> limit
// =============================================================================

/// Group classes by instructor email and sum their enrollment.
///
/// Groups come out ordered by email, which fixes the order of ties downstream.
pub fn group_by_instructor(classes: &[Class]) -> Vec<EnrollmentGroup> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for class in classes {
        *totals.entry(class.instructor_email.as_str()).or_default() +=
            i64::from(class.total_enrolled);
    }
    totals
        .into_iter()
        .map(|(email, total_enrolled)| EnrollmentGroup {
            instructor_email: email.to_string(),
            total_enrolled,
        })
        .collect()
}

/// Attach every user whose email matches the group key.
pub fn join_users<'u>(
    groups: Vec<EnrollmentGroup>,
    users: &'u [User],
) -> Vec<(EnrollmentGroup, Vec<&'u User>)> {
    groups
        .into_iter()
        .map(|group| {
            let matched = users
                .iter()
                .filter(|u| u.email == group.instructor_email)
                .collect();
            (group, matched)
        })
        .collect()
}

/// Keep groups joined to at least one user whose role is exactly `instructor`.
pub fn filter_role<'u>(
    joined: Vec<(EnrollmentGroup, Vec<&'u User>)>,
    role: UserRole,
) -> Vec<(EnrollmentGroup, Vec<&'u User>)> {
    joined
        .into_iter()
        .filter(|(_, users)| users.iter().any(|u| u.role == role))
        .collect()
}

/// Project each group to its first joined user.
pub fn project_first(joined: Vec<(EnrollmentGroup, Vec<&User>)>) -> Vec<InstructorRanking> {
    joined
        .into_iter()
        .filter_map(|(group, users)| {
            users.first().map(|user| InstructorRanking {
                instructor: (*user).clone(),
                total_enrolled: group.total_enrolled,
            })
        })
        .collect()
}

/// Stable sort by enrollment, highest first, then truncate.
pub fn top_by_enrollment(mut rows: Vec<InstructorRanking>, limit: usize) -> Vec<InstructorRanking> {
    rows.sort_by(|a, b| b.total_enrolled.cmp(&a.total_enrolled));
    rows.truncate(limit);
    rows
}

/// Rank instructors by total enrollment across their classes.
pub fn popular_instructors(classes: &[Class], users: &[User], limit: usize) -> Vec<InstructorRanking> {
    let groups = group_by_instructor(classes);
    let joined = join_users(groups, users);
    let instructors = filter_role(joined, UserRole::Instructor);
    top_by_enrollment(project_first(instructors), limit)
}

// =============================================================================
// Enrolled classes: match -> lookup classes -> unwind -> lookup instructor -> project
// =============================================================================

/// Expand enrollments into one row per purchased class, joined to its instructor.
///
/// Enrollments whose classes no longer exist produce no rows. Rows keep the
/// enrollment order, then the purchase order within an enrollment.
pub fn enrolled_classes(
    user_email: &str,
    enrollments: &[Enrollment],
    classes: &[Class],
    users: &[User],
) -> Vec<EnrolledClass> {
    let index: HashMap<_, _> = classes.iter().map(|c| (c.id, c)).collect();
    let classes_by_id = &index;

    enrollments
        .iter()
        .filter(|e| e.user_email == user_email)
        // lookup + unwind
        .flat_map(move |e| {
            e.classes_id
                .iter()
                .filter_map(move |id| classes_by_id.get(id).copied())
        })
        .map(|class| EnrolledClass {
            classes: class.clone(),
            instructor: users
                .iter()
                .find(|u| u.email == class.instructor_email)
                .cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(email: &str, role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or_default().to_string(),
            role,
            photo_url: None,
            gender: None,
            address: None,
            phone: None,
            about: None,
            skills: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn class(instructor: &str, enrolled: i32) -> Class {
        Class {
            id: Uuid::new_v4(),
            name: format!("{instructor} class"),
            image: None,
            instructor_name: None,
            instructor_email: instructor.to_string(),
            price: 20.0,
            available_seats: 10,
            total_enrolled: enrolled,
            description: None,
            video_link: None,
            status: ReviewStatus::Approved,
            reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_group_sums_per_instructor() {
        let classes = vec![class("b@x.io", 3), class("a@x.io", 5), class("b@x.io", 4)];
        let groups = group_by_instructor(&classes);
        assert_eq!(
            groups,
            vec![
                EnrollmentGroup { instructor_email: "a@x.io".into(), total_enrolled: 5 },
                EnrollmentGroup { instructor_email: "b@x.io".into(), total_enrolled: 7 },
            ]
        );
    }

    #[test]
    fn test_popular_instructors_only_exact_instructor_role() {
        let users = vec![
            user("teach@x.io", UserRole::Instructor),
            user("boss@x.io", UserRole::Admin),
            user("learn@x.io", UserRole::Student),
        ];
        let classes = vec![
            class("teach@x.io", 2),
            class("boss@x.io", 50),
            class("learn@x.io", 40),
            class("ghost@x.io", 99),
        ];

        let ranking = popular_instructors(&classes, &users, 6);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].instructor.email, "teach@x.io");
        assert_eq!(ranking[0].total_enrolled, 2);
    }

    #[test]
    fn test_popular_instructors_sorted_and_limited() {
        let users: Vec<User> = (0..8)
            .map(|i| user(&format!("i{i}@x.io"), UserRole::Instructor))
            .collect();
        let classes: Vec<Class> = (0..8)
            .map(|i| class(&format!("i{i}@x.io"), i * 10))
            .collect();

        let ranking = popular_instructors(&classes, &users, 6);
        let totals: Vec<i64> = ranking.iter().map(|r| r.total_enrolled).collect();
        assert_eq!(totals, vec![70, 60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_ties_keep_group_order() {
        let users = vec![
            user("zed@x.io", UserRole::Instructor),
            user("amy@x.io", UserRole::Instructor),
        ];
        let classes = vec![class("zed@x.io", 5), class("amy@x.io", 5)];

        let ranking = popular_instructors(&classes, &users, 6);
        assert_eq!(ranking[0].instructor.email, "amy@x.io");
        assert_eq!(ranking[1].instructor.email, "zed@x.io");
    }

    #[test]
    fn test_enrolled_classes_unwinds_one_row_per_class() {
        let teacher = user("teach@x.io", UserRole::Instructor);
        let c1 = class("teach@x.io", 1);
        let c2 = class("missing-teacher@x.io", 1);
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            user_email: "buyer@x.io".into(),
            classes_id: vec![c2.id, c1.id, Uuid::new_v4()],
            transaction_id: "tx".into(),
            created_at: Utc::now(),
        };
        let other = Enrollment {
            user_email: "someone-else@x.io".into(),
            id: Uuid::new_v4(),
            ..enrollment.clone()
        };

        let rows = enrolled_classes(
            "buyer@x.io",
            &[enrollment, other],
            &[c1.clone(), c2.clone()],
            &[teacher.clone()],
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].classes.id, c2.id);
        assert!(rows[0].instructor.is_none());
        assert_eq!(rows[1].classes.id, c1.id);
        assert_eq!(rows[1].instructor.as_ref(), Some(&teacher));
    }
}
