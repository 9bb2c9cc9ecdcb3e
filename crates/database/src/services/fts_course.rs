use crate::{
    dtos::fts_course::{FtsCourse, FtsCourseProfessor},
    entities::{course_professors, courses, evaluation_narratives, listings, professors},
};
use futures::try_join;
use log::debug;
use models::season_code::SeasonCode;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, prelude::Expr,
};
use std::collections::{BTreeSet, HashMap};

pub struct FtsCourseService;

impl FtsCourseService {
    /// The maximum number of courses returned by a single search
    pub const MAX_COURSES: u64 = 1000;

    /// Get the courses of a season, each with its listings, professors and the
    /// evaluation comments containing `keyword`
    ///
    /// The keyword only narrows the attached comments: a course without any
    /// matching comment is still returned, with an empty narrative list.
    pub async fn get_fts_courses(
        db: &DatabaseConnection,
        season_code: &SeasonCode,
        keyword: &str,
    ) -> Result<Vec<FtsCourse>, DbErr> {
        let courses = Self::courses_query(season_code).all(db).await?;

        if courses.is_empty() {
            debug!("No courses found for season {season_code}");
            return Ok(vec![]);
        }

        let course_ids: Vec<i32> = courses.iter().map(|c| c.course_id).collect();

        // Batch fetch the relations of all courses at once
        let (listings, narratives, course_professors) = try_join!(
            Self::listings_query(course_ids.clone()).all(db),
            Self::narratives_query(course_ids.clone(), keyword).all(db),
            Self::course_professors_query(course_ids).all(db),
        )?;

        let professors = if course_professors.is_empty() {
            vec![]
        } else {
            let professor_ids: BTreeSet<i32> =
                course_professors.iter().map(|cp| cp.professor_id).collect();

            professors::Entity::find()
                .filter(professors::Column::ProfessorId.is_in(professor_ids))
                .all(db)
                .await?
        };

        debug!(
            "Season {season_code}, keyword {keyword:?}: {} courses, {} listings, {} narratives, {} professors",
            courses.len(),
            listings.len(),
            narratives.len(),
            professors.len()
        );

        Ok(Self::assemble(
            courses,
            listings,
            narratives,
            course_professors,
            professors,
            keyword,
        ))
    }

    fn courses_query(season_code: &SeasonCode) -> Select<courses::Entity> {
        courses::Entity::find()
            .filter(courses::Column::SeasonCode.eq(*season_code))
            .order_by_asc(courses::Column::CourseId)
            .limit(Self::MAX_COURSES)
    }

    fn listings_query(course_ids: Vec<i32>) -> Select<listings::Entity> {
        listings::Entity::find()
            .filter(listings::Column::CourseId.is_in(course_ids))
            .order_by_asc(listings::Column::ListingId)
    }

    fn narratives_query(
        course_ids: Vec<i32>,
        keyword: &str,
    ) -> Select<evaluation_narratives::Entity> {
        evaluation_narratives::Entity::find()
            .filter(evaluation_narratives::Column::CourseId.is_in(course_ids))
            .filter(Expr::cust_with_values(
                "evaluation_narratives.comment LIKE $1 ESCAPE '!'",
                [Self::like_pattern(keyword)],
            ))
            .order_by_asc(evaluation_narratives::Column::Id)
    }

    fn course_professors_query(course_ids: Vec<i32>) -> Select<course_professors::Entity> {
        course_professors::Entity::find()
            .filter(course_professors::Column::CourseId.is_in(course_ids))
            .order_by_asc(course_professors::Column::CourseId)
            .order_by_asc(course_professors::Column::ProfessorId)
    }

    /// Build a `LIKE` pattern matching `keyword` literally anywhere in the text,
    /// using `!` as the escape character
    fn like_pattern(keyword: &str) -> String {
        let mut pattern = String::with_capacity(keyword.len() + 2);
        pattern.push('%');
        for c in keyword.chars() {
            if matches!(c, '%' | '_' | '!') {
                pattern.push('!');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Nest the fetched relations under their courses, keeping course order
    fn assemble(
        courses: Vec<courses::Model>,
        listings: Vec<listings::Model>,
        narratives: Vec<evaluation_narratives::Model>,
        course_professors: Vec<course_professors::Model>,
        professors: Vec<professors::Model>,
        keyword: &str,
    ) -> Vec<FtsCourse> {
        let mut listings_by_course: HashMap<i32, Vec<listings::Model>> = HashMap::new();
        for listing in listings {
            listings_by_course
                .entry(listing.course_id)
                .or_default()
                .push(listing);
        }

        // LIKE ignores case on some backends, the match must not
        let mut narratives_by_course: HashMap<i32, Vec<evaluation_narratives::Model>> =
            HashMap::new();
        for narrative in narratives
            .into_iter()
            .filter(|n| n.comment.contains(keyword))
        {
            narratives_by_course
                .entry(narrative.course_id)
                .or_default()
                .push(narrative);
        }

        let professors_by_id: HashMap<i32, professors::Model> = professors
            .into_iter()
            .map(|professor| (professor.professor_id, professor))
            .collect();

        let mut professors_by_course: HashMap<i32, Vec<FtsCourseProfessor>> = HashMap::new();
        for link in course_professors {
            if let Some(professor) = professors_by_id.get(&link.professor_id) {
                professors_by_course
                    .entry(link.course_id)
                    .or_default()
                    .push((link, professor.clone()).into());
            }
        }

        courses
            .into_iter()
            .map(|course| {
                let course_id = course.course_id;
                let mut result = FtsCourse::from_model(course);

                result.listings = listings_by_course
                    .remove(&course_id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect();
                result.evaluation_narratives = narratives_by_course
                    .remove(&course_id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect();
                result.course_professors = professors_by_course
                    .remove(&course_id)
                    .unwrap_or_default();

                result
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::season_code::{Term, Year};
    use sea_orm::{DbBackend, QueryTrait};

    fn course(course_id: i32) -> courses::Model {
        courses::Model {
            course_id,
            season_code: "202301".to_string(),
            title: format!("Course {course_id}"),
            description: None,
            areas: vec!["Hu".to_string()],
            skills: vec![],
            last_enrollment: Some(20),
            average_rating: Some(4.2),
            average_workload: Some(3.1),
            average_comment_pos: None,
            average_comment_neu: None,
            average_comment_neg: None,
            average_comment_compound: None,
        }
    }

    fn narrative(id: i32, course_id: i32, comment: &str) -> evaluation_narratives::Model {
        evaluation_narratives::Model {
            id,
            course_id,
            comment: comment.to_string(),
            comment_pos: Some(0.5),
            comment_neu: Some(0.4),
            comment_neg: Some(0.1),
            comment_compound: Some(0.3),
        }
    }

    fn listing(listing_id: i32, course_id: i32, course_code: &str) -> listings::Model {
        let (subject, number) = course_code.split_once(' ').unwrap();
        listings::Model {
            listing_id,
            course_id,
            season_code: "202301".to_string(),
            course_code: course_code.to_string(),
            school: Some("YC".to_string()),
            subject: subject.to_string(),
            number: number.to_string(),
            crn: 10000 + listing_id,
        }
    }

    fn professor(professor_id: i32, name: &str) -> professors::Model {
        professors::Model {
            professor_id,
            name: name.to_string(),
            average_rating: Some(4.0),
        }
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(FtsCourseService::like_pattern("difficult"), "%difficult%");
        assert_eq!(FtsCourseService::like_pattern(""), "%%");
        assert_eq!(FtsCourseService::like_pattern("100%"), "%100!%%");
        assert_eq!(FtsCourseService::like_pattern("p_set"), "%p!_set%");
        assert_eq!(FtsCourseService::like_pattern("wow!"), "%wow!!%");
        assert_eq!(FtsCourseService::like_pattern(r"a\b"), r"%a\b%");
    }

    #[test]
    fn test_courses_query_filters_season_and_caps_rows() {
        let code = SeasonCode::new(Year(2023), Term::Spring);
        let sql = FtsCourseService::courses_query(&code)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""courses"."season_code" = '202301'"#), "{sql}");
        assert!(sql.contains("LIMIT 1000"), "{sql}");
    }

    #[test]
    fn test_narratives_query_uses_escaped_like() {
        let sql = FtsCourseService::narratives_query(vec![1, 2], "50%")
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("LIKE"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(sql.contains(r#""evaluation_narratives"."course_id" IN (1, 2)"#), "{sql}");
    }

    #[test]
    fn test_assemble_keeps_only_matching_narratives() {
        let result = FtsCourseService::assemble(
            vec![course(1)],
            vec![],
            vec![narrative(1, 1, "easy class"), narrative(2, 1, "difficult exam")],
            vec![],
            vec![],
            "difficult",
        );

        assert_eq!(result.len(), 1);
        let comments: Vec<&str> = result[0]
            .evaluation_narratives
            .iter()
            .map(|n| n.comment.as_str())
            .collect();
        assert_eq!(comments, vec!["difficult exam"]);
    }

    #[test]
    fn test_assemble_match_is_case_sensitive() {
        let result = FtsCourseService::assemble(
            vec![course(1)],
            vec![],
            vec![narrative(1, 1, "Difficult exam"), narrative(2, 1, "so difficult")],
            vec![],
            vec![],
            "difficult",
        );

        assert_eq!(result[0].evaluation_narratives.len(), 1);
        assert_eq!(result[0].evaluation_narratives[0].comment, "so difficult");
    }

    #[test]
    fn test_assemble_keeps_courses_without_matches() {
        let result = FtsCourseService::assemble(
            vec![course(1), course(2)],
            vec![listing(1, 2, "CPSC 223")],
            vec![narrative(1, 1, "great lectures")],
            vec![],
            vec![],
            "great",
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].evaluation_narratives.len(), 1);
        assert!(result[1].evaluation_narratives.is_empty());
        assert_eq!(result[1].listings[0].course_code, "CPSC 223");
        assert_eq!(result[1].listings[0].crn, 10001);
    }

    #[test]
    fn test_assemble_empty_keyword_keeps_everything() {
        let result = FtsCourseService::assemble(
            vec![course(1)],
            vec![],
            vec![narrative(1, 1, "easy class"), narrative(2, 1, "")],
            vec![],
            vec![],
            "",
        );

        assert_eq!(result[0].evaluation_narratives.len(), 2);
    }

    #[test]
    fn test_assemble_groups_professors_and_listings() {
        let result = FtsCourseService::assemble(
            vec![course(3), course(1)],
            vec![
                listing(1, 1, "CPSC 223"),
                listing(2, 3, "MATH 120"),
                listing(3, 1, "S&DS 223"),
            ],
            vec![],
            vec![
                course_professors::Model {
                    course_id: 1,
                    professor_id: 7,
                },
                course_professors::Model {
                    course_id: 3,
                    professor_id: 7,
                },
                course_professors::Model {
                    course_id: 3,
                    professor_id: 9,
                },
                // Dangling link, professor row missing
                course_professors::Model {
                    course_id: 1,
                    professor_id: 404,
                },
            ],
            vec![professor(7, "Ada Lovelace"), professor(9, "Alan Turing")],
            "anything",
        );

        assert_eq!(result[0].course_id, 3);
        assert_eq!(result[1].course_id, 1);

        let codes: Vec<&str> = result[1]
            .listings
            .iter()
            .map(|l| l.course_code.as_str())
            .collect();
        assert_eq!(codes, vec!["CPSC 223", "S&DS 223"]);

        let names: Vec<&str> = result[0]
            .course_professors
            .iter()
            .map(|cp| cp.professor.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(result[1].course_professors.len(), 1);

        let links: Vec<(i32, i32)> = result[0]
            .course_professors
            .iter()
            .map(|cp| (cp.course_id, cp.professor_id))
            .collect();
        assert_eq!(links, vec![(3, 7), (3, 9)]);
        assert_eq!(result[1].course_professors[0].course_id, 1);
        assert_eq!(result[1].course_professors[0].professor_id, 7);
    }
}
