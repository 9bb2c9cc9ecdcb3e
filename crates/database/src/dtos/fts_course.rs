use crate::entities::{course_professors, courses, evaluation_narratives, listings, professors};
use serde::Serialize;

/// A course of one season, with its keyword-matching evaluation comments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FtsCourse {
    pub season_code: String,
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub areas: Vec<String>,
    pub skills: Vec<String>,
    pub last_enrollment: Option<i32>,
    pub average_rating: Option<f64>,
    pub average_workload: Option<f64>,
    pub average_comment_pos: Option<f64>,
    pub average_comment_neu: Option<f64>,
    pub average_comment_neg: Option<f64>,
    pub average_comment_compound: Option<f64>,
    pub listings: Vec<FtsListing>,
    #[serde(rename = "evaluationNarratives")]
    pub evaluation_narratives: Vec<FtsNarrative>,
    #[serde(rename = "courseProfessors")]
    pub course_professors: Vec<FtsCourseProfessor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FtsListing {
    pub course_code: String,
    pub school: Option<String>,
    pub subject: String,
    pub crn: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FtsNarrative {
    pub comment: String,
    pub comment_pos: Option<f64>,
    pub comment_neu: Option<f64>,
    pub comment_neg: Option<f64>,
    pub comment_compound: Option<f64>,
}

/// A course-professor link with the linked professor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FtsCourseProfessor {
    pub course_id: i32,
    pub professor_id: i32,
    pub professor: FtsProfessor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FtsProfessor {
    pub name: String,
    pub average_rating: Option<f64>,
}

impl FtsCourse {
    /// Builds a course with empty nested collections
    pub fn from_model(course: courses::Model) -> Self {
        Self {
            season_code: course.season_code,
            course_id: course.course_id,
            title: course.title,
            description: course.description,
            areas: course.areas,
            skills: course.skills,
            last_enrollment: course.last_enrollment,
            average_rating: course.average_rating,
            average_workload: course.average_workload,
            average_comment_pos: course.average_comment_pos,
            average_comment_neu: course.average_comment_neu,
            average_comment_neg: course.average_comment_neg,
            average_comment_compound: course.average_comment_compound,
            listings: Vec::new(),
            evaluation_narratives: Vec::new(),
            course_professors: Vec::new(),
        }
    }
}

impl From<listings::Model> for FtsListing {
    fn from(listing: listings::Model) -> Self {
        Self {
            course_code: listing.course_code,
            school: listing.school,
            subject: listing.subject,
            crn: listing.crn,
        }
    }
}

impl From<evaluation_narratives::Model> for FtsNarrative {
    fn from(narrative: evaluation_narratives::Model) -> Self {
        Self {
            comment: narrative.comment,
            comment_pos: narrative.comment_pos,
            comment_neu: narrative.comment_neu,
            comment_neg: narrative.comment_neg,
            comment_compound: narrative.comment_compound,
        }
    }
}

impl From<(course_professors::Model, professors::Model)> for FtsCourseProfessor {
    fn from((link, professor): (course_professors::Model, professors::Model)) -> Self {
        Self {
            course_id: link.course_id,
            professor_id: link.professor_id,
            professor: FtsProfessor {
                name: professor.name,
                average_rating: professor.average_rating,
            },
        }
    }
}
