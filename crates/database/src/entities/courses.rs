use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
    pub season_code: String, // e.g. 202301
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub areas: Vec<String>,
    pub skills: Vec<String>,
    pub last_enrollment: Option<i32>,
    pub average_rating: Option<f64>,
    pub average_workload: Option<f64>,
    // Sentiment averages over all evaluation comments
    pub average_comment_pos: Option<f64>,
    pub average_comment_neu: Option<f64>,
    pub average_comment_neg: Option<f64>,
    pub average_comment_compound: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::listings::Entity")]
    Listings,
    #[sea_orm(has_many = "super::evaluation_narratives::Entity")]
    EvaluationNarratives,
    #[sea_orm(has_many = "super::course_professors::Entity")]
    CourseProfessors,
}

impl Related<super::listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listings.def()
    }
}

impl Related<super::evaluation_narratives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationNarratives.def()
    }
}

impl Related<super::course_professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseProfessors.def()
    }
}

// Many-to-many relationship with professors
impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_professors::Relation::Professor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_professors::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
