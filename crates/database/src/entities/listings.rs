use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A catalog offering of a course under one subject and number
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub listing_id: i32,
    pub course_id: i32,
    pub season_code: String,
    pub course_code: String, // Subject and number, e.g. "CPSC 223"
    pub school: Option<String>,
    pub subject: String,
    pub number: String,
    pub crn: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::CourseId"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
