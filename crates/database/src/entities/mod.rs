pub mod course_professors;
pub mod courses;
pub mod evaluation_narratives;
pub mod listings;
pub mod professors;
