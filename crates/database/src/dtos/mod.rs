pub mod fts_course;
