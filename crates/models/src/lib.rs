pub mod season_code;
