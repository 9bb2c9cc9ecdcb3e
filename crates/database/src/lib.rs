pub mod db;
pub mod dtos;
pub mod entities;
pub mod services;
