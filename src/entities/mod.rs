pub mod exam;
pub mod result;
pub mod result_upload;
pub mod sea_orm_active_enums;
pub mod student;
pub mod user;
