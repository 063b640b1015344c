pub mod exam_statistics;
pub mod grading;
pub mod result_import;
pub mod result_lookup;
