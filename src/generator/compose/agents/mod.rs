pub mod article_writer;
pub mod outline_planner;
pub mod section_writer;
