pub mod defense;
pub mod process_stage;
pub mod selection;
pub mod submission;
pub mod topic;
pub mod user;
