pub mod defense_committee_member;
pub mod defense_slot;
pub mod defense_student;
pub mod process_stage;
pub mod review;
pub mod submission;
pub mod topic;
pub mod topic_selection;
pub mod user;

pub use defense_committee_member::Entity as DefenseCommitteeMember;
pub use defense_slot::Entity as DefenseSlot;
pub use defense_student::Entity as DefenseStudent;
pub use process_stage::Entity as ProcessStage;
pub use review::Entity as Review;
pub use submission::Entity as Submission;
pub use topic::Entity as Topic;
pub use topic_selection::Entity as TopicSelection;
pub use user::Entity as User;
