pub mod m202510010001_create_users;
pub mod m202510010002_create_topics;
pub mod m202510010003_create_topic_selections;
pub mod m202510010004_create_submissions;
pub mod m202510010005_create_reviews;
pub mod m202510010006_create_defense_slots;
pub mod m202510010007_create_process_stages;
