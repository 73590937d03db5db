mod auth_test;
mod defense_test;
mod health_test;
mod me_test;
mod process_stages_test;
mod progress_test;
mod statistics_test;
mod submissions_test;
mod topics_test;
mod users_test;
