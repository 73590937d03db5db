pub mod app;

pub use app::{
    TestApp, create_user, empty_request, json_request, make_test_app, multipart_body,
    multipart_request, send,
};
