#[path = "../test_utils.rs"]
mod test_utils;

mod appointments_test;
mod auth_test;
mod availability_test;
mod contact_test;
mod middleware_test;
mod status_test;
