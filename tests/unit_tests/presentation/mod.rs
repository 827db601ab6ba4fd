mod api_error_test;
mod environment_test;
