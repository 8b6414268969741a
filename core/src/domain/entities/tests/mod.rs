mod rate_window_tests;
mod session_tests;
mod verification_code_tests;
