mod log_sms_tests;
mod twilio_tests;
