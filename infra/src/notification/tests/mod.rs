mod adapter_tests;
mod http_email_tests;
