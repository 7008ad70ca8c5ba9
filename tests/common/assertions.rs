//! Custom assertion macros and utilities

/// Assert a response status, printing the body on mismatch
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status_code(),
            $status,
            "unexpected status, body: {}",
            $response.text()
        );
    };
}

/// Assert that a JSON error body carries the given status code
#[macro_export]
macro_rules! assert_error_body {
    ($response:expr, $status:expr) => {
        $crate::assert_status!($response, $status);
        let body: serde_json::Value = $response.json();
        assert_eq!(body["status"], $status.as_u16());
        assert!(body["error"].is_string(), "missing error message: {}", body);
    };
}
