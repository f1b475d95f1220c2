use std::error::Error;
use summarizer::errors::SummarizerError;
use summarizer::service::decode_body;

#[test]
fn test_summarizer_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SummarizerError::Decode("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_summarizer_error_display() {
    let error = SummarizerError::Startup("model artifact unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to load summarization engine: model artifact unavailable"
    );

    let error = SummarizerError::Inference("out of memory".to_string());
    assert_eq!(format!("{error}"), "Summarization failed: out of memory");

    let error = SummarizerError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_only_decode_failures_are_client_errors() {
    assert!(SummarizerError::Decode("bad".into()).is_client_error());
    assert!(!SummarizerError::Inference("bad".into()).is_client_error());
    assert!(!SummarizerError::Startup("bad".into()).is_client_error());
    assert!(!SummarizerError::HttpError("bad".into()).is_client_error());
}

#[test]
fn test_decode_errors_are_client_errors() {
    let err = decode_body("{").unwrap_err();

    match &err {
        SummarizerError::Decode(msg) => assert!(!msg.is_empty()),
        _ => panic!("Unexpected error type"),
    }
    assert!(err.is_client_error());
}

#[test]
fn test_summarizer_error_from_conversions() {
    // Compile-time check that reqwest errors convert.
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SummarizerError {
        SummarizerError::from(err)
    }
}
