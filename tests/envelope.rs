// tests/envelope.rs
//
// API response decoding and request identity, no network.
//
use wiki_tables::config::ClientId;
use wiki_tables::core::net::{extract_html, html_from_saved, user_agent};
use wiki_tables::Error;

#[test]
fn html_is_read_from_parse_text_star() {
    let body = r#"{"parse":{"title":"Wikipedia:Statistics","pageid":1,"text":{"*":"<p>hi</p>"}}}"#;
    assert_eq!(extract_html(body).unwrap(), "<p>hi</p>");
}

#[test]
fn api_error_object_is_surfaced() {
    let body = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist.","*":"docs"}}"#;
    match extract_html(body) {
        Err(Error::Api { code, info }) => {
            assert_eq!(code, "missingtitle");
            assert!(info.contains("doesn't exist"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[test]
fn missing_payload_is_an_envelope_error() {
    assert!(matches!(extract_html(r#"{"parse":{"title":"X"}}"#), Err(Error::Envelope(_))));
    assert!(matches!(extract_html(r#"{"batchcomplete":""}"#), Err(Error::Envelope(_))));
}

#[test]
fn non_json_body_is_a_json_error() {
    assert!(matches!(extract_html("<html>rate limited</html>"), Err(Error::Json(_))));
}

#[test]
fn saved_files_may_be_raw_html_or_envelope() {
    assert_eq!(html_from_saved("<table></table>").unwrap(), "<table></table>");
    assert_eq!(
        html_from_saved(" \n{\"parse\":{\"text\":{\"*\":\"<b>x</b>\"}}}").unwrap(),
        "<b>x</b>"
    );
}

#[test]
fn user_agent_carries_contact_email() {
    let client = ClientId { app: "scrape_wiki_tables/0.1".into(), email: "someone@example.org".into() };
    assert_eq!(user_agent(&client).unwrap(), "scrape_wiki_tables/0.1 (someone@example.org)");

    let blank_app = ClientId { app: "  ".into(), email: "someone@example.org".into() };
    assert!(user_agent(&blank_app).unwrap().starts_with("wiki_tables/"));
}

#[test]
fn user_agent_without_email_is_rejected() {
    let client = ClientId { app: "x/1".into(), email: "nobody".into() };
    assert!(matches!(user_agent(&client), Err(Error::InvalidArgument(_))));
}
