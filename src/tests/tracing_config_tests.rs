use super::*;

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse(" text "), LogFormat::Text);
}

#[test]
fn test_unknown_log_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
}

#[test]
fn test_no_filter_without_log_variables() {
    assert!(select_filter(None, None).is_none());
}

#[test]
fn test_viewmap_log_takes_precedence() {
    let filter = select_filter(Some("viewmap_resolver=trace"), Some("warn"))
        .expect("filter from VIEWMAP_LOG");
    assert!(filter.to_string().contains("viewmap_resolver=trace"));

    let filter = select_filter(None, Some("warn")).expect("filter from RUST_LOG");
    assert!(filter.to_string().contains("warn"));
}
