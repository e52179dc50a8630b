//! Tests for report rendering

use crate::validation::report::{render_report, Findings};

#[test]
fn valid_verdict_when_nothing_was_found() {
    let findings = Findings::new();
    assert_eq!(
        render_report("/data/a.tif", &findings),
        "/data/a.tif is a valid cloud optimized GeoTIFF\n"
    );
}

#[test]
fn warnings_only_still_renders_the_valid_verdict() {
    let mut findings = Findings::new();
    findings.warning("No overviews found for large image.".to_string());

    let expected = concat!(
        "The following warnings were found:\n",
        " - No overviews found for large image.\n",
        "\n",
        "/data/a.tif is a valid cloud optimized GeoTIFF\n"
    );
    assert_eq!(render_report("/data/a.tif", &findings), expected);
}

#[test]
fn errors_render_the_invalid_verdict() {
    let mut findings = Findings::new();
    findings.error("first".to_string());
    findings.error("second".to_string());

    let expected = concat!(
        "b.tif is NOT a valid cloud optimized GeoTIFF.\n",
        "The following errors were found:\n",
        " - first\n",
        " - second\n",
        "\n"
    );
    assert_eq!(render_report("b.tif", &findings), expected);
}

#[test]
fn warnings_precede_errors() {
    let mut findings = Findings::new();
    findings.error("e".to_string());
    findings.warning("w".to_string());

    let report = render_report("c.tif", &findings);
    let warning_pos = report.find(" - w").unwrap();
    let error_pos = report.find(" - e").unwrap();
    assert!(warning_pos < error_pos);
}

#[test]
fn findings_keep_detection_order_and_duplicates() {
    let mut findings = Findings::new();
    findings.error("dup".to_string());
    findings.error("aaa".to_string());
    findings.error("dup".to_string());

    assert_eq!(findings.errors(), ["dup", "aaa", "dup"]);
}
