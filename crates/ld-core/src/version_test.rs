use super::*;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn test_parse_release() {
    let version = v("1.2.3");
    assert_eq!(version.triple(), (1, 2, 3));
    assert!(!version.is_prerelease());
    assert_eq!(version, Version::new(1, 2, 3));
}

#[test]
fn test_parse_prerelease() {
    let version = v("2.0.0-rc.1");
    assert_eq!(version.triple(), (2, 0, 0));
    assert_eq!(version.prerelease, "rc.1");
    assert!(version.is_prerelease());
}

#[test]
fn test_prerelease_may_contain_hyphens() {
    assert_eq!(v("1.0.0-alpha-2").prerelease, "alpha-2");
}

#[test]
fn test_render_round_trips_canonical_forms() {
    for input in ["0.0.0", "1.2.3", "10.20.30", "1.0.0-alpha", "1.0.0-alpha.1", "3.1.4-rc-1"] {
        assert_eq!(v(input).to_string(), input);
    }
}

#[test]
fn test_from_str() {
    let version: Version = "4.5.6".parse().unwrap();
    assert_eq!(version, Version::new(4, 5, 6));
}

#[test]
fn test_parse_rejects_malformed_input() {
    for input in [
        "", "1", "1.2", "1.2.3.4", "a.b.c", "1.x.3", "1.2.-3", "-1.2.3", "1.2.3-", "1.2.3-a..b",
        "v1.2.3", " 1.2.3", "1.2.3+build", "1.2.3-al pha",
    ] {
        let err = Version::parse(input).unwrap_err();
        assert!(err.is_parse_error(), "expected parse error for {input:?}");
    }
}

#[test]
fn test_error_names_the_input() {
    let err = Version::parse("1.two.3").unwrap_err();
    assert!(err.to_string().contains("1.two.3"));
}

#[test]
fn test_numeric_ordering_not_lexicographic() {
    assert!(v("1.10.0") > v("1.9.0"));
    assert!(v("2.0.0") > v("1.99.99"));
    assert!(v("0.0.10") > v("0.0.9"));
}

#[test]
fn test_major_dominates_minor_and_patch() {
    assert!(v("1.0.0") < v("2.0.0"));
    assert!(v("1.5.0") < v("2.0.0"));
    assert!(v("1.0.9") < v("1.1.0"));
}

#[test]
fn test_prerelease_sorts_before_release() {
    assert!(v("1.0.0-alpha") < v("1.0.0"));
    assert!(v("1.0.0") > v("1.0.0-rc.1"));
}

#[test]
fn test_prerelease_is_only_a_tiebreak() {
    assert!(v("1.0.1-alpha") > v("1.0.0"));
    assert!(v("0.9.9") < v("1.0.0-alpha"));
}

#[test]
fn test_prerelease_identifier_precedence() {
    let ordered = [
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-alpha.beta",
        "1.0.0-beta",
        "1.0.0-beta.2",
        "1.0.0-beta.11",
        "1.0.0-rc.1",
        "1.0.0",
    ];
    for pair in ordered.windows(2) {
        assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
    }
}

#[test]
fn test_equality_requires_all_components() {
    assert_eq!(v("1.2.3"), v("1.2.3"));
    assert_ne!(v("1.2.3"), v("1.2.4"));
    assert_ne!(v("1.2.3-alpha"), v("1.2.3"));
    assert_eq!(v("1.2.3").cmp(&v("1.2.3")), Ordering::Equal);
}

#[test]
fn test_ordering_is_total_and_consistent() {
    let mut versions: Vec<Version> = [
        "1.0.0", "0.1.0", "1.0.0-rc.1", "0.0.1", "1.1.0", "1.0.1", "1.0.0-alpha", "0.10.0",
    ]
    .iter()
    .map(|s| v(s))
    .collect();
    versions.sort();
    let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "0.0.1",
            "0.1.0",
            "0.10.0",
            "1.0.0-alpha",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0"
        ]
    );

    for a in &versions {
        for b in &versions {
            let lt = a < b;
            let gt = a > b;
            let eq = a == b;
            assert_eq!([lt, gt, eq].iter().filter(|x| **x).count(), 1);
        }
    }
}
