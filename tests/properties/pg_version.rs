//! Property tests for PostgreSQL version detection.

use proptest::prelude::*;

use ringprov::domain::value_objects::PgVersion;

proptest! {
    /// PROPERTY: Modern majors are detected as the bare major number.
    #[test]
    fn property_modern_major(major in 10u32..40, minor in 0u32..30, distro in "[ A-Za-z0-9.()~-]{0,40}") {
        let output = format!("psql (PostgreSQL) {major}.{minor}{distro}\n");
        prop_assert_eq!(PgVersion::parse(&output), Some(PgVersion::new(major.to_string())));
    }

    /// PROPERTY: Pre-10 releases keep the two-part major.
    #[test]
    fn property_legacy_major(major in 7u32..10, minor in 0u32..7, patch in 0u32..30) {
        let output = format!("psql (PostgreSQL) {major}.{minor}.{patch}");
        prop_assert_eq!(
            PgVersion::parse(&output),
            Some(PgVersion::new(format!("{major}.{minor}")))
        );
    }

    /// PROPERTY: Unrecognized output falls back, never panics.
    #[test]
    fn property_fallback(output in "(?s)[^P]{0,128}") {
        let version = PgVersion::parse_or(&output, "14");
        prop_assert_eq!(version.as_str(), "14");
    }
}
