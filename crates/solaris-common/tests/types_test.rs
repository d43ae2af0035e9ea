//! Tests for the shared language code type

use solaris_common::{LanguageCode, SolarisError};
use std::collections::BTreeSet;

#[test]
fn test_language_code_parsing() {
    for code in ["et", "en", "pt-BR", "zh_Hant", "x1"] {
        let parsed: LanguageCode = code.parse().unwrap();
        assert_eq!(parsed.as_str(), code);
        assert_eq!(parsed.resource_file(), format!("{code}.json"));
    }

    for bad in ["", "../en", "en.json", "e n", "et/", "ü"] {
        let err = LanguageCode::new(bad).unwrap_err();
        assert!(matches!(err, SolarisError::Validation { .. }), "{bad:?} should be rejected");
    }
}

#[test]
fn test_language_code_ordering_and_conversions() {
    let codes: BTreeSet<LanguageCode> = ["et", "en", "fi"]
        .into_iter()
        .map(|c| LanguageCode::try_from(c).unwrap())
        .collect();
    let ordered: Vec<&str> = codes.iter().map(LanguageCode::as_str).collect();
    assert_eq!(ordered, vec!["en", "et", "fi"]);

    let owned = LanguageCode::try_from(String::from("et")).unwrap();
    assert_eq!(owned.to_string(), "et");
    assert_eq!(AsRef::<str>::as_ref(&owned), "et");
}

#[test]
fn test_language_code_serde() {
    let code = LanguageCode::new("et").unwrap();
    assert_eq!(serde_json::to_string(&code).unwrap(), "\"et\"");
    assert!(serde_json::from_str::<LanguageCode>("\"../x\"").is_err());
}
