use std::collections::HashMap;

/// Language used when the browser preference is not supported.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Information about a supported language
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub translation: &'static str,
    pub native_name: &'static str,
}

/// Get a map of supported languages
pub fn supported_languages() -> HashMap<&'static str, LanguageInfo> {
    HashMap::from([(
        "en",
        LanguageInfo {
            code: "en",
            translation: include_str!("../translations/en.json"),
            native_name: "English",
        },
    )])
}

/// Translation tables keyed by language code, as the i18n provider expects.
pub fn translation_tables() -> HashMap<&'static str, &'static str> {
    supported_languages()
        .into_values()
        .map(|info| (info.code, info.translation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn default_language_is_bundled() {
        let tables = translation_tables();
        assert!(tables.contains_key(DEFAULT_LANGUAGE));
        assert_eq!(supported_languages()[DEFAULT_LANGUAGE].native_name, "English");
    }

    #[test]
    fn bundled_translations_are_valid_json() {
        for info in supported_languages().values() {
            let parsed: serde_json::Value = serde_json::from_str(info.translation).unwrap();
            assert!(parsed.is_object(), "{} translation is not an object", info.code);
        }
    }

    #[test_case("login.errors.invalid_credentials")]
    #[test_case("login.errors.unreachable")]
    #[test_case("login.errors.failed")]
    #[test_case("signup.errors.register_failed")]
    #[test_case("reports.more")]
    fn message_keys_resolve(key: &str) {
        let table: serde_json::Value =
            serde_json::from_str(supported_languages()[DEFAULT_LANGUAGE].translation).unwrap();
        let pointer = format!("/{}", key.replace('.', "/"));
        assert!(table.pointer(&pointer).is_some_and(serde_json::Value::is_string));
    }
}
