//! `$ref` classification and target-id derivation.

/// Prefix of a pointer into the current document.
pub const LOCAL_REF_PREFIX: &str = "#/";

/// Schema name used when an external ref has no fragment.
pub const UNKNOWN_SCHEMA: &str = "Unknown";

/// A ref is external unless it points into the current document.
pub fn is_external(ref_path: &str) -> bool {
    !ref_path.starts_with(LOCAL_REF_PREFIX)
}

/// The two halves of an external ref such as `../shared/common.yml#/components/schemas/User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef<'a> {
    /// Last path segment of the file part (`common.yml`).
    pub file_name: &'a str,
    /// Last path segment of the fragment (`User`).
    pub schema_name: &'a str,
}

impl<'a> ExternalRef<'a> {
    /// Split on the first `#`. Without a fragment the whole ref is the file
    /// name and the schema is [`UNKNOWN_SCHEMA`].
    pub fn parse(ref_path: &'a str) -> Self {
        match ref_path.split_once('#') {
            Some((file_path, fragment)) => Self {
                file_name: last_segment(file_path),
                schema_name: last_segment(fragment),
            },
            None => Self {
                file_name: ref_path,
                schema_name: UNKNOWN_SCHEMA,
            },
        }
    }

    /// Node id shared by every ref that lands on the same file and schema.
    pub fn node_id(&self) -> String {
        format!("{}#{}", self.file_name, self.schema_name)
    }
}

/// Id of the node a ref points at.
///
/// Internal refs resolve to the last segment of the pointer, which by
/// convention is the schema name under `#/components/schemas/`.
pub fn target_id(ref_path: &str) -> String {
    if is_external(ref_path) {
        ExternalRef::parse(ref_path).node_id()
    } else {
        last_segment(ref_path).to_string()
    }
}

/// Text after the final `/`, or the whole input when it has no `/`.
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external() {
        assert!(!is_external("#/components/schemas/Pet"));
        assert!(is_external("common.yml#/components/schemas/User"));
        assert!(is_external("./pet.yaml"));
        // only `#/` marks a local pointer
        assert!(is_external("#Pet"));
    }

    #[test]
    fn test_parse_external_with_fragment() {
        let parsed = ExternalRef::parse("../shared/common.yml#/components/schemas/User");
        assert_eq!(parsed.file_name, "common.yml");
        assert_eq!(parsed.schema_name, "User");
        assert_eq!(parsed.node_id(), "common.yml#User");
    }

    #[test]
    fn test_parse_external_without_fragment() {
        let parsed = ExternalRef::parse("schemas/pet.yaml");
        assert_eq!(parsed.file_name, "schemas/pet.yaml");
        assert_eq!(parsed.schema_name, "Unknown");
        assert_eq!(parsed.node_id(), "schemas/pet.yaml#Unknown");
    }

    #[test]
    fn test_parse_external_splits_on_first_hash() {
        let parsed = ExternalRef::parse("a.yml#/defs/B#C");
        assert_eq!(parsed.file_name, "a.yml");
        assert_eq!(parsed.schema_name, "B#C");
    }

    #[test]
    fn test_url_refs() {
        assert_eq!(
            target_id("https://example.com/specs/common.json#/definitions/Error"),
            "common.json#Error"
        );
    }

    #[test]
    fn test_internal_target() {
        assert_eq!(target_id("#/components/schemas/Pet"), "Pet");
        assert_eq!(target_id("#/definitions/Legacy"), "Legacy");
    }

    #[test]
    fn test_malformed_refs_fall_back() {
        assert_eq!(target_id("#/components/schemas/"), "");
        assert_eq!(target_id("#/"), "");
        assert_eq!(target_id("common.yml#"), "common.yml#");
        assert_eq!(target_id("#"), "#");
        assert_eq!(target_id(""), "#Unknown");
    }

    #[test]
    fn test_trailing_slash_in_file_part() {
        let parsed = ExternalRef::parse("dir/#/X");
        assert_eq!(parsed.file_name, "");
        assert_eq!(parsed.schema_name, "X");
        assert_eq!(parsed.node_id(), "#X");
    }
}
