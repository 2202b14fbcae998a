//! URL resolution for navigation nodes.
//!
//! A node URL is the page path with any trailing index segment removed,
//! followed by the tech-switcher suffix:
//!
//! | path                          | lang         | db         | url                                   |
//! |-------------------------------|--------------|------------|---------------------------------------|
//! | `/orm/index`                  |              |            | `/orm`                                |
//! | `/index`                      |              |            | `/`                                   |
//! | `/getting-started/quickstart` | `typescript` | `postgres` | `/getting-started/quickstart-typescript-postgres` |

/// Remove a trailing `/{index_segment}` from a path.
///
/// A path that becomes empty resolves to `/`.
#[must_use]
pub fn strip_index<'a>(path: &'a str, index_segment: &str) -> &'a str {
    let stripped = path
        .strip_suffix(index_segment)
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(path);
    if stripped.is_empty() { "/" } else { stripped }
}

/// Compose the tech-switcher suffix (`-{lang}` then `-{db}`).
#[must_use]
pub fn tech_suffix(lang: Option<&str>, db: Option<&str>) -> String {
    let mut suffix = String::new();
    for part in [lang, db].into_iter().flatten() {
        suffix.push('-');
        suffix.push_str(part);
    }
    suffix
}

/// Resolve the navigable URL for a page path.
#[must_use]
pub fn page_url(path: &str, lang: Option<&str>, db: Option<&str>, index_segment: &str) -> String {
    let base = strip_index(path, index_segment);
    let suffix = tech_suffix(lang, db);
    if suffix.is_empty() {
        base.to_owned()
    } else {
        format!("{base}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_index_section_page() {
        assert_eq!(strip_index("/orm/index", "index"), "/orm");
        assert_eq!(strip_index("/orm/client/index", "index"), "/orm/client");
    }

    #[test]
    fn test_strip_index_root() {
        assert_eq!(strip_index("/index", "index"), "/");
    }

    #[test]
    fn test_strip_index_leaves_other_paths() {
        assert_eq!(strip_index("/orm/client/queries", "index"), "/orm/client/queries");
        assert_eq!(strip_index("/orm/reindex", "index"), "/orm/reindex");
    }

    #[test]
    fn test_strip_index_custom_segment() {
        assert_eq!(strip_index("/orm/_index", "_index"), "/orm");
    }

    #[test]
    fn test_tech_suffix() {
        assert_eq!(tech_suffix(None, None), "");
        assert_eq!(tech_suffix(Some("typescript"), None), "-typescript");
        assert_eq!(tech_suffix(None, Some("postgres")), "-postgres");
        assert_eq!(
            tech_suffix(Some("typescript"), Some("postgres")),
            "-typescript-postgres"
        );
    }

    #[test]
    fn test_page_url_with_variants() {
        let url = page_url(
            "/getting-started/quickstart",
            Some("typescript"),
            Some("postgres"),
            "index",
        );

        assert_eq!(url, "/getting-started/quickstart-typescript-postgres");
    }

    #[test]
    fn test_page_url_index_with_variant() {
        let url = page_url("/orm/index", Some("node"), None, "index");

        assert_eq!(url, "/orm-node");
    }
}
