use crate::models::RawPackageInfo;

/// Header block of a core-metadata file.
///
/// Headers run until the first blank line; lines starting with whitespace
/// continue the previous header. Lookup is case-insensitive and the first
/// occurrence of a header wins.
#[derive(Debug, Default)]
pub struct CoreMetadata {
    headers: Vec<(String, String)>,
}

impl CoreMetadata {
    pub fn parse(content: &str) -> Self {
        let mut headers: Vec<(String, String)> = Vec::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some((_, value)) = headers.last_mut() {
                    value.push('\n');
                    value.push_str(line.trim());
                }
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                headers.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        Self { headers }
    }

    /// First value of `key`. A header present with no value yields `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim())
    }

    /// Structured view of the fields the report needs; `None` without a usable `Name`.
    pub fn into_package_info(self) -> Option<RawPackageInfo> {
        let name = self.get("Name").filter(|n| !n.is_empty())?.to_string();
        Some(RawPackageInfo {
            name,
            version: self.get("Version").map(str::to_string),
            license: self.get("License").map(str::to_string),
            home_page: self.get("Home-page").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS_METADATA: &str = "Metadata-Version: 2.1
Name: requests
Version: 2.31.0
Summary: Python HTTP for Humans.
Home-page: https://requests.readthedocs.io
License: Apache 2.0
Classifier: License :: OSI Approved :: Apache Software License

Requests is an elegant and simple HTTP library for Python.
License: not-a-header
";

    #[test]
    fn test_parse_basic_headers() {
        let info = CoreMetadata::parse(REQUESTS_METADATA)
            .into_package_info()
            .unwrap();
        assert_eq!(info.name, "requests");
        assert_eq!(info.version.as_deref(), Some("2.31.0"));
        assert_eq!(info.license.as_deref(), Some("Apache 2.0"));
        assert_eq!(info.home_page.as_deref(), Some("https://requests.readthedocs.io"));
    }

    #[test]
    fn test_body_is_ignored() {
        let meta = CoreMetadata::parse(REQUESTS_METADATA);
        assert_eq!(meta.get("License"), Some("Apache 2.0"));
    }

    #[test]
    fn test_continuation_lines() {
        let meta = CoreMetadata::parse(
            "Name: pkg\nLicense: Copyright (c) 2020\n        Permission is hereby granted\nVersion: 1.0\n",
        );
        assert_eq!(
            meta.get("License"),
            Some("Copyright (c) 2020\nPermission is hereby granted")
        );
        assert_eq!(meta.get("Version"), Some("1.0"));
    }

    #[test]
    fn test_case_insensitive_first_wins() {
        let meta = CoreMetadata::parse("name: first\nNAME: second\nhome-page: https://x.org\n");
        assert_eq!(meta.get("Name"), Some("first"));
        assert_eq!(meta.get("Home-page"), Some("https://x.org"));
    }

    #[test]
    fn test_blank_values_are_kept() {
        let info = CoreMetadata::parse("Name: pkg\nLicense: \nHome-page:\n")
            .into_package_info()
            .unwrap();
        assert_eq!(info.license.as_deref(), Some(""));
        assert_eq!(info.home_page.as_deref(), Some(""));
        assert_eq!(info.version, None);
    }

    #[test]
    fn test_missing_name() {
        assert!(CoreMetadata::parse("Version: 1.0\n").into_package_info().is_none());
        assert!(CoreMetadata::parse("Name: \nVersion: 1.0\n").into_package_info().is_none());
    }
}
