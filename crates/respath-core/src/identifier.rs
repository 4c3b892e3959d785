//! Tagged resource identifiers and their URI text form.
//!
//! Whether an identifier designates a workspace location is decided once, when
//! the identifier is built, and carried as the variant tag. The resolver only
//! matches on it.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::IdentifierError;

pub const PLATFORM_SCHEME: &str = "platform";
const RESOURCE_SEGMENT: &str = "resource";
const PLUGIN_SEGMENT: &str = "plugin";

/// Path payload of a `platform:` identifier plus the components resolution ignores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformPath {
    /// Decoded, un-normalized path after the `resource`/`plugin` segment.
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl PlatformPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            fragment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceIdentifier {
    /// `platform:/resource/...`: a location inside the workspace.
    PlatformResource(PlatformPath),
    /// `platform:/plugin/...`: a location inside an installed plugin.
    PlatformPlugin(PlatformPath),
    /// Any other URI or relative reference, kept verbatim.
    Other(String),
}

impl ResourceIdentifier {
    pub fn platform_resource(path: impl Into<String>) -> Self {
        Self::PlatformResource(PlatformPath::new(path))
    }

    pub fn platform_plugin(path: impl Into<String>) -> Self {
        Self::PlatformPlugin(PlatformPath::new(path))
    }

    pub fn other(text: impl Into<String>) -> Self {
        Self::Other(text.into())
    }

    /// Replace the query. No effect on identifiers that are not `platform:` ones.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        if let Some(platform) = self.platform_path_mut() {
            platform.query = Some(query.into());
        }
        self
    }

    /// Replace the fragment. No effect on identifiers that are not `platform:` ones.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        if let Some(platform) = self.platform_path_mut() {
            platform.fragment = Some(fragment.into());
        }
        self
    }

    pub fn is_platform_resource(&self) -> bool {
        matches!(self, Self::PlatformResource(_))
    }

    fn platform_path_mut(&mut self) -> Option<&mut PlatformPath> {
        match self {
            Self::PlatformResource(platform) | Self::PlatformPlugin(platform) => Some(platform),
            Self::Other(_) => None,
        }
    }

    /// Parse URI text.
    ///
    /// Relative references (no scheme) are `Other`, not errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use respath_core::ResourceIdentifier;
    ///
    /// let id = ResourceIdentifier::parse("platform:/resource/myProject/a%20b.txt#frag").unwrap();
    /// assert!(id.is_platform_resource());
    /// assert_eq!(id, ResourceIdentifier::platform_resource("/myProject/a b.txt").with_fragment("frag"));
    ///
    /// assert!(!ResourceIdentifier::parse("fasfasdf").unwrap().is_platform_resource());
    /// ```
    pub fn parse(text: &str) -> Result<Self, IdentifierError> {
        let url = match Url::parse(text) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Ok(Self::Other(text.to_string()))
            }
            Err(source) => {
                return Err(IdentifierError::Invalid {
                    text: text.to_string(),
                    source,
                })
            }
        };

        if url.scheme() != PLATFORM_SCHEME || url.has_host() {
            return Ok(Self::Other(text.to_string()));
        }

        // `url` collapses `.` and `..` segments (`%2e%2e` too); the resolver must
        // see them, so components are cut from `text`.
        let raw = text.trim_matches(|c: char| c.is_ascii_control() || c == ' ');
        let Some((_, after_scheme)) = raw.split_once(':') else {
            return Ok(Self::Other(text.to_string()));
        };
        // Opaque paths (`platform:resource/x`) have no leading separator.
        let Some(rest) = after_scheme.strip_prefix('/') else {
            return Ok(Self::Other(text.to_string()));
        };
        let (hierarchical, suffix) = rest.split_at(rest.find(['?', '#']).unwrap_or(rest.len()));
        let (before_fragment, fragment) = match suffix.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment)),
            None => (suffix, None),
        };
        let query = before_fragment.strip_prefix('?');

        let (first, payload) = match hierarchical.find('/') {
            Some(index) => hierarchical.split_at(index),
            None => (hierarchical, ""),
        };

        let decode = |component: &str| {
            percent_decode_utf8(component).ok_or_else(|| IdentifierError::InvalidEncoding {
                text: text.to_string(),
            })
        };
        let platform = PlatformPath {
            path: decode(payload)?,
            query: query.map(decode).transpose()?,
            fragment: fragment.map(decode).transpose()?,
        };

        Ok(match first {
            RESOURCE_SEGMENT => Self::PlatformResource(platform),
            PLUGIN_SEGMENT => Self::PlatformPlugin(platform),
            _ => Self::Other(text.to_string()),
        })
    }
}

impl FromStr for ResourceIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (segment, platform) = match self {
            Self::PlatformResource(platform) => (RESOURCE_SEGMENT, platform),
            Self::PlatformPlugin(platform) => (PLUGIN_SEGMENT, platform),
            Self::Other(text) => return f.write_str(text),
        };

        write!(f, "{PLATFORM_SCHEME}:/{segment}")?;
        if !platform.path.is_empty() && !platform.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&percent_encode(&platform.path, b"/"))?;
        if let Some(query) = &platform.query {
            write!(f, "?{}", percent_encode(query, b"/?"))?;
        }
        if let Some(fragment) = &platform.fragment {
            write!(f, "#{}", percent_encode(fragment, b"/?"))?;
        }
        Ok(())
    }
}

fn percent_decode_utf8(s: &str) -> Option<String> {
    if !s.as_bytes().contains(&b'%') {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Escape everything outside the unreserved and sub-delim sets, plus `keep`.
fn percent_encode(text: &str, keep: &[u8]) -> String {
    const ALLOWED: &[u8] = b"-._~!$&'()*+,;=:@";

    let mut out = String::with_capacity(text.len());
    for &b in text.as_bytes() {
        if b.is_ascii_alphanumeric() || ALLOWED.contains(&b) || keep.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_resource() {
        let id = ResourceIdentifier::parse("platform:/resource/myProject/myFile.ext").unwrap();
        assert_eq!(id, ResourceIdentifier::platform_resource("/myProject/myFile.ext"));
    }

    #[test]
    fn test_parse_keeps_excess_separators() {
        let id =
            ResourceIdentifier::parse("platform:/resource/////MyProject///folder///deep/myFile.ext//")
                .unwrap();
        let ResourceIdentifier::PlatformResource(platform) = id else {
            panic!("expected platform resource");
        };
        assert_eq!(platform.path, "/////MyProject///folder///deep/myFile.ext//");
    }

    #[test]
    fn test_parse_root_forms() {
        for text in ["platform:/resource", "platform:/resource/", "platform:/resource///"] {
            let id = ResourceIdentifier::parse(text).unwrap();
            assert!(id.is_platform_resource(), "{text}");
        }
    }

    #[test]
    fn test_parse_query_and_fragment() {
        let id = ResourceIdentifier::parse("platform:/resource/p/f.ext?query#fragment").unwrap();
        let ResourceIdentifier::PlatformResource(platform) = id else {
            panic!("expected platform resource");
        };
        assert_eq!(platform.path, "/p/f.ext");
        assert_eq!(platform.query.as_deref(), Some("query"));
        assert_eq!(platform.fragment.as_deref(), Some("fragment"));
    }

    #[test]
    fn test_parse_plugin() {
        let id = ResourceIdentifier::parse("platform:/plugin/org.example/x/Y.class").unwrap();
        assert_eq!(id, ResourceIdentifier::platform_plugin("/org.example/x/Y.class"));
    }

    #[test]
    fn test_parse_non_platform() {
        assert_eq!(
            ResourceIdentifier::parse("https://example.com/MyFile.ext").unwrap(),
            ResourceIdentifier::other("https://example.com/MyFile.ext")
        );
        assert_eq!(
            ResourceIdentifier::parse("fasfasdf").unwrap(),
            ResourceIdentifier::other("fasfasdf")
        );
        assert_eq!(
            ResourceIdentifier::parse("platform:/resourcex/p").unwrap(),
            ResourceIdentifier::other("platform:/resourcex/p")
        );
        assert_eq!(
            ResourceIdentifier::parse("platform://resource/p").unwrap(),
            ResourceIdentifier::other("platform://resource/p")
        );
    }

    #[test]
    fn test_parse_scheme_is_case_insensitive() {
        let id = ResourceIdentifier::parse("PLATFORM:/resource/p").unwrap();
        assert!(id.is_platform_resource());
    }

    #[test]
    fn test_parse_keeps_reserved_segments_for_the_resolver() {
        let id = ResourceIdentifier::parse("platform:/resource/...////").unwrap();
        assert_eq!(id, ResourceIdentifier::platform_resource("/...////"));
    }

    #[test]
    fn test_parse_keeps_dot_segments() {
        let cases = [
            ("platform:/resource/myProject/../other", "/myProject/../other"),
            ("platform:/resource/myProject/%2e%2e/other", "/myProject/../other"),
            ("platform:/resource/myProject/./x", "/myProject/./x"),
            ("platform:/resource/../x/y", "/../x/y"),
            ("platform:/resource/..", "/.."),
        ];
        for (text, path) in cases {
            assert_eq!(
                ResourceIdentifier::parse(text).unwrap(),
                ResourceIdentifier::platform_resource(path),
                "{text}"
            );
        }
    }

    #[test]
    fn test_parse_decodes_query_and_fragment() {
        let id = ResourceIdentifier::parse("platform:/resource/p/f?a%23b#x%20y").unwrap();
        assert_eq!(
            id,
            ResourceIdentifier::platform_resource("/p/f")
                .with_query("a#b")
                .with_fragment("x y")
        );
    }

    #[test]
    fn test_parse_invalid_encoding() {
        let err = ResourceIdentifier::parse("platform:/resource/p/%FF").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_display_encodes_structural_characters() {
        let id = ResourceIdentifier::platform_resource("/p/a b#c.txt").with_query("q");
        let text = id.to_string();
        assert_eq!(text, "platform:/resource/p/a%20b%23c.txt?q");
        assert_eq!(ResourceIdentifier::parse(&text).unwrap(), id);
    }

    #[test]
    fn test_display_encodes_query_and_fragment() {
        let id = ResourceIdentifier::platform_resource("/p/f")
            .with_query("a#b")
            .with_fragment("50%/x?y");
        let text = id.to_string();
        assert_eq!(text, "platform:/resource/p/f?a%23b#50%25/x?y");
        assert_eq!(ResourceIdentifier::parse(&text).unwrap(), id);
    }

    #[test]
    fn test_display_inserts_missing_separator() {
        let id = ResourceIdentifier::platform_resource("p/f");
        assert_eq!(id.to_string(), "platform:/resource/p/f");
    }

    #[test]
    fn test_with_fragment_ignored_for_other() {
        let id = ResourceIdentifier::other("https://x").with_fragment("f");
        assert_eq!(id, ResourceIdentifier::other("https://x"));
    }
}
