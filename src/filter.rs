use url::Url;

/// Determines whether a link target belongs to the site under audit.
///
/// Relative hrefs always resolve against the site base, so they are
/// internal by construction; absolute hrefs are internal only when their
/// host matches the base host.
#[derive(Debug, Clone)]
pub struct LinkScope {
    base: Url,
}

impl LinkScope {
    /// Create a scope rooted at the given base URL
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url)?;
        Ok(Self { base })
    }

    /// Create a scope from an already-parsed URL
    pub fn for_site(base: Url) -> Self {
        Self { base }
    }

    /// The base URL this scope was built from
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Determine if an href points within the site
    pub fn is_internal(&self, href: &str) -> bool {
        let resolved = match self.base.join(href) {
            Ok(u) => u,
            Err(_) => return false,
        };

        // mailto:, tel:, javascript: and friends are never internal links
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return false;
        }

        resolved.host_str() == self.base.host_str()
    }

    /// Resolve an href against the base and strip the fragment, yielding a
    /// normalized absolute URL (None if the href cannot be resolved)
    pub fn normalize(&self, href: &str) -> Option<Url> {
        let mut resolved = self.base.join(href).ok()?;
        resolved.set_fragment(None);
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_hrefs_are_internal() {
        let scope = LinkScope::new("https://example.com/courses/").unwrap();

        assert!(scope.is_internal("/about"));
        assert!(scope.is_internal("intro-to-rust"));
        assert!(scope.is_internal("../pricing"));
        assert!(scope.is_internal("#syllabus"));
    }

    #[test]
    fn test_absolute_hrefs_match_host() {
        let scope = LinkScope::new("https://example.com/").unwrap();

        assert!(scope.is_internal("https://example.com/courses"));
        assert!(!scope.is_internal("https://other.com/courses"));
    }

    #[test]
    fn test_non_http_schemes_are_external() {
        let scope = LinkScope::new("https://example.com/").unwrap();

        assert!(!scope.is_internal("mailto:hello@example.com"));
        assert!(!scope.is_internal("tel:+15551234567"));
        assert!(!scope.is_internal("javascript:void(0)"));
    }

    #[test]
    fn test_normalize_strips_fragment() {
        let scope = LinkScope::new("https://example.com/").unwrap();

        let normalized = scope.normalize("/courses#reviews").unwrap();
        assert_eq!(normalized.as_str(), "https://example.com/courses");
    }
}
