use reqwest::Url;

/// Which origins may post messages from the embedded player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed_domains: Vec<String>,
}

impl OriginPolicy {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// `https` only, and the host must equal an allowed domain or be one of
    /// its subdomains
    pub fn is_allowed(&self, origin: &str) -> bool {
        let Ok(url) = Url::parse(origin.trim()) else {
            return false;
        };
        if url.scheme() != "https" {
            return false;
        }
        let Some(host) = url.host_str().map(str::to_lowercase) else {
            return false;
        };

        self.allowed_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OriginPolicy {
        OriginPolicy::new(["kodik.info", "aniqit.com"])
    }

    #[test]
    fn exact_host_and_subdomains_pass() {
        assert!(policy().is_allowed("https://kodik.info"));
        assert!(policy().is_allowed("https://player.kodik.info"));
        assert!(policy().is_allowed("https://a.b.aniqit.com:443"));
    }

    #[test]
    fn lookalikes_and_plain_http_fail() {
        assert!(!policy().is_allowed("http://kodik.info"));
        assert!(!policy().is_allowed("https://evilkodik.info"));
        assert!(!policy().is_allowed("https://kodik.info.evil.com"));
        assert!(!policy().is_allowed("null"));
        assert!(!policy().is_allowed(""));
    }
}
