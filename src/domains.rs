//! Custom Domain Detection
//!
//! A site served from its default hosting domain needs no dashboard entry;
//! anything that resolves elsewhere is a custom domain worth recording.

use url::Url;

/// Default hostnames of the two hosting platforms.
const PLATFORM_HOSTS: [&str; 2] = ["github.io", "netlify.app"];

/// Dashboard labels carry a project hint that maps onto the repository the
/// custom domain belongs to.
const LABEL_REPO_RULES: [(&str, &str); 3] = [
    ("bathroom", "BATHROOM-REMODELING-WOLF"),
    ("kitchen", "KITCHEN-REMODELING-WOLF"),
    ("adu", "ADU-HOMEADDITION"),
];

/// True when the host is a platform default domain or a subdomain of one.
pub fn is_platform_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    PLATFORM_HOSTS
        .iter()
        .any(|p| host == *p || host.ends_with(&format!(".{}", p)))
}

/// Host part of a URL, lowercased. None for unparseable or host-less URLs.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

/// The final URL's host, verbatim, when it is not a platform domain.
pub fn custom_domain(final_url: &str) -> Option<String> {
    host_of(final_url).filter(|host| !is_platform_host(host))
}

/// Strip scheme and path from a homepage-style value, keeping the bare host.
pub fn strip_to_host(value: &str) -> String {
    let stripped = value
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    stripped
        .split('/')
        .next()
        .unwrap_or(stripped)
        .trim_end_matches('/')
        .to_string()
}

/// Map a dashboard label to the repository its custom domain belongs to.
pub fn infer_repo_from_label(label: &str) -> Option<&'static str> {
    let label = label.to_lowercase();
    LABEL_REPO_RULES
        .iter()
        .find(|(hint, _)| label.contains(hint))
        .map(|(_, repo)| *repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_hosts() {
        assert!(is_platform_host("github.io"));
        assert!(is_platform_host("mediagrowthmkt-debug.github.io"));
        assert!(is_platform_host("xenonmotel.netlify.app"));
        assert!(!is_platform_host("bathroom.wolfcarpenters.com"));
        // A suffix in the middle of a hostname is not the platform.
        assert!(!is_platform_host("github.io.example.com"));
        assert!(!is_platform_host("evilgithub.io"));
    }

    #[test]
    fn test_custom_domain_from_final_url() {
        assert_eq!(
            custom_domain("https://bathroom.wolfcarpenters.com/"),
            Some("bathroom.wolfcarpenters.com".to_string())
        );
        assert_eq!(
            custom_domain("https://mediagrowthmkt-debug.github.io/AMCC-LP/"),
            None
        );
        assert_eq!(custom_domain("not a url"), None);
    }

    #[test]
    fn test_strip_to_host() {
        assert_eq!(
            strip_to_host("https://protecpremiumgranite.com/"),
            "protecpremiumgranite.com"
        );
        assert_eq!(
            strip_to_host("http://adu.wolfcarpenters.com/some/path"),
            "adu.wolfcarpenters.com"
        );
        assert_eq!(strip_to_host("plain.example.com"), "plain.example.com");
    }

    #[test]
    fn test_infer_repo_from_label() {
        assert_eq!(
            infer_repo_from_label("Wolf - Bathroom"),
            Some("BATHROOM-REMODELING-WOLF")
        );
        assert_eq!(
            infer_repo_from_label("Wolf - Kitchen"),
            Some("KITCHEN-REMODELING-WOLF")
        );
        assert_eq!(infer_repo_from_label("Wolf - ADU"), Some("ADU-HOMEADDITION"));
        assert_eq!(infer_repo_from_label("Banca Pacheco - LP Queijos"), None);
    }
}
