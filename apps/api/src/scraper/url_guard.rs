// Refuses to fetch loopback, private and link-local addresses.

use std::net::{IpAddr, Ipv6Addr};

use url::{Host, Url};

use super::ScrapeError;

pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()            // 127.0.0.0/8
                || v4.is_private()      // 10/8, 172.16/12, 192.168/16
                || v4.is_link_local()   // 169.254/16
                || v4.is_unspecified()  // 0.0.0.0
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_private_ip(IpAddr::V4(v4)),
            None => v6.is_loopback() || v6.is_unspecified() || is_local_v6(v6),
        },
    }
}

/// fc00::/7 (unique local) and fe80::/10 (link local).
fn is_local_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
}

/// Host names that are local without needing a DNS lookup.
pub fn is_private_host(host: &str) -> bool {
    let lower = host.trim_end_matches('.').to_ascii_lowercase();
    lower == "localhost"
        || lower.ends_with(".localhost")
        || lower.ends_with(".local")
        || lower.ends_with(".internal")
}

/// Checks the URL's host, resolving domain names and rejecting the URL if any
/// resolved address is private.
pub async fn ensure_public_host(url: &Url) -> Result<(), ScrapeError> {
    let blocked = |host: &str| ScrapeError::BlockedHost(host.to_string());

    match url.host() {
        None => Err(ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        }),
        Some(Host::Ipv4(ip)) if is_private_ip(IpAddr::V4(ip)) => Err(blocked(&ip.to_string())),
        Some(Host::Ipv6(ip)) if is_private_ip(IpAddr::V6(ip)) => Err(blocked(&ip.to_string())),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        Some(Host::Domain(domain)) => {
            if is_private_host(domain) {
                return Err(blocked(domain));
            }
            let port = url.port_or_known_default().unwrap_or(80);
            let addrs = tokio::net::lookup_host((domain, port))
                .await
                .map_err(|source| ScrapeError::Resolve {
                    host: domain.to_string(),
                    source,
                })?;
            for addr in addrs {
                if is_private_ip(addr.ip()) {
                    return Err(blocked(domain));
                }
            }
            Ok(())
        }
    }
}

/// Host check for redirect targets. No DNS here: redirect policies run synchronously.
pub fn is_blocked_redirect(url: &Url) -> bool {
    match url.host() {
        None => true,
        Some(Host::Ipv4(ip)) => is_private_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_private_ip(IpAddr::V6(ip)),
        Some(Host::Domain(domain)) => is_private_host(domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_private_ip_v4() {
        for ip in ["127.0.0.1", "10.1.2.3", "172.16.0.9", "192.168.1.1", "169.254.169.254", "0.0.0.0"] {
            assert!(is_private_ip(ip.parse().unwrap()), "{ip} should be private");
        }
        assert!(!is_private_ip("93.184.216.34".parse().unwrap()));
    }

    #[test]
    fn test_is_private_ip_v6() {
        for ip in ["::1", "::", "fd00::1", "fe80::1", "::ffff:127.0.0.1"] {
            assert!(is_private_ip(ip.parse().unwrap()), "{ip} should be private");
        }
        assert!(!is_private_ip("2606:2800:220:1::1".parse().unwrap()));
    }

    #[test]
    fn test_is_private_host() {
        assert!(is_private_host("localhost"));
        assert!(is_private_host("LOCALHOST."));
        assert!(is_private_host("printer.local"));
        assert!(is_private_host("metadata.google.internal"));
        assert!(!is_private_host("example.com"));
    }

    #[tokio::test]
    async fn test_ensure_public_host_blocks_literals_and_local_names() {
        for url in [
            "http://169.254.169.254/latest/meta-data",
            "http://127.0.0.1:8080/",
            "http://[::1]/",
            "https://localhost/admin",
        ] {
            let url = Url::parse(url).unwrap();
            assert!(
                matches!(ensure_public_host(&url).await, Err(ScrapeError::BlockedHost(_))),
                "{url} should be blocked"
            );
        }
    }

    #[tokio::test]
    async fn test_ensure_public_host_allows_public_ip_literal() {
        let url = Url::parse("https://93.184.216.34/").unwrap();
        assert!(ensure_public_host(&url).await.is_ok());
    }

    #[test]
    fn test_redirect_targets() {
        assert!(is_blocked_redirect(&Url::parse("http://10.0.0.5/").unwrap()));
        assert!(is_blocked_redirect(&Url::parse("http://localhost/").unwrap()));
        assert!(!is_blocked_redirect(&Url::parse("https://example.com/").unwrap()));
    }
}
