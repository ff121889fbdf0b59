//! Deep link codec
//!
//! Maps destinations to and from external links of the form
//! `<scheme>://<route>/<segment>/<segment>...`. Only a subset of destinations
//! can be reached from outside the app; everything else is in-app only and
//! has no link.
//!
//! | Route | Destination |
//! |---|---|
//! | `dashboard` | [`Destination::Dashboard`] |
//! | `profile/{user_id}` | [`Destination::Profile`] |
//! | `reports` | [`Destination::Reports`] |
//! | `reports/{report_id}/{user_id}` | [`Destination::ReportDetail`] |
//! | `analytics/{user_id}` | [`Destination::Analytics`] |
//! | `subscription` | [`Destination::Subscription`] |
//! | `share/{share_type}/{id}` | [`Destination::Share`] |

use thiserror::Error;
use url::Url;

use super::destination::{Destination, ShareType};

/// Reasons a link does not decode to a destination
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeepLinkError {
    /// Link could not be parsed as a URL
    #[error("Malformed link: {0}")]
    Malformed(#[from] url::ParseError),

    /// Link has no route
    #[error("Link has no route")]
    MissingHost,

    /// Route is not reachable from outside the app
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Route needs more path segments than the link has
    #[error("Route {route} needs {expected} segment(s), found {found}")]
    MissingSegment {
        /// Route name
        route: &'static str,
        /// Segments required
        expected: usize,
        /// Segments present
        found: usize,
    },

    /// Share type segment is not a known share type
    #[error("Invalid share type: {0}")]
    InvalidShareType(String),

    /// Segment is not valid percent-encoded UTF-8
    #[error("Invalid segment encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for deep link decoding
pub type Result<T> = std::result::Result<T, DeepLinkError>;

/// Decode a link, reporting why it failed
pub fn try_decode(url: &Url) -> Result<Destination> {
    let route = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or(DeepLinkError::MissingHost)?
        .to_ascii_lowercase();

    let segments = match url.path_segments() {
        Some(raw) => raw
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    match route.as_str() {
        "dashboard" => Ok(Destination::Dashboard),
        "profile" => {
            let [user_id] = require::<1>("profile", &segments)?;
            Ok(Destination::Profile { user_id })
        }
        "reports" => match require::<2>("reports", &segments) {
            Ok([report_id, user_id]) => Ok(Destination::ReportDetail { report_id, user_id }),
            Err(_) => Ok(Destination::Reports),
        },
        "analytics" => {
            let [user_id] = require::<1>("analytics", &segments)?;
            Ok(Destination::Analytics { user_id })
        }
        "subscription" => Ok(Destination::Subscription),
        "share" => {
            let [share_type, id] = require::<2>("share", &segments)?;
            let share_type = share_type
                .parse::<ShareType>()
                .map_err(|_| DeepLinkError::InvalidShareType(share_type))?;
            Ok(Destination::Share { share_type, id })
        }
        _ => Err(DeepLinkError::UnknownRoute(route)),
    }
}

/// Decode a link into a destination
///
/// Returns `None` for links that do not name a reachable destination. The
/// reason is logged at debug level.
pub fn decode(url: &Url) -> Option<Destination> {
    match try_decode(url) {
        Ok(destination) => Some(destination),
        Err(e) => {
            tracing::debug!(link = %url, "Ignoring deep link: {}", e);
            None
        }
    }
}

/// Parse and decode a link string
pub fn parse(link: &str) -> Option<Destination> {
    match Url::parse(link) {
        Ok(url) => decode(&url),
        Err(e) => {
            tracing::debug!(link, "Ignoring deep link: {}", DeepLinkError::from(e));
            None
        }
    }
}

/// Build the link for a destination
///
/// Returns `None` for destinations that have no external link, and for
/// identifiers that cannot survive a round trip (empty, `.` or `..`).
pub fn encode(destination: &Destination, base_scheme: &str) -> Option<Url> {
    let (route, segments): (&str, Vec<&str>) = match destination {
        Destination::Dashboard => ("dashboard", vec![]),
        Destination::Profile { user_id } => ("profile", vec![user_id.as_str()]),
        Destination::Reports => ("reports", vec![]),
        Destination::ReportDetail { report_id, user_id } => {
            ("reports", vec![report_id.as_str(), user_id.as_str()])
        }
        Destination::Analytics { user_id } => ("analytics", vec![user_id.as_str()]),
        Destination::Subscription => ("subscription", vec![]),
        Destination::Share { share_type, id } => ("share", vec![share_type.as_str(), id.as_str()]),
        _ => return None,
    };

    if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
        return None;
    }

    let mut link = format!("{}://{}", base_scheme, route);
    for segment in segments {
        link.push('/');
        link.push_str(&urlencoding::encode(segment));
    }

    Url::parse(&link).ok()
}

/// Deep link codec bound to the app's scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkCodec {
    scheme: String,
}

impl DeepLinkCodec {
    /// Create a codec generating links with `scheme`
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    /// Scheme used for generated links
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Parse and decode a link string
    pub fn decode(&self, link: &str) -> Option<Destination> {
        parse(link)
    }

    /// Build the link for a destination
    pub fn encode(&self, destination: &Destination) -> Option<Url> {
        encode(destination, &self.scheme)
    }
}

fn decode_segment(raw: &str) -> Result<String> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|_| DeepLinkError::InvalidEncoding(raw.to_string()))
}

/// Take the first `N` segments, failing if there are fewer
fn require<const N: usize>(route: &'static str, segments: &[String]) -> Result<[String; N]> {
    if segments.len() < N {
        return Err(DeepLinkError::MissingSegment {
            route,
            expected: N,
            found: segments.len(),
        });
    }
    Ok(std::array::from_fn(|i| segments[i].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::destination::ExportFormat;

    fn share(share_type: ShareType, id: &str) -> Destination {
        Destination::Share {
            share_type,
            id: id.to_string(),
        }
    }

    #[test]
    fn test_decode_simple_routes() {
        assert_eq!(parse("app://dashboard"), Some(Destination::Dashboard));
        assert_eq!(parse("app://subscription"), Some(Destination::Subscription));
        assert_eq!(parse("app://reports"), Some(Destination::Reports));
    }

    #[test]
    fn test_decode_profile() {
        assert_eq!(
            parse("app://profile/u1"),
            Some(Destination::Profile {
                user_id: "u1".to_string()
            })
        );
    }

    #[test]
    fn test_decode_profile_without_id_fails() {
        assert_eq!(parse("app://profile"), None);
        assert_eq!(parse("app://profile/"), None);
        assert_eq!(
            try_decode(&Url::parse("app://profile").unwrap()),
            Err(DeepLinkError::MissingSegment {
                route: "profile",
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn test_decode_report_detail() {
        assert_eq!(
            parse("app://reports/r1/u1"),
            Some(Destination::ReportDetail {
                report_id: "r1".to_string(),
                user_id: "u1".to_string()
            })
        );
        // Not enough segments for a detail link
        assert_eq!(parse("app://reports/r1"), Some(Destination::Reports));
    }

    #[test]
    fn test_decode_share() {
        assert_eq!(parse("app://share/profile/u42"), Some(share(ShareType::Profile, "u42")));
        assert_eq!(parse("app://share/bogus/u42"), None);
        assert_eq!(
            try_decode(&Url::parse("app://share/bogus/u42").unwrap()),
            Err(DeepLinkError::InvalidShareType("bogus".to_string()))
        );
        assert_eq!(parse("app://share/profile"), None);
    }

    #[test]
    fn test_decode_unknown_route() {
        assert_eq!(parse("app://nowhere/1"), None);
        assert_eq!(
            try_decode(&Url::parse("app://nowhere").unwrap()),
            Err(DeepLinkError::UnknownRoute("nowhere".to_string()))
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(parse("not a link"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("app:dashboard"), None);
    }

    #[test]
    fn test_decode_ignores_case_and_extra_segments() {
        assert_eq!(parse("app://Dashboard"), Some(Destination::Dashboard));
        assert_eq!(
            parse("app://analytics/u3/extra"),
            Some(Destination::Analytics {
                user_id: "u3".to_string()
            })
        );
    }

    #[test]
    fn test_decode_percent_encoded_segment() {
        assert_eq!(
            parse("app://profile/jane%20doe"),
            Some(Destination::Profile {
                user_id: "jane doe".to_string()
            })
        );
    }

    #[test]
    fn test_encode() {
        let url = encode(&share(ShareType::Achievement, "a1"), "app").unwrap();
        assert_eq!(url.as_str(), "app://share/achievement/a1");

        let url = encode(
            &Destination::Profile {
                user_id: "jane doe".to_string(),
            },
            "ascend",
        )
        .unwrap();
        assert_eq!(url.as_str(), "ascend://profile/jane%20doe");
    }

    #[test]
    fn test_encode_in_app_only_destinations() {
        assert_eq!(encode(&Destination::Settings, "app"), None);
        assert_eq!(encode(&Destination::AiCoach, "app"), None);
        assert_eq!(
            encode(
                &Destination::ExportReport {
                    report_id: "r1".to_string(),
                    format: ExportFormat::Pdf
                },
                "app"
            ),
            None
        );
    }

    #[test]
    fn test_encode_unrepresentable_ids() {
        for id in ["", ".", ".."] {
            assert_eq!(
                encode(
                    &Destination::Profile {
                        user_id: id.to_string()
                    },
                    "app"
                ),
                None
            );
        }
    }

    #[test]
    fn test_round_trip() {
        let mut destinations = vec![
            Destination::Dashboard,
            Destination::Reports,
            Destination::Subscription,
            Destination::Profile {
                user_id: "u/1 ?#".to_string(),
            },
            Destination::ReportDetail {
                report_id: "r-9".to_string(),
                user_id: "ü1".to_string(),
            },
            Destination::Analytics {
                user_id: "u1".to_string(),
            },
        ];
        destinations.extend(ShareType::all().into_iter().map(|t| share(t, "x1")));

        for destination in destinations {
            let url = encode(&destination, "app").unwrap();
            assert_eq!(decode(&url), Some(destination));
        }
    }

    #[test]
    fn test_codec() {
        let codec = DeepLinkCodec::new("ascend");
        assert_eq!(codec.scheme(), "ascend");

        let url = codec.encode(&Destination::Dashboard).unwrap();
        assert_eq!(url.as_str(), "ascend://dashboard");
        assert_eq!(codec.decode(url.as_str()), Some(Destination::Dashboard));
    }
}
