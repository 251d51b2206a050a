use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};

use crate::error::ConfigError;

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_FROM_ADDRESS: &str = "Website Contact <onboarding@resend.dev>";
pub const DEFAULT_ROUTE_PATH: &str = "/contact";

/// Which email provider the edge function hands submissions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Resend,
    Ses,
    Forward,
    Log,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resend" => Ok(Self::Resend),
            "ses" => Ok(Self::Ses),
            "forward" => Ok(Self::Forward),
            "log" => Ok(Self::Log),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Zone the notification email renders the submission time in.
///
/// The offset is fixed and does not follow daylight saving. A label such as
/// "EST" is only printed next to the time, so pick the offset that matches
/// it (an `-05:00` "EST" deployment shows winter time all year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayZone {
    pub offset: FixedOffset,
    pub label: String,
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            label: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub provider: ProviderKind,
    /// Bearer credential for Resend. Checked when dispatching, not at startup.
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub from_address: String,
    pub recipients: Vec<String>,
    pub display_zone: DisplayZone,
    /// Restrict to the site's real origin before going to production.
    pub allowed_origin: String,
    pub route_path: String,
    pub forward_url: Option<String>,
    pub forward_token: Option<String>,
}

impl ContactConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("EMAIL_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => ProviderKind::Resend,
        };

        let recipients: Vec<String> = get("CONTACT_TO")
            .ok_or(ConfigError::Missing("CONTACT_TO"))?
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        if recipients.is_empty() {
            return Err(ConfigError::Missing("CONTACT_TO"));
        }

        let display_zone = match get("CONTACT_DISPLAY_OFFSET") {
            Some(raw) => DisplayZone {
                offset: raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOffset(raw.clone()))?,
                label: get("CONTACT_DISPLAY_TZ").unwrap_or_else(|| raw.trim().to_string()),
            },
            None => DisplayZone {
                label: get("CONTACT_DISPLAY_TZ").unwrap_or_else(|| "UTC".to_string()),
                ..DisplayZone::default()
            },
        };

        let forward_url = get("FORWARD_URL");
        if provider == ProviderKind::Forward && forward_url.is_none() {
            return Err(ConfigError::Missing("FORWARD_URL"));
        }

        Ok(Self {
            provider,
            resend_api_key: get("RESEND_API_KEY"),
            resend_api_url: get("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            from_address: get("CONTACT_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            recipients,
            display_zone,
            allowed_origin: get("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".to_string()),
            route_path: get("CONTACT_PATH").unwrap_or_else(|| DEFAULT_ROUTE_PATH.to_string()),
            forward_url,
            forward_token: get("FORWARD_TOKEN"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ContactConfig::from_lookup(lookup(&[("CONTACT_TO", "hello@example.com")]))
            .unwrap();

        assert_eq!(config.provider, ProviderKind::Resend);
        assert_eq!(config.resend_api_key, None);
        assert_eq!(config.resend_api_url, DEFAULT_RESEND_API_URL);
        assert_eq!(config.recipients, vec!["hello@example.com"]);
        assert_eq!(config.allowed_origin, "*");
        assert_eq!(config.route_path, "/contact");
        assert_eq!(config.display_zone, DisplayZone::default());
    }

    #[test]
    fn recipients_are_comma_separated() {
        let config = ContactConfig::from_lookup(lookup(&[(
            "CONTACT_TO",
            "a@example.com, b@example.com,,",
        )]))
        .unwrap();

        assert_eq!(config.recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn recipients_are_required() {
        let err = ContactConfig::from_lookup(lookup(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::Missing("CONTACT_TO")));
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let config = ContactConfig::from_lookup(lookup(&[
            ("CONTACT_TO", "hello@example.com"),
            ("RESEND_API_KEY", "  "),
        ]))
        .unwrap();

        assert_eq!(config.resend_api_key, None);
    }

    #[test]
    fn display_offset_and_label() {
        let config = ContactConfig::from_lookup(lookup(&[
            ("CONTACT_TO", "hello@example.com"),
            ("CONTACT_DISPLAY_OFFSET", "-05:00"),
            ("CONTACT_DISPLAY_TZ", "EST"),
        ]))
        .unwrap();

        assert_eq!(config.display_zone.offset.local_minus_utc(), -5 * 3600);
        assert_eq!(config.display_zone.label, "EST");
    }

    #[test]
    fn display_offset_ignores_daylight_saving() {
        use chrono::{TimeZone, Timelike};

        let config = ContactConfig::from_lookup(lookup(&[
            ("CONTACT_TO", "hello@example.com"),
            ("CONTACT_DISPLAY_OFFSET", "-05:00"),
            ("CONTACT_DISPLAY_TZ", "EST"),
        ]))
        .unwrap();
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 17, 0, 0).unwrap();

        assert_eq!(winter.with_timezone(&config.display_zone.offset).hour(), 12);
        assert_eq!(summer.with_timezone(&config.display_zone.offset).hour(), 12);
    }

    #[test]
    fn bad_offset_is_rejected() {
        let err = ContactConfig::from_lookup(lookup(&[
            ("CONTACT_TO", "hello@example.com"),
            ("CONTACT_DISPLAY_OFFSET", "eastern"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidOffset(_)));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = ContactConfig::from_lookup(lookup(&[
            ("CONTACT_TO", "hello@example.com"),
            ("EMAIL_PROVIDER", "carrier-pigeon"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownProvider(p) if p == "carrier-pigeon"));
    }

    #[test]
    fn forward_needs_url() {
        let err = ContactConfig::from_lookup(lookup(&[
            ("CONTACT_TO", "hello@example.com"),
            ("EMAIL_PROVIDER", "forward"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("FORWARD_URL")));
    }
}
