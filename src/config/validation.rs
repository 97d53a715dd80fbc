//! Configuration validation logic.

use crate::config::loader::{Config, NetworkConfig};
use crate::config::modes::DownloadMode;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 40;

/// Maximum items per GraphQL page the endpoint accepts.
const MAX_PAGE_SIZE: u32 = 50;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_network(&config.network)?;

    match config.options.download_mode {
        DownloadMode::Feed => validate_usernames(&config.targeted_user.usernames)?,
        DownloadMode::Single => {
            let post = config
                .options
                .post_url
                .as_deref()
                .ok_or_else(|| Error::MissingConfig("post_url (required for single mode)".into()))?;
            let base = Url::parse(&config.network.profile_base)?;
            parse_post_url(post, &base)?;
        }
    }

    Ok(())
}

/// Validate endpoint settings.
pub fn validate_network(network: &NetworkConfig) -> Result<()> {
    validate_user_agent(&network.user_agent)?;
    validate_http_url("profile_base", &network.profile_base)?;
    validate_http_url("graphql_endpoint", &network.graphql_endpoint)?;

    if network.query_id.trim().is_empty() {
        return Err(Error::MissingConfig("query_id".to_string()));
    }

    if network.page_size == 0 || network.page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Page size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, network.page_size
            ),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' must be an http(s) URL", value),
        });
    }

    Ok(())
}

/// Validate profile handles.
pub fn validate_usernames<S: AsRef<str>, I: IntoIterator<Item = S>>(usernames: I) -> Result<()> {
    let usernames: Vec<_> = usernames.into_iter().collect();

    if usernames.is_empty() {
        return Err(Error::MissingConfig(
            "usernames (at least one profile handle required)".to_string(),
        ));
    }

    let username_pattern = Regex::new(r"^[A-Za-z0-9._]{1,30}$").expect("valid regex");

    for username in usernames {
        let username = username.as_ref();
        let clean_username = clean_username(username);

        if !username_pattern.is_match(clean_username) {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' is invalid. Use 1-30 letters, digits, periods or underscores.",
                    username
                ),
            });
        }

        let lower = clean_username.to_lowercase();
        if lower == "replaceme" || lower == "username" {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' appears to be a placeholder. Please provide actual profile handles.",
                    username
                ),
            });
        }
    }

    Ok(())
}

/// Strip a leading `@` from a handle.
pub fn clean_username(username: &str) -> &str {
    username.trim().trim_start_matches('@')
}

/// Turn a post URL or bare shortcode into a post URL.
///
/// Shortcodes resolve to `<base>/p/<shortcode>/`.
pub fn parse_post_url(input: &str, base: &Url) -> Result<Url> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input)?;
        if url.host_str().is_none() {
            return Err(Error::ConfigValidation {
                field: "post_url".to_string(),
                message: format!("Post URL has no host: {}", input),
            });
        }
        return Ok(url);
    }

    let shortcode_pattern = Regex::new(r"^[A-Za-z0-9_-]{5,}$").expect("valid regex");
    if shortcode_pattern.is_match(input) {
        return Ok(base.join(&format!("p/{}/", input))?);
    }

    Err(Error::ConfigValidation {
        field: "post_url".to_string(),
        message: format!(
            "Invalid post: '{}'. Must be a post URL or a shortcode.",
            input
        ),
    })
}
