//! Share texts and friend challenge links.

use rand::Rng;
use url::Url;

use super::error::{RoastError, RoastResult};

/// Public site used in challenge links unless configured otherwise.
pub const DEFAULT_CHALLENGE_BASE_URL: &str = "https://roastbot.app";

const REF_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const REF_LEN: usize = 8;

/// Message used when sharing a roast.
#[must_use]
pub fn roast_share_message(roast: &str) -> String {
    format!("Check out this roast I got from RoastBot:\n\n{roast}\n\nGet roasted yourself at RoastBot!")
}

/// Build a challenge link for `friend_name` with a fresh referral code.
///
/// The name is percent-encoded as typed (spaces become `%20`, not `+`).
///
/// # Errors
/// Returns [`RoastError::Validation`] for a blank name and
/// [`RoastError::Configuration`] if `base_url` cannot carry a path.
pub fn challenge_link(base_url: &str, friend_name: &str) -> RoastResult<Url> {
    challenge_link_with_ref(base_url, friend_name, &referral_code())
}

fn challenge_link_with_ref(base_url: &str, friend_name: &str, referral: &str) -> RoastResult<Url> {
    if friend_name.trim().is_empty() {
        return Err(RoastError::Validation(
            "Please enter your friend's name".to_string(),
        ));
    }

    let mut url = Url::parse(base_url)
        .map_err(|e| RoastError::Configuration(format!("invalid challenge base url: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| RoastError::Configuration(format!("challenge base url cannot be a base: {base_url}")))?
        .pop_if_empty()
        .push("challenge");
    let query = format!("name={}&ref={referral}", urlencoding::encode(friend_name));
    url.set_query(Some(&query));

    Ok(url)
}

/// Message sent along with a challenge link.
#[must_use]
pub fn challenge_share_message(friend_name: &str, custom_message: Option<&str>, link: &Url) -> String {
    custom_message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map_or_else(
            || {
                format!(
                    "Hey {}! I challenge you to get roasted by RoastBot! Click the link to accept: {link}",
                    friend_name.trim()
                )
            },
            |message| format!("{message}\n\nI challenge you to get roasted: {link}"),
        )
}

fn referral_code() -> String {
    let mut rng = rand::thread_rng();
    (0..REF_LEN)
        .map(|_| char::from(REF_ALPHABET[rng.gen_range(0..REF_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roast_share_message() {
        let message = roast_share_message("Nice haircut, Sam.");
        assert!(message.starts_with("Check out this roast I got from RoastBot:\n\nNice haircut, Sam."));
        assert!(message.ends_with("Get roasted yourself at RoastBot!"));
    }

    #[test]
    fn test_challenge_link_encodes_name() {
        let url = challenge_link_with_ref(DEFAULT_CHALLENGE_BASE_URL, "Sam & Max", "abc12345");
        assert_eq!(
            url.ok().map(String::from).as_deref(),
            Some("https://roastbot.app/challenge?name=Sam%20%26%20Max&ref=abc12345")
        );
    }

    #[test]
    fn test_challenge_link_keeps_name_as_typed() {
        let url = challenge_link_with_ref(DEFAULT_CHALLENGE_BASE_URL, " Zoë ", "r").expect("link");
        assert_eq!(url.query(), Some("name=%20Zo%C3%AB%20&ref=r"));
        let decoded = url.query_pairs().find(|(k, _)| k == "name").map(|(_, v)| v.into_owned());
        assert_eq!(decoded.as_deref(), Some(" Zoë "));
    }

    #[test]
    fn test_challenge_link_keeps_base_path() {
        let url = challenge_link_with_ref("https://example.com/app/", "Ann", "r");
        assert_eq!(url.ok().map(|u| u.path().to_string()).as_deref(), Some("/app/challenge"));
    }

    #[test]
    fn test_challenge_link_random_ref() {
        let url = challenge_link(DEFAULT_CHALLENGE_BASE_URL, "Ann").ok();
        let referral = url
            .as_ref()
            .and_then(|u| u.query_pairs().find(|(k, _)| k == "ref").map(|(_, v)| v.into_owned()))
            .unwrap_or_default();
        assert_eq!(referral.len(), REF_LEN);
        assert!(referral.bytes().all(|b| REF_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_challenge_link_rejects_blank_name() {
        assert!(matches!(
            challenge_link(DEFAULT_CHALLENGE_BASE_URL, "  "),
            Err(RoastError::Validation(_))
        ));
        assert!(matches!(
            challenge_link("not a url", "Ann"),
            Err(RoastError::Configuration(_))
        ));
    }

    #[test]
    fn test_challenge_share_message() {
        let link = Url::parse("https://roastbot.app/challenge?name=Ann&ref=x").expect("valid url");
        let default = challenge_share_message("Ann", None, &link);
        assert_eq!(
            default,
            "Hey Ann! I challenge you to get roasted by RoastBot! Click the link to accept: https://roastbot.app/challenge?name=Ann&ref=x"
        );

        let custom = challenge_share_message("Ann", Some("  You're toast.  "), &link);
        assert_eq!(
            custom,
            "You're toast.\n\nI challenge you to get roasted: https://roastbot.app/challenge?name=Ann&ref=x"
        );

        let blank = challenge_share_message("Ann", Some("   "), &link);
        assert!(blank.starts_with("Hey Ann!"));
    }
}
