//! Error type shared by the backend client, the video job and the exporters

use crate::constants::API_KEY_ENV;
use crate::i18n::Lang;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "GEMINI_API_KEY environment variable is not set. Export it before launching, \
         or add \"api_key\" to settings.json."
    )]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {code} ({status}): {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("listing is missing required content: {0}")]
    InvalidListing(String),

    #[error("video operation {name} failed: {message}")]
    VideoOperation { name: String, message: String },

    #[error("no image was returned")]
    NoImage,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("svg render failed: {0}")]
    Render(String),

    #[error("pdf export failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { code, .. } => Some(*code),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short localized explanation appended to an operation's failure alert.
    pub fn user_hint(&self, lang: Lang) -> String {
        let s = lang.strings();
        let text = self.to_string().to_lowercase();

        if matches!(self, Error::MissingApiKey) {
            return format!("{} {}", s.hint_missing_api_key, API_KEY_ENV);
        }
        if text.contains("api key") {
            return s.hint_api_key.to_string();
        }
        if text.contains("quota") || text.contains("limit") {
            return s.hint_quota.to_string();
        }
        if let Error::Http(e) = self {
            if e.is_connect() || e.is_timeout() {
                return s.hint_network.to_string();
            }
        }
        match self.status() {
            Some(400) => s.hint_bad_request.to_string(),
            Some(403) => s.hint_forbidden.to_string(),
            Some(404) => s.hint_not_found.to_string(),
            Some(500) => s.hint_server.to_string(),
            _ => format!("{}: {}", s.hint_other, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: u16, message: &str) -> Error {
        Error::Api {
            code,
            status: "X".into(),
            message: message.into(),
        }
    }

    #[test]
    fn missing_key_message_names_the_variable() {
        assert!(Error::MissingApiKey.to_string().contains("GEMINI_API_KEY"));
        assert_eq!(
            Error::MissingApiKey.user_hint(Lang::En),
            format!("{} GEMINI_API_KEY", Lang::En.strings().hint_missing_api_key)
        );
    }

    #[test]
    fn missing_key_hint_follows_the_locale() {
        let hint = Error::MissingApiKey.user_hint(Lang::Tr);
        assert!(hint.starts_with("API anahtarı bulunamadı."));
        assert!(hint.ends_with("GEMINI_API_KEY"));
        assert_ne!(hint, Error::MissingApiKey.user_hint(Lang::En));
    }

    #[test]
    fn rejected_keys_get_the_invalid_key_hint() {
        let hint = api(401, "API key not valid. Please pass a valid API key.").user_hint(Lang::Tr);
        assert_eq!(hint, Lang::Tr.strings().hint_api_key);
    }

    #[test]
    fn hints_follow_status_codes() {
        let en = Lang::En.strings();
        assert_eq!(api(400, "bad").user_hint(Lang::En), en.hint_bad_request);
        assert_eq!(api(403, "denied").user_hint(Lang::En), en.hint_forbidden);
        assert_eq!(api(404, "no model").user_hint(Lang::En), en.hint_not_found);
        assert_eq!(api(500, "boom").user_hint(Lang::En), en.hint_server);
    }

    #[test]
    fn quota_wins_over_status() {
        let hint = api(429, "Resource has been exhausted (e.g. check quota).").user_hint(Lang::Tr);
        assert_eq!(hint, Lang::Tr.strings().hint_quota);
    }

    #[test]
    fn unknown_errors_carry_their_message() {
        let hint = Error::NoImage.user_hint(Lang::En);
        assert!(hint.contains("no image was returned"));
    }
}
