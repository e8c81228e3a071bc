//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).

use crate::models::oauth::Credentials;
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// A request about to be sent, with everything that goes into its signature.
pub struct SignedRequest<'a> {
    method: &'a Method,
    url: &'a Url,
    consumer: &'a Credentials,
    token: Option<&'a Credentials>,
    /// Protocol parameters beyond the standard set, e.g. `oauth_callback`.
    oauth_extra: &'a [(&'a str, &'a str)],
    /// `application/x-www-form-urlencoded` body parameters. The provider
    /// endpoints used here send no body, but RFC 5849 §3.4.1.3 signs one
    /// when present.
    body: &'a [(&'a str, &'a str)],
}

impl<'a> SignedRequest<'a> {
    pub fn new(
        method: &'a Method,
        url: &'a Url,
        consumer: &'a Credentials,
        token: Option<&'a Credentials>,
    ) -> Self {
        Self {
            method,
            url,
            consumer,
            token,
            oauth_extra: &[],
            body: &[],
        }
    }

    pub fn with_oauth_params(mut self, oauth_extra: &'a [(&'a str, &'a str)]) -> Self {
        self.oauth_extra = oauth_extra;
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_body(mut self, body: &'a [(&'a str, &'a str)]) -> Self {
        self.body = body;
        self
    }

    /// Builds the `Authorization` header value.
    pub fn authorization_header(&self, nonce: &str, timestamp: i64) -> String {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.sign(&oauth_params);
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect();

        format!("OAuth {}", fields.join(", "))
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn signature(&self, nonce: &str, timestamp: i64) -> String {
        let oauth_params = self.oauth_params(nonce, timestamp);
        self.sign(&oauth_params)
    }

    fn oauth_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_string(), self.consumer.key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];

        if let Some(token) = self.token {
            params.push(("oauth_token".to_string(), token.key.clone()));
        }

        for (key, value) in self.oauth_extra {
            params.push((key.to_string(), value.to_string()));
        }

        params
    }

    fn sign(&self, oauth_params: &[(String, String)]) -> String {
        let base = self.base_string(oauth_params);
        let key = format!(
            "{}&{}",
            encode(&self.consumer.secret),
            encode(self.token.map(|t| t.secret.as_str()).unwrap_or(""))
        );

        // HMAC accepts keys of any length.
        let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("hmac key of any size");
        mac.update(base.as_bytes());
        general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    fn base_string(&self, oauth_params: &[(String, String)]) -> String {
        let mut encoded: Vec<(String, String)> = oauth_params
            .iter()
            .map(|(k, v)| (encode(k), encode(v)))
            .collect();

        encoded.extend(
            self.url
                .query_pairs()
                .map(|(k, v)| (encode(&k), encode(&v))),
        );
        encoded.extend(self.body.iter().map(|(k, v)| (encode(k), encode(v))));
        encoded.sort();

        let normalized: Vec<String> = encoded
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        let mut base_url = self.url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        format!(
            "{}&{}&{}",
            self.method.as_str().to_uppercase(),
            encode(base_url.as_str()),
            encode(&normalized.join("&"))
        )
    }
}

/// RFC 3986 percent-encoding: everything but `A-Z a-z 0-9 - . _ ~`.
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
