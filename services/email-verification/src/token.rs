//! Token derivation and the confirmation mail built around it.

use anyhow::Context;
use rand::RngExt;
use url::Url;

use crate::domain::types::OutgoingMail;
use crate::error::VerificationError;

/// Charset for the per-request nonce (alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Nonce length in characters (~190 bits of entropy).
pub const NONCE_LEN: usize = 32;

pub const CONFIRMATION_SUBJECT: &str = "Welcome to Sayonika - Confirm your email!";

/// Random per-request identifier mixed into the token.
pub fn generate_nonce() -> String {
    let mut rng = rand::rng();
    (0..NONCE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Derive the token for `email` as a freshly salted bcrypt hash of
/// `<nonce>:<email>`.
///
/// The nonce goes first because bcrypt only reads the first 72 bytes.
/// Runs on the blocking pool.
pub async fn derive_token(email: &str, cost: u32) -> Result<String, VerificationError> {
    let material = format!("{}:{email}", generate_nonce());
    let token = tokio::task::spawn_blocking(move || bcrypt::hash(material, cost))
        .await
        .context("token hashing task failed")?
        .context("failed to hash token")?;
    Ok(token)
}

/// `<verify_url>?token=<token>&email=<email>`, query-encoded.
pub fn confirmation_url(verify_url: &Url, email: &str, token: &str) -> Url {
    let mut url = verify_url.clone();
    url.query_pairs_mut()
        .append_pair("token", token)
        .append_pair("email", email);
    url
}

pub fn confirmation_mail(email: &str, name: &str, link: &Url) -> OutgoingMail {
    let name_html = escape_html(name);
    let link_html = escape_html(link.as_str());
    let html = format!(
        r#"<html>
<head>
<style>
  p {{ text-align: center; }}
  a {{ text-align: center; }}
</style>
</head>
<body>
  <p>Hey {name_html}, we would like to welcome you in Sayonika!</p>
  <br>
  <p>
    As a security measure we would like to ask you to confirm your account.
    You will not be able to access your account if you don't confirm your email within 24 hours.
  </p>
  <br>
  <a href="{link_html}">Click to confirm your account</a>
  <br>
  <p>If you have questions, do not hesitate to ask us on <a href="mailto:hello@sayonika.moe">hello@sayonika.moe</a>.</p>
  <p>Happy Modding!</p>
</body>
</html>
"#
    );
    OutgoingMail {
        to_address: email.to_owned(),
        to_name: name.to_owned(),
        subject: CONFIRMATION_SUBJECT.to_owned(),
        html,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
