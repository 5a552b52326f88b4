//! Share tokens and share text for calculation results.
//!
//! A token is the base64 (standard alphabet, padded) of the compact JSON
//! [`SharePayload`]. Only the inputs travel, so decoding yields a
//! [`CalculationInput`] that has to be calculated again. In a link the token
//! sits in the `calc` query parameter.
use api_types::share::SharePayload;
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use engine::{CalculationInput, CalculationResult, SplitKind};
use url::{Url, form_urlencoded};

pub use error::ShareError;

mod error;

/// Query parameter carrying the token in a share link.
pub const QUERY_PARAM: &str = "calc";

/// Encodes the inputs of `result` into a share token.
pub fn encode(result: &CalculationResult) -> Result<String, ShareError> {
    let bytes = serde_json::to_vec(&SharePayload::from(result))?;
    Ok(STANDARD.encode(bytes))
}

/// Builds a share link: `base` with its `calc` parameter set to the token of
/// `result`. Other query parameters of `base` are kept.
pub fn share_url(base: &str, result: &CalculationResult) -> Result<String, ShareError> {
    let token = encode(result)?;
    let mut url = Url::parse(base)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(QUERY_PARAM, &token);
    Ok(url.to_string())
}

/// Decodes a share token back into a validated calculation input.
///
/// Accepts a bare token, a `?calc=<token>` query or a full share link.
/// Tokens that went through form decoding (`+` turned into a space) or were
/// rewritten to the URL-safe alphabet are accepted too.
pub fn decode(input: &str) -> Result<CalculationInput, ShareError> {
    let token = extract_token(input.trim())?;
    let token = token.trim().replace(' ', "+");
    let bytes = match STANDARD.decode(&token) {
        Ok(bytes) => bytes,
        Err(err) => URL_SAFE_NO_PAD
            .decode(token.trim_end_matches('='))
            .map_err(|_| err)?,
    };
    let payload: SharePayload = serde_json::from_slice(&bytes)?;
    let input = payload.into_input()?;
    tracing::debug!(pattern = %input.pattern.kind(), "decoded share token");
    Ok(input)
}

fn extract_token(input: &str) -> Result<String, ShareError> {
    let query = match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => match input.strip_prefix('?') {
            Some(query) => query.to_string(),
            None => return Ok(input.to_string()),
        },
    };
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(ShareError::MissingToken)
}

fn pattern_label(kind: SplitKind) -> &'static str {
    match kind {
        SplitKind::Equal => "均等割り",
        SplitKind::OrganizerMore => "幹事多め負担",
        SplitKind::OrganizerLess => "幹事少なめ負担",
        SplitKind::OrganizerFixed => "幹事固定額",
    }
}

/// Human-readable text describing `result`.
///
/// With `detailed` the payments are listed; the short form only names the
/// total, the people and the pattern. The remainder is printed without digit
/// grouping.
#[must_use]
pub fn share_text(result: &CalculationResult, detailed: bool) -> String {
    let mut text = format!(
        "【割り勘計算】\n総額: {}\n人数: {}人\nパターン: {}\n",
        result.total_amount,
        result.number_of_people,
        pattern_label(result.kind())
    );

    if detailed {
        text.push('\n');
        if result.kind() == SplitKind::Equal {
            text.push_str(&format!("一人当たり: {}", result.per_person));
        } else {
            text.push_str(&format!(
                "幹事: {}\n参加者一人: {}",
                result.organizer_payment, result.participant_payment
            ));
        }
        if result.has_remainder() {
            text.push_str(&format!("\n余り: {}円", result.remainder.amount()));
        }
    }

    text.push_str("\n\n計算アプリで詳細を見る");
    text
}
