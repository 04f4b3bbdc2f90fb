//! Track 2 layout: `;<PAN>=<YYMM><service code><discretionary data>?`

use thiserror::Error;

use super::CardData;

const START_SENTINEL: char = ';';
const END_SENTINEL: char = '?';
const SEPARATOR: char = '=';

/// Offset of the service code inside the data following the separator.
const SERVICE_CODE: std::ops::Range<usize> = 4..7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Track2Error {
    #[error("track 2 must start with ';'")]
    MissingStartSentinel,

    #[error("track 2 must end with '?'")]
    MissingEndSentinel,

    #[error("track 2 must contain exactly one '=' separator")]
    Separator,

    #[error("primary account number must be a non-empty digit string")]
    InvalidPan,

    #[error("expiry and service code must follow the separator as digits")]
    InvalidTail,
}

/// Decode raw track 2 data. Any structural deviation is an error; no partial
/// record is ever produced.
pub fn parse_track2(raw: &str) -> Result<CardData, Track2Error> {
    let body = raw
        .strip_prefix(START_SENTINEL)
        .ok_or(Track2Error::MissingStartSentinel)?;
    let body = body
        .strip_suffix(END_SENTINEL)
        .ok_or(Track2Error::MissingEndSentinel)?;

    let mut parts = body.split(SEPARATOR);
    let (Some(pan), Some(tail), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Track2Error::Separator);
    };

    if pan.is_empty() || !is_digits(pan) {
        return Err(Track2Error::InvalidPan);
    }
    if tail.len() < SERVICE_CODE.end || !is_digits(tail) {
        return Err(Track2Error::InvalidTail);
    }

    Ok(CardData {
        number: pan.to_string(),
        service_code: tail[SERVICE_CODE].to_string(),
        track2: raw.to_string(),
    })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_track() {
        let raw = ";4575270595153145=20012211998522600001?";
        let card = parse_track2(raw).unwrap();
        assert_eq!(card.number, "4575270595153145");
        assert_eq!(card.service_code, "221");
        assert_eq!(card.track2, raw);
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse_track2(";4575270595153145D200?"),
            Err(Track2Error::Separator)
        );
    }

    #[test]
    fn test_two_separators() {
        assert_eq!(
            parse_track2(";4575270595153145=2001=2211998?"),
            Err(Track2Error::Separator)
        );
    }

    #[test]
    fn test_sentinels_required() {
        assert_eq!(
            parse_track2("4575270595153145=20012211998?"),
            Err(Track2Error::MissingStartSentinel)
        );
        assert_eq!(
            parse_track2(";4575270595153145=20012211998"),
            Err(Track2Error::MissingEndSentinel)
        );
    }

    #[test]
    fn test_pan_must_be_digits() {
        assert_eq!(
            parse_track2(";45752705X5153145=20012211998?"),
            Err(Track2Error::InvalidPan)
        );
        assert_eq!(parse_track2(";=20012211998?"), Err(Track2Error::InvalidPan));
    }

    #[test]
    fn test_tail_too_short_for_service_code() {
        assert_eq!(
            parse_track2(";4575270595153145=200122?"),
            Err(Track2Error::InvalidTail)
        );
    }

    #[test]
    fn test_tail_exactly_expiry_and_service_code() {
        let card = parse_track2(";4575270595153145=2001221?").unwrap();
        assert_eq!(card.service_code, "221");
    }
}
