use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("malformed Stripe-Signature header")]
    Malformed,
    #[error("signature timestamp outside tolerance")]
    Stale,
    #[error("no matching v1 signature")]
    Mismatch,
}

/// Checks a `Stripe-Signature` header against the raw request body.
///
/// The header carries `t=<unix ts>` and one or more `v1=<hex hmac>` pairs;
/// the signed message is `"{t}.{body}"`. Comparison is constant-time via
/// `Mac::verify_slice`.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: OffsetDateTime,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => {
                if let Ok(bytes) = hex::decode(value) {
                    candidates.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::Malformed)?;
    if candidates.is_empty() {
        return Err(SignatureError::Malformed);
    }

    let signed_at =
        OffsetDateTime::from_unix_timestamp(timestamp).map_err(|_| SignatureError::Malformed)?;
    let age = now - signed_at;
    if age > Duration::seconds(tolerance_secs) || age < Duration::seconds(-tolerance_secs) {
        return Err(SignatureError::Stale);
    }

    for candidate in &candidates {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| SignatureError::Malformed)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(candidate).is_ok() {
            return Ok(());
        }
    }

    Err(SignatureError::Mismatch)
}

#[cfg(test)]
pub(crate) fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    )
}
