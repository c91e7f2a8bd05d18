//! Canonical form encoding for signed request bodies

use crate::error::AuthResult;

/// URL-encode form parameters with keys in ascending order.
///
/// The signature is computed over the exact bytes sent, so the parameter order
/// has to be stable. Pairs with equal keys keep their relative order.
pub fn encode_form(params: &[(&str, &str)]) -> AuthResult<String> {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    Ok(serde_urlencoded::to_string(&sorted)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_sorted() {
        let body = encode_form(&[("nonce", "1000"), ("method", "getInfo")]).unwrap();
        assert_eq!(body, "method=getInfo&nonce=1000");
    }

    #[test]
    fn test_values_are_escaped() {
        let body = encode_form(&[("note", "a b&c=d")]).unwrap();
        assert_eq!(body, "note=a+b%26c%3Dd");
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(encode_form(&[]).unwrap(), "");
    }

    #[test]
    fn test_duplicate_keys_keep_order() {
        let body = encode_form(&[("pair", "btc_idr"), ("count", "5"), ("pair", "eth_idr")]).unwrap();
        assert_eq!(body, "count=5&pair=btc_idr&pair=eth_idr");
    }
}
