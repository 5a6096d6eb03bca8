use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PubkeyError {
    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid public key length: {0} bytes (expected 33)")]
    InvalidLength(usize),

    #[error("Invalid public key prefix: {0:#04x} (expected 0x02 or 0x03)")]
    InvalidPrefix(u8),
}

/// Normalizes a compressed secp256k1 public key given as hex
/// (with or without `0x`) to lowercase hex.
pub fn parse_pubkey_hex(key_str: &str) -> Result<String, PubkeyError> {
    let hex_str = key_str.trim();
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

    let bytes = hex::decode(hex_str)?;
    if bytes.len() != 33 {
        return Err(PubkeyError::InvalidLength(bytes.len()));
    }
    if bytes[0] != 0x02 && bytes[0] != 0x03 {
        return Err(PubkeyError::InvalidPrefix(bytes[0]));
    }
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BTC_ASSET_PUBKEY;

    #[test]
    fn test_parse_pubkey_hex() {
        assert_eq!(parse_pubkey_hex(BTC_ASSET_PUBKEY).unwrap(), BTC_ASSET_PUBKEY);

        let upper = format!("0x03{}", "AB".repeat(32));
        assert_eq!(parse_pubkey_hex(&upper).unwrap(), format!("03{}", "ab".repeat(32)));
    }

    #[test]
    fn test_parse_pubkey_hex_errors() {
        assert!(matches!(parse_pubkey_hex("zz"), Err(PubkeyError::HexDecode(_))));
        assert_eq!(parse_pubkey_hex("0203"), Err(PubkeyError::InvalidLength(2)));
        let bad_prefix = format!("04{}", "00".repeat(32));
        assert_eq!(parse_pubkey_hex(&bad_prefix), Err(PubkeyError::InvalidPrefix(0x04)));
    }
}
