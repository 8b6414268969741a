use crate::cache::code_store::hash_code;

#[test]
fn test_hash_code_is_hex_sha256() {
    let digest = hash_code("123456");
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(digest, hash_code("123456"));
}

#[test]
fn test_hash_code_differs_per_code() {
    assert_ne!(hash_code("000001"), hash_code("000002"));
}

