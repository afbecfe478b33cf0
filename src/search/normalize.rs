//! Query/key normalizer / 查询规范化

/// Normalize text for comparison: trim + lowercase / 去除首尾空白并转小写
///
/// Both indexed keys and queries go through this, so matching is case-insensitive.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  PikaChu "), "pikachu");
        assert_eq!(normalize("\t\n"), "");
        assert_eq!(normalize("Mr. Mime"), "mr. mime");
        assert_eq!(normalize("FLABÉBÉ"), "flabébé");
    }
}
