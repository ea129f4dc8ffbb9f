pub struct StringUtils {}

impl StringUtils {
    pub fn maybe_pluralize((singular, plural) : (&str, &str), qty: usize) -> String {
        format!("{}", if qty == 1 { singular } else { plural })
    }

    pub fn maybe_pluralize_count(count: usize, (singular, plural) : (&str, &str)) -> String {
        format!("{} {}", count, Self::maybe_pluralize((singular, plural), count))
    }

    /// Replaces characters that are not portable in file names.
    pub fn sanitize_file_name(name: &str) -> String {
        let cleaned: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();

        if cleaned.is_empty() { "untitled".to_string() } else { cleaned }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_count() {
        assert_eq!(StringUtils::maybe_pluralize_count(1, ("line", "lines")), "1 line");
        assert_eq!(StringUtils::maybe_pluralize_count(0, ("line", "lines")), "0 lines");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(StringUtils::sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(StringUtils::sanitize_file_name("  "), "untitled");
        assert_eq!(StringUtils::sanitize_file_name("卷积神经网络 (CNN)"), "卷积神经网络 (CNN)");
    }
}
