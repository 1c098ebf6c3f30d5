// Injection screening
//------------------------------------------------------------------------------

const SQL_BLACKLIST: [&str; 8] = ["SELECT", "INSERT", "DROP", "UNION", "--", ";", "/*", "*/"];

/// Case-insensitive substring match against the SQL keyword blacklist.
pub(crate) fn has_sql_injection(value: &str) -> bool {
    let upper = value.to_ascii_uppercase();
    SQL_BLACKLIST.iter().any(|kw| upper.contains(kw))
}

/// Matches `<script ...> ... </script>`, case-insensitive and across lines.
pub(crate) fn has_script_tag(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let Some(open) = lower.find("<script") else {
        return false;
    };
    let rest = &lower[open + "<script".len()..];
    let Some(close) = rest.find('>') else {
        return false;
    };
    rest[close + 1..].contains("</script>")
}

#[cfg(test)]
mod screening_tests {
    use test_case::test_case;

    use super::{has_script_tag, has_sql_injection};

    #[test_case("SELECT * FROM users WHERE id = 1; --", true)]
    #[test_case("drop table", true; "lowercase_keyword")]
    #[test_case("a /* comment", true)]
    #[test_case("path;param", true)]
    #[test_case("Example Test | متن تست", false)]
    #[test_case("Hello, world!", false)]
    fn test_sql(value: &str, exp: bool) {
        assert_eq!(has_sql_injection(value), exp);
    }

    #[test_case("<script>alert('x')</script>", true)]
    #[test_case("<SCRIPT type=\"text/javascript\">\nalert(1)\n</Script>", true; "mixed_case_multiline")]
    #[test_case("before <script src=x></script> after", true)]
    #[test_case("<script>never closed", false)]
    #[test_case("</script><script", false; "reversed")]
    #[test_case("script", false)]
    fn test_script(value: &str, exp: bool) {
        assert_eq!(has_script_tag(value), exp);
    }
}
