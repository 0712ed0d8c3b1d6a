// src/utils/html.rs

/// Strips every HTML tag from admin-authored text.
///
/// No tag is allowed through and `<script>`/`<style>` contents are dropped
/// entirely. The result is HTML-escaped text.
pub fn strip_html(input: &str) -> String {
    let mut builder = ammonia::Builder::empty();
    builder.clean_content_tags(["script", "style"].into_iter().collect());
    builder.clean(input).to_string().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_markup_and_scripts() {
        assert_eq!(strip_html("<b>I enjoy</b> maths<script>alert(1)</script>"), "I enjoy maths");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_html("I enjoy debates"), "I enjoy debates");
    }
}
