//! Serves the embedded single-page form UI.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_page_is_present() {
        assert!(INDEX_HTML.contains("<html"));
        assert!(INDEX_HTML.contains("Narasi Rapot"));
    }

    #[test]
    fn test_score_controls_use_positional_ids() {
        // Control identity must come from list position, not label text.
        assert!(INDEX_HTML.contains("score_"));
    }
}
