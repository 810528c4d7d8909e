use crate::html::encode_component;

pub fn linkedin_share_url(page_url: &str) -> String {
    format!(
        "https://www.linkedin.com/sharing/share-offsite/?url={}",
        encode_component(page_url)
    )
}

pub fn x_share_url(page_url: &str, title: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?url={}&text={}",
        encode_component(page_url),
        encode_component(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_urls_encode_their_parameters() {
        let page = "https://example.org/posts/a b.html?x=1";
        assert_eq!(
            linkedin_share_url(page),
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fexample.org%2Fposts%2Fa%20b.html%3Fx%3D1"
        );
        assert!(x_share_url(page, "AI & Labs").ends_with("&text=AI%20%26%20Labs"));
    }
}
