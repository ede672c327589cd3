use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};

pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.109 Safari/537.36";

pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);

pub const CHROME_ARGS: [&str; 3] = ["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"];

/// Headers sent with every image download.
pub fn image_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CHROME_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("image/webp,image/*,*/*;q=0.8"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_headers_identify_as_desktop_chrome() {
        let headers = image_headers();
        assert_eq!(headers.get(USER_AGENT).unwrap(), CHROME_USER_AGENT);
        assert!(headers.get(ACCEPT).unwrap().to_str().unwrap().starts_with("image/"));
        assert_eq!(headers.len(), 4);
    }
}
