use crate::config::MirrorNetwork;

pub struct MirrorClient {
    http: reqwest::Client,
    base_url: String,
}

impl MirrorClient {
    pub fn new(network: MirrorNetwork) -> MirrorClient {
        Self::with_base_url(network.base_url().to_string())
    }

    pub fn with_base_url(base_url: String) -> MirrorClient {
        MirrorClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub(super) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(super) fn base_url(&self) -> &str {
        &self.base_url
    }
}
