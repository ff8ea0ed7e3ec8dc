use serde::Serialize;

/// Body of a successful `POST /api/create`: the public short URL.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub link: String,
}
