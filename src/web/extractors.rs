use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// 请求ID提取器
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get("X-Request-ID")
            .and_then(|value| value.to_str().ok())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(RequestId(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_uses_header_when_present() {
        let (mut parts, _) = Request::builder()
            .header("X-Request-ID", "rock-42")
            .body(())
            .unwrap()
            .into_parts();

        let RequestId(id) = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id, "rock-42");
    }

    #[tokio::test]
    async fn test_generates_uuid_otherwise() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let RequestId(id) = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
