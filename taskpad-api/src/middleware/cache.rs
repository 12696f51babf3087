/// No-store cache headers middleware
///
/// Adds headers to every response telling browsers and proxies not to
/// cache API responses. Login state changes the meaning of most endpoints
/// between requests, so a cached body is always wrong.
///
/// # Headers Applied
///
/// - `Cache-Control: no-store, no-cache, must-revalidate, proxy-revalidate`
/// - `Pragma: no-cache`
/// - `Expires: 0`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use taskpad_api::middleware::cache::NoStoreLayer;
///
/// let app: Router = Router::new()
///     .layer(NoStoreLayer::new());
/// ```

use axum::{extract::Request, response::Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// No-store cache headers layer
#[derive(Clone, Default)]
pub struct NoStoreLayer;

impl NoStoreLayer {
    /// Creates a new no-store headers layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for NoStoreLayer {
    type Service = NoStoreMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        NoStoreMiddleware { inner }
    }
}

/// No-store cache headers middleware service
#[derive(Clone)]
pub struct NoStoreMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for NoStoreMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;

            let headers = response.headers_mut();

            headers.insert(
                "Cache-Control",
                "no-store, no-cache, must-revalidate, proxy-revalidate"
                    .parse()
                    .unwrap(),
            );
            headers.insert("Pragma", "no-cache".parse().unwrap());
            headers.insert("Expires", "0".parse().unwrap());

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::get, Router};
    use tower::Service as _;

    #[tokio::test]
    async fn test_no_store_headers_applied() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(NoStoreLayer::new());

        let request = axum::http::Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "no-store, no-cache, must-revalidate, proxy-revalidate"
        );
        assert_eq!(response.headers().get("Pragma").unwrap(), "no-cache");
        assert_eq!(response.headers().get("Expires").unwrap(), "0");
    }
}
