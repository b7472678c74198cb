//! Client for the location backend
use crate::{
    error::{Error, Result},
    location::{Location, SavedLocation},
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

pub const SUBMIT_LOCATION_PATH: &str = "submit_location";
pub const GET_LOCATIONS_PATH: &str = "get_locations";

/// The server's answer to a new location
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    /// Predicted overpass times, in display form and in the order they should be shown
    #[serde(default)]
    pub overpasses: Option<Vec<String>>,
}

/// Body sent by the server along with an error status
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// The two calls that the page makes to the backend
#[async_trait]
pub trait LocationApi: Send + Sync {
    async fn submit_location(&self, location: &Location) -> Result<SubmitResponse>;

    async fn get_locations(&self) -> Result<Vec<SavedLocation>>;
}

/// [LocationApi] implementation that talks to the backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    submit_url: Url,
    locations_url: Url,
}

impl HttpApi {
    /// Create a client for the server at `server`. Endpoints are resolved relative to it, so
    /// `http://host/app` and `http://host/app/` are equivalent.
    pub fn new(server: &str) -> Result<Self> {
        let mut base = Url::parse(server).map_err(|e| {
            debug!(?e, "failed to parse server url");
            Error::InvalidUrl(server.to_string())
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(server.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let join = |path: &str| {
            base.join(path)
                .map_err(|_| Error::InvalidUrl(server.to_string()))
        };
        Ok(Self {
            client: Client::new(),
            submit_url: join(SUBMIT_LOCATION_PATH)?,
            locations_url: join(GET_LOCATIONS_PATH)?,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl LocationApi for HttpApi {
    async fn submit_location(&self, location: &Location) -> Result<SubmitResponse> {
        debug!(url = %self.submit_url, ?location, "submitting location");
        let response = self
            .client
            .post(self.submit_url.clone())
            .json(location)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_locations(&self) -> Result<Vec<SavedLocation>> {
        debug!(url = %self.locations_url, "fetching saved locations");
        let response = self.client.get(self.locations_url.clone()).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinate;
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use test_log::test;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("no local address");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("test server failed")
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_endpoints() {
        let api = HttpApi::new("http://localhost:5000").expect("failed to create api");
        assert_eq!(
            api.submit_url.as_str(),
            "http://localhost:5000/submit_location"
        );
        let api = HttpApi::new("https://example.com/landsat").expect("failed to create api");
        assert_eq!(
            api.locations_url.as_str(),
            "https://example.com/landsat/get_locations"
        );
        assert!(matches!(
            HttpApi::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpApi::new("mailto:someone@example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test(tokio::test)]
    async fn test_submit_location() {
        let router = Router::new().route(
            "/submit_location",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(
                    body,
                    json!({"latitude": "12.345", "longitude": "-98.765", "name": "Home"})
                );
                Json(json!({
                    "message": "Saved location: Home",
                    "location": {"id": 3},
                    "overpasses": ["2024-01-01 10:00:00", "2024-01-02 11:00:00"],
                }))
            }),
        );
        let api = HttpApi::new(&serve(router).await).expect("failed to create api");
        let location = Location::from_form("12.345".into(), "-98.765".into(), "Home".into())
            .expect("invalid location");
        let response = api
            .submit_location(&location)
            .await
            .expect("submit failed");
        assert_eq!(response.message, "Saved location: Home");
        assert_eq!(
            response.overpasses,
            Some(vec![
                "2024-01-01 10:00:00".to_string(),
                "2024-01-02 11:00:00".to_string()
            ])
        );
    }

    #[test(tokio::test)]
    async fn test_submit_location_server_error() {
        let router = Router::new().route(
            "/submit_location",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "An error occurred while submitting the location"})),
                )
            }),
        );
        let api = HttpApi::new(&serve(router).await).expect("failed to create api");
        let location = Location::from_form("1".into(), "2".into(), "".into()).unwrap();
        match api.submit_location(&location).await {
            Err(Error::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "An error occurred while submitting the location");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test(tokio::test)]
    async fn test_submit_location_bad_body() {
        let router = Router::new().route("/submit_location", post(|| async { "not json" }));
        let api = HttpApi::new(&serve(router).await).expect("failed to create api");
        let location = Location::from_form("1".into(), "2".into(), "".into()).unwrap();
        assert!(matches!(
            api.submit_location(&location).await,
            Err(Error::Parse(_))
        ));
    }

    #[test(tokio::test)]
    async fn test_get_locations() {
        let router = Router::new().route(
            "/get_locations",
            get(|| async {
                Json(json!([
                    {"name": "Field", "latitude": 45.25, "longitude": -93.5},
                    {"name": "Lake", "latitude": "46.1", "longitude": "-94.2"},
                ]))
            }),
        );
        let api = HttpApi::new(&serve(router).await).expect("failed to create api");
        let locations = api.get_locations().await.expect("fetch failed");
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].latitude, Coordinate::Number(45.25));
        assert_eq!(locations[1].longitude, Coordinate::Text("-94.2".into()));
    }

    #[test(tokio::test)]
    async fn test_unreachable_server() {
        // nothing listens on the discard port
        let api = HttpApi::new("http://127.0.0.1:9").expect("failed to create api");
        assert!(matches!(api.get_locations().await, Err(Error::Http(_))));
    }
}
