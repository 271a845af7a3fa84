pub mod sync;

use std::future::Future;
use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::models::{Layer, Marker, SyncResult};

pub use sync::{SyncPanel, SyncTicket, sync_notification};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The listing backend, seen from the map client.
pub trait MapBackend: Send + Sync {
    fn get_layers(&self) -> impl Future<Output = Result<Vec<Layer>>> + Send;
    fn get_markers(&self) -> impl Future<Output = Result<Vec<Marker>>> + Send;
    fn get_markers_by_layer(
        &self,
        layer_id: &str,
    ) -> impl Future<Output = Result<Vec<Marker>>> + Send;
    fn sync_sheet(&self, sheet_url: &str) -> impl Future<Output = Result<SyncResult>> + Send;
}

/// [`MapBackend`] over the REST API mounted at `<base>/api`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl HttpBackend {
    pub fn new(backend_url: &Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_client(client, backend_url)
    }

    pub fn with_client(client: reqwest::Client, backend_url: &Url) -> Result<Self> {
        let mut base = backend_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client,
            api: base.join("api/")?,
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api.join(path)?)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-success response into [`Error::Server`], keeping the server's
/// `detail` message when the body has one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    Err(Error::Server {
        status: status.as_u16(),
        detail,
    })
}

impl MapBackend for HttpBackend {
    fn get_layers(&self) -> impl Future<Output = Result<Vec<Layer>>> + Send {
        let request = self.endpoint("layers").map(|url| self.client.get(url));
        async move {
            debug!("GET /api/layers");
            Self::send_json(request?).await
        }
    }

    fn get_markers(&self) -> impl Future<Output = Result<Vec<Marker>>> + Send {
        let request = self.endpoint("markers").map(|url| self.client.get(url));
        async move {
            debug!("GET /api/markers");
            Self::send_json(request?).await
        }
    }

    fn get_markers_by_layer(
        &self,
        layer_id: &str,
    ) -> impl Future<Output = Result<Vec<Marker>>> + Send {
        let request = self.endpoint("markers/layer/").and_then(|url| {
            let mut url = url;
            url.path_segments_mut()
                .map_err(|_| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
                .pop_if_empty()
                .push(layer_id);
            Ok(self.client.get(url))
        });
        async move { Self::send_json(request?).await }
    }

    fn sync_sheet(&self, sheet_url: &str) -> impl Future<Output = Result<SyncResult>> + Send {
        let request = self
            .endpoint("admin/sync-sheet")
            .map(|url| self.client.post(url).query(&[("sheet_url", sheet_url)]));
        async move {
            debug!("POST /api/admin/sync-sheet");
            Self::send_json(request?).await
        }
    }
}
