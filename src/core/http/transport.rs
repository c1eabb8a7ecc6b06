//! Concrete transports: `reqwest` for the server build, `gloo-net` fetch for the browser

#[cfg(any(feature = "ssr", feature = "hydrate"))]
use super::{ApiRequest, ApiResponse, FormPart, HttpTransport, Method, RequestBody, TransportError};

/// Transport backed by `reqwest`, used by the server build
#[cfg(feature = "ssr")]
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "ssr")]
impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "ssr")]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url(&self.base_url));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match &request.body {
            Some(RequestBody::Json(body)) => builder = builder.json(body),
            Some(RequestBody::Multipart(parts)) => builder = builder.multipart(reqwest_form(parts)?),
            None => {}
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", request.method, request.path, e);
            TransportError(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response: {}", e)))?;

        tracing::debug!("{} {} -> {}", request.method, request.path, status);
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(feature = "ssr")]
fn reqwest_form(parts: &[FormPart]) -> Result<reqwest::multipart::Form, TransportError> {
    use reqwest::multipart::{Form, Part};

    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let file = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)
                    .map_err(|e| TransportError(format!("Invalid file part: {}", e)))?;
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}

/// Transport backed by the browser fetch API through `gloo-net`
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct FetchTransport {
    base_url: String,
}

#[cfg(feature = "hydrate")]
impl FetchTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[cfg(feature = "hydrate")]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        use gloo_net::http::RequestBuilder;

        let method = match request.method {
            Method::Get => gloo_net::http::Method::GET,
            Method::Post => gloo_net::http::Method::POST,
            Method::Put => gloo_net::http::Method::PUT,
            Method::Patch => gloo_net::http::Method::PATCH,
            Method::Delete => gloo_net::http::Method::DELETE,
        };

        let mut builder = RequestBuilder::new(&request.url(&self.base_url))
            .method(method)
            .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        // The browser sets the multipart boundary header itself
        let built = match &request.body {
            Some(RequestBody::Json(body)) => builder.json(body),
            Some(RequestBody::Multipart(parts)) => builder.body(browser_form(parts)?),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let response = built.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", request.method, request.path, e);
            TransportError(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(feature = "hydrate")]
fn browser_form(parts: &[FormPart]) -> Result<web_sys::FormData, TransportError> {
    use web_sys::js_sys::{Array, Uint8Array};
    use web_sys::{Blob, BlobPropertyBag, FormData};

    let js_err = |e: wasm_bindgen::JsValue| TransportError(format!("{:?}", e));

    let form = FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value).map_err(js_err)?,
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let chunks = Array::of1(&Uint8Array::from(bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(mime);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(js_err)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form)
}
