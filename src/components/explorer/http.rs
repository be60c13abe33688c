use std::future::Future;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::explorer::{DataFetcher, FetchError, Fragment};

/// Fetches node fragments as JSON from `{base_url}?uri={id}`.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
	base_url: String,
}

impl HttpFetcher {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
		}
	}

	fn url_for(&self, id: &str) -> String {
		let uri: String = js_sys::encode_uri_component(id).into();
		format!("{}?uri={}", self.base_url, uri)
	}
}

fn js_error(err: JsValue) -> FetchError {
	FetchError::Network(format!("{err:?}"))
}

async fn get_fragment(url: String) -> Result<Fragment, FetchError> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::SameOrigin);

	let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
	let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;
	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?;
	let resp: Response = resp_value
		.dyn_into()
		.map_err(|_| FetchError::Network("response is not a Response".into()))?;
	if !resp.ok() {
		return Err(FetchError::Status(resp.status()));
	}

	let body = JsFuture::from(resp.text().map_err(js_error)?)
		.await
		.map_err(js_error)?
		.as_string()
		.ok_or_else(|| FetchError::Decode("body is not text".into()))?;
	Fragment::from_json(&body)
}

impl DataFetcher for HttpFetcher {
	fn fetch(&self, id: &str) -> impl Future<Output = Result<Fragment, FetchError>> + 'static {
		let url = self.url_for(id);
		log::debug!("GET {url}");
		get_fragment(url)
	}
}
