use bytes::Bytes;
use hashbrown::HashMap as FastHashMap;
use serde::{Deserialize, Serialize};

pub type HttpRequest = http::Request<Bytes>;
pub type HttpResponse = http::Response<Bytes>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Named captures of a matched template. A capture is `None` when its group
/// took no part in the match.
pub type PathParams = FastHashMap<String, Option<String>>;

/// Audience flag resolved for the current visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub name: String,
    pub value: bool,
    #[serde(default)]
    pub is_segment: bool,
}

impl Flag {
    pub fn new<S: Into<String>>(name: S, value: bool) -> Self {
        Self {
            name: name.into(),
            value,
            is_segment: false,
        }
    }
}
