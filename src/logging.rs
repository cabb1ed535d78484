use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::LevelFilter;
use reqwest::StatusCode;

/// Default location of the logging config for binaries.
pub const LOG_CONFIG_FILE: &str = "log4rs.yaml";

/// A unique identifier for a particular outgoing request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct RequestId(pub usize);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RequestId {
    /// Atomically get the next ID. This wraps around back to zero if you somehow exceed a usize.
    pub fn next() -> RequestId {
        static REQUEST_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);
        RequestId(REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Log an outgoing request.
pub fn log_request(id: RequestId, method: &str, url: &str) {
    info!("->req{id} {method} {url}");
}

/// Log the response to a request, at a level matching its status class.
pub fn log_response(id: RequestId, status: StatusCode, url: &str) {
    let log_msg = format!("<-rsp{id} {status} {url}");
    if status.is_server_error() {
        error!("{log_msg}");
    } else if status.is_client_error() {
        warn!("{log_msg}");
    } else {
        info!("{log_msg}");
    }
}

/// Set up logging for a binary from `path`, then quieten the HTTP stack.
///
/// # Panics
/// If the config file is missing or invalid; there is nowhere to report it.
pub fn init(path: &str) {
    log4rs::init_file(path, log4rs_dynamic_filters::default_deserializers())
        .expect("Failed to initialise logging");
    log4rs_dynamic_filters::DynamicLevelFilter::set("reqwest", LevelFilter::Warn);
    info!("Initialised logging");
}
