use crate::harness::{CapturingSink, StubResolver};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use viewtrail_core::conf::{Config, ProxyTrust};
use viewtrail_core::enrichment::geo::GeoResolver;
use viewtrail_core::pipeline::EmissionPipeline;
use viewtrail_core::server::build_server;
use viewtrail_core::sink::{EventSink, SinkEvent};

pub struct TestOptions {
    pub proxy: ProxyTrust,
    pub parse_user_agent: bool,
    pub resolver: Arc<dyn GeoResolver>,
    /// Replaces the capturing sink, events are then not observable through `TestServer`.
    pub sink: Option<Arc<dyn EventSink>>,
    pub reject_views: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            proxy: ProxyTrust::disabled(),
            parse_user_agent: true,
            resolver: Arc::new(StubResolver::default()),
            sink: None,
            reject_views: false,
        }
    }
}

/// Handle to a running viewtrail test server.
pub struct TestServer {
    base_url: String,
    client: Client,
    sink: Arc<CapturingSink>,
}

impl TestServer {
    pub fn start() -> Self {
        Self::start_with(TestOptions::default())
    }

    /// Start a server on a free port with the given collaborators.
    pub fn start_with(options: TestOptions) -> Self {
        let port = free_port();

        let config = Config {
            listen_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            proxy: options.proxy,
            parse_user_agent: options.parse_user_agent,
            server_threads: Some(1),
            ..Config::default()
        };

        let sink = Arc::new(if options.reject_views {
            CapturingSink::rejecting_views()
        } else {
            CapturingSink::default()
        });
        let emit_to: Arc<dyn EventSink> = match options.sink {
            Some(custom) => custom,
            None => sink.clone(),
        };

        let pipeline = Arc::new(EmissionPipeline::new(
            options.resolver,
            emit_to,
            config.parse_user_agent,
        ));

        let server = build_server(&config, pipeline).expect("failed to build viewtrail server");

        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{port}");
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            sink,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    pub fn events(&self) -> Vec<(SinkEvent, Value)> {
        self.sink.events()
    }

    /// Poll until an event carrying `request_id` has been emitted (or panic).
    pub fn wait_for_event(&self, request_id: &str) -> (SinkEvent, Value) {
        let deadline = Instant::now() + Duration::from_secs(3);

        loop {
            let found = self.events().into_iter().find(|(_, fields)| {
                fields["request-id"] == request_id || fields["data"]["request-id"] == request_id
            });
            if let Some(event) = found {
                return event;
            }
            if Instant::now() > deadline {
                panic!("no event emitted for request {request_id}");
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Poll until at least `count` events have been emitted (or panic).
    pub fn wait_for_events(&self, count: usize) -> Vec<(SinkEvent, Value)> {
        let deadline = Instant::now() + Duration::from_secs(3);

        loop {
            let events = self.events();
            if events.len() >= count {
                return events;
            }
            if Instant::now() > deadline {
                panic!("expected {count} events, got {}", events.len());
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

/// Poll until the server accepts connections (or panic).
fn wait_for_server(base_url: &str) {
    let addr = base_url.strip_prefix("http://").unwrap_or(base_url);
    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {base_url}");
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
