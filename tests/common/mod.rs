#![allow(dead_code)]

use diesel_lab::config::ClientConfig;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

pub const TEST_MODEL: &str = "test-model";
pub const TEST_KEY: &str = "test-key";

/// One HTTP request as the stub saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub enum Reply {
    Respond { status: u16, body: String },
    Stall(Duration),
}

/// Raw-socket stand-in for the provider. Serves every connection with the
/// same reply until the test ends.
pub struct StubServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: mpsc::Receiver<CapturedRequest>,
}

impl StubServer {
    pub fn respond(status: u16, body: &str) -> Self {
        Self::start(Reply::Respond {
            status,
            body: body.to_string(),
        })
    }

    pub fn stall(delay: Duration) -> Self {
        Self::start(Reply::Stall(delay))
    }

    fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub addr");
        let hits = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel();

        let counter = hits.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Some(captured) = read_request(&mut stream) else {
                    continue;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(captured);
                match &reply {
                    Reply::Respond { status, body } => write_response(&mut stream, *status, body),
                    Reply::Stall(delay) => thread::sleep(*delay),
                }
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            requests: rx,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub received a request")
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_base_url(&self.base_url)
            .with_model(TEST_MODEL)
            .with_api_key(TEST_KEY)
            .with_timeout(Duration::from_secs(5))
    }
}

/// Base URL of a port nothing listens on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = if status < 400 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
