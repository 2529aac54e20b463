use super::service::MvcService;
use std::io::{self, Cursor};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// `tiny_http` host for an [`MvcService`].
///
/// A fixed pool of worker threads shares one listener; each worker blocks on
/// the next request and serves it to completion before taking another.
pub struct HttpServer {
    service: MvcService,
    workers: usize,
}

/// Handle to a running [`HttpServer`]
pub struct ServerHandle {
    addr: SocketAddr,
    server: Arc<tiny_http::Server>,
    stopping: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    /// Address the listener is bound to
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to be ready to accept connections
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the server doesn't accept a connection within ~250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Stop accepting requests and wait for every worker to finish.
    pub fn stop(self) {
        self.stopping.store(true, Ordering::Release);
        for _ in 0..self.workers.len() {
            self.server.unblock();
        }
        for worker in self.workers {
            if worker.join().is_err() {
                warn!("HTTP worker exited by panic");
            }
        }
        info!(addr = %self.addr, "HTTP server stopped");
    }

    /// Block until every worker thread exits.
    ///
    /// # Errors
    ///
    /// Returns the panic payload of the first worker that panicked.
    pub fn join(self) -> thread::Result<()> {
        let mut result = Ok(());
        for worker in self.workers {
            if let Err(panic) = worker.join() {
                if result.is_ok() {
                    result = Err(panic);
                }
            }
        }
        result
    }
}

impl HttpServer {
    #[must_use]
    pub fn new(service: MvcService, workers: usize) -> Self {
        Self {
            service,
            workers: workers.max(1),
        }
    }

    /// Bind `addr` and start the worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let server = tiny_http::Server::http(addr)
            .map_err(|e| io::Error::new(io::ErrorKind::AddrNotAvailable, e.to_string()))?;
        let addr = server.server_addr().to_ip().unwrap_or(addr);
        let server = Arc::new(server);
        let stopping = Arc::new(AtomicBool::new(false));

        let mut workers = Vec::with_capacity(self.workers);
        for index in 0..self.workers {
            let server = Arc::clone(&server);
            let stopping = Arc::clone(&stopping);
            let service = self.service.clone();
            let worker = thread::Builder::new()
                .name(format!("brrtmvc-http-{index}"))
                .spawn(move || worker_loop(&server, &service, &stopping))?;
            workers.push(worker);
        }

        info!(addr = %addr, workers = self.workers, "HTTP server started");
        Ok(ServerHandle {
            addr,
            server,
            stopping,
            workers,
        })
    }
}

fn worker_loop(server: &tiny_http::Server, service: &MvcService, stopping: &AtomicBool) {
    loop {
        match server.recv() {
            Ok(request) => serve(service, request),
            Err(e) => {
                if stopping.load(Ordering::Acquire) {
                    debug!("HTTP worker shutting down");
                    return;
                }
                warn!(error = %e, "Failed to receive request");
            }
        }
    }
}

fn serve(service: &MvcService, mut request: tiny_http::Request) {
    let response = match to_http_request(&mut request) {
        Ok(req) => service.call(req),
        Err(e) => {
            warn!(error = %e, url = %request.url(), "Malformed request");
            let mut res = http::Response::new(format!("Bad request: {e}"));
            *res.status_mut() = http::StatusCode::BAD_REQUEST;
            res
        }
    };

    if let Err(e) = request.respond(to_tiny_response(response)) {
        error!(error = %e, "Failed to write response");
    }
}

fn to_http_request(request: &mut tiny_http::Request) -> io::Result<http::Request<String>> {
    let mut builder = http::Request::builder()
        .method(request.method().as_str())
        .uri(request.url());
    for header in request.headers() {
        builder = builder.header(header.field.as_str().as_str(), header.value.as_str());
    }

    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;
    builder
        .body(body)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

fn to_tiny_response(response: http::Response<String>) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let (parts, body) = response.into_parts();
    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| tiny_http::Header::from_bytes(name.as_str(), value.as_bytes()).ok())
        .collect();
    let body = body.into_bytes();
    let length = body.len();
    tiny_http::Response::new(
        tiny_http::StatusCode(parts.status.as_u16()),
        headers,
        Cursor::new(body),
        Some(length),
        None,
    )
}
