//! Local HTTP/1.1 endpoint used as a test double for outbound calls.
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::request::RequestDescriptor;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    /// Answer every request with a body of `body_len` bytes after `delay`.
    Respond { body_len: usize, delay: Duration },
    /// Answer the first `successes` requests, then drop connections unanswered.
    FailAfter { successes: usize },
    /// Read the request and never answer.
    Stall,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

pub(crate) struct TestServer {
    url: String,
    counters: Arc<Counters>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

impl TestServer {
    pub(crate) fn spawn(behavior: Behavior) -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind test server failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("server addr failed: {}", err))?;
        listener
            .set_nonblocking(true)
            .map_err(|err| format!("set_nonblocking failed: {}", err))?;

        let counters = Arc::new(Counters::default());
        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let accept_counters = Arc::clone(&counters);

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                match listener.accept() {
                    Ok((stream, _)) => {
                        let counters = Arc::clone(&accept_counters);
                        thread::spawn(move || handle_client(stream, behavior, &counters));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(2));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            url: format!("http://{}/users", addr),
            counters,
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    pub(crate) fn ok(body_len: usize) -> Result<Self, String> {
        Self::spawn(Behavior::Respond {
            body_len,
            delay: Duration::ZERO,
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Requests fully received so far, answered or not.
    pub(crate) fn hits(&self) -> usize {
        self.counters.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn descriptor(&self, timeout: Duration) -> Result<RequestDescriptor, String> {
        RequestDescriptor::builder(&self.url)
            .header("Accept", "application/json")
            .timeout(timeout)
            .build()
            .map_err(|err| format!("descriptor failed: {}", err))
    }
}

fn handle_client(mut stream: TcpStream, behavior: Behavior, counters: &Counters) {
    if stream.set_nonblocking(false).is_err() || !read_request_head(&mut stream) {
        return;
    }
    let index = counters.hits.fetch_add(1, Ordering::SeqCst);

    match behavior {
        Behavior::Respond { body_len, delay } => {
            let current = counters
                .in_flight
                .fetch_add(1, Ordering::SeqCst)
                .saturating_add(1);
            counters.max_in_flight.fetch_max(current, Ordering::SeqCst);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            write_ok(&mut stream, body_len);
            counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        Behavior::FailAfter { successes } => {
            if index < successes {
                write_ok(&mut stream, 16);
            }
        }
        Behavior::Stall => {
            thread::sleep(Duration::from_secs(3));
        }
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request_head(stream: &mut TcpStream) -> bool {
    let mut head = Vec::new();
    let mut buffer = [0u8; 1024];
    loop {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return false,
            Ok(read) => {
                head.extend_from_slice(buffer.get(..read).unwrap_or_default());
                if head.windows(4).any(|window| window == b"\r\n\r\n") {
                    return true;
                }
            }
        }
    }
}

fn write_ok(stream: &mut TcpStream, body_len: usize) {
    let body = "x".repeat(body_len);
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body_len, body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    drop(stream.flush());
}

/// Accepts one TLS connection, records the client's first handshake record
/// and hangs up before answering it.
pub(crate) struct ClientHelloCapture {
    url: String,
    hello: mpsc::Receiver<Vec<u8>>,
}

impl ClientHelloCapture {
    pub(crate) fn spawn() -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind capture listener failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("capture addr failed: {}", err))?;
        let (hello_tx, hello_rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            if stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .is_err()
            {
                return;
            }
            let record = read_tls_record(&mut stream);
            let _send_result = hello_tx.send(record);
            drop(stream.shutdown(Shutdown::Both));
        });

        Ok(Self {
            url: format!("https://{}/users", addr),
            hello: hello_rx,
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn client_hello(&self) -> Result<Vec<u8>, String> {
        self.hello
            .recv_timeout(Duration::from_secs(5))
            .map_err(|err| format!("no ClientHello captured: {}", err))
    }
}

/// Reads one TLS record: a 5-byte header whose last two bytes give the
/// payload length.
fn read_tls_record(stream: &mut TcpStream) -> Vec<u8> {
    let mut record = Vec::new();
    let mut buffer = [0u8; 4096];
    loop {
        let expected = match (record.get(3), record.get(4)) {
            (Some(high), Some(low)) => {
                usize::from(u16::from_be_bytes([*high, *low])).saturating_add(5)
            }
            _ => usize::MAX,
        };
        if record.len() >= expected {
            return record;
        }
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return record,
            Ok(read) => record.extend_from_slice(buffer.get(..read).unwrap_or_default()),
        }
    }
}

/// Wire encoding of an ALPN extension offering `protocols` in order.
pub(crate) fn alpn_extension(protocols: &[&str]) -> Vec<u8> {
    let mut list = Vec::new();
    for protocol in protocols {
        list.push(u8::try_from(protocol.len()).unwrap_or(u8::MAX));
        list.extend_from_slice(protocol.as_bytes());
    }
    let list_len = u16::try_from(list.len()).unwrap_or(u16::MAX);
    let mut extension = vec![0x00, 0x10];
    extension.extend_from_slice(&list_len.saturating_add(2).to_be_bytes());
    extension.extend_from_slice(&list_len.to_be_bytes());
    extension.extend_from_slice(&list);
    extension
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber scoped to this thread (and to the tasks it
/// hands its subscriber to) and returns what was logged at info level.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> Result<(T, String), String> {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer
        .0
        .lock()
        .map_err(|_| "log buffer poisoned".to_owned())?
        .clone();
    Ok((value, String::from_utf8_lossy(&bytes).into_owned()))
}
