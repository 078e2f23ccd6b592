use clap::Parser;
use ptmseek::errors::{
    PtmSeekError,
    Result,
};
use ptmseek::{
    PeptideClassifier,
    PtmPipeline,
};
use request::PredictRequest;
use serde_json::Value;
use std::io::{
    ErrorKind,
    Read,
    Write,
};
use std::net::{
    TcpListener,
    TcpStream,
};
use std::sync::Arc;
use std::time::{
    Duration,
    Instant,
};
use tracing::level_filters::LevelFilter;
use tracing::{
    debug,
    error,
    info,
    warn,
};
use tracing_subscriber::EnvFilter;

mod cli;
mod request;

type SharedClassifier = Box<dyn PeptideClassifier + Send + Sync>;

struct DaemonServer {
    pipeline: Arc<PtmPipeline<SharedClassifier>>,
    read_timeout: Duration,
}

impl DaemonServer {
    pub fn new(pipeline: PtmPipeline<SharedClassifier>, read_timeout: Duration) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            read_timeout,
        }
    }

    pub fn run(&self, addr: &str) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr)?;
        info!("Listening on {}", addr);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Ok(peer) = stream.peer_addr() {
                        debug!("Accepted connection from {}", peer);
                    }
                    let pipeline = Arc::clone(&self.pipeline);
                    if let Err(e) = handle_connection(stream, pipeline, self.read_timeout) {
                        error!("Error handling connection: {}", e);
                    }
                }
                Err(e) => error!("Error accepting connection: {}", e),
            }
        }

        Ok(())
    }
}

/// Reads one request (until the client closes its write half) and answers it.
///
/// A client that keeps the connection open without finishing its request
/// for longer than `read_timeout` gets an `invalid_request` error back.
fn handle_connection<C: PeptideClassifier>(
    mut stream: TcpStream,
    pipeline: Arc<PtmPipeline<C>>,
    read_timeout: Duration,
) -> std::io::Result<()> {
    stream.set_read_timeout(Some(read_timeout))?;
    let mut buffer = Vec::new();
    let response = match stream.read_to_end(&mut buffer) {
        Ok(_) => {
            debug!("Read request of {} bytes", buffer.len());
            let start = Instant::now();
            let response = request::handle_body(&*pipeline, &buffer);
            info!(
                "Request answered with status {} in {:?}",
                response["status"],
                start.elapsed()
            );
            response
        }
        Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
            warn!("Timed out after {:?} waiting for a request", read_timeout);
            request::read_timeout_response(read_timeout)
        }
        Err(e) => return Err(e),
    };
    send_response(&mut stream, &response)
}

fn send_response(stream: &mut TcpStream, response: &Value) -> std::io::Result<()> {
    stream.write_all(response.to_string().as_bytes())?;
    stream.write_all(b"\n")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let conf = cli::Cli::parse();
    let config = conf.read_config()?;
    info!("Parsed configuration: {:#?}", config);

    let classifier: SharedClassifier = match &config.classifier {
        Some(x) => x.build(),
        None => {
            return Err(PtmSeekError::Config {
                msg: "No classifier configured".to_string(),
            });
        }
    };
    let pipeline = PtmPipeline::new(classifier, config.orchestrator()?);

    let sample = PredictRequest::sample();
    info!(
        "Sample query: \n{}",
        serde_json::to_string_pretty(&sample)?
    );

    let server = DaemonServer::new(pipeline, conf.read_timeout());
    match server.run(&conf.address) {
        Ok(_) => Ok(()),
        Err(e) => Err(PtmSeekError::Io {
            source: e,
            path: None,
        }),
    }
}
