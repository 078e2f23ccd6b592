use super::{
    ClassifierError,
    PeptideClassifier,
    RawScores,
    try_into_raw_scores,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::io::{
    BufRead,
    BufReader,
    Write,
};
use std::net::{
    Shutdown,
    TcpStream,
};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    peptides: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
enum ClassifyResponse {
    Success(Vec<Vec<f32>>),
    Error(String),
}

/// Client for a model server speaking newline delimited JSON over TCP.
///
/// Every batch opens its own connection: the request
/// `{"peptides": [..]}` is written followed by a newline, the write half
/// is closed, and a single line holding either
/// `{"status": "success", "data": [[..54 floats..], ..]}` or
/// `{"status": "error", "data": "<message>"}` is read back.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    address: String,
    timeout: Option<Duration>,
}

impl RemoteClassifier {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn roundtrip(&self, batch: &[String]) -> Result<String, ClassifierError> {
        let mut stream = TcpStream::connect(&self.address)?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;

        let payload = serde_json::to_vec(&ClassifyRequest { peptides: batch }).map_err(|e| {
            ClassifierError::Protocol {
                msg: e.to_string(),
            }
        })?;
        stream.write_all(&payload)?;
        stream.write_all(b"\n")?;
        stream.flush()?;
        stream.shutdown(Shutdown::Write)?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        Ok(line)
    }
}

impl PeptideClassifier for RemoteClassifier {
    fn classify(&self, batch: &[String]) -> Result<Vec<RawScores>, ClassifierError> {
        let line = self.roundtrip(batch)?;
        debug!(
            "Classifier at {} answered {} bytes for {} peptides",
            self.address,
            line.len(),
            batch.len()
        );
        if line.trim().is_empty() {
            return Err(ClassifierError::Protocol {
                msg: "Empty response".to_string(),
            });
        }
        let response: ClassifyResponse =
            serde_json::from_str(&line).map_err(|e| ClassifierError::Protocol {
                msg: e.to_string(),
            })?;
        let vectors = match response {
            ClassifyResponse::Success(x) => x,
            ClassifyResponse::Error(msg) => return Err(ClassifierError::Remote { msg }),
        };
        if vectors.len() != batch.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: batch.len(),
                got: vectors.len(),
            });
        }
        vectors.into_iter().map(try_into_raw_scores).collect()
    }
}
