use ptmseek::{
    PeptideClassifier,
    PtmPipeline,
    PtmSeekError,
    SequenceInput,
};
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Value,
    json,
};
use std::time::Duration;
use tracing::{
    error,
    warn,
};

/// A prediction request. When both fields are given the FASTA text wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub fasta: Option<String>,
}

impl PredictRequest {
    pub fn sample() -> Self {
        Self {
            sequence: Some("MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ".to_string()),
            fasta: None,
        }
    }

    pub fn into_input(self) -> Result<SequenceInput, PtmSeekError> {
        match (self.fasta, self.sequence) {
            (Some(fasta), _) => Ok(SequenceInput::Fasta(fasta)),
            (None, Some(seq)) => Ok(SequenceInput::Single(seq)),
            (None, None) => Err(PtmSeekError::EmptyInput {
                context: "No sequence or file provided",
            }),
        }
    }
}

fn error_response(kind: &str, msg: String) -> Value {
    json!({
        "status": "error",
        "kind": kind,
        "data": msg,
    })
}

pub fn read_timeout_response(timeout: Duration) -> Value {
    error_response(
        "invalid_request",
        format!("Request not completed within {:?}", timeout),
    )
}

/// Answers the bytes of one request, which must be UTF-8 JSON text.
pub fn handle_body<C: PeptideClassifier>(pipeline: &PtmPipeline<C>, body: &[u8]) -> Value {
    let text = match std::str::from_utf8(body) {
        Ok(x) => x,
        Err(_) => {
            let e = PtmSeekError::EmptyInput {
                context: "Request must be UTF-8 text",
            };
            warn!("Rejecting request: {}", e);
            return error_response(e.kind(), e.to_string());
        }
    };
    if text.trim().is_empty() {
        let e = PtmSeekError::EmptyInput {
            context: "Empty request",
        };
        warn!("Rejecting request: {}", e);
        return error_response(e.kind(), e.to_string());
    }
    handle_request(pipeline, text)
}

/// Answers one request body with the JSON response to send back.
pub fn handle_request<C: PeptideClassifier>(pipeline: &PtmPipeline<C>, body: &str) -> Value {
    let query: PredictRequest = match serde_json::from_str(body) {
        Ok(q) => q,
        Err(e) => {
            warn!("Rejecting malformed request: {}", e);
            return error_response("invalid_request", format!("Invalid query format: {}", e));
        }
    };

    let result = query
        .into_input()
        .and_then(|input| pipeline.predict_csv(input));
    match result {
        Ok(csv) => json!({
            "status": "success",
            "data": csv,
        }),
        Err(e) => {
            if let PtmSeekError::Inference(_) = e {
                error!("Model prediction failed: {}", e);
            } else {
                warn!("Rejecting request: {}", e);
            }
            error_response(e.kind(), e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptmseek::inference::InferenceOrchestrator;
    use ptmseek::report::header_line;
    use ptmseek::{
        ClassifierError,
        ConstantClassifier,
        RawScores,
    };

    fn pipeline() -> PtmPipeline<ConstantClassifier> {
        PtmPipeline::new(
            ConstantClassifier::uniform(0.5),
            InferenceOrchestrator::try_new(10).unwrap(),
        )
    }

    #[test]
    fn test_sequence_request() {
        let body = serde_json::to_string(&PredictRequest::sample()).unwrap();
        let resp = handle_request(&pipeline(), &body);
        assert_eq!(resp["status"], "success");
        let csv = resp["data"].as_str().unwrap();
        assert!(csv.starts_with(&header_line()));
        assert_eq!(csv.lines().count(), 1 + 33);
    }

    #[test]
    fn test_fasta_request() {
        let body = json!({"fasta": ">a\nMKTAYIAKQRQISFVKSHFSRQ\n>b\nLEERLGLIEVQLEERLGLIEVQ\n"});
        let resp = handle_request(&pipeline(), &body.to_string());
        assert_eq!(resp["status"], "success");
        assert_eq!(resp["data"].as_str().unwrap().lines().count(), 1 + 22 + 22);
    }

    #[test]
    fn test_error_kinds() {
        let pipe = pipeline();
        let resp = handle_request(&pipe, "{not json");
        assert_eq!(resp["kind"], "invalid_request");

        let resp = handle_request(&pipe, "{}");
        assert_eq!(resp["kind"], "empty_input");

        let resp = handle_request(&pipe, r#"{"sequence": "MKTAYIAKQR"}"#);
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["kind"], "sequence_too_short");
    }

    #[test]
    fn test_undecodable_or_empty_body() {
        let pipe = pipeline();
        let bodies: [&[u8]; 3] = [&[0xff, 0xfe, b'{', b'}'], b"", b" \n "];
        for body in bodies {
            let resp = handle_body(&pipe, body);
            assert_eq!(resp["status"], "error");
            assert_eq!(resp["kind"], "empty_input");
        }
        let resp = handle_body(&pipe, br#"{"sequence": "MKTAYIAKQRQISFVKSHFSRQ"}"#);
        assert_eq!(resp["status"], "success");
    }

    #[test]
    fn test_read_timeout_response() {
        let resp = read_timeout_response(Duration::from_secs(3));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["kind"], "invalid_request");
    }

    #[test]
    fn test_inference_error_kind() {
        struct Broken;
        impl PeptideClassifier for Broken {
            fn classify(&self, _batch: &[String]) -> Result<Vec<RawScores>, ClassifierError> {
                Err(ClassifierError::Remote {
                    msg: "model not loaded".to_string(),
                })
            }
        }
        let pipe = PtmPipeline::new(Broken, InferenceOrchestrator::default());
        let resp = handle_request(&pipe, r#"{"sequence": "MKTAYIAKQRQISFVKSHFSRQ"}"#);
        assert_eq!(resp["kind"], "inference");
        assert!(resp["data"].as_str().unwrap().contains("model not loaded"));
    }
}
