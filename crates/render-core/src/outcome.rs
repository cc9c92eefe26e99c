use std::fmt;

/// What a render produced. All three variants carry a usable document.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Ok(Vec<u8>),
    /// Produced by a fallback adapter; some content may be missing.
    Degraded { bytes: Vec<u8>, reason: String },
    /// Every real adapter failed; `bytes` is a minimal error document.
    Emergency { bytes: Vec<u8>, reason: String },
}

impl RenderOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            RenderOutcome::Ok(bytes) => bytes,
            RenderOutcome::Degraded { bytes, .. } | RenderOutcome::Emergency { bytes, .. } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RenderOutcome::Ok(bytes) => bytes,
            RenderOutcome::Degraded { bytes, .. } | RenderOutcome::Emergency { bytes, .. } => bytes,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            RenderOutcome::Ok(_) => None,
            RenderOutcome::Degraded { reason, .. } | RenderOutcome::Emergency { reason, .. } => Some(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RenderOutcome::Ok(_))
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, RenderOutcome::Emergency { .. })
    }
}

impl fmt::Display for RenderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderOutcome::Ok(bytes) => write!(f, "ok ({} bytes)", bytes.len()),
            RenderOutcome::Degraded { bytes, reason } => {
                write!(f, "degraded ({} bytes): {}", bytes.len(), reason)
            }
            RenderOutcome::Emergency { bytes, reason } => {
                write!(f, "emergency ({} bytes): {}", bytes.len(), reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_carries_bytes() {
        let outcomes = [
            RenderOutcome::Ok(b"%PDF-ok".to_vec()),
            RenderOutcome::Degraded { bytes: b"%PDF-deg".to_vec(), reason: "no font".into() },
            RenderOutcome::Emergency { bytes: b"%PDF-em".to_vec(), reason: "boom".into() },
        ];
        for outcome in &outcomes {
            assert!(outcome.bytes().starts_with(b"%PDF"));
        }
        assert!(outcomes[0].is_ok() && outcomes[0].reason().is_none());
        assert_eq!(outcomes[1].reason(), Some("no font"));
        assert!(outcomes[2].is_emergency());
        assert!(outcomes[2].to_string().starts_with("emergency"));
    }
}
