/// Result of a readiness probe. Consumed immediately by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// An HTTP response arrived; the status code is informational only
    Ready { attempts: u32, status: u16 },
    /// Every attempt failed at the transport level
    Exhausted { attempts: u32, last_error: String },
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}
