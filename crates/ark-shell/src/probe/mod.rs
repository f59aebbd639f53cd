mod outcome;
mod policy;
mod prober;
mod target;
mod transport;

pub use outcome::ProbeOutcome;
pub use policy::ProbePolicy;
pub use prober::ReadinessProber;
pub use target::{ProbeScheme, ProbeTarget};
pub use transport::{HttpTransport, ProbeTransport};
