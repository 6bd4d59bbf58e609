pub mod marker;
pub mod recorder;
pub mod report;
pub mod session_store;

pub use marker::SessionMarker;
pub use recorder::{PostOutcome, PreOutcome, Recorder};
pub use report::{Report, ReportFilter, SessionPoint};
pub use session_store::{NewSession, SessionStore, SleepSession, StoreError};
