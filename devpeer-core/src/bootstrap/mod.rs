//! The map screen's startup sequence.
//!
//! Every time the map is entered, a [`BootstrapWorkflow`] decides between
//! sending the user to sign-up, reporting a location problem, or producing
//! the set of users to draw.
//!
//! # State Machine
//!
//! ```text
//! Start
//!   └─▶ CheckingSession ──(no handle)──▶ RedirectSignUp
//!         └─▶ CheckingPermission ──(denied)──▶ PermissionDenied
//!               └─▶ FetchingLocation ──(no reading)──▶ LocationError
//!                     └─▶ Registering ──(fetch failed)──▶ FetchFailed
//!                           └─▶ Ready
//! ```
//!
//! Any state before a terminal one may instead end in `Cancelled` when the
//! run's cancellation token fires.
//!
//! Steps run strictly in order and each state is entered at most once. A
//! workflow is consumed by its run; remounting the screen builds a new one.
//! Registration failures are tolerated; the map still loads.

mod error;
mod state;
mod task;
mod workflow;

pub use error::{BootstrapError, BootstrapResult};
pub use state::{BootstrapOutcome, BootstrapReport, BootstrapState, MapSnapshot};
pub use task::BootstrapTask;
pub use workflow::BootstrapWorkflow;

pub use tokio_util::sync::CancellationToken;
