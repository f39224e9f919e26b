//! Location provider backed by Dart callbacks.

use async_trait::async_trait;
use devpeer_core::location::{
    Coordinate, LocationError, LocationProvider, LocationResult, PermissionStatus,
};
use flutter_rust_bridge::DartFnFuture;
use log::debug;

use crate::api::CoordinateView;

type PermissionPrompt = Box<dyn Fn() -> DartFnFuture<bool> + Send + Sync>;
type CoordinateReading = Box<dyn Fn() -> DartFnFuture<Option<CoordinateView>> + Send + Sync>;

/// Asks the Flutter side for permission and a reading only when the
/// bootstrap reaches those steps.
pub(crate) struct DartLocation {
    request_permission: PermissionPrompt,
    current_coordinate: CoordinateReading,
}

impl DartLocation {
    pub(crate) fn new(
        request_permission: impl Fn() -> DartFnFuture<bool> + Send + Sync + 'static,
        current_coordinate: impl Fn() -> DartFnFuture<Option<CoordinateView>>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            request_permission: Box::new(request_permission),
            current_coordinate: Box::new(current_coordinate),
        }
    }
}

#[async_trait]
impl LocationProvider for DartLocation {
    async fn request_permission(&self) -> PermissionStatus {
        let granted = (self.request_permission)().await;
        debug!("Platform permission answer: {granted}");
        PermissionStatus::from(granted)
    }

    async fn current_coordinate(&self) -> LocationResult<Coordinate> {
        match (self.current_coordinate)().await {
            Some(reading) => Coordinate::new(reading.latitude, reading.longitude),
            None => Err(LocationError::Unavailable(
                "no reading reported by platform".to_string(),
            )),
        }
    }
}
