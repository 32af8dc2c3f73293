//! Request/response shapes exchanged with the inverse-design service.

use serde::{Deserialize, Serialize};

use crate::config::IrisParams;

/// What a designer asks for: target aperture bounds plus the physical stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub blade_count: usize,
    pub min_diameter: f64,
    pub max_diameter: f64,
    pub blade_width: f64,
    pub pin_radius: f64,
    pub pin_clearance: f64,
}

/// Mechanism dimensions chosen by the service for a [`DesignRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    pub blade_radius: f64,
    pub pinned_radius: f64,
    pub min_angle: f64,
    pub max_angle: f64,
}

impl IrisParams {
    /// Combine a request and the service's answer into a parameter set for this engine.
    #[must_use]
    pub fn from_design(
        request: &DesignRequest,
        response: &DesignResponse,
        subtended_angle: f64,
    ) -> Self {
        Self {
            blade_count: request.blade_count,
            blade_radius: response.blade_radius,
            subtended_angle,
            blade_width: request.blade_width,
            pin_diameter: 2.0 * request.pin_radius,
            clearance: request.pin_clearance,
            pinned_radius: response.pinned_radius,
            min_actuator_angle: response.min_angle,
            max_actuator_angle: response.max_angle,
        }
    }
}
