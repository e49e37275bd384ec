//! Default value functions for serde deserialization.

use std::f32::consts::FRAC_PI_4;

use super::sensor::SensorModelType;

pub fn sensor_model() -> SensorModelType {
    SensorModelType::Fov
}

pub fn sensor_count() -> usize {
    5
}

pub fn sensor_range() -> f32 {
    5.0
}

pub fn open_angles() -> [f32; 2] {
    [FRAC_PI_4, FRAC_PI_4]
}

pub fn max_linear_velocity() -> [f32; 3] {
    [1.0; 3]
}

pub fn max_angular_velocity() -> [f32; 3] {
    // 30 deg per sweep
    [0.5236; 3]
}

pub fn swarm_size() -> usize {
    20
}

pub fn max_iterations() -> usize {
    400
}

pub fn coverage_threshold() -> f32 {
    0.95
}

pub fn inertia_weight() -> f32 {
    0.729
}

pub fn cognitive_weight() -> f32 {
    1.49445
}

pub fn social_weight() -> f32 {
    1.49445
}

pub fn crop_margin() -> f32 {
    1.0
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn enabled() -> bool {
    true
}

pub fn svg_scale() -> f32 {
    40.0
}
