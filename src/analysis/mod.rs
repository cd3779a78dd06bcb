//! Image reconstruction and pattern scanning

/// Composite image built from tile interiors
pub mod compositor;
/// Sea monster scanning and roughness
pub mod patterns;
