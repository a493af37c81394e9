/// Core of license generation: domain model and services
///
/// Nothing in here performs I/O directly; filesystem and manifest access go
/// through the outbound ports.
pub mod domain;
pub mod services;
