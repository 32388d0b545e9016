// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: Postgres repositories, import history, notification delivery
// - presentation: HTTP handlers and routing
// - application: use cases, ports and DTOs
// - domain: core models and business rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
