//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole service. Call it once,
//! from the binary.
//!
//! ## Configuration
//!
//! The level comes from `RUST_LOG`. The compact format hides the module prefix
//! (`with_target(false)`); factories identify themselves with the `entity_type` field.
//!
//! ```bash
//! RUST_LOG=info composite-content
//! RUST_LOG=debug composite-content        # full payloads at client entry points
//! RUST_LOG=composite_content::content=debug,info composite-content
//! ```
//!
//! ## Import Trace Example
//!
//! Importing a two-service Compose file with `RUST_LOG=info`:
//!
//! ```text
//! INFO Actor started entity_type="ResourceDescription"
//! INFO Actor started entity_type="CompositeDescription"
//! INFO import: Created entity_type="ResourceDescription" id=/resources/container-descriptions/4f0c... size=1
//! INFO import: Created entity_type="ResourceDescription" id=/resources/container-descriptions/9a12... size=2
//! INFO import: Created entity_type="CompositeDescription" id=/resources/composite-descriptions/c7e1... size=1
//! INFO import:materialize: Composite description created link=/resources/composite-descriptions/c7e1... count=2
//! ```
//!
//! A failed child shows up as `on_create failed` on the factory, followed by
//! `Import failed` on the service. Later failures of the same batch are logged as
//! `Additional failure in batch` at `warn`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the factory
        .compact()
        .init();
}
