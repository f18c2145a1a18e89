//! infracheck - property verification for Terraform AWS/EKS templates
//!
//! A template is a directory tree of Terraform modules, per-environment
//! configurations and CI workflows. infracheck reads it as text and checks a
//! catalog of architectural properties against it: state isolation between
//! environments, multi-AZ networking, cluster hardening, platform add-ons,
//! compliance resources and delivery workflows.
//!
//! Properties that range over environments, AZ layouts or node group records
//! are sampled with proptest; the rest are evaluated once.

pub mod blocks;
pub mod config;
pub mod content;
pub mod error;
pub mod harness;
pub mod model;
pub mod properties;
pub mod workspace;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use content::Content;
pub use error::{VerifyError, VerifyResult};
pub use harness::{Sampled, Sampler};
pub use model::{AzCase, Category, Environment, EnvironmentProfile, NodeGroupSpec, Taint};
pub use properties::{
    CheckOutcome, CheckStatus, FailureKind, Property, PropertyRunner, ReportSink, RunOptions,
    Verdict, VerifyReport,
};
pub use workspace::{discover_root, Workspace};
