//! Chart archive extraction and bundle file generation for helm2bundle.
//!
//! # Pipeline
//!
//! ```text
//! helm2bundle CHARTFILE
//!   1. Overwrite check ── apb.yml / Dockerfile must not exist (skip with --force)
//!   2. Extract         ── gzip → tar scan for */Chart.yaml and */values.yaml
//!   3. Descriptor      ── ServiceBundleDescriptor::from_extraction()
//!   4. Dockerfile      ── DockerfileGenerator::render()
//!   5. Write           ── apb.yml + Dockerfile in the working directory
//! ```
//!
//! # Archive scan
//!
//! The archive is read as a stream, one member at a time, in whatever order
//! the members were packed:
//! - `*/Chart.yaml` is parsed for `name`, `description`, `icon`
//! - `*/values.yaml` is kept verbatim as the default for the `values` parameter
//! - scanning stops once both are captured; the rest of the archive is never read
//! - nested charts (`mychart/charts/*/Chart.yaml`) do not match

pub mod archive;
pub mod descriptor;
pub mod dockerfile;
pub mod output;

pub use archive::{ExtractError, ExtractionResult, MissingMember, extract_chart};
pub use descriptor::ServiceBundleDescriptor;
pub use dockerfile::DockerfileGenerator;
