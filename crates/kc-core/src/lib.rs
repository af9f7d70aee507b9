//! KubeClaw core: natural-language requests to explained kubectl results.
//!
//! One request flows through three stages: the synthesizer asks a
//! completion service for a single command, the executor runs it (and
//! collects describe/log diagnostics for degraded resources), and the
//! explainer either summarizes created resources or asks the completion
//! service what went wrong. `CompletionService` and `CommandRunner` are the
//! seams to the model and the cluster; `mock` provides scripted doubles.

pub mod completion;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod explainer;
pub mod heuristics;
pub mod mock;
pub mod pipeline;
pub mod prompts;
pub mod runner;
pub mod synthesizer;
pub mod types;

// Re-export key types for convenience
pub use completion::CompletionService;
pub use diagnostics::DiagnosticCollector;
pub use error::{
    CompletionError, ExecutionError, ExplanationError, PipelineError, SynthesisError,
};
pub use executor::{CommandExecutor, Execution};
pub use explainer::ResultExplainer;
pub use mock::{MockCompletion, MockRunner};
pub use pipeline::{Pipeline, PipelineConfig};
pub use prompts::PromptTemplates;
pub use runner::{CommandRunner, ProcessRunner, RunOutput};
pub use synthesizer::CommandSynthesizer;
pub use types::{
    Command, DiagnosticBundle, DiagnosticKind, DiagnosticSection, ExecutionResult, Explanation,
    ExplanationSource, PipelineOutcome, Request, ResourceStatus, ResultTag,
};
