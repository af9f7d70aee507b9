//! E2E tests for the three result paths: clean, diagnosed, creation.

mod helpers;

use kc_core::{
    ExplanationSource, PipelineError, Request, ResourceStatus, ResultTag, SynthesisError,
};

use helpers::TestHarness;

#[tokio::test]
async fn e2e_list_all_pods_clean() {
    let h = TestHarness::with_replies(["kubectl get pods", "all pods healthy"]);
    h.kubectl("kubectl get pods", helpers::HEALTHY_PODS);

    let outcome = h.pipeline.run(Request::new("list all pods")).await.unwrap();

    assert_eq!(outcome.command.as_str(), "kubectl get pods");
    assert_eq!(outcome.result.tag, ResultTag::Clean);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.resource_statuses.len(), 3);
    assert_eq!(outcome.explanation.text, "all pods healthy");
    assert_eq!(h.runner.invocations(), vec!["kubectl get pods"]);

    // Explanation prompt carries the raw table and no diagnostic sections.
    let prompts = h.completion.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("redis-0"));
    assert!(!prompts[1].contains("--- Describe"));
}

#[tokio::test]
async fn e2e_degraded_namespace_collects_diagnostics() {
    let h = TestHarness::with_replies([
        "Here is the command:\nkubectl get pods -n staging\nThis lists pods in staging.",
        "The api pod is missing DATABASE_URL; worker-0 needs more memory.",
    ])
    .with_degraded_staging();

    let outcome = h
        .pipeline
        .run(Request::new("what's wrong in staging?"))
        .await
        .unwrap();

    assert_eq!(outcome.command.as_str(), "kubectl get pods -n staging");
    assert_eq!(outcome.result.tag, ResultTag::Diagnosed);
    assert_eq!(
        outcome.resource_statuses,
        vec![
            ResourceStatus::new("api-5c8d7f9b4-k2j3h", "CrashLoopBackOff"),
            ResourceStatus::new("api-5c8d7f9b4-m9n8b", "Running"),
            ResourceStatus::new("worker-0", "Pending"),
        ]
    );
    assert_eq!(
        outcome.diagnostics.resources(),
        vec!["api-5c8d7f9b4-k2j3h", "worker-0"]
    );

    // Main command, then describe + logs per degraded pod, all in staging.
    let invocations = h.runner.invocations();
    assert_eq!(
        invocations,
        vec![
            "kubectl get pods -n staging",
            "kubectl describe pod api-5c8d7f9b4-k2j3h -n staging",
            "kubectl logs api-5c8d7f9b4-k2j3h -n staging --tail=50",
            "kubectl describe pod worker-0 -n staging",
            "kubectl logs worker-0 -n staging --tail=50",
        ]
    );

    // Log retrieval failure is folded into the text sent for explanation.
    let explain_prompt = &h.completion.prompts()[1];
    assert!(explain_prompt.contains("--- Logs api-5c8d7f9b4-k2j3h ---\npanic: DATABASE_URL not set"));
    assert!(explain_prompt.contains("is waiting to start"));
    assert!(explain_prompt.contains("Insufficient memory"));
    assert_eq!(
        outcome.explanation.text,
        "The api pod is missing DATABASE_URL; worker-0 needs more memory."
    );
}

#[tokio::test]
async fn e2e_apply_summarized_without_model() {
    let h = TestHarness::with_replies(["kubectl apply -f x.yaml"]);
    h.kubectl(
        "kubectl apply -f x.yaml",
        "namespace/ns1 created\npod/p1 created\nWarning: pod p1 has no resource limits",
    );

    let outcome = h.pipeline.run(Request::new("apply x.yaml")).await.unwrap();

    assert_eq!(outcome.result.tag, ResultTag::Creation);
    assert_eq!(outcome.explanation.source, ExplanationSource::CreationSummary);
    assert_eq!(
        outcome.explanation.text,
        "Created: namespace/ns1 created, pod/p1 created"
    );
    assert_eq!(h.completion.call_count(), 1, "only synthesis hits the model");
}

#[tokio::test]
async fn e2e_refusal_aborts_before_execution() {
    let h = TestHarness::with_replies(["I cannot help with that"]);

    let err = h
        .pipeline
        .run(Request::new("delete the internet"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Synthesis(SynthesisError::NoCommand { .. })
    ));
    assert!(h.runner.invocations().is_empty());
}

#[tokio::test]
async fn e2e_runs_are_independent() {
    let h = TestHarness::with_replies([
        "kubectl get pods",
        "healthy",
        "kubectl get pods",
        "healthy",
    ]);
    h.kubectl("kubectl get pods", helpers::HEALTHY_PODS);

    let first = h.pipeline.run(Request::new("list all pods")).await.unwrap();
    let second = h.pipeline.run(Request::new("list all pods")).await.unwrap();

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.explanation, second.explanation);
    assert_eq!(first.resource_statuses, second.resource_statuses);
}
