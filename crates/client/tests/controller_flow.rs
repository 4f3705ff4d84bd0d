use async_trait::async_trait;
use review_client::{
    BackendError, BillingKind, ClientConfig, GenerationController, GenerationFailure,
    GenerationPhase, PhaseReporter, ReviewBackend, ReviewForm, SubmitOutcome,
};
use review_protocol::{GenerationRequest, GenerationSuccess, StreamPhase};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

fn long_answer() -> String {
    "本件の争点について、判例の立場を踏まえて検討する。".repeat(8)
}

fn form() -> ReviewForm {
    ReviewForm::existing(long_answer(), "q-2024-minpo-1")
}

fn config() -> ClientConfig {
    ClientConfig::with_base_url("http://backend.invalid")
}

fn controller(backend: impl ReviewBackend + 'static) -> Arc<GenerationController> {
    Arc::new(GenerationController::new(Arc::new(backend), config()))
}

/// Reports the evaluation stage, then waits for the test before resolving.
struct GatedBackend {
    gate: Arc<Notify>,
}

#[async_trait]
impl ReviewBackend for GatedBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError> {
        progress.report(StreamPhase::Evaluating);
        self.gate.notified().await;
        Ok(GenerationSuccess {
            review_id: "rv-1".to_string(),
        })
    }
}

/// Resolves immediately with a fresh review id per call.
struct ImmediateBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl ReviewBackend for ImmediateBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError> {
        progress.report(StreamPhase::Evaluating);
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerationSuccess {
            review_id: format!("rv-{call}"),
        })
    }
}

/// Never resolves; the controller must time out or be cancelled.
struct HangingBackend;

#[async_trait]
impl ReviewBackend for HangingBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        _progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError> {
        std::future::pending().await
    }
}

/// Fails every call with a fixed status and detail.
struct FailingBackend {
    status: u16,
    detail: &'static str,
}

#[async_trait]
impl ReviewBackend for FailingBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        _progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError> {
        Err(BackendError::Status {
            status: self.status,
            detail: self.detail.to_string(),
        })
    }
}

/// First call hangs until cancelled, second call succeeds.
struct LastWinsBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl ReviewBackend for LastWinsBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        _progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
            unreachable!("the superseded call must be dropped, not resolved");
        }
        Ok(GenerationSuccess {
            review_id: "rv-second".to_string(),
        })
    }
}

#[tokio::test]
async fn successful_generation_walks_both_stages() {
    let gate = Arc::new(Notify::new());
    let controller = controller(GatedBackend {
        gate: Arc::clone(&gate),
    });
    let mut phases = controller.phase_watch();

    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit(&form()).await })
    };

    phases
        .wait_for(|phase| *phase == GenerationPhase::Evaluating)
        .await
        .expect("phase channel open");
    assert!(controller.is_in_flight());

    gate.notify_one();
    let outcome = task.await.expect("submit task");

    assert_eq!(
        outcome,
        SubmitOutcome::Completed(GenerationSuccess {
            review_id: "rv-1".to_string()
        })
    );
    assert_eq!(controller.phase(), GenerationPhase::Done);
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn exceeding_the_budget_is_a_client_timeout() {
    let mut config = config();
    config.request_timeout = Duration::from_millis(50);
    config.connect_timeout = Duration::from_millis(10);
    let controller = GenerationController::new(Arc::new(HangingBackend), config);

    let outcome = controller.submit(&form()).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(GenerationFailure::ClientTimeout)
    );
    assert_eq!(controller.phase(), GenerationPhase::Failed);
}

#[tokio::test]
async fn cancel_resolves_the_submit_quietly() {
    let controller = controller(HangingBackend);
    let mut phases = controller.phase_watch();

    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit(&form()).await })
    };

    phases
        .wait_for(|phase| *phase == GenerationPhase::Analyzing)
        .await
        .expect("phase channel open");
    controller.cancel();

    let outcome = task.await.expect("submit task");
    assert_eq!(outcome, SubmitOutcome::Cancelled);
    assert_eq!(controller.phase(), GenerationPhase::Cancelled);
}

#[tokio::test]
async fn second_submit_supersedes_the_first() {
    let controller = controller(LastWinsBackend {
        calls: AtomicUsize::new(0),
    });
    let mut phases = controller.phase_watch();

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit(&form()).await })
    };
    phases
        .wait_for(|phase| *phase == GenerationPhase::Analyzing)
        .await
        .expect("phase channel open");

    let second = controller.submit(&form()).await;
    let first = first.await.expect("first submit task");

    // Only the second request's result is observable; the first resolves
    // as cancelled and never as success or failure.
    assert_eq!(first, SubmitOutcome::Cancelled);
    assert_eq!(
        second,
        SubmitOutcome::Completed(GenerationSuccess {
            review_id: "rv-second".to_string()
        })
    );
    assert_eq!(controller.phase(), GenerationPhase::Done);
}

#[tokio::test]
async fn resubmit_after_a_settled_request_succeeds() {
    let controller = controller(ImmediateBackend {
        calls: AtomicUsize::new(0),
    });

    let first = controller.submit(&form()).await;
    assert_eq!(
        first,
        SubmitOutcome::Completed(GenerationSuccess {
            review_id: "rv-0".to_string()
        })
    );

    let second = controller.submit(&form()).await;
    assert_eq!(
        second,
        SubmitOutcome::Completed(GenerationSuccess {
            review_id: "rv-1".to_string()
        })
    );
    assert_eq!(controller.phase(), GenerationPhase::Done);
}

#[tokio::test]
async fn quota_exhaustion_asks_for_a_ticket() {
    let controller = controller(FailingBackend {
        status: 429,
        detail: "講評の作成回数が上限に達しました",
    });

    let outcome = controller.submit(&form()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(GenerationFailure::BillingRequired(BillingKind::Ticket))
    );
    assert_eq!(controller.phase(), GenerationPhase::Failed);
}

#[tokio::test]
async fn missing_plan_asks_for_plan_selection() {
    let controller = controller(FailingBackend {
        status: 402,
        detail: "プランが未登録です",
    });

    let outcome = controller.submit(&form()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(GenerationFailure::BillingRequired(BillingKind::Plan))
    );
}

#[tokio::test]
async fn upstream_timeout_is_distinct_from_the_client_budget() {
    let controller = controller(FailingBackend {
        status: 500,
        detail: "upstream model request timed out",
    });

    let outcome = controller.submit(&form()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(GenerationFailure::ServerTimeout)
    );
}

#[tokio::test]
async fn unclassified_failures_carry_the_backend_detail() {
    let controller = controller(FailingBackend {
        status: 500,
        detail: "internal error",
    });

    let outcome = controller.submit(&form()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(GenerationFailure::Generic("internal error".to_string()))
    );
}
