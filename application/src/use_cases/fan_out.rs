//! Parallel fan-out of one prompt to many models.

use crate::ports::llm_gateway::InferenceGateway;
use crate::ports::progress::ProgressNotifier;
use council_domain::{ChatMessage, CouncilStage, Model, ModelReply};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Send the same messages to every model concurrently.
///
/// Returns one entry per input model, in input order, whatever order the
/// replies arrived in. A model that failed (or whose task panicked) maps to
/// `None`. Never fails as a whole.
pub async fn query_all(
    gateway: &Arc<dyn InferenceGateway>,
    models: &[Model],
    messages: &[ChatMessage],
    timeout: Duration,
    stage: CouncilStage,
    progress: &dyn ProgressNotifier,
) -> Vec<(Model, Option<ModelReply>)> {
    let mut join_set = JoinSet::new();

    for (index, model) in models.iter().enumerate() {
        let gateway = Arc::clone(gateway);
        let model = model.clone();
        let messages = messages.to_vec();

        join_set.spawn(async move {
            let reply = gateway.query(&model, &messages, timeout).await;
            (index, reply)
        });
    }

    let mut slots: Vec<Option<ModelReply>> = vec![None; models.len()];

    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((index, reply)) => {
                let model = &models[index];
                let success = reply.is_some();
                if success {
                    debug!("Model {} responded", model);
                } else {
                    warn!("Model {} did not respond", model);
                }
                progress.on_task_complete(stage, model, success);
                slots[index] = reply;
            }
            Err(e) => {
                warn!("Task join error: {}", e);
            }
        }
    }

    models.iter().cloned().zip(slots).collect()
}
