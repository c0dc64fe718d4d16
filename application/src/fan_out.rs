//! Parallel fan-out executor
//!
//! Issues one gateway call per model concurrently and joins ALL of them
//! before returning. A per-call failure is captured into that model's
//! result slot; nothing here aborts the batch, and no call is cancelled
//! because a sibling finished first.

use crate::ports::llm_gateway::LlmGateway;
use council_domain::{Message, Model, ModelReply, ModelResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::warn;

/// Query every model in `models` concurrently with the same messages
///
/// Returns one [`ModelResult`] per input model, in model-list position
/// order. Arrival order is never observable: results land in index-keyed
/// slots while the join loop drains completions as they come.
pub async fn fan_out<G: LlmGateway + 'static>(
    gateway: &Arc<G>,
    models: &[Model],
    messages: &[Message],
    timeout: Duration,
) -> Vec<ModelResult> {
    if models.is_empty() {
        return Vec::new();
    }

    let messages: Arc<[Message]> = messages.into();
    let mut join_set = JoinSet::new();

    for (index, model) in models.iter().cloned().enumerate() {
        let gateway = Arc::clone(gateway);
        let messages = Arc::clone(&messages);

        join_set.spawn(async move {
            let reply = match gateway.query(&model, &messages, timeout).await {
                Ok(completion) => ModelReply::Content {
                    text: completion.content,
                    usage: completion.usage,
                },
                Err(e) => ModelReply::Error {
                    message: e.to_string(),
                    usage: e.usage(),
                },
            };
            (index, ModelResult { model, reply })
        });
    }

    let mut slots: Vec<Option<ModelResult>> = models.iter().map(|_| None).collect();

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => warn!("fan-out task join error: {}", e),
        }
    }

    // A slot stays empty only if its task panicked or was aborted
    slots
        .into_iter()
        .zip(models)
        .map(|(slot, model)| {
            slot.unwrap_or_else(|| ModelResult {
                model: model.clone(),
                reply: ModelReply::Error {
                    message: "query task failed before completion".to_string(),
                    usage: Default::default(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::testing::MockGateway;
    use council_domain::TokenUsage;

    fn completion(text: &str) -> Result<crate::ports::ChatCompletion, GatewayError> {
        Ok(crate::ports::ChatCompletion {
            content: text.to_string(),
            usage: TokenUsage::new(1, 2, 3),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_follow_input_order_not_arrival_order() {
        let gateway = MockGateway::new();
        gateway.script("slow", completion("slow answer"));
        gateway.script("fast", completion("fast answer"));
        gateway.set_delay("slow", Duration::from_millis(500));

        let gateway = Arc::new(gateway);
        let models = vec![Model::new("slow"), Model::new("fast")];
        let messages = vec![Message::user("q")];

        let results = fan_out(&gateway, &models, &messages, Duration::from_secs(5)).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].model.as_str(), "slow");
        assert_eq!(results[1].model.as_str(), "fast");
        assert!(matches!(
            &results[0].reply,
            ModelReply::Content { text, .. } if text == "slow answer"
        ));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_batch() {
        let gateway = MockGateway::new();
        gateway.script("ok", completion("fine"));
        gateway.script("broken", Err(GatewayError::Timeout));

        let gateway = Arc::new(gateway);
        let models = vec![Model::new("ok"), Model::new("broken")];

        let results = fan_out(&gateway, &models, &[Message::user("q")], Duration::from_secs(5)).await;

        assert!(matches!(results[0].reply, ModelReply::Content { .. }));
        assert!(matches!(
            &results[1].reply,
            ModelReply::Error { message, .. } if message == "Request timeout"
        ));
    }

    #[tokio::test]
    async fn test_empty_model_list_returns_empty() {
        let gateway = Arc::new(MockGateway::new());
        let results = fan_out(&gateway, &[], &[Message::user("q")], Duration::from_secs(5)).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_failure_keeps_usage() {
        let gateway = MockGateway::new();
        gateway.script(
            "m",
            Err(GatewayError::EmptyResponse {
                usage: TokenUsage::new(7, 0, 7),
            }),
        );

        let gateway = Arc::new(gateway);
        let results = fan_out(
            &gateway,
            &[Model::new("m")],
            &[Message::user("q")],
            Duration::from_secs(5),
        )
        .await;

        match &results[0].reply {
            ModelReply::Error { usage, .. } => assert_eq!(usage.prompt_tokens, 7),
            other => panic!("expected error reply, got {other:?}"),
        }
    }
}
