//! Streamed conversation turn
//!
//! Produces the event sequence of one turn:
//!
//! ```text
//! stage1_start, stage1_complete,
//! stage2_start, stage2_complete,
//! stage3_start, stage3_complete,
//! [title_complete]            (first turn only)
//! complete
//! ```
//!
//! or a prefix of it followed by a single `error`. The title is generated
//! concurrently with the stages and only awaited after stage 3.

use crate::ports::progress::NoProgress;
use crate::use_cases::send_message::SendMessageUseCase;
use async_stream::stream;
use council_domain::{
    CouncilEvent, CouncilMetadata, Question, Stage3Result, TitlePayload, aggregate_rankings,
};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::{info, warn};

const NOT_FOUND_MESSAGE: &str = "Conversation not found";

pub(crate) fn council_events(
    use_case: Arc<SendMessageUseCase>,
    conversation_id: String,
    question: Question,
    is_first: bool,
) -> BoxStream<'static, CouncilEvent> {
    Box::pin(stream! {
        let conversations = Arc::clone(&use_case.conversations);
        let council = Arc::clone(&use_case.council);

        match conversations
            .add_user_message(&conversation_id, question.content())
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                yield CouncilEvent::error(NOT_FOUND_MESSAGE);
                return;
            }
            Err(e) => {
                warn!("Stream error in {}: {}", conversation_id, e);
                yield CouncilEvent::error(e.to_string());
                return;
            }
        }

        let title_task = if is_first {
            let titles = Arc::clone(&use_case.titles);
            let question = question.clone();
            Some(tokio::spawn(async move { titles.execute(&question).await }))
        } else {
            None
        };

        yield CouncilEvent::Stage1Start;
        let stage1 = council.collect_responses(&question, &NoProgress).await;
        yield CouncilEvent::Stage1Complete { data: stage1.clone() };

        yield CouncilEvent::Stage2Start;
        let (stage2, metadata) = if stage1.is_empty() {
            (Vec::new(), CouncilMetadata::default())
        } else {
            let (stage2, labels) = council.collect_rankings(&question, &stage1, &NoProgress).await;
            let aggregate = aggregate_rankings(&stage2, &labels);
            (stage2, CouncilMetadata::rankings(labels, aggregate))
        };
        yield CouncilEvent::Stage2Complete { data: stage2.clone(), metadata };

        yield CouncilEvent::Stage3Start;
        let stage3 = if stage1.is_empty() {
            Stage3Result::all_models_failed()
        } else {
            council.synthesize(&question, &stage1, &stage2, &NoProgress).await
        };
        yield CouncilEvent::Stage3Complete { data: stage3.clone() };

        if let Some(task) = title_task {
            let title = match task.await {
                Ok(title) => title,
                Err(e) => {
                    warn!("Title task failed: {}", e);
                    yield CouncilEvent::error(e.to_string());
                    return;
                }
            };
            match conversations.update_title(&conversation_id, &title).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    yield CouncilEvent::error(NOT_FOUND_MESSAGE);
                    return;
                }
                Err(e) => {
                    warn!("Stream error in {}: {}", conversation_id, e);
                    yield CouncilEvent::error(e.to_string());
                    return;
                }
            }
            yield CouncilEvent::TitleComplete { data: TitlePayload { title } };
        }

        match conversations
            .add_assistant_message(&conversation_id, stage1, stage2, stage3)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                yield CouncilEvent::error(NOT_FOUND_MESSAGE);
                return;
            }
            Err(e) => {
                warn!("Stream error in {}: {}", conversation_id, e);
                yield CouncilEvent::error(e.to_string());
                return;
            }
        }

        info!("Completed streamed turn in conversation {}", conversation_id);
        yield CouncilEvent::Complete;
    })
}
