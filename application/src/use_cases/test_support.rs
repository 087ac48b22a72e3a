//! Scripted test doubles for the gateway and answer ports.

use crate::ports::answerer::{AnswerError, AnswerPort};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use subquery_domain::Model;

/// A prompt seen by the scripted gateway
#[derive(Debug, Clone)]
pub struct RecordedPrompt {
    pub model: String,
    pub system_prompt: String,
    pub prompt: String,
}

/// Gateway that replies from a fixed script, in order
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    prompts: Arc<Mutex<Vec<RecordedPrompt>>>,
}

impl ScriptedGateway {
    pub fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    fn session(&self, model: &Model, system_prompt: &str) -> Box<dyn LlmSession> {
        Box::new(ScriptedSession {
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            replies: Arc::clone(&self.replies),
            prompts: Arc::clone(&self.prompts),
        })
    }
}

struct ScriptedSession {
    model: Model,
    system_prompt: String,
    replies: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    prompts: Arc<Mutex<Vec<RecordedPrompt>>>,
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(RecordedPrompt {
            model: self.model.to_string(),
            system_prompt: self.system_prompt.clone(),
            prompt: content.to_string(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, system_prompt))
    }
}

/// One scripted reply of the answerer
#[derive(Debug, Clone)]
pub enum Step {
    Ok(&'static str),
    Fail(&'static str),
    /// Reply after a delay
    Delayed(u64, &'static str),
    /// Never reply within any reasonable timeout
    Hang,
    /// Panic inside the answerer
    Panic,
}

/// Answerer that replies per sub-question from a script
#[derive(Default)]
pub struct ScriptedAnswerer {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedAnswerer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, sub_question: &str, steps: Vec<Step>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(sub_question.to_string(), VecDeque::from(steps));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, sub_question: &str) -> usize {
        self.calls().iter().filter(|c| *c == sub_question).count()
    }
}

#[async_trait]
impl AnswerPort for ScriptedAnswerer {
    async fn answer(&self, sub_question: &str) -> Result<String, AnswerError> {
        self.calls.lock().unwrap().push(sub_question.to_string());
        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(sub_question)
            .and_then(|steps| steps.pop_front());

        match step {
            Some(Step::Ok(text)) => Ok(text.to_string()),
            Some(Step::Fail(msg)) => Err(AnswerError::Other(msg.to_string())),
            Some(Step::Delayed(ms, text)) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(text.to_string())
            }
            Some(Step::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok("too late".to_string())
            }
            Some(Step::Panic) => panic!("answerer panicked on {}", sub_question),
            None => Err(AnswerError::Other(format!("unscripted: {}", sub_question))),
        }
    }
}
