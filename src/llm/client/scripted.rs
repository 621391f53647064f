//! 测试用的脚本化传输层

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::client::error::TransportError;
use crate::llm::client::providers::ModelTransport;
use crate::llm::client::types::{ModelRequest, ModelResponse};

/// 按顺序返回预设结果；脚本用完后返回空响应
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ModelResponse, TransportError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<ModelResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 每个回答都是一个文本块
    pub fn from_texts(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|text| Ok(ModelResponse::from_text(*text)))
                .collect(),
        )
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn send(&self, request: &ModelRequest) -> Result<ModelResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ModelResponse::default()))
    }
}
