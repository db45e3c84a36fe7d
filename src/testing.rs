//! 测试替身：固定回复的故事 / 语音模型

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    ModelError, SpeechAudio, SpeechModelPort, SpeechRequest, StoryModelPort, StoryRequest,
};

/// 固定回复的故事模型，记录收到的请求
pub struct FakeStoryModel {
    reply: Option<String>,
    requests: Arc<Mutex<Vec<StoryRequest>>>,
}

impl FakeStoryModel {
    pub fn replying(story: &str) -> Self {
        Self {
            reply: Some(story.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<StoryRequest>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl StoryModelPort for FakeStoryModel {
    async fn write_story(&self, request: StoryRequest) -> Result<String, ModelError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().ok_or(ModelError::Api {
            code: 503,
            message: "model overloaded".to_string(),
        })
    }
}

/// 固定 PCM 的语音模型
pub struct FakeSpeechModel {
    pcm: Option<Vec<u8>>,
}

impl FakeSpeechModel {
    pub fn replying(pcm: Vec<u8>) -> Self {
        Self { pcm: Some(pcm) }
    }

    pub fn failing() -> Self {
        Self { pcm: None }
    }
}

#[async_trait]
impl SpeechModelPort for FakeSpeechModel {
    async fn synthesize(&self, _request: SpeechRequest) -> Result<SpeechAudio, ModelError> {
        let pcm = self
            .pcm
            .clone()
            .ok_or_else(|| ModelError::InvalidResponse("expected one audio part, got 0".to_string()))?;
        Ok(SpeechAudio {
            pcm,
            mime_type: Some("audio/L16;codec=pcm;rate=24000".to_string()),
        })
    }
}
