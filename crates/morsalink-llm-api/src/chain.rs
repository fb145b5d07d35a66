use std::sync::Arc;

use morsalink_types::Message;

use crate::client::LlmClient;

/// Result of walking the fallback chain once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    Answered { provider: String, text: String },
    /// Every provider failed or had nothing to say; one entry per provider
    Exhausted { failures: Vec<(String, String)> },
}

impl ChainOutcome {
    /// The answer text, or `apology` when the chain came up empty
    pub fn text_or(self, apology: &str) -> String {
        match self {
            ChainOutcome::Answered { text, .. } => text,
            ChainOutcome::Exhausted { .. } => apology.to_string(),
        }
    }

    pub fn provider(&self) -> Option<&str> {
        match self {
            ChainOutcome::Answered { provider, .. } => Some(provider),
            ChainOutcome::Exhausted { .. } => None,
        }
    }
}

/// Ordered list of providers tried one after another.
///
/// No retries and no memory between calls: a provider that failed on the
/// previous request is tried again on the next one.
#[derive(Clone, Default)]
pub struct FallbackChain {
    providers: Vec<Arc<dyn LlmClient>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Arc<dyn LlmClient>>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Arc<dyn LlmClient>) {
        self.providers.push(provider);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub async fn answer(&self, messages: &[Message]) -> ChainOutcome {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.answer(messages).await {
                Ok(text) if !text.trim().is_empty() => {
                    log::info!("answered by {}", provider.name());
                    return ChainOutcome::Answered {
                        provider: provider.name().to_string(),
                        text,
                    };
                }
                Ok(_) => {
                    log::info!("{} had no answer, falling back", provider.name());
                    failures.push((provider.name().to_string(), "empty answer".to_string()));
                }
                Err(e) => {
                    log::warn!("{} failed, falling back: {}", provider.name(), e);
                    failures.push((provider.name().to_string(), e.to_string()));
                }
            }
        }

        ChainOutcome::Exhausted { failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Reply(&'static str),
        Fail,
    }

    struct Scripted {
        name: &'static str,
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self { name, behaviour, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl LlmClient for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn answer(&self, _messages: &[Message]) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Reply(text) => Ok(text.to_string()),
                Behaviour::Fail => Err(ProviderError::Status {
                    provider: self.name,
                    status: 500,
                    body: "boom".into(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_first_answer_wins() {
        let first = Scripted::new("first", Behaviour::Reply("one"));
        let second = Scripted::new("second", Behaviour::Reply("two"));
        let chain = FallbackChain::new(vec![first.clone() as Arc<dyn LlmClient>, second.clone()]);

        let outcome = chain.answer(&[Message::user("q")]).await;
        assert_eq!(outcome, ChainOutcome::Answered { provider: "first".into(), text: "one".into() });
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_error_and_blank_fall_through() {
        let failing = Scripted::new("failing", Behaviour::Fail);
        let blank = Scripted::new("blank", Behaviour::Reply("  "));
        let last = Scripted::new("last", Behaviour::Reply("finally"));
        let chain = FallbackChain::new(vec![failing.clone() as Arc<dyn LlmClient>, blank.clone(), last]);

        let outcome = chain.answer(&[Message::user("q")]).await;
        assert_eq!(outcome.provider(), Some("last"));
        assert_eq!(outcome.text_or("sorry"), "finally");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(blank.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausted_uses_apology() {
        let chain = FallbackChain::new(vec![Scripted::new("failing", Behaviour::Fail) as Arc<dyn LlmClient>]);
        let outcome = chain.answer(&[Message::user("q")]).await;

        match &outcome {
            ChainOutcome::Exhausted { failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].0, "failing");
                assert!(failures[0].1.contains("500"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(outcome.text_or("sorry"), "sorry");
    }

    #[tokio::test]
    async fn test_no_memory_between_requests() {
        let failing = Scripted::new("failing", Behaviour::Fail);
        let chain = FallbackChain::new(vec![failing.clone() as Arc<dyn LlmClient>]);

        chain.answer(&[Message::user("q")]).await;
        chain.answer(&[Message::user("q")]).await;
        assert_eq!(failing.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhausted() {
        let chain = FallbackChain::default();
        assert!(chain.is_empty());
        assert_eq!(
            chain.answer(&[Message::user("q")]).await,
            ChainOutcome::Exhausted { failures: vec![] }
        );
    }
}
