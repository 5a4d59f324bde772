//! Ordered chain of redirect resolvers with a terminal fallback.
//!
//! Stages are consulted in the order they were added; the first hit wins.
//! A [`StorageFault`] stops the chain immediately and is never treated as a miss.
//! When every stage misses, the terminal handler answers.

use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, error};

use crate::application::resolver::{RedirectResolver, Resolution};
use crate::error::StorageFault;

/// Response produced by the terminal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Last stage of the chain. It always answers.
pub trait TerminalHandler: Send + Sync {
    fn respond(&self, path: &str) -> TerminalResponse;
}

/// Terminal handler serving a fixed page with `200 OK`.
pub struct DefaultPage {
    body: String,
}

impl DefaultPage {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl TerminalHandler for DefaultPage {
    fn respond(&self, _path: &str) -> TerminalResponse {
        TerminalResponse {
            status: StatusCode::OK,
            body: self.body.clone(),
        }
    }
}

/// What the chain decided for a request path.
#[derive(Debug)]
pub enum ChainOutcome {
    Redirect(String),
    Fault(StorageFault),
    Terminal(TerminalResponse),
}

/// Resolution chain (first hit wins, faults are fatal).
pub struct ResolutionChain {
    stages: Vec<Arc<dyn RedirectResolver>>,
    terminal: Arc<dyn TerminalHandler>,
}

impl ResolutionChain {
    /// Creates a chain with no stages; every request goes to `terminal`.
    pub fn new<T: TerminalHandler + 'static>(terminal: T) -> Self {
        Self {
            stages: Vec::new(),
            terminal: Arc::new(terminal),
        }
    }

    /// Appends a stage after the existing ones.
    pub fn with_stage<R: RedirectResolver + 'static>(self, stage: R) -> Self {
        self.with_stage_arc(Arc::new(stage))
    }

    /// Appends an Arc-wrapped stage after the existing ones.
    pub fn with_stage_arc(mut self, stage: Arc<dyn RedirectResolver>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in precedence order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Resolves `path` through the stages, falling back to the terminal handler.
    pub async fn handle(&self, path: &str) -> ChainOutcome {
        for stage in &self.stages {
            match stage.resolve(path).await {
                Ok(Resolution::Hit(url)) => {
                    debug!("{} -> {} (stage: {})", path, url, stage.name());
                    return ChainOutcome::Redirect(url);
                }
                Ok(Resolution::Miss) => {
                    debug!("{} missed in stage {}", path, stage.name());
                }
                Err(fault) => {
                    error!("Stage {} failed for {}: {}", stage.name(), path, fault);
                    return ChainOutcome::Fault(fault);
                }
            }
        }

        ChainOutcome::Terminal(self.terminal.respond(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::resolver::StaticResolver;
    use crate::domain::entities::{RedirectRecord, RedirectTable};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolver that counts calls and returns a fixed outcome.
    struct ScriptedResolver {
        outcome: fn() -> Result<Resolution, StorageFault>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedResolver {
        fn new(outcome: fn() -> Result<Resolution, StorageFault>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    outcome,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl RedirectResolver for ScriptedResolver {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn resolve(&self, _path: &str) -> Result<Resolution, StorageFault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn static_stage(name: &str, records: Vec<RedirectRecord>) -> StaticResolver {
        StaticResolver::new(name, RedirectTable::build(records).unwrap())
    }

    fn fallback() -> DefaultPage {
        DefaultPage::new("Fallback handler called")
    }

    #[tokio::test]
    async fn test_first_stage_takes_precedence() {
        let chain = ResolutionChain::new(fallback())
            .with_stage(static_stage(
                "store",
                vec![RedirectRecord::new("/a", "http://from-store")],
            ))
            .with_stage(static_stage(
                "file",
                vec![RedirectRecord::new("/a", "http://from-file")],
            ));

        match chain.handle("/a").await {
            ChainOutcome::Redirect(url) => assert_eq!(url, "http://from-store"),
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_miss_falls_through_to_next_stage() {
        let (first, first_calls) = ScriptedResolver::new(|| Ok(Resolution::Miss));
        let chain = ResolutionChain::new(fallback())
            .with_stage(first)
            .with_stage(static_stage(
                "file",
                vec![RedirectRecord::new("/b", "http://y")],
            ));

        match chain.handle("/b").await {
            ChainOutcome::Redirect(url) => assert_eq!(url, "http://y"),
            other => panic!("expected redirect, got {:?}", other),
        }
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fault_stops_the_chain() {
        let (failing, _) =
            ScriptedResolver::new(|| Err(StorageFault::BucketMissing("redirects".to_string())));
        let (later, later_calls) =
            ScriptedResolver::new(|| Ok(Resolution::Hit("http://never".to_string())));

        let chain = ResolutionChain::new(fallback())
            .with_stage(failing)
            .with_stage(later);

        let outcome = chain.handle("/a").await;

        assert!(matches!(
            outcome,
            ChainOutcome::Fault(StorageFault::BucketMissing(_))
        ));
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_terminal_answers_when_every_stage_misses() {
        let (first, first_calls) = ScriptedResolver::new(|| Ok(Resolution::Miss));
        let (second, second_calls) = ScriptedResolver::new(|| Ok(Resolution::Miss));

        let chain = ResolutionChain::new(fallback())
            .with_stage(first)
            .with_stage(second);

        match chain.handle("/unknown-path").await {
            ChainOutcome::Terminal(response) => {
                assert_eq!(response.status, StatusCode::OK);
                assert_eq!(response.body, "Fallback handler called");
            }
            other => panic!("expected terminal response, got {:?}", other),
        }
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_chain_uses_terminal() {
        let chain = ResolutionChain::new(fallback());

        assert!(chain.is_empty());
        assert!(matches!(
            chain.handle("/").await,
            ChainOutcome::Terminal(_)
        ));
    }

    #[tokio::test]
    async fn test_hit_skips_later_stages() {
        let (first, _) = ScriptedResolver::new(|| Ok(Resolution::Hit("http://x".to_string())));
        let (second, second_calls) = ScriptedResolver::new(|| Ok(Resolution::Miss));

        let chain = ResolutionChain::new(fallback())
            .with_stage(first)
            .with_stage(second);

        assert!(matches!(chain.handle("/a").await, ChainOutcome::Redirect(_)));
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.stage_names(), vec!["scripted", "scripted"]);
    }
}
