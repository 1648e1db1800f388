use std::sync::Arc;

use super::VoteController;
use crate::AuthContext;
use crate::NoopObserver;
use crate::SyncConfig;
use crate::Tally;
use crate::TargetRef;
use crate::VoteObserver;
use crate::VoteRegistry;
use crate::VoteService;
use crate::VoteSlot;
use crate::VoteState;
use crate::VoteView;

pub struct VoteControllerBuilder<S: VoteService, A: AuthContext> {
    target: TargetRef,
    service: Arc<S>,
    auth: Arc<A>,
    initial: VoteView,
    observer: Arc<dyn VoteObserver>,
    settings: SyncConfig,
    registry: Option<Arc<VoteRegistry>>,
}

impl<S: VoteService, A: AuthContext> VoteControllerBuilder<S, A> {
    /// Create a new builder with default settings, no vote held and a zero tally
    pub fn new(
        target: TargetRef,
        service: Arc<S>,
        auth: Arc<A>,
    ) -> Self {
        Self {
            target,
            service,
            auth,
            initial: VoteView::default(),
            observer: Arc::new(NoopObserver),
            settings: SyncConfig::default(),
            registry: None,
        }
    }

    /// Seed from server-supplied card data
    pub fn initial(
        mut self,
        state: VoteState,
        tally: Tally,
    ) -> Self {
        self.initial = VoteView::new(state, tally);
        self
    }

    pub fn observer(
        mut self,
        observer: Arc<dyn VoteObserver>,
    ) -> Self {
        self.observer = observer;
        self
    }

    /// Completely replaces the default sync settings
    pub fn settings(
        mut self,
        settings: SyncConfig,
    ) -> Self {
        self.settings = settings;
        self
    }

    /// Share state with every other controller of the same target in `registry`.
    ///
    /// If the registry already tracks the target, its state wins over
    /// [`initial`](Self::initial).
    pub fn registry(
        mut self,
        registry: Arc<VoteRegistry>,
    ) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> VoteController<S, A> {
        let slot = match &self.registry {
            Some(registry) => registry.slot(self.target, self.initial),
            None => Arc::new(VoteSlot::new(self.initial)),
        };

        VoteController {
            target: self.target,
            slot,
            service: self.service,
            auth: self.auth,
            observer: self.observer,
            settings: self.settings,
        }
    }
}
