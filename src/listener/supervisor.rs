use {
    super::{Reporter, TransferSource, TransferSubscription},
    std::time::Duration,
    tokio::time::sleep,
    tracing::{info, warn},
};

/// Delay before retrying a failed establishment attempt.
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(15);
/// Delay before re-establishing after an active subscription closed.
pub const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Disconnected,
    Connecting,
    Active,
    Terminated,
}

/// Owns the single live subscription and keeps it alive: establish, feed
/// events to the reporter, tear down on failure, retry forever with a fixed
/// delay. Transport and configuration errors never escape this type; the
/// only way out is the shutdown signal.
pub struct Supervisor<S: TransferSource> {
    source: S,
    state: ListenerState,
    subscription: Option<S::Subscription>,
    reporter: Option<Reporter>,
    attempts: u64,
    retry_after: Option<Duration>,
}

impl<S: TransferSource> Supervisor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ListenerState::Disconnected,
            subscription: None,
            reporter: None,
            attempts: 0,
            retry_after: None,
        }
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Establishment attempts made so far, successful or not.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Release the subscription handle, the registered reporter and any
    /// pending retry delay. Safe to call any number of times.
    pub fn release(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
        }
        self.reporter = None;
        self.retry_after = None;
    }

    /// Advance the state machine by one transition: attempt an establishment
    /// when disconnected, or wait for the next event when active. Returns
    /// the report line when the transition surfaced a relevant transfer.
    pub async fn step(&mut self) -> Option<String> {
        match self.state {
            ListenerState::Terminated => None,
            ListenerState::Disconnected | ListenerState::Connecting => {
                if let Some(delay) = self.retry_after.take() {
                    sleep(delay).await;
                }
                self.state = ListenerState::Connecting;
                self.attempts += 1;
                match self.source.connect().await {
                    Ok((subscription, target)) => {
                        info!("subscription established for {}", target.contract);
                        self.subscription = Some(subscription);
                        self.reporter = Some(Reporter::new(target));
                        self.state = ListenerState::Active;
                    }
                    Err(e) => {
                        warn!(
                            "could not establish subscription: {e}; retrying in {}s",
                            CONNECT_RETRY_DELAY.as_secs()
                        );
                        self.release();
                        self.retry_after = Some(CONNECT_RETRY_DELAY);
                        self.state = ListenerState::Disconnected;
                    }
                }
                None
            }
            ListenerState::Active => {
                let event = match self.subscription.as_mut() {
                    Some(subscription) => subscription.next_event().await,
                    None => None,
                };
                match event {
                    Some(event) => {
                        let report = self.reporter.as_ref()?.observe(&event);
                        if let Some(line) = &report {
                            info!("{line}");
                        }
                        report
                    }
                    None => {
                        warn!(
                            "subscription closed, reconnecting in {}s",
                            RESUBSCRIBE_DELAY.as_secs()
                        );
                        self.release();
                        self.retry_after = Some(RESUBSCRIBE_DELAY);
                        self.state = ListenerState::Disconnected;
                        None
                    }
                }
            }
        }
    }

    /// Drive the state machine until `shutdown` resolves, then release
    /// everything. In-flight work is dropped, not drained.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.step() => {}
            }
        }
        info!("termination signal received, shutting down listener");
        self.release();
        self.state = ListenerState::Terminated;
    }
}
